//! Line-oriented layer scripts.
//!
//! ```text
//! # comments and blank lines are ignored
//! size 128 128
//! add circle rim 40
//! add checker board 16
//! op and
//! not
//! export gray combined.pgm
//! export channel g 200 green.ppm
//! ```
//!
//! Layer commands act on the selected layer, which is the most recently added
//! one unless `select <index>` says otherwise.

use std::path::{Path, PathBuf};

use crate::error::{PatternError, Result};
use crate::export::Channel;
use crate::generate::GeneratorKind;
use crate::image_io::{self, IoError};
use crate::layers::LayerOp;
use crate::layers::session::{Command, LayerSource, Session};

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Edit(Command),
    /// Add a layer from an image file.
    Load { name: String, file: PathBuf },
    ExportGray { file: PathBuf },
    ExportRgb {
        red: usize,
        green: usize,
        blue: usize,
        base: u8,
        file: PathBuf,
    },
    ExportChannel { channel: Channel, base: u8, file: PathBuf },
    List,
}

fn bad(reason: impl Into<String>) -> PatternError {
    PatternError::invalid_parameter(reason)
}

fn number<T: std::str::FromStr>(value: Option<&str>, what: &str) -> Result<T> {
    let value = word(value, what)?;
    value
        .parse()
        .map_err(|_| bad(format!("{what} is not a valid number: {value}")))
}

fn word<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str> {
    value.ok_or_else(|| bad(format!("missing {what}")))
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Step>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let step = match verb.to_ascii_lowercase().as_str() {
        "add" => parse_add(&mut words)?,
        "select" => Step::Edit(Command::Select(number(words.next(), "layer index")?)),
        "delete" => Step::Edit(Command::Delete),
        "rename" => {
            let name: Vec<&str> = words.by_ref().collect();
            if name.is_empty() {
                return Err(bad("missing new name"));
            }
            Step::Edit(Command::Rename(name.join(" ")))
        }
        "not" => Step::Edit(Command::ToggleNegation),
        "op" => {
            let text = word(words.next(), "operator")?;
            let op = LayerOp::parse(text).ok_or_else(|| bad(format!("unknown operator: {text}")))?;
            Step::Edit(Command::SetOp(op))
        }
        "up" => Step::Edit(Command::MoveUp),
        "down" => Step::Edit(Command::MoveDown),
        "size" => Step::Edit(Command::Resize {
            width: number(words.next(), "width")?,
            height: number(words.next(), "height")?,
        }),
        "list" => Step::List,
        "export" => parse_export(&mut words)?,
        other => return Err(bad(format!("unknown command: {other}"))),
    };

    if let Some(extra) = words.next() {
        return Err(bad(format!("unexpected argument: {extra}")));
    }
    Ok(Some(step))
}

fn parse_add<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Step> {
    let kind_word = word(words.next(), "layer kind")?;
    let name = word(words.next(), "layer name")?.to_string();

    if kind_word.eq_ignore_ascii_case("load") {
        let file = PathBuf::from(word(words.next(), "file name")?);
        return Ok(Step::Load { name, file });
    }

    let kind = GeneratorKind::from_name(kind_word)
        .ok_or_else(|| bad(format!("unknown layer kind: {kind_word}")))?;
    let source = match kind {
        GeneratorKind::Circle => LayerSource::Circle {
            radius: number(words.next(), "radius")?,
        },
        GeneratorKind::Triangle => LayerSource::Triangle,
        GeneratorKind::Checkerboard => LayerSource::Checkerboard {
            square_size: number(words.next(), "square size")?,
        },
        GeneratorKind::Maze => LayerSource::Maze {
            seed: words.next().map(|w| number(Some(w), "seed")).transpose()?,
        },
    };
    Ok(Step::Edit(Command::Add { name, source }))
}

fn parse_export<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Step> {
    let mode = word(words.next(), "export mode")?;
    let step = match mode.to_ascii_lowercase().as_str() {
        "gray" | "p5" => Step::ExportGray {
            file: PathBuf::from(word(words.next(), "file name")?),
        },
        "rgb" => Step::ExportRgb {
            red: number(words.next(), "red layer")?,
            green: number(words.next(), "green layer")?,
            blue: number(words.next(), "blue layer")?,
            base: number(words.next(), "base value")?,
            file: PathBuf::from(word(words.next(), "file name")?),
        },
        "channel" => {
            let text = word(words.next(), "channel")?;
            let channel = Channel::parse(text).ok_or_else(|| bad(format!("unknown channel: {text}")))?;
            Step::ExportChannel {
                channel,
                base: number(words.next(), "base value")?,
                file: PathBuf::from(word(words.next(), "file name")?),
            }
        }
        other => return Err(bad(format!("unknown export mode: {other}"))),
    };
    Ok(step)
}

/// Run every line of `script` against `session`. Loaded and exported file
/// names are resolved against `out_dir`.
///
/// Stops at the first failing line; the error carries its line number.
pub fn run(script: &str, session: &mut Session, out_dir: &Path) -> std::result::Result<(), IoError> {
    for (i, line) in script.lines().enumerate() {
        let line_no = i + 1;
        let at_line = |source: IoError| IoError::Script {
            line: line_no,
            source: Box::new(source),
        };
        let Some(step) = parse_line(line).map_err(|e| at_line(e.into()))? else {
            continue;
        };
        log::debug!("line {line_no}: {step:?}");
        execute(step, session, out_dir).map_err(at_line)?;
    }
    Ok(())
}

fn execute(step: Step, session: &mut Session, out_dir: &Path) -> std::result::Result<(), IoError> {
    match step {
        Step::Edit(command) => session.apply(command)?,
        Step::Load { name, file } => {
            let pattern = image_io::load_pattern(&out_dir.join(&file))?;
            let label = file.display().to_string();
            session.apply(Command::Add {
                name,
                source: LayerSource::Loaded { label, pattern },
            })?;
        }
        Step::ExportGray { file } => {
            let raster = session.export_grayscale()?;
            image_io::save_grayscale(&raster, &image_io::output_path(out_dir, &file.to_string_lossy())?)?;
        }
        Step::ExportRgb {
            red,
            green,
            blue,
            base,
            file,
        } => {
            let raster = session.export_rgb(red, green, blue, base)?;
            image_io::save_color(&raster, &image_io::output_path(out_dir, &file.to_string_lossy())?)?;
        }
        Step::ExportChannel { channel, base, file } => {
            let raster = session.export_channel(channel, base)?;
            image_io::save_color(&raster, &image_io::output_path(out_dir, &file.to_string_lossy())?)?;
        }
        Step::List => {
            for entry in session.listing() {
                println!("{entry}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_adds() {
        assert_eq!(
            parse_line("add circle rim 30").unwrap(),
            Some(Step::Edit(Command::Add {
                name: "rim".into(),
                source: LayerSource::Circle { radius: 30 },
            }))
        );
        assert_eq!(
            parse_line("  add MAZE walls 7 ").unwrap(),
            Some(Step::Edit(Command::Add {
                name: "walls".into(),
                source: LayerSource::Maze { seed: Some(7) },
            }))
        );
        assert_eq!(
            parse_line("add load logo logo.pgm").unwrap(),
            Some(Step::Load {
                name: "logo".into(),
                file: PathBuf::from("logo.pgm"),
            })
        );
    }

    #[test]
    fn parses_edits_and_exports() {
        assert_eq!(
            parse_line("op ^").unwrap(),
            Some(Step::Edit(Command::SetOp(LayerOp::Xor)))
        );
        assert_eq!(
            parse_line("rename outer ring").unwrap(),
            Some(Step::Edit(Command::Rename("outer ring".into())))
        );
        assert_eq!(
            parse_line("export channel G 200 g.ppm").unwrap(),
            Some(Step::ExportChannel {
                channel: Channel::Green,
                base: 200,
                file: PathBuf::from("g.ppm"),
            })
        );
    }

    #[test]
    fn skips_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # note").unwrap(), None);
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse_line("spin 3").is_err());
        assert!(parse_line("add circle rim").is_err());
        assert!(parse_line("add checker board zero").is_err());
        assert!(parse_line("op nand").is_err());
        assert!(parse_line("export rgb 0 1 2 300 out.ppm").is_err());
        assert!(parse_line("delete now").is_err());
        assert!(parse_line("op first").is_err());
    }

    #[test]
    fn missing_load_file_keeps_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&crate::layers::session::SessionConfig::default()).unwrap();
        let err = run("# header\nadd load logo absent.pgm\n", &mut session, dir.path()).unwrap_err();
        match err {
            IoError::Script { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(*source, IoError::Io { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(session.stack().is_empty());
    }
}
