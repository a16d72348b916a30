//! Editing session over a [`LayerStack`].
//!
//! Each interactive keystroke of a layer editor corresponds to one
//! [`Command`]; `Session::apply` runs it against the stack without touching a
//! terminal, so any front end (script, TUI, tests) drives the same state
//! machine.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Layer, LayerOp, LayerStack};
use crate::error::{PatternError, Result};
use crate::export::{self, Channel};
use crate::generate::{self, GeneratorKind};
use crate::pattern::Pattern;
use crate::raster::{ColorRaster, GrayRaster};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    /// Seed for mazes added without an explicit seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            seed: None,
        }
    }
}

/// Where a new layer's pattern comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerSource {
    Circle { radius: usize },
    Triangle,
    Checkerboard { square_size: usize },
    Maze { seed: Option<u64> },
    /// A pattern loaded by the caller, e.g. from a file.
    Loaded { label: String, pattern: Pattern },
}

impl LayerSource {
    fn suffix(&self) -> String {
        let kind = match self {
            LayerSource::Circle { .. } => GeneratorKind::Circle,
            LayerSource::Triangle => GeneratorKind::Triangle,
            LayerSource::Checkerboard { .. } => GeneratorKind::Checkerboard,
            LayerSource::Maze { .. } => GeneratorKind::Maze,
            LayerSource::Loaded { label, .. } => return format!(" (loaded: {label})"),
        };
        format!(" ({})", kind.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { name: String, source: LayerSource },
    Select(usize),
    CursorUp,
    CursorDown,
    Delete,
    Rename(String),
    ToggleNegation,
    SetOp(LayerOp),
    /// Swap the selected layer with the previous one.
    MoveUp,
    /// Swap the selected layer with the next one.
    MoveDown,
    /// Change the size used for layers added from now on.
    Resize { width: usize, height: usize },
}

pub struct Session {
    stack: LayerStack,
    cursor: usize,
    width: usize,
    height: usize,
    rng: StdRng,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        crate::pattern::check_dimensions(config.width, config.height)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            stack: LayerStack::new(),
            cursor: 0,
            width: config.width,
            height: config.height,
            rng,
        })
    }

    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    /// Index of the selected layer. Meaningless while the stack is empty.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Add { name, source } => {
                let label = format!("{name}{}", source.suffix());
                let pattern = self.build(source)?;
                self.cursor = self.stack.push(Layer::new(label, pattern));
            }
            Command::Select(index) => {
                self.stack.get(index)?;
                self.cursor = index;
            }
            Command::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Command::CursorDown => {
                if self.cursor + 1 < self.stack.len() {
                    self.cursor += 1;
                }
            }
            Command::Delete => {
                self.stack.remove(self.cursor)?;
                self.cursor = self.cursor.saturating_sub(1);
            }
            Command::Rename(name) => self.stack.rename(self.cursor, name)?,
            Command::ToggleNegation => {
                self.stack.toggle_negation(self.cursor)?;
            }
            Command::SetOp(op) => self.stack.set_op(self.cursor, op)?,
            Command::MoveUp => self.cursor = self.stack.move_earlier(self.cursor)?,
            Command::MoveDown => self.cursor = self.stack.move_later(self.cursor)?,
            Command::Resize { width, height } => {
                crate::pattern::check_dimensions(width, height)?;
                log::info!("layer size set to {width}x{height} (existing layers unchanged)");
                self.width = width;
                self.height = height;
            }
        }
        Ok(())
    }

    fn build(&mut self, source: LayerSource) -> Result<Pattern> {
        let (w, h) = (self.width, self.height);
        match source {
            LayerSource::Circle { radius } => generate::circle(w, h, radius),
            LayerSource::Triangle => generate::triangle(w, h),
            LayerSource::Checkerboard { square_size } => generate::checkerboard(w, h, square_size),
            LayerSource::Maze { seed: Some(seed) } => generate::maze_seeded(w, h, seed),
            LayerSource::Maze { seed: None } => generate::maze(w, h, &mut self.rng),
            LayerSource::Loaded { pattern, .. } => {
                if pattern.dimensions() != (w, h) {
                    return Err(PatternError::mismatch(pattern.dimensions(), (w, h)));
                }
                Ok(pattern)
            }
        }
    }

    /// The whole stack folded into one pattern.
    pub fn combined(&self) -> Result<Pattern> {
        self.stack.reduce(self.width, self.height)
    }

    pub fn export_grayscale(&self) -> Result<GrayRaster> {
        export::export_grayscale(&self.combined()?)
    }

    /// Three layers, picked by index, one per color plane. Layer negation
    /// flags are ignored here; the raw patterns are used.
    pub fn export_rgb(&self, red: usize, green: usize, blue: usize, base: u8) -> Result<ColorRaster> {
        export::mix_three(
            &self.stack.get(red)?.pattern,
            &self.stack.get(green)?.pattern,
            &self.stack.get(blue)?.pattern,
            base,
        )
    }

    /// The combined pattern in a single color plane.
    pub fn export_channel(&self, channel: Channel, base: u8) -> Result<ColorRaster> {
        export::mix_single_channel(&self.combined()?, channel, base)
    }

    /// One line per layer, `>` marking the selection.
    pub fn listing(&self) -> Vec<String> {
        self.stack
            .layers()
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let mark = if i == self.cursor { '>' } else { ' ' };
                format!("{mark} {}", layer.describe(i))
            })
            .collect()
    }
}
