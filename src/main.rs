use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use pattern_mixer::generate;
use pattern_mixer::image_io::{self, IoError};
use pattern_mixer::layers::session::{Session, SessionConfig};
use pattern_mixer::pipeline::{self, DemoOutput, DemoParams};
use pattern_mixer::script;

/// Procedural pattern generator and layer mixer.
#[derive(Parser, Debug)]
#[command(name = "pattern-mixer", version, about, long_about = None)]
struct Cli {
    /// Directory all files are read from and written to
    #[arg(short, long, global = true, default_value = "patterns")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the demo set: combined pattern, channel mix, shaded ball and maze
    Demo {
        #[arg(long, default_value_t = 256)]
        width: usize,
        #[arg(long, default_value_t = 256)]
        height: usize,
        /// Maze seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Mixer output file name
        #[arg(long, default_value = DemoOutput::MIXER_FILE)]
        mixer: String,
    },

    /// Write a single generated pattern
    Generate {
        #[arg(value_enum)]
        shape: Shape,
        /// Output file name; the extension picks the format (pgm, png, ...)
        output: String,
        #[arg(long, default_value_t = 128)]
        width: usize,
        #[arg(long, default_value_t = 128)]
        height: usize,
        /// Circle radius
        #[arg(long, default_value_t = 30)]
        radius: usize,
        /// Checkerboard square size
        #[arg(long, default_value_t = 8)]
        size: usize,
        /// Maze seed
        #[arg(long)]
        seed: Option<u64>,
        /// Invert the pattern before writing
        #[arg(long)]
        invert: bool,
    },

    /// Run a layer script
    Compose {
        /// Script file, one command per line
        script: PathBuf,
        #[arg(long, default_value_t = 128)]
        width: usize,
        #[arg(long, default_value_t = 128)]
        height: usize,
        /// Seed for unseeded maze layers
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Shape {
    Circle,
    Triangle,
    Checker,
    Maze,
    Sphere,
}

fn main() -> Result<(), IoError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            width,
            height,
            seed,
            mixer,
        } => {
            let params = DemoParams {
                width,
                height,
                seed,
                ..DemoParams::default()
            };
            run_demo(&params, &mixer, &cli.out_dir)
        }
        Commands::Generate {
            shape,
            output,
            width,
            height,
            radius,
            size,
            seed,
            invert,
        } => {
            let path = image_io::output_path(&cli.out_dir, &output)?;
            let pattern = match shape {
                Shape::Circle => generate::circle(width, height, radius)?,
                Shape::Triangle => generate::triangle(width, height)?,
                Shape::Checker => generate::checkerboard(width, height, size)?,
                Shape::Maze => match seed {
                    Some(seed) => generate::maze_seeded(width, height, seed)?,
                    None => generate::maze(width, height, &mut rand::rng())?,
                },
                Shape::Sphere => {
                    let mut ball = generate::sphere_shade(width, height)?;
                    if invert {
                        ball.samples_mut().iter_mut().for_each(|s| *s = 255 - *s);
                    }
                    return image_io::save_grayscale(&ball, &path);
                }
            };
            let pattern = if invert { !pattern } else { pattern };
            image_io::save_pattern(&pattern, &path)
        }
        Commands::Compose {
            script: script_path,
            width,
            height,
            seed,
        } => {
            let text = std::fs::read_to_string(&script_path).map_err(|source| IoError::Io {
                path: script_path.clone(),
                source,
            })?;
            let mut session = Session::new(&SessionConfig { width, height, seed })?;
            script::run(&text, &mut session, &cli.out_dir)?;
            log::info!("script finished with {} layers", session.stack().len());
            Ok(())
        }
    }
}

fn run_demo(params: &DemoParams, mixer_file: &str, out_dir: &Path) -> Result<(), IoError> {
    let out = pipeline::process(params, &mut rand::rng())?;

    image_io::save_pattern(&out.combined, &image_io::output_path(out_dir, DemoOutput::COMBINED_FILE)?)?;
    image_io::save_color(&out.mixer, &image_io::output_path(out_dir, mixer_file)?)?;
    image_io::save_grayscale(&out.ball, &image_io::output_path(out_dir, DemoOutput::BALL_FILE)?)?;
    image_io::save_pattern(
        &out.labyrinth,
        &image_io::output_path(out_dir, DemoOutput::LABYRINTH_FILE)?,
    )?;
    Ok(())
}
