use rand::Rng;

use crate::error::Result;
use crate::export;
use crate::generate;
use crate::pattern::Pattern;
use crate::raster::{ColorRaster, GrayRaster};

/// Parameters of the demo composition.
#[derive(Debug, Clone)]
pub struct DemoParams {
    pub width: usize,
    pub height: usize,
    /// Circle radius is `width / 2 - circle_inset`.
    pub circle_inset: usize,
    pub square_size: usize,
    pub base_intensity: u8,
    /// Maze seed; `None` draws from the caller's random source.
    pub seed: Option<u64>,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            circle_inset: 10,
            square_size: 16,
            base_intensity: 255,
            seed: None,
        }
    }
}

/// Everything the demo writes out, keyed by the file name it is saved under.
pub struct DemoOutput {
    /// `(circle OR checkerboard) AND triangle`
    pub combined: Pattern,
    /// circle, triangle and checkerboard in the R, G and B planes
    pub mixer: ColorRaster,
    pub ball: GrayRaster,
    pub labyrinth: Pattern,
}

impl DemoOutput {
    pub const COMBINED_FILE: &str = "combined_pattern.pgm";
    pub const MIXER_FILE: &str = "pattern_mixer.ppm";
    pub const BALL_FILE: &str = "3d_ball.pgm";
    pub const LABYRINTH_FILE: &str = "labyrinth_pattern.pgm";
}

/// Generate the demo set of images.
pub fn process<R: Rng + ?Sized>(params: &DemoParams, rng: &mut R) -> Result<DemoOutput> {
    let (w, h) = (params.width, params.height);

    // Step 1: primitive shapes
    let radius = (w / 2).saturating_sub(params.circle_inset);
    let circle = generate::circle(w, h, radius)?;
    let triangle = generate::triangle(w, h)?;
    let checker = generate::checkerboard(w, h, params.square_size)?;
    log::debug!(
        "demo shapes {w}x{h}: circle r={radius} ({:.1}% set), checker {}px",
        circle.fill_ratio() * 100.0,
        params.square_size
    );

    // Step 2: boolean composition
    let combined = circle.or(&checker)?.and(&triangle)?;

    // Step 3: channel mix
    let mixer = export::mix_three(&circle, &triangle, &checker, params.base_intensity)?;

    // Step 4: shaded sphere and maze
    let ball = generate::sphere_shade(w, h)?;
    let labyrinth = match params.seed {
        Some(seed) => generate::maze_seeded(w, h, seed)?,
        None => generate::maze(w, h, rng)?,
    };

    Ok(DemoOutput {
        combined,
        mixer,
        ball,
        labyrinth,
    })
}
