pub mod netpbm;

use crate::error::{PatternError, Result};
use crate::pattern::check_dimensions;

/// Single-channel 8-bit image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl GrayRaster {
    /// Black raster of the given size.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            samples: vec![0; width * height],
        })
    }

    pub fn from_samples(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        check_plane_len("gray", samples.len(), width, height)?;
        Ok(Self { width, height, samples })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major samples, exactly `width * height` of them.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Writable view of the samples. The length stays fixed.
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }
}

/// Three-plane 8-bit color image. Planes are stored separately and
/// interleaved only when written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRaster {
    width: usize,
    height: usize,
    red: Vec<u8>,
    green: Vec<u8>,
    blue: Vec<u8>,
}

impl ColorRaster {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        let n = width * height;
        Ok(Self {
            width,
            height,
            red: vec![0; n],
            green: vec![0; n],
            blue: vec![0; n],
        })
    }

    pub fn from_planes(
        width: usize,
        height: usize,
        red: Vec<u8>,
        green: Vec<u8>,
        blue: Vec<u8>,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        check_plane_len("red", red.len(), width, height)?;
        check_plane_len("green", green.len(), width, height)?;
        check_plane_len("blue", blue.len(), width, height)?;
        Ok(Self {
            width,
            height,
            red,
            green,
            blue,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn red(&self) -> &[u8] {
        &self.red
    }

    pub fn green(&self) -> &[u8] {
        &self.green
    }

    pub fn blue(&self) -> &[u8] {
        &self.blue
    }

    /// Writable plane views. Their lengths stay fixed.
    pub fn red_mut(&mut self) -> &mut [u8] {
        &mut self.red
    }

    pub fn green_mut(&mut self) -> &mut [u8] {
        &mut self.green
    }

    pub fn blue_mut(&mut self) -> &mut [u8] {
        &mut self.blue
    }

    /// RGB triples, row-major.
    pub fn interleaved(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixel_count() * 3);
        for ((&r, &g), &b) in self.red.iter().zip(&self.green).zip(&self.blue) {
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }
}

fn check_plane_len(plane: &str, len: usize, width: usize, height: usize) -> Result<()> {
    if len != width * height {
        return Err(PatternError::invalid_parameter(format!(
            "{plane} plane has {len} samples, expected {} for {width}x{height}",
            width * height
        )));
    }
    Ok(())
}
