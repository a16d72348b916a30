use crate::error::Result;
use crate::pattern::Pattern;
use crate::raster::{ColorRaster, GrayRaster};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: &[Channel] = &[Channel::Red, Channel::Green, Channel::Blue];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }

    /// `r`, `g`, `b` or the full name, case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ch| {
            ch.name().eq_ignore_ascii_case(text) || ch.name()[..1].eq_ignore_ascii_case(text)
        })
    }
}

/// One grid per plane: `base` where the cell is set, 0 elsewhere.
pub fn mix_three(red: &Pattern, green: &Pattern, blue: &Pattern, base: u8) -> Result<ColorRaster> {
    red.ensure_same_shape(green)?;
    red.ensure_same_shape(blue)?;
    let (width, height) = red.dimensions();
    ColorRaster::from_planes(
        width,
        height,
        plane(red, base),
        plane(green, base),
        plane(blue, base),
    )
}

/// Put `grid` into one plane at `base`; the other two planes stay black.
pub fn mix_single_channel(grid: &Pattern, channel: Channel, base: u8) -> Result<ColorRaster> {
    let (width, height) = grid.dimensions();
    let mut img = ColorRaster::new(width, height)?;
    let target = match channel {
        Channel::Red => img.red_mut(),
        Channel::Green => img.green_mut(),
        Channel::Blue => img.blue_mut(),
    };
    for (sample, &cell) in target.iter_mut().zip(grid.cells()) {
        *sample = if cell { base } else { 0 };
    }
    Ok(img)
}

pub fn export_grayscale(grid: &Pattern) -> Result<GrayRaster> {
    let (width, height) = grid.dimensions();
    GrayRaster::from_samples(width, height, grid.to_grayscale_samples())
}

fn plane(grid: &Pattern, base: u8) -> Vec<u8> {
    grid.cells().iter().map(|&c| if c { base } else { 0 }).collect()
}
