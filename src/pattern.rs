//! Boolean bitmap grid and its algebra.
//!
//! A [`Pattern`] owns its cells outright; `clone()` produces an independent
//! grid. Binary operations never mutate their operands and refuse grids of
//! different shape instead of reading past the smaller buffer.

use std::ops::Not;

use crate::error::{PatternError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// All-false grid of the given size.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled_with(width, height, false)
    }

    /// All-true grid of the given size.
    pub fn filled(width: usize, height: usize) -> Result<Self> {
        Self::filled_with(width, height, true)
    }

    fn filled_with(width: usize, height: usize, value: bool) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![value; width * height],
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell, row by row.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Result<Self> {
        check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Ok(Self { width, height, cells })
    }

    /// Threshold 8-bit samples: any non-zero sample becomes `true`.
    pub fn from_grayscale_samples(samples: &[u8], width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        if samples.len() != width * height {
            return Err(PatternError::invalid_parameter(format!(
                "{} samples supplied for a {width}x{height} grid",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells: samples.iter().map(|&s| s != 0).collect(),
        })
    }

    /// `true` maps to 255, `false` to 0.
    pub fn to_grayscale_samples(&self) -> Vec<u8> {
        self.cells.iter().map(|&c| if c { 255 } else { 0 }).collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Cell at (x, y), or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Set the cell at (x, y). Returns `false` if the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: bool) -> bool {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = value;
            true
        } else {
            false
        }
    }

    /// Number of `true` cells.
    pub fn count_set(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Fraction of cells that are `true`, in `0.0..=1.0`.
    pub fn fill_ratio(&self) -> f64 {
        self.count_set() as f64 / self.cells.len() as f64
    }

    pub fn and(&self, other: &Pattern) -> Result<Pattern> {
        self.zip_with(other, |a, b| a && b)
    }

    pub fn or(&self, other: &Pattern) -> Result<Pattern> {
        self.zip_with(other, |a, b| a || b)
    }

    pub fn xor(&self, other: &Pattern) -> Result<Pattern> {
        self.zip_with(other, |a, b| a ^ b)
    }

    /// Fail with `DimensionMismatch` unless `other` has the same shape.
    pub fn ensure_same_shape(&self, other: &Pattern) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(PatternError::mismatch(self.dimensions(), other.dimensions()));
        }
        Ok(())
    }

    fn zip_with(&self, other: &Pattern, op: impl Fn(bool, bool) -> bool) -> Result<Pattern> {
        self.ensure_same_shape(other)?;
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Pattern {
            width: self.width,
            height: self.height,
            cells,
        })
    }
}

impl Not for &Pattern {
    type Output = Pattern;

    fn not(self) -> Pattern {
        Pattern {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| !c).collect(),
        }
    }
}

impl Not for Pattern {
    type Output = Pattern;

    fn not(mut self) -> Pattern {
        for cell in self.cells.iter_mut() {
            *cell = !*cell;
        }
        self
    }
}

/// Both sides must be positive and the cell count must fit in a buffer.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    let fits = width
        .checked_mul(height)
        .is_some_and(|n| n > 0 && n <= isize::MAX as usize);
    if !fits {
        return Err(PatternError::InvalidDimensions {
            width: i64::try_from(width).unwrap_or(i64::MAX),
            height: i64::try_from(height).unwrap_or(i64::MAX),
        });
    }
    Ok(())
}
