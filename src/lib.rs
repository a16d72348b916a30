//! Pattern Mixer - library crate.
//!
//! Procedural monochrome patterns, boolean layer composition, and Netpbm
//! (P5/P6) output, for use by the command-line tool and tests.

pub mod error;
pub mod export;
pub mod generate;
pub mod image_io;
pub mod layers;
pub mod pattern;
pub mod pipeline;
pub mod raster;
pub mod script;

pub use error::{PatternError, Result};
pub use layers::{Layer, LayerOp, LayerStack};
pub use pattern::Pattern;
pub use raster::{ColorRaster, GrayRaster};
