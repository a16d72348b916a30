//! File-system side of the pattern engine.
//!
//! The core works on byte slices and `Write` sinks; this module turns paths
//! into those. `.pgm`/`.ppm` go through the built-in Netpbm codec, every
//! other extension is handed to the `image` crate.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};
use thiserror::Error;

use crate::error::PatternError;
use crate::pattern::Pattern;
use crate::raster::{ColorRaster, GrayRaster, netpbm};

#[derive(Error, Debug)]
pub enum IoError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: PatternError,
    },

    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<IoError>,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> IoError + '_ {
    move |source| IoError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn image_err(path: &Path) -> impl FnOnce(image::ImageError) -> IoError + '_ {
    move |source| IoError::Image {
        path: path.to_path_buf(),
        source,
    }
}

fn is_netpbm(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Join `name` onto the output directory, creating the directory if needed.
pub fn output_path(out_dir: &Path, name: &str) -> Result<PathBuf, IoError> {
    fs::create_dir_all(out_dir).map_err(io_err(out_dir))?;
    Ok(out_dir.join(name))
}

pub fn load_grayscale(path: &Path) -> Result<GrayRaster, IoError> {
    if is_netpbm(path, "pgm") {
        let bytes = fs::read(path).map_err(io_err(path))?;
        return netpbm::decode_grayscale(&bytes).map_err(|source| IoError::Decode {
            path: path.to_path_buf(),
            source,
        });
    }
    let img = image::open(path).map_err(image_err(path))?.to_luma8();
    let (w, h) = img.dimensions();
    Ok(GrayRaster::from_samples(w as usize, h as usize, img.into_raw())?)
}

/// Load an image as a pattern: any non-zero pixel is set.
pub fn load_pattern(path: &Path) -> Result<Pattern, IoError> {
    let raster = load_grayscale(path)?;
    let pattern = Pattern::from_grayscale_samples(raster.samples(), raster.width(), raster.height())?;
    log::debug!(
        "loaded {} ({}x{}, {} set)",
        path.display(),
        raster.width(),
        raster.height(),
        pattern.count_set()
    );
    Ok(pattern)
}

pub fn save_grayscale(raster: &GrayRaster, path: &Path) -> Result<(), IoError> {
    if is_netpbm(path, "pgm") {
        let mut file = BufWriter::new(File::create(path).map_err(io_err(path))?);
        netpbm::write_grayscale(raster, &mut file).map_err(io_err(path))?;
    } else {
        let img = GrayImage::from_raw(raster.width() as u32, raster.height() as u32, raster.samples().to_vec())
            .ok_or_else(|| PatternError::invalid_parameter("raster does not fit its dimensions"))?;
        img.save(path).map_err(image_err(path))?;
    }
    log::info!("wrote {}", path.display());
    Ok(())
}

pub fn save_color(raster: &ColorRaster, path: &Path) -> Result<(), IoError> {
    if is_netpbm(path, "ppm") {
        let mut file = BufWriter::new(File::create(path).map_err(io_err(path))?);
        netpbm::write_color(raster, &mut file).map_err(io_err(path))?;
    } else {
        let img = RgbImage::from_raw(raster.width() as u32, raster.height() as u32, raster.interleaved())
            .ok_or_else(|| PatternError::invalid_parameter("raster does not fit its dimensions"))?;
        img.save(path).map_err(image_err(path))?;
    }
    log::info!("wrote {}", path.display());
    Ok(())
}

pub fn save_pattern(pattern: &Pattern, path: &Path) -> Result<(), IoError> {
    save_grayscale(&crate::export::export_grayscale(pattern)?, path)
}
