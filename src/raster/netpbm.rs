//! Binary Netpbm codec: P5 (grayscale) and P6 (RGB), maxval 255, one byte
//! per sample.
//!
//! Writers always emit `P5\n<w> <h>\n255\n` (or `P6`) followed by the raw
//! plane. Readers accept any whitespace run and `#` comment lines between
//! header tokens, then consume exactly one whitespace byte before the data.

use std::io::{self, Write};

use super::{ColorRaster, GrayRaster};
use crate::error::{PatternError, Result};

const GRAY_MAGIC: &[u8] = b"P5";
const COLOR_MAGIC: &[u8] = b"P6";
const MAXVAL: u32 = 255;

pub fn encode_grayscale(raster: &GrayRaster) -> Vec<u8> {
    let mut out = header(GRAY_MAGIC, raster.width(), raster.height());
    out.extend_from_slice(raster.samples());
    out
}

/// Planes are interleaved into RGB triples on the way out.
pub fn encode_color(raster: &ColorRaster) -> Vec<u8> {
    let mut out = header(COLOR_MAGIC, raster.width(), raster.height());
    out.extend_from_slice(&raster.interleaved());
    out
}

pub fn write_grayscale<W: Write>(raster: &GrayRaster, sink: &mut W) -> io::Result<()> {
    sink.write_all(&encode_grayscale(raster))?;
    sink.flush()
}

pub fn write_color<W: Write>(raster: &ColorRaster, sink: &mut W) -> io::Result<()> {
    sink.write_all(&encode_color(raster))?;
    sink.flush()
}

pub fn decode_grayscale(bytes: &[u8]) -> Result<GrayRaster> {
    let (width, height, data) = decode_body(bytes, GRAY_MAGIC, 1)?;
    GrayRaster::from_samples(width, height, data.to_vec())
}

pub fn decode_color(bytes: &[u8]) -> Result<ColorRaster> {
    let (width, height, data) = decode_body(bytes, COLOR_MAGIC, 3)?;
    let n = width * height;
    let mut red = Vec::with_capacity(n);
    let mut green = Vec::with_capacity(n);
    let mut blue = Vec::with_capacity(n);
    for px in data.chunks_exact(3) {
        red.push(px[0]);
        green.push(px[1]);
        blue.push(px[2]);
    }
    ColorRaster::from_planes(width, height, red, green, blue)
}

fn header(magic: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(magic.len() + 24);
    out.extend_from_slice(magic);
    out.extend_from_slice(format!("\n{width} {height}\n{MAXVAL}\n").as_bytes());
    out
}

/// Parse the header and return the dimensions plus exactly
/// `width * height * channels` bytes of sample data.
fn decode_body<'a>(bytes: &'a [u8], magic: &[u8], channels: usize) -> Result<(usize, usize, &'a [u8])> {
    let mut header = HeaderReader::new(bytes);

    match header.token() {
        Some(tok) if tok == magic => {}
        Some(tok) => {
            return Err(PatternError::format(format!(
                "expected magic {}, found {}",
                String::from_utf8_lossy(magic),
                String::from_utf8_lossy(tok)
            )));
        }
        None => return Err(PatternError::format("missing magic number")),
    }

    let width = header.integer("width")?;
    let height = header.integer("height")?;
    if width <= 0 || height <= 0 {
        return Err(PatternError::InvalidDimensions { width, height });
    }
    // maxval is read but not checked: samples are always one byte.
    let maxval = header.integer("maxval")?;
    if maxval != i64::from(MAXVAL) {
        log::debug!("netpbm maxval {maxval} treated as {MAXVAL}");
    }
    header.single_whitespace()?;

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| PatternError::format(format!("image {width}x{height} too large")))?;
    let data = header.remaining();
    if data.len() < expected {
        return Err(PatternError::TruncatedData {
            expected,
            found: data.len(),
        });
    }
    Ok((width as usize, height as usize, &data[..expected]))
}

struct HeaderReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        let bytes = self.bytes;
        if self.pos > start {
            Some(&bytes[start..self.pos])
        } else {
            None
        }
    }

    fn integer(&mut self, what: &str) -> Result<i64> {
        let tok = self
            .token()
            .ok_or_else(|| PatternError::format(format!("missing {what}")))?;
        std::str::from_utf8(tok)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| {
                PatternError::format(format!(
                    "{what} is not a number: {}",
                    String::from_utf8_lossy(tok)
                ))
            })
    }

    fn single_whitespace(&mut self) -> Result<()> {
        match self.peek() {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            // No separator and no data: report as truncation below.
            None => Ok(()),
            Some(b) => Err(PatternError::format(format!(
                "expected whitespace after maxval, found byte 0x{b:02x}"
            ))),
        }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos.min(self.bytes.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_bytes_exact() {
        let raster = GrayRaster::from_samples(2, 2, vec![0, 255, 255, 0]).unwrap();
        let mut expected = b"P5\n2 2\n255\n".to_vec();
        expected.extend_from_slice(&[0x00, 0xFF, 0xFF, 0x00]);
        assert_eq!(encode_grayscale(&raster), expected);
    }

    #[test]
    fn color_is_interleaved() {
        let raster = ColorRaster::from_planes(2, 1, vec![10, 11], vec![20, 21], vec![30, 31]).unwrap();
        let bytes = encode_color(&raster);
        assert_eq!(&bytes[..11], b"P6\n2 1\n255\n");
        assert_eq!(&bytes[11..], &[10, 20, 30, 11, 21, 31]);
    }

    #[test]
    fn header_promises_what_is_written() {
        let mut gray = GrayRaster::new(2, 2).unwrap();
        gray.samples_mut().copy_from_slice(&[1, 2, 3, 4]);
        let bytes = encode_grayscale(&gray);
        assert_eq!(bytes.len(), b"P5\n2 2\n255\n".len() + 4);
        assert_eq!(decode_grayscale(&bytes).unwrap(), gray);

        let mut color = ColorRaster::new(2, 1).unwrap();
        color.red_mut()[1] = 7;
        let bytes = encode_color(&color);
        assert_eq!(bytes.len(), b"P6\n2 1\n255\n".len() + 6);
        assert_eq!(decode_color(&bytes).unwrap(), color);
    }

    #[test]
    fn round_trips() {
        let gray = GrayRaster::from_samples(3, 2, vec![0, 1, 2, 253, 254, 255]).unwrap();
        assert_eq!(decode_grayscale(&encode_grayscale(&gray)).unwrap(), gray);

        let color = ColorRaster::from_planes(1, 3, vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]).unwrap();
        assert_eq!(decode_color(&encode_color(&color)).unwrap(), color);
    }

    #[test]
    fn comments_and_whitespace_tolerated() {
        let mut bytes = b"P5 # made by hand\n# another comment\n  3\t\n1\n# maxval next\n255\n".to_vec();
        bytes.extend_from_slice(&[7, 8, 9]);
        let raster = decode_grayscale(&bytes).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 1));
        assert_eq!(raster.samples(), [7, 8, 9]);
    }

    #[test]
    fn data_starting_with_whitespace_byte() {
        // Only one separator byte is consumed; 0x20 and 0x0a are sample data.
        let mut bytes = b"P5\n2 1\n255\n".to_vec();
        bytes.extend_from_slice(&[0x20, 0x0a]);
        assert_eq!(decode_grayscale(&bytes).unwrap().samples(), [0x20, 0x0a]);
    }

    #[test]
    fn wrong_magic() {
        let bytes = b"P6\n1 1\n255\n\x00\x00\x00";
        assert!(matches!(decode_grayscale(bytes), Err(PatternError::Format { .. })));
        assert!(matches!(decode_color(b"P2\n1 1\n255\n0"), Err(PatternError::Format { .. })));
        assert!(matches!(decode_grayscale(b""), Err(PatternError::Format { .. })));
    }

    #[test]
    fn truncated_samples() {
        let bytes = b"P5\n4 4\n255\n\x01\x02\x03";
        assert_eq!(
            decode_grayscale(bytes),
            Err(PatternError::TruncatedData { expected: 16, found: 3 })
        );
        assert_eq!(
            decode_color(b"P6\n1 1\n255\n\x01\x02"),
            Err(PatternError::TruncatedData { expected: 3, found: 2 })
        );
    }

    #[test]
    fn non_positive_dimensions() {
        assert_eq!(
            decode_grayscale(b"P5\n0 4\n255\n"),
            Err(PatternError::InvalidDimensions { width: 0, height: 4 })
        );
        assert_eq!(
            decode_grayscale(b"P5\n3 -2\n255\n"),
            Err(PatternError::InvalidDimensions { width: 3, height: -2 })
        );
    }

    #[test]
    fn maxval_not_validated() {
        let bytes = b"P5\n1 1\n15\n\x0c";
        assert_eq!(decode_grayscale(bytes).unwrap().samples(), [12]);
    }

    #[test]
    fn garbage_header_number() {
        assert!(matches!(
            decode_grayscale(b"P5\nwide 2\n255\n"),
            Err(PatternError::Format { .. })
        ));
    }

    #[test]
    fn writer_matches_encoder() {
        let raster = GrayRaster::from_samples(1, 2, vec![3, 4]).unwrap();
        let mut sink = Vec::new();
        write_grayscale(&raster, &mut sink).unwrap();
        assert_eq!(sink, encode_grayscale(&raster));
    }
}
