use crate::error::{PatternError, Result};
use crate::raster::GrayRaster;

const AMBIENT: f64 = 40.0;
const DIFFUSE: f64 = 180.0;
const SPECULAR: f64 = 35.0;
const SHININESS: f64 = 20.0;
/// Gap between the sphere silhouette and the nearest image edge.
const MARGIN: i64 = 4;

/// Shade a lit sphere centred in the image.
///
/// Unlike the boolean generators this produces intensity data directly:
/// Lambertian diffuse plus a Phong-style highlight from a light up and to the
/// left of the viewer. Pixels outside the silhouette are black.
pub fn sphere_shade(width: usize, height: usize) -> Result<GrayRaster> {
    let mut img = GrayRaster::new(width, height)?;
    let radius = (width.min(height) / 2) as i64 - MARGIN;
    if radius <= 0 {
        return Err(PatternError::invalid_parameter(format!(
            "{width}x{height} is too small to shade a sphere"
        )));
    }

    let cx = (width / 2) as i64;
    let cy = (height / 2) as i64;
    let (lx, ly, lz) = normalize(-0.9, -0.9, 1.0);
    let r = radius as f64;
    let r2 = radius * radius;

    for y in 0..height {
        for x in 0..width {
            let dx = x as i64 - cx;
            let dy = y as i64 - cy;
            let dist2 = dx * dx + dy * dy;
            if dist2 > r2 {
                continue;
            }

            let dz = ((r2 - dist2) as f64).sqrt();
            let (nx, ny, nz) = (dx as f64 / r, dy as f64 / r, dz / r);

            let dot = nx * lx + ny * ly + nz * lz;
            let diffuse = dot.max(0.0);
            // z component of the light reflected about the normal
            let rz = 2.0 * dot * nz - lz;
            let highlight = rz.max(0.0).powf(SHININESS);

            let value = (AMBIENT + DIFFUSE * diffuse + SPECULAR * highlight) as i64;
            img.samples_mut()[y * width + x] = value.clamp(0, 255) as u8;
        }
    }
    Ok(img)
}

fn normalize(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let len = (x * x + y * y + z * z).sqrt();
    (x / len, y / len, z / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_black() {
        let img = sphere_shade(64, 48).unwrap();
        assert_eq!(img.samples()[0], 0);
        assert_eq!(img.samples()[63], 0);
        assert_eq!(img.samples()[47 * 64], 0);
    }

    #[test]
    fn lit_side_brighter_than_shadow_side() {
        let img = sphere_shade(64, 64).unwrap();
        let at = |x: usize, y: usize| img.samples()[y * 64 + x];
        // Light comes from the upper left.
        assert!(at(20, 20) > at(44, 44));
        // Every pixel inside the disc gets at least the ambient term.
        assert!(at(44, 44) >= AMBIENT as u8);
    }

    #[test]
    fn centre_value() {
        let img = sphere_shade(64, 64).unwrap();
        // Normal (0,0,1): diffuse = lz, rz = 2*lz*lz - lz.
        let (_, _, lz) = normalize(-0.9, -0.9, 1.0);
        let rz = 2.0 * lz * lz - lz;
        let expected = (40.0 + 180.0 * lz + 35.0 * rz.max(0.0).powf(20.0)) as u8;
        assert_eq!(img.samples()[32 * 64 + 32], expected);
    }

    #[test]
    fn too_small() {
        assert!(matches!(
            sphere_shade(8, 100),
            Err(PatternError::InvalidParameter { .. })
        ));
        assert!(sphere_shade(0, 10).is_err());
    }
}
