use crate::error::{PatternError, Result};
use crate::pattern::Pattern;

/// Filled disc centred at (width/2, height/2), integer centre.
pub fn circle(width: usize, height: usize, radius: usize) -> Result<Pattern> {
    let cx = (width / 2) as i64;
    let cy = (height / 2) as i64;
    // Any radius of at least width + height already covers every cell.
    let r = i64::try_from(radius.min(width.saturating_add(height))).unwrap_or(i64::MAX);
    let r2 = r.saturating_mul(r);
    Pattern::from_fn(width, height, |x, y| {
        let dx = x as i64 - cx;
        let dy = y as i64 - cy;
        dx * dx + dy * dy <= r2
    })
}

/// Triangle with its apex at the top centre, widening by `width / (2 * height)`
/// per row on each side until it spans the full width at the bottom.
pub fn triangle(width: usize, height: usize) -> Result<Pattern> {
    let w = width as i64;
    let h = height as i64;
    Pattern::from_fn(width, height, |x, y| {
        let half_span = (y as i64 * w) / (2 * h);
        let x = x as i64;
        x >= w / 2 - half_span && x <= w / 2 + half_span
    })
}

/// Checkerboard of `square_size`-pixel squares; the top-left square is set.
pub fn checkerboard(width: usize, height: usize, square_size: usize) -> Result<Pattern> {
    if square_size == 0 {
        return Err(PatternError::invalid_parameter("checkerboard square size must be positive"));
    }
    Pattern::from_fn(width, height, |x, y| (x / square_size + y / square_size) % 2 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_rows() {
        let p = circle(8, 8, 3).unwrap();
        // Centre is (4, 4).
        assert_eq!(p.get(4, 4), Some(true));
        assert_eq!(p.get(4, 1), Some(true));
        assert_eq!(p.get(4, 0), Some(false));
        assert_eq!(p.get(7, 4), Some(true));
        assert_eq!(p.get(0, 4), Some(false));
        assert_eq!(p.get(1, 1), Some(false));
    }

    #[test]
    fn circle_zero_radius_is_single_point() {
        let p = circle(5, 5, 0).unwrap();
        assert_eq!(p.count_set(), 1);
        assert_eq!(p.get(2, 2), Some(true));
    }

    #[test]
    fn huge_radius_covers_grid() {
        assert_eq!(circle(4, 4, usize::MAX).unwrap().count_set(), 16);
        assert_eq!(circle(4, 4, 1 << 32).unwrap().count_set(), 16);
        assert_eq!(circle(5, 3, 8).unwrap().count_set(), 15);
    }

    #[test]
    fn triangle_widens_downward() {
        let p = triangle(8, 4).unwrap();
        let row = |y: usize| (0..8).filter(|&x| p.get(x, y) == Some(true)).count();
        // half spans: 0, 1, 2, 3
        assert_eq!(row(0), 1);
        assert_eq!(row(1), 3);
        assert_eq!(row(2), 5);
        assert_eq!(row(3), 7);
        assert_eq!(p.get(4, 0), Some(true));
    }

    #[test]
    fn checkerboard_squares() {
        let p = checkerboard(4, 4, 2).unwrap();
        let expected = [
            true, true, false, false, //
            true, true, false, false, //
            false, false, true, true, //
            false, false, true, true,
        ];
        assert_eq!(p.cells(), &expected);
    }

    #[test]
    fn checkerboard_rejects_zero_square() {
        assert!(matches!(
            checkerboard(4, 4, 0),
            Err(PatternError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn deterministic() {
        assert_eq!(circle(33, 17, 9).unwrap(), circle(33, 17, 9).unwrap());
        assert_eq!(checkerboard(20, 13, 3).unwrap(), checkerboard(20, 13, 3).unwrap());
    }

    #[test]
    fn zero_size_rejected() {
        assert!(circle(0, 3, 1).is_err());
        assert!(triangle(3, 0).is_err());
    }
}
