//! Length conversions into English Metric Units (EMU).
//!
//! DrawingML positions everything in EMUs, 914400 per inch.

pub const EMUS_PER_INCH: i64 = 914_400;

/// Convert inches to EMUs, rounding to the nearest unit.
#[inline]
pub fn inches(value: f64) -> i64 {
    (value * EMUS_PER_INCH as f64).round() as i64
}

/// Font size in hundredths of a point, as written to `a:rPr/@sz`.
#[inline]
pub fn font_size_hundredths(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}

/// Scale `height_px` so that a picture `width_emu` wide keeps its aspect ratio.
///
/// Returns `None` for a zero-width source.
#[inline]
pub fn scaled_height(width_emu: i64, width_px: u32, height_px: u32) -> Option<i64> {
    if width_px == 0 {
        return None;
    }
    Some((width_emu as f64 * height_px as f64 / width_px as f64).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches() {
        assert_eq!(inches(1.0), 914_400);
        assert_eq!(inches(10.0), 9_144_000);
        assert_eq!(inches(0.5), 457_200);
        assert_eq!(inches(6.55), 5_989_320);
    }

    #[test]
    fn test_font_size_hundredths() {
        assert_eq!(font_size_hundredths(18.0), 1800);
        assert_eq!(font_size_hundredths(34.0), 3400);
        assert_eq!(font_size_hundredths(10.5), 1050);
    }

    #[test]
    fn test_scaled_height() {
        // 1600x900 picture, 3.4 inches wide
        assert_eq!(scaled_height(inches(3.4), 1600, 900), Some(1_748_790));
        assert_eq!(scaled_height(100, 4, 3), Some(75));
        assert_eq!(scaled_height(100, 0, 3), None);
    }
}
