//! Unit conversion utilities.
//!
//! Layout happens in millimetres with a top-left origin. Slide content declares
//! image sizes in points, pixels map to points at 72 dpi, and the PDF output
//! works in points.

pub const MM_PER_INCH: f64 = 25.4;
pub const PT_PER_INCH: f64 = 72.0;
/// Pixel density assumed for images without an explicit size.
pub const IMAGE_DPI: f64 = 72.0;

#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / PT_PER_INCH * MM_PER_INCH
}

#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_INCH * PT_PER_INCH
}

#[inline]
pub fn px_to_pt(px: u32) -> f64 {
    px as f64 * PT_PER_INCH / IMAGE_DPI
}

/// Font design units to a length in the unit of `size`.
#[inline]
pub fn font_units_to(units: f64, units_per_em: u16, size: f64) -> f64 {
    units * size / units_per_em as f64
}

/// Compare two layout coordinates with a tolerance well below any drawable
/// distance.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pt_mm_conversions() {
        assert!(approx_eq(pt_to_mm(72.0), 25.4));
        assert!(approx_eq(mm_to_pt(25.4), 72.0));
        assert!(approx_eq(mm_to_pt(pt_to_mm(200.0)), 200.0));
    }

    #[test]
    fn test_pixels_at_72_dpi() {
        assert!(approx_eq(px_to_pt(144), 144.0));
    }

    #[test]
    fn test_font_units() {
        assert!(approx_eq(font_units_to(500.0, 1000, 20.0), 10.0));
        assert!(approx_eq(font_units_to(1024.0, 2048, 12.0), 6.0));
    }
}
