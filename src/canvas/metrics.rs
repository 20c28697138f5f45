//! Text measurement.

use crate::common::unit::pt_to_mm;
use crate::common::FontSpec;

/// Measures strings for line breaking and bullet indentation.
pub trait TextMetrics {
    /// Advance width of `text` set in `font`, in mm.
    fn advance(&self, font: &FontSpec, text: &str) -> f64;
}

/// Every character advances by half the font size.
///
/// Deterministic stand-in for real font metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMetrics;

impl FixedMetrics {
    pub const EM_FRACTION: f64 = 0.5;
}

impl TextMetrics for FixedMetrics {
    fn advance(&self, font: &FontSpec, text: &str) -> f64 {
        let chars = text.chars().count() as f64;
        pt_to_mm(chars * font.size * Self::EM_FRACTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::unit::approx_eq;
    use crate::common::FontStyle;

    #[test]
    fn test_fixed_advance() {
        let font = FontSpec::new("Sans", FontStyle::empty(), 72.0);
        assert!(approx_eq(FixedMetrics.advance(&font, "ab"), 25.4));
        assert_eq!(FixedMetrics.advance(&font, ""), 0.0);
    }
}
