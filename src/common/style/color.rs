use serde::{Deserialize, Deserializer};
use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
/// Theme files may spell a color as an `[r, g, b]` triple, as a single gray
/// level, or as a hex string.
///
/// # Examples
///
/// ```rust
/// use slidewright::common::RGBColor;
///
/// // Create a red color
/// let red = RGBColor::new(255, 0, 0);
///
/// // Create from hex string
/// let blue = RGBColor::from_hex("0000FF").unwrap();
///
/// // Gray levels expand to equal components
/// assert_eq!(RGBColor::gray(180), RGBColor::new(180, 180, 180));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Black, the color of unstyled text.
    pub const BLACK: RGBColor = RGBColor::new(0, 0, 0);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color with all three components set to `level`.
    #[inline]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Create an RGB color from a hex string.
    ///
    /// # Arguments
    ///
    /// * `hex` - Hex color string (e.g., "FF0000" or "#FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Components scaled to `0.0..=1.0`, as PDF color operators expect.
    #[inline]
    pub fn to_unit(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Gray(u8),
    Triple(u8, u8, u8),
    Hex(String),
}

impl<'de> Deserialize<'de> for RGBColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawColor::deserialize(deserializer)? {
            RawColor::Gray(level) => Ok(RGBColor::gray(level)),
            RawColor::Triple(r, g, b) => Ok(RGBColor::new(r, g, b)),
            RawColor::Hex(hex) => RGBColor::from_hex(&hex)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{}'", hex))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(RGBColor::from_hex("#FF8000"), Some(RGBColor::new(255, 128, 0)));
        assert_eq!(RGBColor::from_hex("FF80"), None);
        assert_eq!(RGBColor::from_hex("GG0000"), None);
    }

    #[test]
    fn test_deserialize_forms() {
        let triple: RGBColor = serde_yaml::from_str("[10, 20, 30]").unwrap();
        assert_eq!(triple, RGBColor::new(10, 20, 30));

        let gray: RGBColor = serde_yaml::from_str("100").unwrap();
        assert_eq!(gray, RGBColor::gray(100));

        let hex: RGBColor = serde_yaml::from_str("'#0000FF'").unwrap();
        assert_eq!(hex, RGBColor::new(0, 0, 255));

        assert!(serde_yaml::from_str::<RGBColor>("[1, 2]").is_err());
        assert!(serde_yaml::from_str::<RGBColor>("'blue'").is_err());
    }

    #[test]
    fn test_unit_components() {
        let (r, g, b) = RGBColor::new(255, 0, 51).to_unit();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }
}
