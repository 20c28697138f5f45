//! Font style flags and font specifications.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer};
use std::fmt;

bitflags! {
    /// Emphasis flags composed into a font variant.
    ///
    /// The empty set is the regular face.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct FontStyle: u8 {
        /// Bold face
        const BOLD = 0x01;
        /// Italic face
        const ITALIC = 0x02;
    }
}

impl FontStyle {
    /// Parse a style string as written in theme files (`""`, `B`, `I`, `BI`, `IB`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidewright::common::FontStyle;
    ///
    /// assert_eq!(FontStyle::parse("IB"), Some(FontStyle::BOLD | FontStyle::ITALIC));
    /// assert_eq!(FontStyle::parse(""), Some(FontStyle::empty()));
    /// assert_eq!(FontStyle::parse("U"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "" => Some(Self::empty()),
            "B" => Some(Self::BOLD),
            "I" => Some(Self::ITALIC),
            "BI" | "IB" => Some(Self::BOLD | Self::ITALIC),
            _ => None,
        }
    }

    /// Canonical variant identifier (`""`, `"B"`, `"I"` or `"BI"`).
    pub fn as_str(&self) -> &'static str {
        match (self.contains(Self::BOLD), self.contains(Self::ITALIC)) {
            (false, false) => "",
            (true, false) => "B",
            (false, true) => "I",
            (true, true) => "BI",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A font selection: family, style flags and size in points.
///
/// Theme files spell it as a `[family, style, size]` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Registered family name
    pub family: String,
    /// Emphasis flags
    pub style: FontStyle,
    /// Size in points
    pub size: f64,
}

impl FontSpec {
    /// Create a new font specification.
    pub fn new(family: impl Into<String>, style: FontStyle, size: f64) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }

    /// The same family and size with a different style.
    pub fn with_style(&self, style: FontStyle) -> Self {
        Self {
            family: self.family.clone(),
            style,
            size: self.size,
        }
    }
}

impl<'de> Deserialize<'de> for FontSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (family, style, size) = <(String, String, f64)>::deserialize(deserializer)?;
        let style = FontStyle::parse(&style)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid font style '{}'", style)))?;
        Ok(FontSpec::new(family, style, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_round_trip_identifiers() {
        for s in ["", "B", "I", "BI"] {
            assert_eq!(FontStyle::parse(s).unwrap().as_str(), s);
        }
        assert_eq!(FontStyle::parse("IB").unwrap().as_str(), "BI");
    }

    #[test]
    fn test_font_spec_deserialize() {
        let font: FontSpec = serde_yaml::from_str("[PT Sans, B, 20]").unwrap();
        assert_eq!(font, FontSpec::new("PT Sans", FontStyle::BOLD, 20.0));

        let err = serde_yaml::from_str::<FontSpec>("[PT Sans, X, 20]").unwrap_err();
        assert!(err.to_string().contains("invalid font style 'X'"));
    }

    #[test]
    fn test_font_spec_empty_style() {
        let font: FontSpec = serde_yaml::from_str("['DejaVu Sans', '', 16.5]").unwrap();
        assert!(font.style.is_empty());
        assert_eq!(font.size, 16.5);
        assert_eq!(font.with_style(FontStyle::ITALIC).style, FontStyle::ITALIC);
    }
}
