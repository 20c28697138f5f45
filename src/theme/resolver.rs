//! Per-level style parameters.
//!
//! Themes style list levels through key families such as `l0-font`,
//! `l1-font`, ... plus a generic `ln-font` that applies to every level without
//! an explicit entry.

use crate::common::{FontSpec, RGBColor};
use std::collections::BTreeMap;

/// Names of the per-level parameter families, in the order they are loaded.
pub const LEVEL_FAMILIES: [&str; 5] = ["bullet", "font", "color", "height", "space-before"];

/// Which entry of a level family a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSlot {
    /// `l{N}-<family>`
    Level(usize),
    /// `ln-<family>`
    Generic,
}

/// Build the theme key for a family entry.
///
/// # Examples
///
/// ```rust
/// use slidewright::theme::{level_key, LevelSlot};
///
/// assert_eq!(level_key("font", LevelSlot::Level(2)), "l2-font");
/// assert_eq!(level_key("space-before", LevelSlot::Generic), "ln-space-before");
/// ```
pub fn level_key(family: &str, slot: LevelSlot) -> String {
    match slot {
        LevelSlot::Level(n) => format!("l{}-{}", n, family),
        LevelSlot::Generic => format!("ln-{}", family),
    }
}

/// Split a theme key into its level slot and family name.
///
/// Returns `None` for keys that are not level keys.
pub fn parse_level_key(key: &str) -> Option<(LevelSlot, &str)> {
    let rest = key.strip_prefix('l')?;
    let (head, family) = rest.split_once('-')?;
    if family.is_empty() {
        return None;
    }
    let slot = if head == "n" {
        LevelSlot::Generic
    } else if !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit()) {
        LevelSlot::Level(head.parse().ok()?)
    } else {
        return None;
    };
    Some((slot, family))
}

/// One level parameter family: explicit per-level values and a mandatory
/// fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelParam<T> {
    explicit: BTreeMap<usize, T>,
    fallback: T,
}

impl<T> LevelParam<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            explicit: BTreeMap::new(),
            fallback,
        }
    }

    /// Builder form of [`LevelParam::set`].
    pub fn with_level(mut self, level: usize, value: T) -> Self {
        self.set(level, value);
        self
    }

    pub fn set(&mut self, level: usize, value: T) {
        self.explicit.insert(level, value);
    }

    /// The explicit value for `level` if present, else the fallback.
    #[inline]
    pub fn resolve(&self, level: usize) -> &T {
        self.explicit.get(&level).unwrap_or(&self.fallback)
    }

    /// Every value of the family, explicit entries first.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.explicit.values().chain(std::iter::once(&self.fallback))
    }
}

/// All per-level families of a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelStyles {
    pub bullet: LevelParam<String>,
    pub font: LevelParam<FontSpec>,
    pub color: LevelParam<RGBColor>,
    pub height: LevelParam<f64>,
    pub space_before: LevelParam<f64>,
}

/// The resolved style of a single nesting level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStyle<'a> {
    /// Glyph drawn before items of glyph lists
    pub bullet: &'a str,
    pub font: &'a FontSpec,
    pub color: RGBColor,
    /// Line height in mm
    pub height: f64,
    /// Vertical gap before each item in mm
    pub space_before: f64,
}

impl LevelStyles {
    pub fn resolve(&self, level: usize) -> LevelStyle<'_> {
        LevelStyle {
            bullet: self.bullet.resolve(level),
            font: self.font.resolve(level),
            color: *self.color.resolve(level),
            height: *self.height.resolve(level),
            space_before: *self.space_before.resolve(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FontStyle;

    #[test]
    fn test_explicit_entry_wins() {
        let height = LevelParam::new(5.0).with_level(0, 10.0).with_level(2, 7.0);
        assert_eq!(*height.resolve(0), 10.0);
        assert_eq!(*height.resolve(1), 5.0);
        assert_eq!(*height.resolve(2), 7.0);
        assert_eq!(*height.resolve(40), 5.0);
    }

    #[test]
    fn test_parse_level_key() {
        assert_eq!(parse_level_key("l0-font"), Some((LevelSlot::Level(0), "font")));
        assert_eq!(parse_level_key("l12-space-before"), Some((LevelSlot::Level(12), "space-before")));
        assert_eq!(parse_level_key("ln-bullet"), Some((LevelSlot::Generic, "bullet")));
        assert_eq!(parse_level_key("lmargin-slide"), None);
        assert_eq!(parse_level_key("l-font"), None);
        assert_eq!(parse_level_key("l0-"), None);
        assert_eq!(parse_level_key("bullet-font"), None);
    }

    #[test]
    fn test_resolve_level_style() {
        let styles = LevelStyles {
            bullet: LevelParam::new("-".to_string()).with_level(0, "•".to_string()),
            font: LevelParam::new(FontSpec::new("Sans", FontStyle::empty(), 16.0)),
            color: LevelParam::new(RGBColor::BLACK).with_level(1, RGBColor::gray(80)),
            height: LevelParam::new(8.0),
            space_before: LevelParam::new(2.0).with_level(0, 6.0),
        };

        let top = styles.resolve(0);
        assert_eq!(top.bullet, "•");
        assert_eq!(top.color, RGBColor::BLACK);
        assert_eq!(top.space_before, 6.0);

        let nested = styles.resolve(1);
        assert_eq!(nested.bullet, "-");
        assert_eq!(nested.color, RGBColor::gray(80));
        assert_eq!(nested.height, 8.0);
        assert_eq!(nested.space_before, 2.0);
    }

    #[test]
    fn test_values_include_fallback() {
        let fonts = LevelParam::new(1).with_level(3, 2);
        assert_eq!(fonts.values().copied().collect::<Vec<_>>(), vec![2, 1]);
    }
}
