//! Slide themes.
//!
//! A theme is a directory holding `info.yaml` and the font files it registers.
//! Loading validates everything up front, so rendering never fails on a theme
//! lookup.
//!
//! # Architecture
//!
//! - `resolver`: per-level parameter families with a generic fallback
//! - `background`: the closed set of page backgrounds
//! - `loader`: `info.yaml` parsing and validation
//!
//! # Example
//!
//! ```no_run
//! use slidewright::theme::Theme;
//!
//! let theme = Theme::load("themes/default")?;
//! let top = theme.level(0);
//! println!("{} at {}pt", top.font.family, top.font.size);
//! # Ok::<(), slidewright::common::ThemeError>(())
//! ```

// Submodule declarations
pub mod background;
pub mod loader;
pub mod resolver;

// Re-exports
pub use background::Background;
pub use resolver::{LevelParam, LevelSlot, LevelStyle, LevelStyles, level_key, parse_level_key};

use crate::canvas::{FooterStyle, PageDecoration, TitleStyle};
use crate::common::{Align, FontSpec, RGBColor};
use crate::fonts::FontEntry;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// A fixed text box on the title page.
///
/// Theme files spell it as `[[x, y, w, h], align, font, color]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub align: Align,
    pub font: FontSpec,
    pub color: RGBColor,
}

impl<'de> Deserialize<'de> for TextBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ((x, y, width, height), align, font, color) =
            <((f64, f64, f64, f64), Align, FontSpec, RGBColor)>::deserialize(deserializer)?;
        Ok(TextBox {
            x,
            y,
            width,
            height,
            align,
            font,
            color,
        })
    }
}

/// Boxes for the deck metadata on the title page. Missing boxes are skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TitlePageBoxes {
    pub title: Option<TextBox>,
    pub author: Option<TextBox>,
    pub email: Option<TextBox>,
}

/// Code block styling.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeStyle {
    pub font: FontSpec,
    /// Line height in mm
    pub height: f64,
    /// Name of the highlighting color scheme
    pub scheme: String,
}

/// A validated theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Directory the theme was loaded from
    pub dir: PathBuf,
    pub page_width: f64,
    pub page_height: f64,
    /// Left and right margin of slide content, also the column gap
    pub slide_margin: f64,
    pub top_margin: f64,
    /// Distance from the bottom edge that triggers a page break
    pub bottom_margin: f64,
    /// Family used for emphasized runs
    pub body_font: String,
    pub bullet_font: FontSpec,
    pub bullet_color: RGBColor,
    pub levels: LevelStyles,
    pub image_space_before: f64,
    /// Gap between a floated image and the text beside it
    pub float_padding: f64,
    pub code: CodeStyle,
    pub slide_title: TitleStyle,
    pub title_page: TitlePageBoxes,
    pub background: Background,
    pub footer: Option<FooterStyle>,
    /// Registered font faces
    pub fonts: Vec<FontEntry>,
}

impl Theme {
    /// Styles of nesting level `level`.
    #[inline]
    pub fn level(&self, level: usize) -> LevelStyle<'_> {
        self.levels.resolve(level)
    }

    /// Decoration painted on every slide page.
    pub fn decoration(&self) -> PageDecoration {
        PageDecoration {
            background: self.background.clone(),
            title: Some(self.slide_title.clone()),
            footer: self.footer.clone(),
        }
    }

    /// Decoration of the title page: background and footer only.
    pub fn title_page_decoration(&self) -> PageDecoration {
        PageDecoration {
            title: None,
            ..self.decoration()
        }
    }

    /// Every font family the theme draws with.
    pub fn font_families(&self) -> impl Iterator<Item = &str> {
        let boxes = [
            &self.title_page.title,
            &self.title_page.author,
            &self.title_page.email,
        ];
        std::iter::once(self.body_font.as_str())
            .chain(std::iter::once(self.bullet_font.family.as_str()))
            .chain(self.levels.font.values().map(|f| f.family.as_str()))
            .chain(std::iter::once(self.code.font.family.as_str()))
            .chain(std::iter::once(self.slide_title.font.family.as_str()))
            .chain(boxes.into_iter().flatten().map(|b| b.font.family.as_str()))
            .chain(self.footer.iter().map(|f| f.font.family.as_str()))
    }
}

#[cfg(test)]
impl Theme {
    /// A complete in-memory theme with a single `Sans` family.
    pub(crate) fn sample() -> Self {
        use crate::common::FontStyle;

        let sans = |style, size| FontSpec::new("Sans", style, size);
        Theme {
            dir: PathBuf::from("."),
            page_width: 297.0,
            page_height: 210.0,
            slide_margin: 20.0,
            top_margin: 45.0,
            bottom_margin: 20.0,
            body_font: "Sans".to_string(),
            bullet_font: sans(FontStyle::empty(), 20.0),
            bullet_color: RGBColor::gray(180),
            levels: LevelStyles {
                bullet: LevelParam::new("-".to_string()).with_level(0, "•".to_string()),
                font: LevelParam::new(sans(FontStyle::empty(), 16.0))
                    .with_level(0, sans(FontStyle::empty(), 20.0)),
                color: LevelParam::new(RGBColor::gray(60)).with_level(0, RGBColor::BLACK),
                height: LevelParam::new(8.0).with_level(0, 10.0),
                space_before: LevelParam::new(10.0).with_level(0, 12.0),
            },
            image_space_before: 4.0,
            float_padding: 15.0,
            code: CodeStyle {
                font: sans(FontStyle::empty(), 12.0),
                height: 6.0,
                scheme: "InspiredGitHub".to_string(),
            },
            slide_title: TitleStyle {
                font: sans(FontStyle::BOLD, 32.0),
                color: RGBColor::new(0, 84, 147),
                x: 20.0,
                y: 30.0,
            },
            title_page: TitlePageBoxes::default(),
            background: Background::None,
            footer: None,
            fonts: Vec::new(),
        }
    }
}
