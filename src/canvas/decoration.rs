//! Per-page decoration painted by the canvas itself.

use super::Canvas;
use crate::common::{FontSpec, RGBColor};
use crate::theme::Background;
use std::path::PathBuf;

/// Placeholder replaced by the total page count when the document is finished.
pub const PAGE_COUNT_ALIAS: &str = "{nb}";

/// Font, color and baseline position of slide titles.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleStyle {
    pub font: FontSpec,
    pub color: RGBColor,
    pub x: f64,
    pub y: f64,
}

/// Page-number footer drawn when a page is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct FooterStyle {
    pub font: FontSpec,
    pub color: RGBColor,
}

impl FooterStyle {
    /// Distance of the footer cell from the bottom edge, in mm.
    pub const OFFSET: f64 = 15.0;
    /// Height of the footer cell, in mm.
    pub const HEIGHT: f64 = 10.0;

    /// Footer text for `page`, with the total page count still aliased.
    pub fn text(page: usize) -> String {
        format!("Page {}/{}", page, PAGE_COUNT_ALIAS)
    }
}

/// Everything the canvas paints on every page without being asked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageDecoration {
    pub background: Background,
    /// Style of the slide title; no title is drawn without it
    pub title: Option<TitleStyle>,
    pub footer: Option<FooterStyle>,
}

/// Slide title text for the first page and for overflow pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle {
    pub text: String,
    pub continued: String,
}

impl PageTitle {
    /// Title whose overflow pages append `suffix` to `text`.
    pub fn with_suffix(text: impl Into<String>, suffix: &str) -> Self {
        let text = text.into();
        let continued = format!("{}{}", text, suffix);
        Self { text, continued }
    }
}

/// An image pinned beside the text column for the rest of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatDecoration {
    pub src: PathBuf,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Gap between the image and the narrowed text column
    pub padding: f64,
}

impl FloatDecoration {
    /// Left margin of the text column next to the image.
    #[inline]
    pub fn text_margin(&self) -> f64 {
        self.x + self.width + self.padding
    }

    /// Draw the image and narrow the left margin past it.
    pub fn apply(&self, canvas: &mut dyn Canvas) {
        canvas.set_left_margin(self.text_margin());
        canvas.image(&self.src, self.x, self.y, self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_suffix() {
        let title = PageTitle::with_suffix("Overview", " (Contd)");
        assert_eq!(title.text, "Overview");
        assert_eq!(title.continued, "Overview (Contd)");
    }

    #[test]
    fn test_footer_text_keeps_alias() {
        assert_eq!(FooterStyle::text(3), "Page 3/{nb}");
    }

    #[test]
    fn test_float_text_margin() {
        let float = FloatDecoration {
            src: PathBuf::from("logo.png"),
            x: 20.0,
            y: 40.0,
            width: 60.0,
            height: 30.0,
            padding: 15.0,
        };
        assert_eq!(float.text_margin(), 95.0);
    }
}
