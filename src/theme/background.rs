//! Page backgrounds selected by the theme.

use crate::canvas::Canvas;
use crate::common::RGBColor;
use serde::Deserialize;
use std::path::PathBuf;

/// What is painted behind every page.
///
/// Theme files select the variant with `kind`:
///
/// ```yaml
/// slide-background:
///   kind: band
///   x: 0
///   y: 0
///   width: 297
///   height: 18
///   color: [0, 84, 147]
/// ```
///
/// Image sources are relative to the theme directory. A zero width or height
/// is derived from the image's aspect ratio when the theme is loaded.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Background {
    #[default]
    None,
    /// The whole page in one color
    Solid { color: RGBColor },
    /// A filled rectangle
    Band {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: RGBColor,
    },
    /// A picture at a fixed position
    Image {
        src: PathBuf,
        x: f64,
        y: f64,
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
    },
}

impl Background {
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        match self {
            Background::None => {},
            Background::Solid { color } => {
                let (width, height) = (canvas.page_width(), canvas.page_height());
                canvas.fill_rect(0.0, 0.0, width, height, *color);
            },
            Background::Band {
                x,
                y,
                width,
                height,
                color,
            } => canvas.fill_rect(*x, *y, *width, *height, *color),
            Background::Image {
                src,
                x,
                y,
                width,
                height,
            } => canvas.image(src, *x, *y, *width, *height),
        }
    }
}
