//! Drawing surface contract.
//!
//! The layout engine never draws directly. Every visible effect goes through
//! the [`Canvas`] trait: fonts and colors, flowing text, cells, absolute text,
//! rectangles, images, cursor and margin state, and page creation.
//!
//! Coordinates are millimetres with the origin at the top-left corner of the
//! page. Font sizes are points.
//!
//! # Architecture
//!
//! - `Canvas`: object-safe primitive contract consumed as `&mut dyn Canvas`
//! - `PageDecoration`, `PageTitle`, `FloatDecoration`: what the canvas paints
//!   on every new page by itself
//! - `TextMetrics`: string measurement used by the surface
//! - `PageSurface`: the paginating display-list implementation
//!
//! # Example
//!
//! ```rust
//! use slidewright::canvas::{Canvas, FixedMetrics, PageSurface};
//! use slidewright::common::{FontSpec, FontStyle};
//!
//! let metrics = FixedMetrics;
//! let mut surface = PageSurface::new(&metrics, 297.0, 210.0);
//! surface.set_margins(20.0, 40.0, 20.0);
//! surface.add_page();
//! surface.set_font(&FontSpec::new("Sans", FontStyle::empty(), 20.0));
//! surface.write(10.0, "Hello");
//!
//! let document = surface.finish();
//! assert_eq!(document.pages.len(), 1);
//! ```

// Submodule declarations
pub mod decoration;
pub mod metrics;
pub mod surface;

// Re-exports
pub use decoration::{FloatDecoration, FooterStyle, PageDecoration, PageTitle, TitleStyle};
pub use metrics::{FixedMetrics, TextMetrics};
pub use surface::{DisplayList, DrawOp, Page, PageSurface};

use crate::common::{Align, FontSpec, RGBColor, Result};
use std::path::Path;

/// Where the cursor goes after a cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    /// Continue to the right of the cell
    #[default]
    Right,
    /// Start of the next line at the left margin
    NextLine,
    /// Below the cell, at the cell's x
    Below,
}

/// A fixed box holding a single line of text.
///
/// A width of zero extends the cell to the right margin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<'a> {
    pub width: f64,
    pub height: f64,
    pub text: &'a str,
    /// Stroke the cell outline
    pub border: bool,
    pub align: Align,
    pub line: LineMode,
}

impl<'a> Cell<'a> {
    /// A borderless, left-aligned cell that leaves the cursor to its right.
    pub fn new(width: f64, height: f64, text: &'a str) -> Self {
        Self {
            width,
            height,
            text,
            border: false,
            align: Align::Left,
            line: LineMode::Right,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_line(mut self, line: LineMode) -> Self {
        self.line = line;
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }
}

/// Page margins in mm.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
}

/// The drawing primitives the layout engine relies on.
///
/// Implementations paginate on their own: `write`, `ln` and `cell` may open a
/// new page when the cursor passes the bottom margin. Callers learn about such
/// breaks only through [`Canvas::page_no`].
pub trait Canvas {
    /// Select the current font.
    fn set_font(&mut self, font: &FontSpec);

    /// The current font.
    fn font(&self) -> &FontSpec;

    /// Set the color used by subsequent text.
    fn set_text_color(&mut self, color: RGBColor);

    /// The current text color.
    fn text_color(&self) -> RGBColor;

    /// Width of `text` in the current font.
    fn string_width(&self, text: &str) -> f64;

    /// Flow `text` from the cursor, wrapping at the right margin. Lines are
    /// `height` tall.
    fn write(&mut self, height: f64, text: &str);

    /// Move to the start of the next line, `height` below the current one.
    fn ln(&mut self, height: f64);

    /// Draw a single-line cell at the cursor.
    fn cell(&mut self, cell: Cell<'_>);

    /// Draw `text` with its baseline at `(x, y)` without moving the cursor.
    fn text(&mut self, x: f64, y: f64, text: &str);

    /// Fill a rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: RGBColor);

    /// Intrinsic pixel size of the image at `src`.
    fn image_size(&mut self, src: &Path) -> Result<(u32, u32)>;

    /// Draw the image at `src` into the given box.
    fn image(&mut self, src: &Path, x: f64, y: f64, width: f64, height: f64);

    fn x(&self) -> f64;

    fn y(&self) -> f64;

    fn set_x(&mut self, x: f64);

    /// Move to `y` and back to the left margin.
    fn set_y(&mut self, y: f64);

    fn set_xy(&mut self, x: f64, y: f64);

    fn margins(&self) -> Margins;

    /// Change the left margin, pulling the cursor along if it would fall
    /// outside.
    fn set_left_margin(&mut self, margin: f64);

    fn set_margins(&mut self, left: f64, top: f64, right: f64);

    /// Close the current page and open a decorated new one.
    fn add_page(&mut self);

    /// One-based number of the current page; zero before the first page.
    fn page_no(&self) -> usize;

    fn page_width(&self) -> f64;

    fn page_height(&self) -> f64;

    /// Replace the decoration painted on every new page.
    fn set_decoration(&mut self, decoration: PageDecoration);

    /// Set or clear the slide title. Resets the continuation state so the
    /// next page shows the first-page text.
    fn set_page_title(&mut self, title: Option<PageTitle>);

    /// Set or clear the image floated on every new page.
    fn set_page_float(&mut self, float: Option<FloatDecoration>);
}
