//! Paginating display-list surface.
//!
//! `PageSurface` implements [`Canvas`] by recording draw operations per page.
//! It follows the single-pass PDF writer model: text flows between the
//! margins, a page break happens as soon as a line would cross the bottom
//! margin, and every new page is decorated before control returns to the
//! caller.

use super::decoration::PAGE_COUNT_ALIAS;
use super::{
    Canvas, Cell, FloatDecoration, FooterStyle, LineMode, Margins, PageDecoration, PageTitle,
    TextMetrics,
};
use crate::common::unit::pt_to_mm;
use crate::common::{Align, FontSpec, FontStyle, RGBColor, Result};
use crate::images::ImageCache;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Horizontal padding between a cell edge and its text, in mm.
pub const CELL_MARGIN: f64 = 1.0;

const DEFAULT_MARGIN: f64 = 10.0;
const DEFAULT_BOTTOM_MARGIN: f64 = 20.0;

/// One recorded drawing operation. Lengths are mm from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline at `y`
    Text {
        x: f64,
        y: f64,
        font: FontSpec,
        color: RGBColor,
        text: String,
    },
    Image {
        src: PathBuf,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: RGBColor,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: RGBColor,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text of every text operation on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// The finished document: page size in mm and the pages in order.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub width: f64,
    pub height: f64,
    pub pages: Vec<Page>,
}

/// In-memory [`Canvas`] with automatic pagination.
pub struct PageSurface<'m> {
    metrics: &'m dyn TextMetrics,
    width: f64,
    height: f64,
    margins: Margins,
    bottom_margin: f64,
    x: f64,
    y: f64,
    font: FontSpec,
    color: RGBColor,
    pages: Vec<Page>,
    decoration: PageDecoration,
    title: Option<PageTitle>,
    /// Pages opened since the title was last set
    title_pages: usize,
    float: Option<FloatDecoration>,
    /// Set while painting decoration; suspends automatic breaks
    decorating: bool,
    images: ImageCache,
}

impl<'m> PageSurface<'m> {
    /// Create an empty surface with pages of `width` × `height` mm.
    pub fn new(metrics: &'m dyn TextMetrics, width: f64, height: f64) -> Self {
        Self {
            metrics,
            width,
            height,
            margins: Margins {
                left: DEFAULT_MARGIN,
                top: DEFAULT_MARGIN,
                right: DEFAULT_MARGIN,
            },
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            x: DEFAULT_MARGIN,
            y: DEFAULT_MARGIN,
            font: FontSpec::new("", FontStyle::empty(), 12.0),
            color: RGBColor::BLACK,
            pages: Vec::new(),
            decoration: PageDecoration::default(),
            title: None,
            title_pages: 0,
            float: None,
            decorating: false,
            images: ImageCache::new(),
        }
    }

    /// Distance from the bottom edge at which pages break.
    pub fn set_bottom_margin(&mut self, margin: f64) {
        self.bottom_margin = margin;
    }

    /// Close the last page and resolve the page-count alias.
    pub fn finish(mut self) -> DisplayList {
        if !self.pages.is_empty() {
            self.close_page();
        }

        let total = self.pages.len().to_string();
        for page in &mut self.pages {
            for op in &mut page.ops {
                if let DrawOp::Text { text, .. } = op
                    && text.contains(PAGE_COUNT_ALIAS)
                {
                    *text = text.replace(PAGE_COUNT_ALIAS, &total);
                }
            }
        }

        DisplayList {
            width: self.width,
            height: self.height,
            pages: self.pages,
        }
    }

    #[inline]
    fn baseline(&self, y: f64, height: f64) -> f64 {
        y + 0.5 * height + 0.3 * pt_to_mm(self.font.size)
    }

    /// Width available from the cursor to the right margin.
    #[inline]
    fn remaining_width(&self) -> f64 {
        self.width - self.margins.right - self.x
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn push_text(&mut self, x: f64, y: f64, text: &str) {
        let op = DrawOp::Text {
            x,
            y,
            font: self.font.clone(),
            color: self.color,
            text: text.to_string(),
        };
        self.push(op);
    }

    /// Open a new page if a line of `height` no longer fits, keeping x.
    fn break_if_needed(&mut self, height: f64) {
        if self.decorating || self.y + height <= self.height - self.bottom_margin {
            return;
        }
        let x = self.x;
        debug!(page = self.pages.len() + 1, "automatic page break");
        self.add_page();
        self.x = x;
    }

    /// Draw one segment of flowing text and advance past it.
    fn emit_segment(&mut self, height: f64, text: &str, new_line: bool) {
        self.break_if_needed(height);
        if !text.is_empty() {
            let y = self.baseline(self.y, height);
            self.push_text(self.x, y, text);
        }
        if new_line {
            self.x = self.margins.left;
            self.y += height;
        } else {
            self.x += self.string_width(text);
        }
    }

    fn close_page(&mut self) {
        let Some(footer) = self.decoration.footer.clone() else {
            return;
        };

        self.decorating = true;
        let (x, y) = (self.x, self.y);
        let (font, color) = (self.font.clone(), self.color);

        self.x = 0.0;
        self.y = self.height - FooterStyle::OFFSET;
        self.set_font(&footer.font);
        self.set_text_color(footer.color);
        let text = FooterStyle::text(self.pages.len());
        self.cell(Cell::new(self.width, FooterStyle::HEIGHT, &text).with_align(Align::Center));

        self.set_font(&font);
        self.set_text_color(color);
        self.x = x;
        self.y = y;
        self.decorating = false;
    }

    fn paint_decoration(&mut self) {
        let background = self.decoration.background.clone();
        background.paint(self);

        if let (Some(style), Some(title)) = (self.decoration.title.clone(), self.title.as_ref()) {
            let text = if self.title_pages == 0 {
                title.text.clone()
            } else {
                title.continued.clone()
            };
            self.set_font(&style.font);
            self.set_text_color(style.color);
            self.text(style.x, style.y, &text);
        }
        self.title_pages += 1;

        // Indentation already past the float is kept.
        if let Some(float) = self.float.clone() {
            if self.margins.left < float.text_margin() {
                float.apply(self);
            } else {
                self.image(&float.src, float.x, float.y, float.width, float.height);
            }
        }
    }
}

impl Canvas for PageSurface<'_> {
    fn set_font(&mut self, font: &FontSpec) {
        if self.font != *font {
            self.font = font.clone();
        }
    }

    fn font(&self) -> &FontSpec {
        &self.font
    }

    fn set_text_color(&mut self, color: RGBColor) {
        self.color = color;
    }

    fn text_color(&self) -> RGBColor {
        self.color
    }

    fn string_width(&self, text: &str) -> f64 {
        self.metrics.advance(&self.font, text)
    }

    fn write(&mut self, height: f64, text: &str) {
        let mut line = String::new();
        // Byte offset just past the last space in `line`
        let mut split: Option<usize> = None;
        let mut available = self.remaining_width();

        for ch in text.chars() {
            if ch == '\n' {
                self.emit_segment(height, &line, true);
                line.clear();
                split = None;
                available = self.remaining_width();
                continue;
            }

            line.push(ch);
            if ch == ' ' {
                split = Some(line.len());
            }
            if self.string_width(&line) <= available {
                continue;
            }

            match split {
                Some(at) => {
                    let rest = line.split_off(at);
                    self.emit_segment(height, line.trim_end_matches(' '), true);
                    line = rest;
                },
                None if self.x > self.margins.left => {
                    // The word does not fit after existing text; retry it on a fresh line.
                    self.emit_segment(height, "", true);
                },
                None => {
                    let last = if line.chars().count() > 1 { line.pop() } else { None };
                    self.emit_segment(height, &line, true);
                    line.clear();
                    line.extend(last);
                },
            }
            split = None;
            available = self.remaining_width();
        }

        if !line.is_empty() {
            self.emit_segment(height, &line, false);
        }
    }

    fn ln(&mut self, height: f64) {
        self.x = self.margins.left;
        self.y += height;
    }

    fn cell(&mut self, cell: Cell<'_>) {
        self.break_if_needed(cell.height);

        let width = if cell.width == 0.0 {
            self.remaining_width()
        } else {
            cell.width
        };

        if cell.border {
            let op = DrawOp::StrokeRect {
                x: self.x,
                y: self.y,
                width,
                height: cell.height,
                color: self.color,
            };
            self.push(op);
        }

        if !cell.text.is_empty() {
            let dx = match cell.align {
                Align::Left => CELL_MARGIN,
                Align::Center => (width - self.string_width(cell.text)) / 2.0,
                Align::Right => width - CELL_MARGIN - self.string_width(cell.text),
            };
            let y = self.baseline(self.y, cell.height);
            self.push_text(self.x + dx, y, cell.text);
        }

        match cell.line {
            LineMode::Right => self.x += width,
            LineMode::NextLine => {
                self.x = self.margins.left;
                self.y += cell.height;
            },
            LineMode::Below => self.y += cell.height,
        }
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        self.push_text(x, y, text);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: RGBColor) {
        self.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn image_size(&mut self, src: &Path) -> Result<(u32, u32)> {
        Ok(self.images.dimensions(src)?)
    }

    fn image(&mut self, src: &Path, x: f64, y: f64, width: f64, height: f64) {
        trace!(src = %src.display(), x, y, width, height, "image");
        self.push(DrawOp::Image {
            src: src.to_path_buf(),
            x,
            y,
            width,
            height,
        });
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn set_x(&mut self, x: f64) {
        self.x = if x >= 0.0 { x } else { self.width + x };
    }

    fn set_y(&mut self, y: f64) {
        self.x = self.margins.left;
        self.y = if y >= 0.0 { y } else { self.height + y };
    }

    fn set_xy(&mut self, x: f64, y: f64) {
        self.set_y(y);
        self.set_x(x);
    }

    fn margins(&self) -> Margins {
        self.margins
    }

    fn set_left_margin(&mut self, margin: f64) {
        self.margins.left = margin;
        if !self.pages.is_empty() && self.x < margin {
            self.x = margin;
        }
    }

    fn set_margins(&mut self, left: f64, top: f64, right: f64) {
        self.margins = Margins { left, top, right };
    }

    fn add_page(&mut self) {
        if !self.pages.is_empty() {
            self.close_page();
        }
        self.pages.push(Page::default());
        trace!(page = self.pages.len(), "new page");

        self.x = self.margins.left;
        self.y = self.margins.top;

        let (font, color) = (self.font.clone(), self.color);
        self.decorating = true;
        self.paint_decoration();
        self.decorating = false;
        self.set_font(&font);
        self.set_text_color(color);
    }

    fn page_no(&self) -> usize {
        self.pages.len()
    }

    fn page_width(&self) -> f64 {
        self.width
    }

    fn page_height(&self) -> f64 {
        self.height
    }

    fn set_decoration(&mut self, decoration: PageDecoration) {
        self.decoration = decoration;
    }

    fn set_page_title(&mut self, title: Option<PageTitle>) {
        self.title = title;
        self.title_pages = 0;
    }

    fn set_page_float(&mut self, float: Option<FloatDecoration>) {
        self.float = float;
    }
}
