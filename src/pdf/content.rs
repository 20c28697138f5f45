//! Page content streams.

use super::font::EmbeddedFont;
use crate::canvas::{DrawOp, Page};
use crate::common::unit::mm_to_pt;
use crate::fonts::FontBook;
use pdf_writer::{Content, Name, Str};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::trace;

/// Stroke width of cell borders in points.
const BORDER_WIDTH: f32 = 0.57;

/// Converts top-left millimetres to bottom-left points.
#[derive(Debug, Clone, Copy)]
pub struct PageSpace {
    height: f64,
}

impl PageSpace {
    pub fn new(height_mm: f64) -> Self {
        Self { height: height_mm }
    }

    #[inline]
    pub fn x(&self, x: f64) -> f32 {
        mm_to_pt(x) as f32
    }

    #[inline]
    pub fn y(&self, y: f64) -> f32 {
        mm_to_pt(self.height - y) as f32
    }

    #[inline]
    pub fn extent(&self, len: f64) -> f32 {
        mm_to_pt(len) as f32
    }
}

/// Resources a page draws with.
pub struct Resources<'a> {
    pub book: &'a FontBook,
    /// Keyed by face index in the book
    pub fonts: &'a BTreeMap<usize, EmbeddedFont>,
    /// Image resource names keyed by source path
    pub images: &'a HashMap<PathBuf, String>,
}

/// Translate the draw operations of `page` into a content stream.
pub fn page_content(page: &Page, space: PageSpace, resources: &Resources<'_>) -> Vec<u8> {
    let mut content = Content::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                color,
                text,
            } => {
                let Some(index) = resources.book.resolve(font) else {
                    trace!(family = %font.family, "no face for text");
                    continue;
                };
                let Some(embedded) = resources.fonts.get(&index) else {
                    continue;
                };
                let face = &resources.book.faces()[index];
                let (r, g, b) = color.to_unit();
                content
                    .begin_text()
                    .set_font(Name(embedded.name.as_bytes()), font.size as f32)
                    .set_fill_rgb(r, g, b)
                    .next_line(space.x(*x), space.y(*y))
                    .show(Str(&embedded.encode(face, text)))
                    .end_text();
            },
            DrawOp::Image {
                src,
                x,
                y,
                width,
                height,
            } => {
                let Some(name) = resources.images.get(src) else {
                    continue;
                };
                content
                    .save_state()
                    .transform([
                        space.extent(*width),
                        0.0,
                        0.0,
                        space.extent(*height),
                        space.x(*x),
                        space.y(*y + *height),
                    ])
                    .x_object(Name(name.as_bytes()))
                    .restore_state();
            },
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let (r, g, b) = color.to_unit();
                content
                    .set_fill_rgb(r, g, b)
                    .rect(space.x(*x), space.y(*y + *height), space.extent(*width), space.extent(*height))
                    .fill_nonzero();
            },
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let (r, g, b) = color.to_unit();
                content
                    .set_line_width(BORDER_WIDTH)
                    .set_stroke_rgb(r, g, b)
                    .rect(space.x(*x), space.y(*y + *height), space.extent(*width), space.extent(*height))
                    .stroke();
            },
        }
    }

    content.finish().to_vec()
}
