//! Theme font registry and TrueType faces.
//!
//! Themes register every face they use as a `[name, style, file]` triple.
//! The registry is resolved into a [`FontBook`] that measures text for the
//! layout engine and supplies font programs to the PDF writer.

use crate::canvas::{DisplayList, DrawOp};
use crate::common::FontStyle;
use roaring::RoaringBitmap;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod loader;
pub mod subsetter;

pub use loader::{FontBook, FontFace};
pub use subsetter::{AllsortsSubsetter, FontSubsetter};

/// One registered face: family name, style and font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    pub family: String,
    pub style: FontStyle,
    pub path: PathBuf,
}

impl FontEntry {
    pub fn new(family: impl Into<String>, style: FontStyle, path: impl Into<PathBuf>) -> Self {
        Self {
            family: family.into(),
            style,
            path: path.into(),
        }
    }
}

/// Types that can report which glyphs they draw with each face.
///
/// Keys are indices into the [`FontBook`].
pub trait CollectGlyphs {
    fn collect_glyphs(&self, book: &FontBook) -> BTreeMap<usize, RoaringBitmap>;
}

impl CollectGlyphs for DisplayList {
    fn collect_glyphs(&self, book: &FontBook) -> BTreeMap<usize, RoaringBitmap> {
        let mut used: BTreeMap<usize, RoaringBitmap> = BTreeMap::new();
        for op in self.pages.iter().flat_map(|page| &page.ops) {
            let DrawOp::Text { font, text, .. } = op else {
                continue;
            };
            let Some(index) = book.resolve(font) else {
                continue;
            };
            let face = &book.faces()[index];
            let glyphs = used.entry(index).or_default();
            glyphs.insert(0);
            glyphs.extend(text.chars().map(|ch| face.glyph(ch) as u32));
        }
        used
    }
}

/// Errors raised while preparing a font program for embedding.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Invalid font data: {0}")]
    InvalidData(String),
    #[error("Subsetting failed: {0}")]
    SubsettingFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Page;
    use crate::common::{FontSpec, RGBColor};

    #[test]
    fn test_collect_glyphs_per_face() {
        let book = FontBook::from_faces(vec![
            FontFace::synthetic("Sans", FontStyle::empty(), &['a', 'b', 'c']),
            FontFace::synthetic("Sans", FontStyle::BOLD, &['a', 'z']),
        ]);
        let text = |style, text: &str| DrawOp::Text {
            x: 0.0,
            y: 0.0,
            font: FontSpec::new("Sans", style, 12.0),
            color: RGBColor::BLACK,
            text: text.to_string(),
        };
        let list = DisplayList {
            width: 297.0,
            height: 210.0,
            pages: vec![
                Page {
                    ops: vec![text(FontStyle::empty(), "cab"), text(FontStyle::BOLD, "z?")],
                },
                Page {
                    ops: vec![text(FontStyle::ITALIC, "a")],
                },
            ],
        };

        let used = list.collect_glyphs(&book);
        // Italic falls back to the regular face
        assert_eq!(used[&0].iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        // Unmapped characters use .notdef
        assert_eq!(used[&1].iter().collect::<Vec<_>>(), vec![0, 2]);
    }
}
