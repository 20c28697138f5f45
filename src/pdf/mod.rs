//! PDF output.
//!
//! Serializes a laid-out [`DisplayList`] into a PDF document with `pdf-writer`.
//! Every face the document draws with is embedded as a composite font
//! (Type0 over CIDFontType2, Identity-H encoding) reduced to the glyphs in
//! use. Images become Flate-compressed RGB XObjects with an optional alpha
//! soft mask.
//!
//! # Architecture
//!
//! - `font`: font program, descriptor and ToUnicode map per face
//! - `content`: page content streams in bottom-left point space
//!
//! # Example
//!
//! ```no_run
//! use slidewright::canvas::DisplayList;
//! use slidewright::fonts::FontBook;
//! use slidewright::pdf::PdfWriter;
//!
//! # fn demo(book: &FontBook, list: &DisplayList) -> slidewright::common::Result<()> {
//! let bytes = PdfWriter::new(book).write(list)?;
//! std::fs::write("out.pdf", bytes)?;
//! # Ok(())
//! # }
//! ```

// Submodule declarations
pub mod content;
pub mod font;

// Re-exports
pub use content::PageSpace;
pub use font::EmbeddedFont;

use crate::canvas::{DisplayList, DrawOp};
use crate::common::Result;
use crate::common::unit::mm_to_pt;
use crate::deck::DeckMeta;
use crate::fonts::{AllsortsSubsetter, CollectGlyphs, FontBook, FontSubsetter};
use crate::images;
use content::Resources;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Filter, Name, Pdf, Rect, Ref, TextStr};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

const CREATOR: &str = "slidewright";
const PRODUCER: &str = concat!("slidewright ", env!("CARGO_PKG_VERSION"));

/// Hands out consecutive object ids.
#[derive(Debug)]
pub struct RefAlloc(i32);

impl RefAlloc {
    pub fn new() -> Self {
        Self(1)
    }

    pub fn bump(&mut self) -> Ref {
        let r = Ref::new(self.0);
        self.0 += 1;
        r
    }
}

impl Default for RefAlloc {
    fn default() -> Self {
        Self::new()
    }
}

/// Zlib-compress `data` for a FlateDecode stream.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Writes display lists as PDF documents.
pub struct PdfWriter<'a> {
    book: &'a FontBook,
    meta: Option<&'a DeckMeta>,
    subsetter: &'a dyn FontSubsetter,
}

impl<'a> PdfWriter<'a> {
    pub fn new(book: &'a FontBook) -> Self {
        Self {
            book,
            meta: None,
            subsetter: &AllsortsSubsetter,
        }
    }

    /// Fill the document information dictionary from `meta`.
    pub fn with_meta(mut self, meta: Option<&'a DeckMeta>) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_subsetter(mut self, subsetter: &'a dyn FontSubsetter) -> Self {
        self.subsetter = subsetter;
        self
    }

    #[tracing::instrument(level = "debug", skip_all, fields(pages = list.pages.len()))]
    pub fn write(&self, list: &DisplayList) -> Result<Vec<u8>> {
        let mut pdf = Pdf::new();
        let mut refs = RefAlloc::new();
        let catalog_ref = refs.bump();
        let pages_ref = refs.bump();

        let mut fonts = BTreeMap::new();
        for (index, glyphs) in list.collect_glyphs(self.book) {
            let face = &self.book.faces()[index];
            let name = format!("F{}", fonts.len() + 1);
            let embedded = font::embed(&mut pdf, &mut refs, face, &glyphs, self.subsetter, name)?;
            fonts.insert(index, embedded);
        }

        let (images, image_refs) = self.write_images(&mut pdf, &mut refs, list)?;

        let space = PageSpace::new(list.height);
        let resources = Resources {
            book: self.book,
            fonts: &fonts,
            images: &images,
        };
        let media_box = Rect::new(0.0, 0.0, mm_to_pt(list.width) as f32, mm_to_pt(list.height) as f32);

        let mut page_refs = Vec::with_capacity(list.pages.len());
        for page in &list.pages {
            let page_ref = refs.bump();
            let content_ref = refs.bump();
            page_refs.push(page_ref);

            let stream = deflate(&content::page_content(page, space, &resources))?;
            pdf.stream(content_ref, &stream).filter(Filter::FlateDecode);

            let mut writer = pdf.page(page_ref);
            writer.media_box(media_box).parent(pages_ref).contents(content_ref);
            let mut res = writer.resources();
            {
                let mut font_dict = res.fonts();
                for embedded in fonts.values() {
                    font_dict.pair(Name(embedded.name.as_bytes()), embedded.reference);
                }
            }
            if !image_refs.is_empty() {
                let mut xobjects = res.x_objects();
                for (name, reference) in &image_refs {
                    xobjects.pair(Name(name.as_bytes()), *reference);
                }
            }
        }

        pdf.catalog(catalog_ref).pages(pages_ref);
        pdf.pages(pages_ref)
            .kids(page_refs.iter().copied())
            .count(page_refs.len() as i32);

        {
            let mut info = pdf.document_info(refs.bump());
            info.producer(TextStr(PRODUCER)).creator(TextStr(CREATOR));
            if let Some(meta) = self.meta {
                info.title(TextStr(&meta.title)).author(TextStr(&meta.author));
                if !meta.keywords.is_empty() {
                    info.keywords(TextStr(&meta.keywords.join(", ")));
                }
            }
        }

        debug!(fonts = fonts.len(), images = images.len(), "document assembled");
        Ok(pdf.finish())
    }

    /// Embed every distinct image source once.
    fn write_images(
        &self,
        pdf: &mut Pdf,
        refs: &mut RefAlloc,
        list: &DisplayList,
    ) -> Result<(HashMap<PathBuf, String>, Vec<(String, Ref)>)> {
        let mut names = HashMap::new();
        let mut xobjects = Vec::new();

        for op in list.pages.iter().flat_map(|p| &p.ops) {
            let DrawOp::Image { src, .. } = op else {
                continue;
            };
            if names.contains_key(src) {
                continue;
            }

            let raster = images::decode(src)?;
            let (width, height) = (raster.width as i32, raster.height as i32);
            let mask_ref = match &raster.alpha {
                Some(alpha) => {
                    let mask_ref = refs.bump();
                    let data = deflate(alpha)?;
                    let mut mask = pdf.image_xobject(mask_ref, &data);
                    mask.filter(Filter::FlateDecode);
                    mask.width(width).height(height).bits_per_component(8);
                    mask.color_space().device_gray();
                    Some(mask_ref)
                },
                None => None,
            };

            let image_ref = refs.bump();
            let data = deflate(&raster.rgb)?;
            {
                let mut image = pdf.image_xobject(image_ref, &data);
                image.filter(Filter::FlateDecode);
                image.width(width).height(height).bits_per_component(8);
                image.color_space().device_rgb();
                if let Some(mask_ref) = mask_ref {
                    image.s_mask(mask_ref);
                }
            }

            let name = format!("Im{}", xobjects.len() + 1);
            debug!(src = %src.display(), %name, "embedding image");
            names.insert(src.clone(), name.clone());
            xobjects.push((name, image_ref));
        }
        Ok((names, xobjects))
    }
}
