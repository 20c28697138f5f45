//! Embedding TrueType faces as composite fonts.

use super::{RefAlloc, deflate};
use crate::common::Result;
use crate::fonts::{FontFace, FontSubsetter};
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo};
use pdf_writer::{Filter, Name, Pdf, Rect, Ref, Str};
use roaring::RoaringBitmap;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

const IDENTITY_H: Name<'static> = Name(b"Identity-H");

fn system_info() -> SystemInfo<'static> {
    SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    }
}

/// A face written to the document.
#[derive(Debug, Clone)]
pub struct EmbeddedFont {
    /// Resource name, e.g. `F1`
    pub name: String,
    pub reference: Ref,
    /// Glyph id in the original face to CID in the embedded program
    cids: HashMap<u16, u16>,
}

impl EmbeddedFont {
    /// Two-byte Identity-H codes for `text`.
    pub fn encode(&self, face: &FontFace, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| {
                let gid = face.glyph(ch);
                self.cids.get(&gid).copied().unwrap_or(0).to_be_bytes()
            })
            .collect()
    }
}

/// Write `face` reduced to `glyphs` as a Type0 font with a CIDFontType2
/// descendant, its descriptor, program and ToUnicode map.
///
/// A face that cannot be subset is embedded whole.
pub fn embed(
    pdf: &mut Pdf,
    refs: &mut RefAlloc,
    face: &FontFace,
    glyphs: &RoaringBitmap,
    subsetter: &dyn FontSubsetter,
    name: String,
) -> Result<EmbeddedFont> {
    let gids: Vec<u16> = glyphs.iter().filter_map(|g| u16::try_from(g).ok()).collect();
    let base_name = face.postscript_name();

    let (program, cids): (Vec<u8>, HashMap<u16, u16>) = match subsetter.subset(face, &gids) {
        Ok(program) => {
            let cids = gids.iter().enumerate().map(|(cid, gid)| (*gid, cid as u16)).collect();
            (program, cids)
        },
        Err(e) => {
            warn!(font = %base_name, error = %e, "subsetting failed, embedding the full font");
            let cids = gids.iter().map(|gid| (*gid, *gid)).collect();
            (face.data.clone(), cids)
        },
    };
    debug!(font = %base_name, glyphs = gids.len(), bytes = program.len(), "embedding font");

    let type0_ref = refs.bump();
    let cid_ref = refs.bump();
    let descriptor_ref = refs.bump();
    let program_ref = refs.bump();
    let cmap_ref = refs.bump();

    pdf.type0_font(type0_ref)
        .base_font(Name(base_name.as_bytes()))
        .encoding_predefined(IDENTITY_H)
        .descendant_font(cid_ref)
        .to_unicode(cmap_ref);

    let scale = |units: f32| units * 1000.0 / face.units_per_em as f32;
    let mut by_cid: BTreeMap<u16, u16> = BTreeMap::new();
    for (gid, cid) in &cids {
        by_cid.insert(*cid, *gid);
    }

    {
        let mut cid_font = pdf.cid_font(cid_ref);
        cid_font
            .subtype(CidFontType::Type2)
            .base_font(Name(base_name.as_bytes()))
            .system_info(system_info())
            .font_descriptor(descriptor_ref)
            .default_width(0.0)
            .cid_to_gid_map_predefined(Name(b"Identity"));
        let mut widths = cid_font.widths();
        for (cid, gid) in &by_cid {
            widths.consecutive(*cid, [scale(face.glyph_advance(*gid) as f32)]);
        }
    }

    let mut flags = FontFlags::NON_SYMBOLIC;
    if face.italic_angle != 0.0 {
        flags |= FontFlags::ITALIC;
    }
    let [x_min, y_min, x_max, y_max] = face.bbox.map(|v| scale(v as f32));
    pdf.font_descriptor(descriptor_ref)
        .name(Name(base_name.as_bytes()))
        .flags(flags)
        .bbox(Rect::new(x_min, y_min, x_max, y_max))
        .italic_angle(face.italic_angle)
        .ascent(scale(face.ascender as f32))
        .descent(scale(face.descender as f32))
        .cap_height(scale(face.cap_height as f32))
        .stem_v(80.0)
        .font_file2(program_ref);

    let compressed = deflate(&program)?;
    pdf.stream(program_ref, &compressed)
        .filter(Filter::FlateDecode)
        .pair(Name(b"Length1"), program.len() as i32);

    // Lowest codepoint wins when several characters share a glyph
    let mut unicode: BTreeMap<u16, char> = BTreeMap::new();
    for (ch, gid) in face.codepoints() {
        if let Some(cid) = cids.get(&gid) {
            unicode
                .entry(*cid)
                .and_modify(|c| *c = (*c).min(ch))
                .or_insert(ch);
        }
    }
    let mut cmap: pdf_writer::types::UnicodeCmap = pdf_writer::types::UnicodeCmap::new(Name(b"Custom"), system_info());
    for (cid, ch) in unicode {
        cmap.pair(cid, ch);
    }
    pdf.cmap(cmap_ref, &cmap.finish());

    Ok(EmbeddedFont {
        name,
        reference: type0_ref,
        cids,
    })
}
