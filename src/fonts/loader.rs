use super::FontEntry;
use crate::canvas::TextMetrics;
use crate::common::unit::{font_units_to, pt_to_mm};
use crate::common::{FontSpec, FontStyle, ThemeError};
use std::collections::HashMap;
use tracing::debug;
use ttf_parser::{Face, GlyphId};

/// A TrueType face with the metrics needed for layout and embedding.
#[derive(Debug, Clone)]
pub struct FontFace {
    pub entry: FontEntry,
    /// The complete font program
    pub data: Vec<u8>,
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub cap_height: i16,
    pub italic_angle: f32,
    /// Global bounding box: x_min, y_min, x_max, y_max
    pub bbox: [i16; 4],
    glyphs: HashMap<char, u16>,
    advances: Vec<u16>,
}

impl FontFace {
    /// Read and parse the font file of `entry`.
    pub fn load(entry: &FontEntry) -> Result<Self, ThemeError> {
        let data = std::fs::read(&entry.path).map_err(|_| ThemeError::FontNotFound(entry.path.clone()))?;
        Self::from_bytes(entry.clone(), data)
    }

    pub fn from_bytes(entry: FontEntry, data: Vec<u8>) -> Result<Self, ThemeError> {
        let face = Face::parse(&data, 0).map_err(|e| ThemeError::InvalidFont {
            path: entry.path.clone(),
            message: e.to_string(),
        })?;

        let mut glyphs = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|cp| {
                    if let (Some(ch), Some(gid)) = (char::from_u32(cp), subtable.glyph_index(cp)) {
                        glyphs.entry(ch).or_insert(gid.0);
                    }
                });
            }
        }

        let advances = (0..face.number_of_glyphs())
            .map(|gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0))
            .collect();

        let rect = face.global_bounding_box();
        let units_per_em = face.units_per_em();
        let ascender = face.ascender();
        let descender = face.descender();
        let cap_height = face.capital_height().unwrap_or(ascender);
        let italic_angle = face.italic_angle();

        Ok(Self {
            entry,
            data,
            units_per_em,
            ascender,
            descender,
            cap_height,
            italic_angle,
            bbox: [rect.x_min, rect.y_min, rect.x_max, rect.y_max],
            glyphs,
            advances,
        })
    }

    /// Glyph id for `ch`, `.notdef` when the face lacks it.
    #[inline]
    pub fn glyph(&self, ch: char) -> u16 {
        self.glyphs.get(&ch).copied().unwrap_or(0)
    }

    /// Every mapped character with its glyph id, in no particular order.
    pub fn codepoints(&self) -> impl Iterator<Item = (char, u16)> + '_ {
        self.glyphs.iter().map(|(ch, gid)| (*ch, *gid))
    }

    /// Horizontal advance of `gid` in font units.
    #[inline]
    pub fn glyph_advance(&self, gid: u16) -> u16 {
        self.advances.get(gid as usize).copied().unwrap_or(0)
    }

    /// Advance width of `text` at `size` points, in points.
    pub fn advance(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| self.glyph_advance(self.glyph(ch)) as u32)
            .sum();
        font_units_to(units as f64, self.units_per_em, size)
    }

    /// Name used for the embedded font, e.g. `PTSans-Bold`.
    pub fn postscript_name(&self) -> String {
        let family: String = self
            .entry
            .family
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let style = match (
            self.entry.style.contains(FontStyle::BOLD),
            self.entry.style.contains(FontStyle::ITALIC),
        ) {
            (false, false) => "",
            (true, false) => "-Bold",
            (false, true) => "-Italic",
            (true, true) => "-BoldItalic",
        };
        format!("{}{}", family, style)
    }
}

#[cfg(test)]
impl FontFace {
    /// A face mapping `chars` to glyphs 1.. with 500-unit advances on a
    /// 1000-unit em.
    pub(crate) fn synthetic(family: &str, style: FontStyle, chars: &[char]) -> Self {
        let glyphs = chars
            .iter()
            .enumerate()
            .map(|(i, ch)| (*ch, i as u16 + 1))
            .collect();
        Self {
            entry: FontEntry::new(family, style, format!("{}.ttf", family)),
            data: Vec::new(),
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            cap_height: 700,
            italic_angle: 0.0,
            bbox: [0, -200, 1000, 800],
            glyphs,
            advances: vec![500; chars.len() + 1],
        }
    }
}

/// All faces of a theme, looked up by family and style.
#[derive(Debug, Clone, Default)]
pub struct FontBook {
    faces: Vec<FontFace>,
}

impl FontBook {
    /// Load every registered face.
    #[tracing::instrument(level = "debug", skip_all, fields(fonts = entries.len()))]
    pub fn load(entries: &[FontEntry]) -> Result<Self, ThemeError> {
        let faces = entries.iter().map(FontFace::load).collect::<Result<Vec<_>, _>>()?;
        debug!(glyphs = faces.iter().map(|f| f.glyphs.len()).sum::<usize>(), "fonts loaded");
        Ok(Self::from_faces(faces))
    }

    pub fn from_faces(faces: Vec<FontFace>) -> Self {
        Self { faces }
    }

    #[inline]
    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }

    /// Index of the face drawing `font`.
    ///
    /// Prefers the exact style, then the regular face of the family, then any
    /// face of the family.
    pub fn resolve(&self, font: &FontSpec) -> Option<usize> {
        let family = || {
            self.faces
                .iter()
                .enumerate()
                .filter(|(_, face)| face.entry.family == font.family)
        };
        family()
            .find(|(_, face)| face.entry.style == font.style)
            .or_else(|| family().find(|(_, face)| face.entry.style.is_empty()))
            .or_else(|| family().next())
            .map(|(index, _)| index)
    }
}

impl TextMetrics for FontBook {
    fn advance(&self, font: &FontSpec, text: &str) -> f64 {
        match self.resolve(font) {
            Some(index) => pt_to_mm(self.faces[index].advance(text, font.size)),
            None => 0.0,
        }
    }
}
