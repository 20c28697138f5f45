use allsorts::{
    binary::read::ReadScope,
    font_data::FontData as AllsortsFontData,
    subset::{CmapTarget, SubsetProfile, subset},
};

use super::{FontError, FontFace};

/// Reduces a font program to the glyphs a document draws.
///
/// Glyph `glyph_ids[i]` becomes glyph `i` of the returned program.
pub trait FontSubsetter {
    fn subset(&self, font: &FontFace, glyph_ids: &[u16]) -> Result<Vec<u8>, FontError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllsortsSubsetter;

impl AllsortsSubsetter {
    pub fn new() -> Self {
        Self
    }
}

impl FontSubsetter for AllsortsSubsetter {
    fn subset(&self, font: &FontFace, glyph_ids: &[u16]) -> Result<Vec<u8>, FontError> {
        let scope = ReadScope::new(&font.data);
        let font_data = scope
            .read::<AllsortsFontData>()
            .map_err(|e| FontError::InvalidData(e.to_string()))?;

        let provider = font_data
            .table_provider(0)
            .map_err(|e| FontError::InvalidData(e.to_string()))?;

        subset(&provider, glyph_ids, &SubsetProfile::Pdf, CmapTarget::default())
            .map_err(|e| FontError::SubsettingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FontStyle;

    #[test]
    fn test_subset_rejects_empty_program() {
        let face = FontFace::synthetic("Sans", FontStyle::empty(), &['a']);
        let err = AllsortsSubsetter::new().subset(&face, &[0, 1]).unwrap_err();
        assert!(matches!(err, FontError::InvalidData(_)));
    }
}
