use crate::common::FormatError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Intrinsic image sizes keyed by path.
///
/// Only the image header is read; pixels are decoded later by the PDF writer.
#[derive(Debug, Default)]
pub struct ImageCache {
    sizes: HashMap<PathBuf, (u32, u32)>,
}

impl ImageCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel width and height of the image at `path`.
    pub fn dimensions(&mut self, path: &Path) -> Result<(u32, u32), FormatError> {
        if let Some(size) = self.sizes.get(path) {
            return Ok(*size);
        }

        let size = image::image_dimensions(path).map_err(|e| FormatError::image(path, e))?;
        self.sizes.insert(path.to_path_buf(), size);
        Ok(size)
    }
}
