use crate::common::FormatError;
use std::path::Path;

/// Decoded pixels ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Packed 8-bit RGB samples
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when some pixel is not opaque
    pub alpha: Option<Vec<u8>>,
}

/// Decode the image at `path` into RGB samples and an optional alpha plane.
pub fn decode(path: &Path) -> Result<RasterImage, FormatError> {
    let img = image::open(path).map_err(|e| FormatError::image(path, e))?;
    let (width, height) = (img.width(), img.height());

    let alpha = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let plane: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
        plane.iter().any(|&a| a != u8::MAX).then_some(plane)
    } else {
        None
    };

    Ok(RasterImage {
        width,
        height,
        rgb: img.to_rgb8().into_raw(),
        alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_decode_opaque_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opaque.png");
        RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])).save(&path).unwrap();

        let raster = decode(&path).unwrap();
        assert_eq!((raster.width, raster.height), (3, 2));
        assert_eq!(raster.rgb.len(), 18);
        assert_eq!(&raster.rgb[..3], &[1, 2, 3]);
        assert!(raster.alpha.is_none());
    }

    #[test]
    fn test_decode_keeps_transparency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));
        img.put_pixel(1, 1, Rgba([9, 9, 9, 0]));
        img.save(&path).unwrap();

        let raster = decode(&path).unwrap();
        assert_eq!(raster.alpha, Some(vec![255, 255, 255, 0]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(decode(&path), Err(FormatError::ImageUnreadable { .. })));
    }
}
