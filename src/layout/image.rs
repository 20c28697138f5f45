//! Image sizing and placement.

use crate::canvas::{Canvas, FloatDecoration};
use crate::common::Result;
use crate::common::unit::{pt_to_mm, px_to_pt};
use crate::deck::ImageRef;
use crate::theme::Theme;
use tracing::debug;

/// Resolve a requested size against an image's intrinsic pixel size.
///
/// Zero means unspecified. With one side given the other follows the aspect
/// ratio; with neither the intrinsic size at 72 dpi is used.
///
/// ```rust
/// use slidewright::layout::image::scaled_extent;
///
/// assert_eq!(scaled_extent(200.0, 0.0, (400, 200)), (200.0, 100.0));
/// assert_eq!(scaled_extent(0.0, 0.0, (400, 200)), (400.0, 200.0));
/// ```
pub fn scaled_extent(width: f64, height: f64, (iw, ih): (u32, u32)) -> (f64, f64) {
    if iw == 0 || ih == 0 {
        return (width, height);
    }
    let ratio = ih as f64 / iw as f64;
    match (width == 0.0, height == 0.0) {
        (true, true) => (px_to_pt(iw), px_to_pt(ih)),
        (false, true) => (width, width * ratio),
        (true, false) => (height / ratio, height),
        (false, false) => (width, height),
    }
}

/// Page extent of `image` in mm.
fn extent(canvas: &mut dyn Canvas, image: &ImageRef) -> Result<(f64, f64)> {
    let size = canvas.image_size(&image.src)?;
    let (w, h) = scaled_extent(image.width, image.height, size);
    Ok((pt_to_mm(w), pt_to_mm(h)))
}

/// Draw `image` centered between the margins below the cursor and move the
/// cursor under it.
pub fn place_centered(canvas: &mut dyn Canvas, theme: &Theme, image: &ImageRef) -> Result<()> {
    let (width, height) = extent(canvas, image)?;
    let margins = canvas.margins();
    let available = canvas.page_width() - margins.left - margins.right;
    let x = margins.left + (available - width) / 2.0;

    canvas.ln(theme.image_space_before);
    let y = canvas.y();
    debug!(src = %image.src.display(), x, y, width, height, "centered image");
    canvas.image(&image.src, x, y, width, height);
    canvas.set_y(y + height);
    Ok(())
}

/// Pin `image` at the slide's left margin and narrow the text column beside it.
///
/// The returned decoration is redrawn on every page the slide continues onto.
pub fn place_float(canvas: &mut dyn Canvas, theme: &Theme, image: &ImageRef) -> Result<FloatDecoration> {
    let (width, height) = extent(canvas, image)?;
    let float = FloatDecoration {
        src: image.src.clone(),
        x: theme.slide_margin,
        y: canvas.margins().top,
        width,
        height,
        padding: theme.float_padding,
    };
    debug!(src = %image.src.display(), margin = float.text_margin(), "floated image");
    float.apply(canvas);
    Ok(float)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, FixedMetrics, PageSurface};
    use crate::common::unit::approx_eq;
    use crate::deck::{ImageAlign, ImageRef};
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn png(dir: &TempDir, w: u32, h: u32) -> PathBuf {
        let path = dir.path().join("pic.png");
        RgbImage::from_pixel(w, h, Rgb([10, 20, 30])).save(&path).unwrap();
        path
    }

    fn image_ref(src: PathBuf, width: f64, align: ImageAlign) -> ImageRef {
        ImageRef {
            src,
            width,
            height: 0.0,
            pos: None,
            align,
        }
    }

    #[test]
    fn test_scaled_extent() {
        assert_eq!(scaled_extent(200.0, 0.0, (400, 200)), (200.0, 100.0));
        assert_eq!(scaled_extent(0.0, 50.0, (400, 200)), (100.0, 50.0));
        assert_eq!(scaled_extent(30.0, 40.0, (400, 200)), (30.0, 40.0));
        assert_eq!(scaled_extent(0.0, 0.0, (144, 72)), (144.0, 72.0));
        assert_eq!(scaled_extent(10.0, 0.0, (0, 0)), (10.0, 0.0));
    }

    #[test]
    fn test_centered_image() {
        let dir = TempDir::new().unwrap();
        let src = png(&dir, 400, 200);
        let theme = Theme::sample();
        let metrics = FixedMetrics;
        let mut canvas = PageSurface::new(&metrics, 297.0, 210.0);
        canvas.set_margins(20.0, 45.0, 20.0);
        canvas.add_page();

        place_centered(&mut canvas, &theme, &image_ref(src, 200.0, ImageAlign::Center)).unwrap();
        let width = pt_to_mm(200.0);
        let height = pt_to_mm(100.0);
        assert!(approx_eq(canvas.y(), 45.0 + theme.image_space_before + height));

        let list = canvas.finish();
        match &list.pages[0].ops[0] {
            DrawOp::Image { x, width: w, .. } => {
                assert!(approx_eq(*x, 20.0 + (257.0 - width) / 2.0));
                assert!(approx_eq(*w, width));
            },
            op => panic!("unexpected {:?}", op),
        }
    }

    #[test]
    fn test_float_narrows_margin() {
        let dir = TempDir::new().unwrap();
        let src = png(&dir, 100, 100);
        let theme = Theme::sample();
        let metrics = FixedMetrics;
        let mut canvas = PageSurface::new(&metrics, 297.0, 210.0);
        canvas.set_margins(20.0, 45.0, 20.0);
        canvas.add_page();

        let float = place_float(&mut canvas, &theme, &image_ref(src, 72.0, ImageAlign::Float)).unwrap();
        assert!(approx_eq(float.width, 25.4));
        assert_eq!(float.y, 45.0);
        assert!(approx_eq(canvas.margins().left, 20.0 + 25.4 + theme.float_padding));
        assert!(approx_eq(canvas.x(), canvas.margins().left));
    }

    #[test]
    fn test_missing_image_is_error() {
        let theme = Theme::sample();
        let metrics = FixedMetrics;
        let mut canvas = PageSurface::new(&metrics, 297.0, 210.0);
        canvas.add_page();
        let missing = image_ref(PathBuf::from("/nonexistent/pic.png"), 0.0, ImageAlign::Center);
        assert!(place_centered(&mut canvas, &theme, &missing).is_err());
    }
}
