//! Margin stack and page-start detection.

use crate::canvas::Canvas;
use crate::common::unit::approx_eq;
use smallvec::SmallVec;

/// Saved left margins plus the one-shot page-start detector.
///
/// Position and margins themselves live on the canvas; the cursor only
/// remembers what to restore.
#[derive(Debug, Default)]
pub struct Cursor {
    saved: SmallVec<[f64; 8]>,
    /// Page number seen by the last page-start query
    seen_page: usize,
}

impl Cursor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the left margin and move it `extra` mm to the right.
    pub fn push_margin(&mut self, canvas: &mut dyn Canvas, extra: f64) {
        let left = canvas.margins().left;
        self.saved.push(left);
        canvas.set_left_margin(left + extra);
    }

    /// Restore the margin saved by the matching [`Cursor::push_margin`].
    pub fn pop_margin(&mut self, canvas: &mut dyn Canvas) {
        if let Some(left) = self.saved.pop() {
            canvas.set_left_margin(left);
        }
    }

    /// Number of margins currently saved.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// True when the cursor sits at the top margin of a page nobody has asked
    /// about yet.
    pub fn is_page_start(&mut self, canvas: &dyn Canvas) -> bool {
        let page = canvas.page_no();
        if page == self.seen_page {
            return false;
        }
        self.seen_page = page;
        approx_eq(canvas.y(), canvas.margins().top)
    }

    /// Forget saved margins; used between slides.
    pub fn clear(&mut self) {
        self.saved.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{FixedMetrics, PageSurface};

    #[test]
    fn test_push_pop_nest() {
        let metrics = FixedMetrics;
        let mut surface = PageSurface::new(&metrics, 297.0, 210.0);
        surface.set_margins(20.0, 40.0, 20.0);
        surface.add_page();

        let mut cursor = Cursor::new();
        cursor.push_margin(&mut surface, 8.0);
        cursor.push_margin(&mut surface, 6.0);
        assert_eq!(surface.margins().left, 34.0);
        assert_eq!(cursor.depth(), 2);

        cursor.pop_margin(&mut surface);
        assert_eq!(surface.margins().left, 28.0);
        cursor.pop_margin(&mut surface);
        assert_eq!(surface.margins().left, 20.0);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_page_start_is_one_shot() {
        let metrics = FixedMetrics;
        let mut surface = PageSurface::new(&metrics, 297.0, 210.0);
        surface.set_margins(20.0, 40.0, 20.0);
        let mut cursor = Cursor::new();

        surface.add_page();
        assert!(cursor.is_page_start(&surface));
        assert!(!cursor.is_page_start(&surface));

        surface.add_page();
        surface.ln(5.0);
        assert!(!cursor.is_page_start(&surface));

        // A page found away from its top margin is consumed as well
        surface.add_page();
        assert!(cursor.is_page_start(&surface));
    }
}
