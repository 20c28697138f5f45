//! Column arrangements.

use crate::canvas::Canvas;
use crate::deck::{ColumnPos, LayoutMode};
use crate::theme::Theme;
use std::fmt;

/// Places content blocks on the slide.
///
/// `start` is called before a top-level list, image or code block and may
/// move the cursor and margins; `end` after it.
pub trait LayoutStrategy: fmt::Debug {
    fn start(&mut self, canvas: &mut dyn Canvas, pos: Option<ColumnPos>);

    fn end(&mut self, canvas: &mut dyn Canvas);

    fn mode(&self) -> LayoutMode;
}

/// The full content width; starting a block changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleLayout;

impl LayoutStrategy for SimpleLayout {
    fn start(&mut self, _canvas: &mut dyn Canvas, _pos: Option<ColumnPos>) {}

    fn end(&mut self, _canvas: &mut dyn Canvas) {}

    fn mode(&self) -> LayoutMode {
        LayoutMode::Simple
    }
}

/// Two equal columns separated by a gap as wide as the slide margin.
#[derive(Debug, Clone)]
pub struct TwoColumnLayout {
    margin: f64,
    top: f64,
    column_width: f64,
    last: Option<ColumnPos>,
}

impl TwoColumnLayout {
    pub fn new(page_width: f64, margin: f64, top: f64) -> Self {
        let gap = margin;
        Self {
            margin,
            top,
            column_width: (page_width - 2.0 * margin - gap) / 2.0,
            last: None,
        }
    }

    pub fn for_theme(theme: &Theme) -> Self {
        Self::new(theme.page_width, theme.slide_margin, theme.top_margin)
    }

    #[inline]
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Column chosen by the most recent `start`.
    #[inline]
    pub fn last(&self) -> Option<ColumnPos> {
        self.last
    }

    /// Left edge of the right column.
    #[inline]
    fn right_edge(&self) -> f64 {
        self.margin + self.column_width + self.margin
    }
}

impl LayoutStrategy for TwoColumnLayout {
    fn start(&mut self, canvas: &mut dyn Canvas, pos: Option<ColumnPos>) {
        let target = pos.unwrap_or(match self.last {
            Some(ColumnPos::Left) => ColumnPos::Right,
            Some(ColumnPos::Right) | None => ColumnPos::Left,
        });

        match target {
            ColumnPos::Left => canvas.set_margins(self.margin, self.top, self.right_edge()),
            ColumnPos::Right => canvas.set_margins(self.right_edge(), self.top, self.margin),
        }
        canvas.set_xy(canvas.margins().left, self.top);
        self.last = Some(target);
    }

    fn end(&mut self, _canvas: &mut dyn Canvas) {}

    fn mode(&self) -> LayoutMode {
        LayoutMode::TwoColumn
    }
}

/// Fresh strategy for `mode`.
pub fn strategy(mode: LayoutMode, theme: &Theme) -> Box<dyn LayoutStrategy> {
    match mode {
        LayoutMode::Simple => Box::new(SimpleLayout),
        LayoutMode::TwoColumn => Box::new(TwoColumnLayout::for_theme(theme)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{FixedMetrics, PageSurface};

    fn surface(metrics: &FixedMetrics) -> PageSurface<'_> {
        let mut surface = PageSurface::new(metrics, 297.0, 210.0);
        surface.set_margins(20.0, 45.0, 20.0);
        surface.add_page();
        surface
    }

    #[test]
    fn test_column_width() {
        let layout = TwoColumnLayout::new(297.0, 20.0, 45.0);
        assert_eq!(layout.column_width(), (297.0 - 40.0 - 20.0) / 2.0);
    }

    #[test]
    fn test_auto_start_alternates() {
        let metrics = FixedMetrics;
        let mut canvas = surface(&metrics);
        let mut layout = TwoColumnLayout::new(297.0, 20.0, 45.0);
        let width = layout.column_width();

        let mut seen = Vec::new();
        for _ in 0..3 {
            canvas.ln(30.0);
            layout.start(&mut canvas, None);
            seen.push(layout.last());
            assert_eq!(canvas.y(), 45.0);
            assert_eq!(canvas.x(), canvas.margins().left);
            layout.end(&mut canvas);
        }
        assert_eq!(
            seen,
            vec![Some(ColumnPos::Left), Some(ColumnPos::Right), Some(ColumnPos::Left)]
        );

        layout.start(&mut canvas, None);
        let margins = canvas.margins();
        assert_eq!(margins.left, 20.0 + width + 20.0);
        assert_eq!(margins.right, 20.0);
    }

    #[test]
    fn test_explicit_position_updates_alternation() {
        let metrics = FixedMetrics;
        let mut canvas = surface(&metrics);
        let mut layout = TwoColumnLayout::new(297.0, 20.0, 45.0);

        layout.start(&mut canvas, Some(ColumnPos::Right));
        layout.start(&mut canvas, None);
        assert_eq!(layout.last(), Some(ColumnPos::Left));
        let margins = canvas.margins();
        assert_eq!(margins.left, 20.0);
        assert_eq!(297.0 - margins.right, 20.0 + layout.column_width());
    }

    #[test]
    fn test_simple_layout_is_inert() {
        let metrics = FixedMetrics;
        let mut canvas = surface(&metrics);
        canvas.ln(12.0);
        let mut layout = SimpleLayout;
        layout.start(&mut canvas, Some(ColumnPos::Right));
        assert_eq!(canvas.y(), 57.0);
        assert_eq!(canvas.margins().left, 20.0);
        assert_eq!(layout.mode(), LayoutMode::Simple);
    }
}
