//! Nested list rendering.
//!
//! Lists are driven through four events. `start_list` opens a frame one level
//! deeper than the enclosing one, `start_item` draws the bullet and indents
//! the text column past it, `end_item` restores the margin, and `end_list`
//! closes the frame. Every item pushes exactly one margin and pops it again,
//! so the margin stack returns to its depth before the list.

use super::cursor::Cursor;
use super::text::write_runs;
use crate::canvas::{Canvas, Cell};
use crate::common::FontStyle;
use crate::deck::{BulletKind, ListBlock};
use crate::theme::Theme;
use smallvec::SmallVec;
use tracing::trace;

/// Line advance that settles the height of a finished item.
const ITEM_FINISH: f64 = 0.01;

#[derive(Debug, Clone)]
struct ListFrame {
    level: usize,
    bullet: BulletKind,
    /// Next ordinal, starting at 1
    counter: usize,
    /// Bare lists draw no bullet and indent nothing
    bare: bool,
}

/// Open lists, innermost last.
#[derive(Debug, Default)]
pub struct ListStack {
    frames: SmallVec<[ListFrame; 4]>,
}

impl ListStack {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open lists.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Nesting level of the innermost open list.
    #[inline]
    pub fn level(&self) -> Option<usize> {
        self.frames.last().map(|f| f.level)
    }

    /// Open a list nested inside the current one and return its level.
    pub fn start_list(&mut self, bullet: BulletKind, bare: bool) -> usize {
        let level = self.frames.len();
        trace!(level, ?bullet, bare, "start list");
        self.frames.push(ListFrame {
            level,
            bullet,
            counter: 1,
            bare,
        });
        level
    }

    /// Draw the bullet of the next item and indent the text column past it.
    ///
    /// Leaves the canvas set to the level's font and color. Does nothing
    /// outside a list.
    pub fn start_item(&mut self, canvas: &mut dyn Canvas, cursor: &mut Cursor, theme: &Theme) {
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        let style = theme.level(frame.level);

        if !cursor.is_page_start(canvas) {
            canvas.ln(style.space_before);
        }

        let width = if frame.bare {
            0.0
        } else {
            let bullet = match frame.bullet {
                BulletKind::Ordinal => {
                    canvas.set_font(&style.font.with_style(FontStyle::empty()));
                    format!("{}.  ", frame.counter)
                },
                BulletKind::Glyph => {
                    canvas.set_font(&theme.bullet_font);
                    format!("{}  ", style.bullet)
                },
            };
            let width = canvas.string_width(&bullet);
            canvas.set_text_color(theme.bullet_color);
            canvas.cell(Cell::new(width, style.height, &bullet));
            width
        };
        frame.counter += 1;

        canvas.set_font(style.font);
        canvas.set_text_color(style.color);
        cursor.push_margin(canvas, width);
    }

    /// Restore the margin of the finished item and move to a fresh line.
    pub fn end_item(&mut self, canvas: &mut dyn Canvas, cursor: &mut Cursor) {
        if self.frames.is_empty() {
            return;
        }
        cursor.pop_margin(canvas);
        canvas.ln(ITEM_FINISH);
    }

    pub fn end_list(&mut self) {
        if let Some(frame) = self.frames.pop() {
            trace!(level = frame.level, "end list");
        }
    }

    /// Emit the whole of `block`, children included.
    pub fn render(&mut self, canvas: &mut dyn Canvas, cursor: &mut Cursor, theme: &Theme, block: &ListBlock) {
        self.start_list(block.bullet, block.is_bare());
        for item in &block.items {
            self.start_item(canvas, cursor, theme);
            if let Some(level) = self.level() {
                write_runs(canvas, theme, level, &item.runs);
            }
            for child in &item.children {
                self.render(canvas, cursor, theme, child);
            }
            self.end_item(canvas, cursor);
        }
        self.end_list();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, FixedMetrics, PageSurface};
    use crate::deck::{ListItem, parse_inline};
    use proptest::prelude::*;

    fn item(text: &str) -> ListItem {
        ListItem {
            runs: parse_inline(text),
            children: Vec::new(),
        }
    }

    fn block(bullet: BulletKind, texts: &[&str]) -> ListBlock {
        ListBlock {
            bullet,
            items: texts.iter().map(|t| item(t)).collect(),
        }
    }

    fn surface(metrics: &FixedMetrics) -> PageSurface<'_> {
        let mut surface = PageSurface::new(metrics, 297.0, 210.0);
        surface.set_margins(20.0, 45.0, 20.0);
        surface.add_page();
        surface
    }

    fn texts(surface: PageSurface<'_>) -> Vec<(f64, String)> {
        surface
            .finish()
            .pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                DrawOp::Text { x, text, .. } => Some((*x, text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_ordinal_bullets_count_from_one() {
        let theme = Theme::sample();
        let metrics = FixedMetrics;
        let mut canvas = surface(&metrics);
        let mut cursor = Cursor::new();
        let mut lists = ListStack::new();

        lists.render(&mut canvas, &mut cursor, &theme, &block(BulletKind::Ordinal, &["a", "b", "c"]));
        let drawn: Vec<String> = texts(canvas).into_iter().map(|(_, t)| t).collect();
        assert_eq!(drawn, vec!["1.  ", "a", "2.  ", "b", "3.  ", "c"]);
    }

    #[test]
    fn test_nested_list_indents_past_parent_bullet() {
        let theme = Theme::sample();
        let metrics = FixedMetrics;
        let mut canvas = surface(&metrics);
        let mut cursor = Cursor::new();
        let mut lists = ListStack::new();

        let mut outer = block(BulletKind::Glyph, &["outer", "last"]);
        outer.items[0].children.push(block(BulletKind::Glyph, &["inner", "more"]));
        lists.render(&mut canvas, &mut cursor, &theme, &outer);

        assert_eq!(lists.depth(), 0);
        assert_eq!(cursor.depth(), 0);
        assert_eq!(canvas.margins().left, 20.0);

        let drawn = texts(canvas);
        let x_of = |s: &str| drawn.iter().find(|(_, t)| t == s).map(|(x, _)| *x);
        let outer_x = x_of("outer").unwrap_or_default();
        let inner_x = x_of("inner").unwrap_or_default();
        assert!(inner_x > outer_x);
        assert_eq!(x_of("last"), Some(outer_x));
        assert!(drawn.iter().any(|(_, t)| t == "-  "));
        assert!(drawn.iter().any(|(_, t)| t == "•  "));
    }

    #[test]
    fn test_bare_list_draws_no_bullet() {
        let theme = Theme::sample();
        let metrics = FixedMetrics;
        let mut canvas = surface(&metrics);
        let mut cursor = Cursor::new();
        let mut lists = ListStack::new();

        lists.render(&mut canvas, &mut cursor, &theme, &block(BulletKind::Glyph, &["alone"]));
        let drawn = texts(canvas);
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].0, 20.0);
    }

    #[test]
    fn test_events_outside_list_are_ignored() {
        let theme = Theme::sample();
        let metrics = FixedMetrics;
        let mut canvas = surface(&metrics);
        let mut cursor = Cursor::new();
        let mut lists = ListStack::new();

        lists.start_item(&mut canvas, &mut cursor, &theme);
        lists.end_item(&mut canvas, &mut cursor);
        lists.end_list();
        assert_eq!(cursor.depth(), 0);
        assert_eq!(canvas.y(), 45.0);
    }

    fn nested(depth: u32) -> impl Strategy<Value = ListBlock> {
        let leaf = (any::<bool>(), 1usize..4).prop_map(|(ordinal, n)| ListBlock {
            bullet: if ordinal { BulletKind::Ordinal } else { BulletKind::Glyph },
            items: (0..n).map(|i| item(&format!("item {i}"))).collect(),
        });
        leaf.prop_recursive(depth, 24, 3, |inner| {
            (any::<bool>(), prop::collection::vec(prop::collection::vec(inner, 0..2), 1..4)).prop_map(
                |(ordinal, children)| ListBlock {
                    bullet: if ordinal { BulletKind::Ordinal } else { BulletKind::Glyph },
                    items: children
                        .into_iter()
                        .map(|children| ListItem {
                            runs: parse_inline("text"),
                            children,
                        })
                        .collect(),
                },
            )
        })
    }

    /// Items in `block` and below, and how many of them carry a bullet.
    fn tally(block: &ListBlock) -> (usize, usize) {
        let own = block.items.len();
        let bullets = if block.is_bare() { 0 } else { own };
        block
            .items
            .iter()
            .flat_map(|item| &item.children)
            .map(tally)
            .fold((own, bullets), |(i, b), (ci, cb)| (i + ci, b + cb))
    }

    proptest! {
        #[test]
        fn prop_one_bullet_and_text_per_item(list in nested(3)) {
            let theme = Theme::sample();
            let metrics = FixedMetrics;
            let mut canvas = surface(&metrics);
            let mut cursor = Cursor::new();
            let mut lists = ListStack::new();

            lists.render(&mut canvas, &mut cursor, &theme, &list);
            let drawn = texts(canvas);
            let bullets = drawn.iter().filter(|(_, t)| t.ends_with("  ")).count();
            let items = drawn.len() - bullets;

            let (expected_items, expected_bullets) = tally(&list);
            prop_assert_eq!(items, expected_items);
            prop_assert_eq!(bullets, expected_bullets);
        }

        #[test]
        fn prop_margin_stack_balances(list in nested(3)) {
            let theme = Theme::sample();
            let metrics = FixedMetrics;
            let mut canvas = surface(&metrics);
            let mut cursor = Cursor::new();
            let mut lists = ListStack::new();

            lists.render(&mut canvas, &mut cursor, &theme, &list);
            prop_assert_eq!(cursor.depth(), 0);
            prop_assert_eq!(lists.depth(), 0);
            prop_assert_eq!(canvas.margins().left, 20.0);
        }
    }
}
