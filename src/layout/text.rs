//! Flowing text with inline emphasis.

use super::cursor::Cursor;
use crate::canvas::Canvas;
use crate::common::{FontSpec, FontStyle};
use crate::deck::TextRun;
use crate::theme::Theme;

/// Write `runs` at the styling of nesting `level`.
///
/// Plain runs use the level font. Emphasized runs switch to the theme's body
/// family at the level's size, and the level font is restored afterwards.
pub fn write_runs(canvas: &mut dyn Canvas, theme: &Theme, level: usize, runs: &[TextRun]) {
    let style = theme.level(level);
    canvas.set_font(style.font);
    canvas.set_text_color(style.color);

    let mut current = FontStyle::empty();
    for run in runs {
        if run.style != current {
            if run.style.is_empty() {
                canvas.set_font(style.font);
            } else {
                canvas.set_font(&FontSpec::new(&theme.body_font, run.style, style.font.size));
            }
            current = run.style;
        }
        canvas.write(style.height, &run.text);
    }

    if !current.is_empty() {
        canvas.set_font(style.font);
    }
}

/// A standalone paragraph at level 0.
pub fn render_paragraph(canvas: &mut dyn Canvas, cursor: &mut Cursor, theme: &Theme, runs: &[TextRun]) {
    if !cursor.is_page_start(canvas) {
        canvas.ln(theme.level(0).space_before);
    }
    write_runs(canvas, theme, 0, runs);
    canvas.ln(0.01);
}
