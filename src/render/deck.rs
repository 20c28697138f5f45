//! Deck rendering.

use super::context::RenderContext;
use super::options::RenderOptions;
use crate::canvas::{Canvas, Cell, DisplayList, PageSurface, PageTitle, TextMetrics};
use crate::common::Result;
use crate::deck::{Deck, DeckMeta, Slide};
use crate::fonts::FontBook;
use crate::pdf::PdfWriter;
use crate::theme::{TextBox, Theme};
use std::path::Path;
use tracing::{debug, info};

/// Render `deck` onto `canvas`: the title page first when the deck carries
/// metadata, then every slide in order.
#[tracing::instrument(level = "debug", skip_all, fields(slides = deck.slides.len()))]
pub fn render_deck(canvas: &mut dyn Canvas, theme: &Theme, deck: &Deck, options: &RenderOptions) -> Result<()> {
    let mut ctx = RenderContext::new(canvas, theme, options);

    if options.title_page
        && let Some(meta) = &deck.meta
    {
        render_title_page(&mut ctx, meta);
    }

    ctx.canvas.set_decoration(theme.decoration());
    for slide in &deck.slides {
        render_slide(&mut ctx, slide)?;
    }
    Ok(())
}

fn render_title_page(ctx: &mut RenderContext<'_>, meta: &DeckMeta) {
    let theme = ctx.theme;
    ctx.canvas.set_decoration(theme.title_page_decoration());
    ctx.canvas.set_page_title(None);
    ctx.canvas.add_page();

    let boxes = &theme.title_page;
    let entries = [
        (&boxes.title, Some(meta.title.as_str())),
        (&boxes.author, Some(meta.author.as_str())),
        (&boxes.email, meta.email.as_deref()),
    ];
    for (text_box, text) in entries {
        if let (Some(text_box), Some(text)) = (text_box, text) {
            draw_box(&mut *ctx.canvas, text_box, text);
        }
    }
}

fn draw_box(canvas: &mut dyn Canvas, text_box: &TextBox, text: &str) {
    canvas.set_xy(text_box.x, text_box.y);
    canvas.set_font(&text_box.font);
    canvas.set_text_color(text_box.color);
    canvas.cell(Cell::new(text_box.width, text_box.height, text).with_align(text_box.align));
}

fn render_slide(ctx: &mut RenderContext<'_>, slide: &Slide) -> Result<()> {
    debug!(title = %slide.title, items = slide.items.len(), "slide");
    let title = PageTitle::with_suffix(&slide.title, &ctx.options.continuation_suffix);
    ctx.canvas.set_page_title(Some(title));
    ctx.reset_slide();
    ctx.canvas.add_page();

    for item in &slide.items {
        ctx.render_item(item)?;
    }
    Ok(())
}

/// Lay `deck` out on pages measured by `metrics`.
pub fn layout_deck(theme: &Theme, deck: &Deck, metrics: &dyn TextMetrics, options: &RenderOptions) -> Result<DisplayList> {
    let mut surface = PageSurface::new(metrics, theme.page_width, theme.page_height);
    surface.set_bottom_margin(theme.bottom_margin);
    render_deck(&mut surface, theme, deck, options)?;
    Ok(surface.finish())
}

/// Render the deck at `input` with the theme in `theme_dir` into a PDF at
/// `output`.
///
/// Nothing is written unless every stage succeeds.
///
/// # Examples
///
/// ```no_run
/// use slidewright::render::{RenderOptions, render_file};
///
/// render_file("talk.yaml", "themes/default", "talk.pdf", &RenderOptions::default())?;
/// # Ok::<(), slidewright::common::Error>(())
/// ```
#[tracing::instrument(skip_all, fields(input = %input.as_ref().display()))]
pub fn render_file(
    input: impl AsRef<Path>,
    theme_dir: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<()> {
    let input = input.as_ref();
    let theme = Theme::load(theme_dir)?;
    let deck = Deck::load_with_base(input, &options.base_dir_for(input))?;
    let book = FontBook::load(&theme.fonts)?;

    let list = layout_deck(&theme, &deck, &book, options)?;
    let bytes = PdfWriter::new(&book).with_meta(deck.meta.as_ref()).write(&list)?;
    std::fs::write(output.as_ref(), bytes)?;

    info!(pages = list.pages.len(), output = %output.as_ref().display(), "rendered");
    Ok(())
}
