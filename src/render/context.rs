//! State threaded through every content handler.

use super::options::RenderOptions;
use crate::canvas::Canvas;
use crate::common::Result;
use crate::deck::{CodeBlock, ContentItem, ImageAlign, ImageRef, LayoutMode, ListBlock, TextRun};
use crate::layout::{self, Cursor, LayoutStrategy, ListStack, SimpleLayout};
use crate::theme::Theme;
use tracing::{debug, warn};

/// Everything a handler may read or change while a deck renders.
pub struct RenderContext<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub theme: &'a Theme,
    pub options: &'a RenderOptions,
    pub cursor: Cursor,
    pub lists: ListStack,
    pub layout: Box<dyn LayoutStrategy>,
}

impl<'a> RenderContext<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, theme: &'a Theme, options: &'a RenderOptions) -> Self {
        Self {
            canvas,
            theme,
            options,
            cursor: Cursor::new(),
            lists: ListStack::new(),
            layout: Box::new(SimpleLayout),
        }
    }

    /// Return to the state a slide starts from: default margins, simple
    /// layout, no open list and no float.
    pub fn reset_slide(&mut self) {
        self.cursor.clear();
        self.lists = ListStack::new();
        self.layout = Box::new(SimpleLayout);
        self.canvas.set_page_float(None);
        let margin = self.theme.slide_margin;
        self.canvas.set_margins(margin, self.theme.top_margin, margin);
    }

    /// Dispatch one content item.
    pub fn render_item(&mut self, item: &ContentItem) -> Result<()> {
        match item {
            ContentItem::Text(runs) => self.paragraph(runs),
            ContentItem::List(block) => self.list(block),
            ContentItem::Image(image) => self.image(image)?,
            ContentItem::Code(block) => self.code(block)?,
            ContentItem::Layout(mode) => self.switch_layout(*mode),
            ContentItem::Table => warn!("tables are not rendered; entry skipped"),
        }
        Ok(())
    }

    fn paragraph(&mut self, runs: &[TextRun]) {
        layout::render_paragraph(&mut *self.canvas, &mut self.cursor, self.theme, runs);
    }

    fn list(&mut self, block: &ListBlock) {
        self.layout.start(&mut *self.canvas, None);
        self.lists.render(&mut *self.canvas, &mut self.cursor, self.theme, block);
        self.layout.end(&mut *self.canvas);
    }

    fn image(&mut self, image: &ImageRef) -> Result<()> {
        self.layout.start(&mut *self.canvas, image.pos);
        match image.align {
            ImageAlign::Center => layout::place_centered(&mut *self.canvas, self.theme, image)?,
            ImageAlign::Float => {
                // The surface redraws the float on later pages of the slide
                let float = layout::place_float(&mut *self.canvas, self.theme, image)?;
                self.canvas.set_page_float(Some(float));
            },
        }
        self.layout.end(&mut *self.canvas);
        Ok(())
    }

    fn code(&mut self, block: &CodeBlock) -> Result<()> {
        self.layout.start(&mut *self.canvas, block.pos);
        layout::render_code(&mut *self.canvas, self.theme, block)?;
        self.layout.end(&mut *self.canvas);
        Ok(())
    }

    fn switch_layout(&mut self, mode: LayoutMode) {
        debug!(?mode, "layout");
        self.layout = layout::strategy(mode, self.theme);
    }
}
