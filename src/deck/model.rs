//! Typed slide content.

use crate::common::FontStyle;
use std::path::PathBuf;

/// Title-page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckMeta {
    pub title: String,
    pub author: String,
    pub email: Option<String>,
    pub keywords: Vec<String>,
}

/// A parsed slide deck.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Deck {
    /// Present when the input starts with a metadata document
    pub meta: Option<DeckMeta>,
    /// Slides in declaration order
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slide {
    pub title: String,
    pub items: Vec<ContentItem>,
}

/// A piece of text drawn with one set of emphasis flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub style: FontStyle,
    pub text: String,
}

impl TextRun {
    pub fn new(style: FontStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(FontStyle::empty(), text)
    }
}

/// How list items are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletKind {
    /// `1.`, `2.`, ...
    Ordinal,
    /// The theme's glyph for the nesting level
    #[default]
    Glyph,
}

impl BulletKind {
    /// Parse a bullet kind as written in decks (`ordinal`, `glyph`, `1`, `*`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ordinal" | "1" => Some(BulletKind::Ordinal),
            "glyph" | "*" => Some(BulletKind::Glyph),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListBlock {
    pub bullet: BulletKind,
    pub items: Vec<ListItem>,
}

impl ListBlock {
    /// A list holding a single item and nothing nested under it is drawn
    /// without bullets.
    #[inline]
    pub fn is_bare(&self) -> bool {
        matches!(self.items.as_slice(), [only] if only.children.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    pub runs: Vec<TextRun>,
    /// Lists nested under this item, in order
    pub children: Vec<ListBlock>,
}

/// Column an image or code block is placed in under the two-column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPos {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageAlign {
    /// Centered in the current column
    #[default]
    Center,
    /// Pinned to the slide's left margin with text beside it
    Float,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    /// Resolved against the deck's directory
    pub src: PathBuf,
    /// Width in points, zero when unspecified
    pub width: f64,
    /// Height in points, zero when unspecified
    pub height: f64,
    pub pos: Option<ColumnPos>,
    pub align: ImageAlign,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub source: String,
    /// Syntax name or extension; plain text when absent
    pub lang: Option<String>,
    pub pos: Option<ColumnPos>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Simple,
    TwoColumn,
}

/// One entry of a slide body.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    /// A paragraph
    Text(Vec<TextRun>),
    List(ListBlock),
    Image(ImageRef),
    Code(CodeBlock),
    /// Switch the column arrangement for the rest of the slide
    Layout(LayoutMode),
    /// Accepted but never drawn
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_kind_aliases() {
        assert_eq!(BulletKind::parse("1"), Some(BulletKind::Ordinal));
        assert_eq!(BulletKind::parse("ordinal"), Some(BulletKind::Ordinal));
        assert_eq!(BulletKind::parse("*"), Some(BulletKind::Glyph));
        assert_eq!(BulletKind::parse("glyph"), Some(BulletKind::Glyph));
        assert_eq!(BulletKind::parse("#"), None);
    }

    #[test]
    fn test_bare_list() {
        let one = ListBlock {
            bullet: BulletKind::Glyph,
            items: vec![ListItem::default()],
        };
        assert!(one.is_bare());

        let two = ListBlock {
            items: vec![ListItem::default(), ListItem::default()],
            ..one.clone()
        };
        assert!(!two.is_bare());

        let parent = ListBlock {
            items: vec![ListItem {
                runs: Vec::new(),
                children: vec![one.clone()],
            }],
            ..one.clone()
        };
        assert!(!parent.is_bare());
    }
}
