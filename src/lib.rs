//! Slidewright - A theme-driven slide layout engine
//!
//! This library turns an ordered YAML slide deck into a paginated PDF. A theme
//! directory decides every visual parameter: page size, margins, fonts, colors,
//! bullet glyphs and spacing per nesting level, backgrounds and title-page
//! boxes.
//!
//! # Features
//!
//! - **Nested lists**: ordinal and glyph bullets, any depth, per-level styling
//!   with a generic fallback
//! - **Inline emphasis**: `**bold**`, `*italic*` and `_italic_` runs
//! - **Layouts**: full width or two alternating columns
//! - **Images**: centered, or floated beside the text for the rest of a slide
//! - **Code blocks**: syntax highlighting with built-in color schemes
//! - **Pagination**: automatic page breaks with continuation titles and a
//!   `Page n/N` footer
//! - **PDF output**: subset TrueType fonts and compressed images
//!
//! # Example - Rendering a deck
//!
//! ```no_run
//! use slidewright::render::{RenderOptions, render_file};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! render_file("talk.yaml", "themes/default", "talk.pdf", &RenderOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Inspecting the layout
//!
//! ```no_run
//! use slidewright::deck::Deck;
//! use slidewright::fonts::FontBook;
//! use slidewright::render::{RenderOptions, layout_deck};
//! use slidewright::theme::Theme;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let theme = Theme::load("themes/default")?;
//! let deck = Deck::load("talk.yaml")?;
//! let book = FontBook::load(&theme.fonts)?;
//!
//! let list = layout_deck(&theme, &deck, &book, &RenderOptions::default())?;
//! for (n, page) in list.pages.iter().enumerate() {
//!     println!("page {}: {:?}", n + 1, page.texts().collect::<Vec<_>>());
//! }
//! # Ok(())
//! # }
//! ```

/// Error types, style primitives and unit conversions
pub mod common;

/// Theme loading and per-level style resolution
pub mod theme;

/// Deck ingestion into a typed content tree
pub mod deck;

/// Font registry, TrueType metrics and subsetting
pub mod fonts;

/// Image sizing and decoding
pub mod images;

/// The paginating drawing surface and its display list
pub mod canvas;

/// Cursor, list, column, image and code layout
pub mod layout;

/// Deck rendering orchestration
pub mod render;

/// PDF serialization of display lists
pub mod pdf;

// Re-export commonly used types for convenience
pub use common::{Error, FormatError, Result, ThemeError};
pub use deck::Deck;
pub use render::{RenderOptions, render_file};
pub use theme::Theme;
