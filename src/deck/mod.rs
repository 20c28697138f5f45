//! Slide decks.
//!
//! This module turns a YAML deck file into a typed, validated content tree.
//! Malformed content is reported here as a [`FormatError`](crate::common::FormatError)
//! before anything is drawn.
//!
//! # Input format
//!
//! ```yaml
//! title: Ownership in Practice
//! author: J. Doe
//! email: jdoe@example.org
//! ---
//! Why Ownership:
//!   - No garbage collector
//!   - - Deterministic **drop**
//!     - Moves are *cheap*
//!   - {type: image, src: borrow.png, width: 200}
//! Two Columns:
//!   - {type: layout, mode: two-col}
//!   - Left column text
//!   - {type: code, lang: rust, code: "let x = 5;"}
//! ```
//!
//! # Example
//!
//! ```rust
//! use slidewright::deck::{ContentItem, Deck};
//! use std::path::Path;
//!
//! let deck = Deck::from_yaml("Intro:\n  - hello\n  - world\n", Path::new("deck.yaml"), Path::new("."))?;
//! assert_eq!(deck.slides[0].title, "Intro");
//! assert!(matches!(deck.slides[0].items[0], ContentItem::List(_)));
//! # Ok::<(), slidewright::common::FormatError>(())
//! ```

// Submodule declarations
pub mod inline;
pub mod model;
pub mod parse;

// Re-exports
pub use inline::parse_inline;
pub use model::{
    BulletKind, CodeBlock, ColumnPos, ContentItem, Deck, DeckMeta, ImageAlign, ImageRef, LayoutMode,
    ListBlock, ListItem, Slide, TextRun,
};
