//! Slide layout.
//!
//! Layout turns content items into canvas calls. It owns no drawing state of
//! its own beyond the saved margin stack and the open lists; position, font and
//! page breaks all live on the [`Canvas`](crate::canvas::Canvas).
//!
//! # Architecture
//!
//! - `cursor`: saved left margins and page-start detection
//! - `list`: the nested list state machine
//! - `text`: paragraphs and emphasized runs
//! - `columns`: the simple and two-column strategies
//! - `image`: centered and floating images
//! - `code`: syntax-highlighted code blocks
//!
//! # Example
//!
//! ```rust,ignore
//! use slidewright::layout::{Cursor, ListStack};
//!
//! let mut cursor = Cursor::new();
//! let mut lists = ListStack::new();
//! lists.render(&mut canvas, &mut cursor, &theme, &block);
//! assert_eq!(cursor.depth(), 0);
//! ```

// Submodule declarations
pub mod code;
pub mod columns;
pub mod cursor;
pub mod image;
pub mod list;
pub mod text;

// Re-exports
pub use code::{CodeSpan, highlight, render_code};
pub use columns::{LayoutStrategy, SimpleLayout, TwoColumnLayout, strategy};
pub use cursor::Cursor;
pub use self::image::{place_centered, place_float, scaled_extent};
pub use list::ListStack;
pub use text::{render_paragraph, write_runs};
