//! Deck rendering.
//!
//! The orchestrator walks a parsed [`Deck`](crate::deck::Deck) in document
//! order and drives the layout engine against a canvas. All mutable state for
//! one render lives in a [`RenderContext`] handed to every content handler.
//!
//! # Architecture
//!
//! - `options`: builder-style [`RenderOptions`]
//! - `context`: the per-render state and the content-item dispatch
//! - `deck`: title page, per-slide setup and the file-to-file entry point
//!
//! # Example
//!
//! ```no_run
//! use slidewright::render::{RenderOptions, render_file};
//!
//! let options = RenderOptions::new().with_continuation_suffix(" (cont.)");
//! render_file("talk.yaml", "themes/default", "talk.pdf", &options)?;
//! # Ok::<(), slidewright::common::Error>(())
//! ```

// Submodule declarations
pub mod context;
pub mod deck;
pub mod options;

// Re-exports
pub use context::RenderContext;
pub use deck::{layout_deck, render_deck, render_file};
pub use options::{DEFAULT_CONTINUATION_SUFFIX, RenderOptions};
