//! Common style and formatting types.
//!
//! This module provides the color and font types shared by themes, the layout
//! engine and the drawing surface.

// Submodule declarations
pub mod align;
pub mod color;
pub mod font;

// Re-exports
pub use align::Align;
pub use color::RGBColor;
pub use font::{FontSpec, FontStyle};
