//! Common types, traits, and utilities shared across the crate.
//!
//! This module provides the error types, colors, font specifications and unit
//! conversions used by theme loading, deck ingestion, layout and output.

// Submodule declarations
pub mod error;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use error::{Error, FormatError, Result, ThemeError};
pub use style::{Align, FontSpec, FontStyle, RGBColor};
