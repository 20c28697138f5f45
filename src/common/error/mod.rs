//! Unified error types for slidewright.
//!
//! This module provides the authoring errors raised by deck ingestion and theme
//! loading, and the crate-level error that carries them to the caller.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, FormatError, Result, ThemeError};
