//! Error types for slide rendering.
//!
//! Two authoring error families exist: [`FormatError`] for malformed slide
//! content and [`ThemeError`] for broken theme configuration. Both are fatal;
//! the crate-level [`Error`] wraps them together with I/O and output failures.
use std::path::PathBuf;
use thiserror::Error;

/// Malformed slide content.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The input file could not be read
    #[error("error opening file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid YAML
    #[error("error parsing '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// The YAML stream does not contain one or two documents
    #[error("expected a slide document optionally preceded by a metadata document, found {0} documents")]
    DocumentCount(usize),

    /// Title-page metadata is missing a field or has the wrong type
    #[error("'{0}' not present or is incorrect type")]
    InvalidMeta(&'static str),

    /// A tagged entry has no `type`
    #[error("Missing data type")]
    MissingType,

    /// A tagged entry has an unrecognized `type`
    #[error("Unknown data type: {0}")]
    UnknownType(String),

    /// A tagged entry lacks a required field
    #[error("Missing '{field}' in '{kind}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A field holds a value of the wrong shape
    #[error("Invalid '{field}' in '{kind}': {message}")]
    InvalidField {
        kind: &'static str,
        field: &'static str,
        message: String,
    },

    /// No syntax definition exists for a code block language
    #[error("Unknown 'lang' '{0}'")]
    UnknownLanguage(String),

    /// A list declares a bullet kind other than ordinal or glyph
    #[error("invalid bullet type '{0}'")]
    InvalidBullet(String),

    /// A layout directive names an unsupported mode
    #[error("Invalid layout mode '{0}'")]
    InvalidLayoutMode(String),

    /// A column position other than left or right
    #[error("invalid position '{0}'")]
    InvalidPosition(String),

    /// An image alignment other than center or float
    #[error("invalid image alignment '{0}'")]
    InvalidAlign(String),

    /// A nested list appears before any item it could belong to
    #[error("nested list in slide '{0}' does not follow a list item")]
    OrphanNestedList(String),

    /// An image could not be opened or decoded
    #[error("cannot read image '{path}': {message}")]
    ImageUnreadable { path: PathBuf, message: String },
}

/// Broken theme configuration.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The theme file could not be read
    #[error("error opening file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The theme file is not valid YAML
    #[error("error parsing '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// A required key is absent
    #[error("missing '{0}' in theme")]
    MissingKey(String),

    /// A key holds a value of the wrong shape
    #[error("invalid '{key}' in theme: {message}")]
    InvalidValue { key: String, message: String },

    /// A per-level parameter family has no generic entry
    #[error("theme defines no generic fallback '{key}' for level parameter '{family}'")]
    MissingFallback { family: &'static str, key: String },

    /// A font registry entry is not a `[name, style, file]` triple
    #[error("invalid 'fonts' in theme, fmt: [ name, style, fname ]")]
    InvalidFontEntry,

    /// A font style string outside `"" B I BI IB`
    #[error("invalid style in 'fonts' - '{0}'")]
    InvalidFontStyle(String),

    /// A registered font file does not exist
    #[error("font file '{0}' not found")]
    FontNotFound(PathBuf),

    /// A font family is used by the theme but never registered
    #[error("font family '{0}' is used by the theme but not registered in 'fonts'")]
    UnregisteredFont(String),

    /// A registered font file is not a usable TrueType face
    #[error("font file '{path}' is not a valid TrueType font: {message}")]
    InvalidFont { path: PathBuf, message: String },

    /// The code highlighting style is not known
    #[error("unknown 'code-style' '{0}'")]
    UnknownCodeStyle(String),
}

/// Main error type for slidewright operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed slide content
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Broken theme configuration
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered document could not be serialized
    #[error("PDF output error: {0}")]
    Pdf(String),
}

/// Result type for slidewright operations.
pub type Result<T> = std::result::Result<T, Error>;
