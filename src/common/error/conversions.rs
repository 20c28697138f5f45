//! Error conversion implementations.
//!
//! This module contains helpers that turn third-party errors into the
//! authoring error that best describes them for the user.

use super::types::{FormatError, ThemeError};
use std::path::Path;

impl FormatError {
    /// Wrap a YAML error raised while reading a deck.
    pub(crate) fn parse(path: &Path, err: serde_yaml::Error) -> Self {
        FormatError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Wrap an image error raised while reading `path`.
    pub(crate) fn image(path: &Path, err: image::ImageError) -> Self {
        FormatError::ImageUnreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl ThemeError {
    /// Wrap a YAML error raised while reading a theme.
    pub(crate) fn parse(path: &Path, err: serde_yaml::Error) -> Self {
        ThemeError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Wrap a YAML error raised while converting the value of `key`.
    pub(crate) fn invalid(key: &str, err: serde_yaml::Error) -> Self {
        ThemeError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}
