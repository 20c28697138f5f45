//! Rendering options.

use std::path::{Path, PathBuf};

/// Suffix appended to a slide title on its overflow pages.
pub const DEFAULT_CONTINUATION_SUFFIX: &str = " (Contd)";

/// Options that control how a deck is rendered.
///
/// # Examples
///
/// ```rust
/// use slidewright::render::RenderOptions;
///
/// // Create with defaults
/// let options = RenderOptions::default();
/// assert!(options.title_page);
///
/// // Or customize
/// let options = RenderOptions::new()
///     .with_title_page(false)
///     .with_continuation_suffix(" (cont.)");
/// ```
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory relative image paths resolve against; the input file's
    /// directory when unset
    pub base_dir: Option<PathBuf>,
    /// Whether deck metadata produces a title page
    pub title_page: bool,
    /// Appended to the slide title on continuation pages
    pub continuation_suffix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_dir: None,
            title_page: true,
            continuation_suffix: DEFAULT_CONTINUATION_SUFFIX.to_string(),
        }
    }
}

impl RenderOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative image paths against `dir` instead of the input's
    /// directory.
    #[inline]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Set whether deck metadata produces a title page.
    #[inline]
    pub fn with_title_page(mut self, enabled: bool) -> Self {
        self.title_page = enabled;
        self
    }

    #[inline]
    pub fn with_continuation_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.continuation_suffix = suffix.into();
        self
    }

    /// Base directory for a deck read from `input`.
    pub fn base_dir_for(&self, input: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_defaults_to_input_parent() {
        let options = RenderOptions::new();
        assert_eq!(options.base_dir_for(Path::new("talks/deck.yaml")), PathBuf::from("talks"));
        assert_eq!(options.base_dir_for(Path::new("deck.yaml")), PathBuf::new());

        let options = options.with_base_dir("/srv/assets");
        assert_eq!(options.base_dir_for(Path::new("talks/deck.yaml")), PathBuf::from("/srv/assets"));
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new().with_title_page(false).with_continuation_suffix(" ...");
        assert!(!options.title_page);
        assert_eq!(options.continuation_suffix, " ...");
    }
}
