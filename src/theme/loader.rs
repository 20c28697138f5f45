//! `info.yaml` parsing and validation.

use super::resolver::{LevelParam, LevelSlot, LevelStyles, level_key, parse_level_key};
use super::{Background, CodeStyle, TextBox, Theme, TitlePageBoxes};
use crate::canvas::{FooterStyle, TitleStyle};
use crate::common::unit::{mm_to_pt, pt_to_mm};
use crate::common::{FontSpec, FontStyle, RGBColor, ThemeError};
use crate::fonts::FontEntry;
use crate::layout::{code, image::scaled_extent};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the theme description inside a theme directory.
pub const THEME_FILE: &str = "info.yaml";

/// Highlighting scheme used when the theme names none.
pub const DEFAULT_CODE_SCHEME: &str = "InspiredGitHub";

const KNOWN_KEYS: &[&str] = &[
    "lmargin-slide",
    "tmargin-slide",
    "bmargin-slide",
    "page-size",
    "body-font",
    "bullet-font",
    "bullet-color",
    "image-space-before",
    "float-padding",
    "code-font",
    "code-height",
    "code-style",
    "slide-title-font",
    "slide-title-color",
    "slide-title-pos",
    "title-box",
    "author-box",
    "email-box",
    "slide-background",
    "footer-font",
    "footer-color",
    "fonts",
];

/// Raw key/value view of `info.yaml`.
struct ThemeSource<'a> {
    dir: &'a Path,
    entries: IndexMap<String, Value>,
}

impl ThemeSource<'_> {
    fn convert<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T, ThemeError> {
        serde_yaml::from_value(value.clone()).map_err(|e| ThemeError::invalid(key, e))
    }

    fn optional<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ThemeError> {
        match self.entries.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Self::convert(key, value).map(Some),
        }
    }

    fn required<T: DeserializeOwned>(&self, key: &str) -> Result<T, ThemeError> {
        self.optional(key)?
            .ok_or_else(|| ThemeError::MissingKey(key.to_string()))
    }

    fn or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ThemeError> {
        Ok(self.optional(key)?.unwrap_or(default))
    }

    /// Collect every `l{N}-<family>` entry plus the mandatory `ln-<family>`.
    fn level_param<T: DeserializeOwned>(&self, family: &'static str) -> Result<LevelParam<T>, ThemeError> {
        let mut explicit = Vec::new();
        let mut fallback = None;

        for (key, value) in &self.entries {
            let Some((slot, name)) = parse_level_key(key) else {
                continue;
            };
            if name != family {
                continue;
            }
            let value: T = Self::convert(key, value)?;
            match slot {
                LevelSlot::Level(level) => explicit.push((level, value)),
                LevelSlot::Generic => fallback = Some(value),
            }
        }

        let fallback = fallback.ok_or_else(|| ThemeError::MissingFallback {
            family,
            key: level_key(family, LevelSlot::Generic),
        })?;
        Ok(explicit
            .into_iter()
            .fold(LevelParam::new(fallback), |param, (level, value)| param.with_level(level, value)))
    }

    fn warn_unknown_keys(&self) {
        for key in self.entries.keys() {
            let known = KNOWN_KEYS.contains(&key.as_str())
                || parse_level_key(key).is_some_and(|(_, family)| super::resolver::LEVEL_FAMILIES.contains(&family));
            if !known {
                warn!(key = %key, "ignoring unknown theme key");
            }
        }
    }

    fn font_registry(&self) -> Result<Vec<FontEntry>, ThemeError> {
        let entries: Vec<Value> = self.required("fonts")?;
        entries
            .iter()
            .map(|entry| {
                let (name, style, file): (String, String, String) =
                    serde_yaml::from_value(entry.clone()).map_err(|_| ThemeError::InvalidFontEntry)?;
                let style = FontStyle::parse(&style).ok_or(ThemeError::InvalidFontStyle(style))?;
                let path = self.dir.join(file);
                if !path.is_file() {
                    return Err(ThemeError::FontNotFound(path));
                }
                Ok(FontEntry::new(name, style, path))
            })
            .collect()
    }

    fn background(&self) -> Result<Background, ThemeError> {
        const KEY: &str = "slide-background";

        match self.or(KEY, Background::None)? {
            Background::Image {
                src,
                x,
                y,
                width,
                height,
            } => {
                let src = self.dir.join(src);
                let (width, height) = if width == 0.0 || height == 0.0 {
                    let size = image::image_dimensions(&src).map_err(|e| ThemeError::InvalidValue {
                        key: KEY.to_string(),
                        message: format!("cannot read '{}': {}", src.display(), e),
                    })?;
                    let (w, h) = scaled_extent(mm_to_pt(width), mm_to_pt(height), size);
                    (pt_to_mm(w), pt_to_mm(h))
                } else {
                    (width, height)
                };
                Ok(Background::Image {
                    src,
                    x,
                    y,
                    width,
                    height,
                })
            },
            other => Ok(other),
        }
    }
}

impl Theme {
    /// Load and validate the theme in `dir`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use slidewright::theme::Theme;
    ///
    /// let theme = Theme::load("themes/default")?;
    /// assert!(theme.slide_margin > 0.0);
    /// # Ok::<(), slidewright::common::ThemeError>(())
    /// ```
    #[tracing::instrument(level = "debug", skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let dir = dir.as_ref();
        let path = dir.join(THEME_FILE);
        let text = std::fs::read_to_string(&path).map_err(|source| ThemeError::Open {
            path: path.clone(),
            source,
        })?;
        let entries: IndexMap<String, Value> =
            serde_yaml::from_str(&text).map_err(|e| ThemeError::parse(&path, e))?;
        Self::from_entries(dir, entries)
    }

    fn from_entries(dir: &Path, entries: IndexMap<String, Value>) -> Result<Self, ThemeError> {
        let source = ThemeSource { dir, entries };
        source.warn_unknown_keys();

        let slide_margin: f64 = source.required("lmargin-slide")?;
        let top_margin: f64 = source.required("tmargin-slide")?;
        let (page_width, page_height) = source.or("page-size", (297.0, 210.0))?;

        let levels = LevelStyles {
            bullet: source.level_param("bullet")?,
            font: source.level_param("font")?,
            color: source.level_param("color")?,
            height: source.level_param("height")?,
            space_before: source.level_param("space-before")?,
        };

        let scheme: String = source.or("code-style", DEFAULT_CODE_SCHEME.to_string())?;
        if !code::has_scheme(&scheme) {
            return Err(ThemeError::UnknownCodeStyle(scheme));
        }

        let (title_x, title_y) = source.or("slide-title-pos", (slide_margin, 30.0))?;
        let footer = source
            .optional::<FontSpec>("footer-font")?
            .map(|font| -> Result<FooterStyle, ThemeError> {
                Ok(FooterStyle {
                    font,
                    color: source.or("footer-color", RGBColor::BLACK)?,
                })
            })
            .transpose()?;

        let theme = Theme {
            dir: dir.to_path_buf(),
            page_width,
            page_height,
            slide_margin,
            top_margin,
            bottom_margin: source.or("bmargin-slide", 20.0)?,
            body_font: source.required("body-font")?,
            bullet_font: source.required("bullet-font")?,
            bullet_color: source.or("bullet-color", RGBColor::gray(180))?,
            levels,
            image_space_before: source.or("image-space-before", 0.0)?,
            float_padding: source.or("float-padding", 15.0)?,
            code: CodeStyle {
                font: source.required("code-font")?,
                height: source.required("code-height")?,
                scheme,
            },
            slide_title: TitleStyle {
                font: source.required("slide-title-font")?,
                color: source.or("slide-title-color", RGBColor::BLACK)?,
                x: title_x,
                y: title_y,
            },
            title_page: TitlePageBoxes {
                title: source.optional::<TextBox>("title-box")?,
                author: source.optional::<TextBox>("author-box")?,
                email: source.optional::<TextBox>("email-box")?,
            },
            background: source.background()?,
            footer,
            fonts: source.font_registry()?,
        };

        let registered: HashSet<&str> = theme.fonts.iter().map(|f| f.family.as_str()).collect();
        if let Some(family) = theme.font_families().find(|f| !registered.contains(f)) {
            return Err(ThemeError::UnregisteredFont(family.to_string()));
        }

        debug!(
            fonts = theme.fonts.len(),
            levels = theme.levels.font.values().count(),
            "theme loaded"
        );
        Ok(theme)
    }

    /// Path of a file inside the theme directory.
    pub fn file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.join(name)
    }
}
