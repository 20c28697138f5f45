//! Syntax-highlighted code blocks.

use crate::canvas::Canvas;
use crate::common::{FontStyle, FormatError, RGBColor, Result, ThemeError};
use crate::deck::CodeBlock;
use crate::theme::Theme;
use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{self, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static SCHEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Whether `name` is a built-in highlighting scheme.
pub fn has_scheme(name: &str) -> bool {
    SCHEMES.themes.contains_key(name)
}

/// Syntax definition for a code block language.
///
/// `text` and `plain` select plain text; anything else is matched against
/// syntax names and file extensions.
pub fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    let syntaxes: &'static SyntaxSet = &SYNTAXES;
    match lang.to_ascii_lowercase().as_str() {
        "text" | "plain" | "plaintext" => Some(syntaxes.find_syntax_plain_text()),
        _ => syntaxes.find_syntax_by_token(lang),
    }
}

/// A highlighted token.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSpan {
    pub text: String,
    pub color: RGBColor,
    pub style: FontStyle,
}

/// Split `source` into colored tokens.
///
/// Tokens in the scheme's default foreground come out black so code reads
/// like the surrounding text.
pub fn highlight(source: &str, lang: Option<&str>, scheme: &str) -> Result<Vec<CodeSpan>> {
    let syntax = match lang {
        Some(lang) => find_syntax(lang).ok_or_else(|| FormatError::UnknownLanguage(lang.to_string()))?,
        None => SYNTAXES.find_syntax_plain_text(),
    };
    let theme = SCHEMES
        .themes
        .get(scheme)
        .ok_or_else(|| ThemeError::UnknownCodeStyle(scheme.to_string()))?;
    let default_fg = theme.settings.foreground;

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut spans = Vec::new();
    for line in LinesWithEndings::from(source) {
        let ranges = highlighter
            .highlight_line(line, &SYNTAXES)
            .map_err(|e| FormatError::InvalidField {
                kind: "code",
                field: "code",
                message: e.to_string(),
            })?;
        for (style, text) in ranges {
            let color = if Some(style.foreground) == default_fg {
                RGBColor::BLACK
            } else {
                RGBColor::new(style.foreground.r, style.foreground.g, style.foreground.b)
            };
            let mut flags = FontStyle::empty();
            if style.font_style.contains(highlighting::FontStyle::BOLD) {
                flags |= FontStyle::BOLD;
            }
            if style.font_style.contains(highlighting::FontStyle::ITALIC) {
                flags |= FontStyle::ITALIC;
            }
            spans.push(CodeSpan {
                text: text.to_string(),
                color,
                style: flags,
            });
        }
    }
    Ok(spans)
}

/// Write `block` token by token in the theme's code font.
pub fn render_code(canvas: &mut dyn Canvas, theme: &Theme, block: &CodeBlock) -> Result<()> {
    let spans = highlight(&block.source, block.lang.as_deref(), &theme.code.scheme)?;
    for span in &spans {
        canvas.set_text_color(span.color);
        canvas.set_font(&theme.code.font.with_style(span.style));
        canvas.write(theme.code.height, &span.text);
    }
    Ok(())
}
