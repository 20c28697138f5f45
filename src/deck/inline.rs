//! Inline emphasis markup.
//!
//! `**bold**`, `*italic*` and `_italic_` mark emphasis inside item and
//! paragraph text. Markers without a partner are kept as literal text, a
//! backslash escapes the next character, and `_` only counts at word edges so
//! identifiers like `snake_case` survive.

use super::model::TextRun;
use crate::common::FontStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bold,
    Star,
    Underscore,
}

impl Marker {
    fn literal(self) -> &'static str {
        match self {
            Marker::Bold => "**",
            Marker::Star => "*",
            Marker::Underscore => "_",
        }
    }

    fn style(self) -> FontStyle {
        match self {
            Marker::Bold => FontStyle::BOLD,
            Marker::Star | Marker::Underscore => FontStyle::ITALIC,
        }
    }
}

#[derive(Debug)]
enum Token {
    Text(String),
    Marker(Marker),
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    let flush = |buf: &mut String, tokens: &mut Vec<Token>| {
        if !buf.is_empty() {
            tokens.push(Token::Text(std::mem::take(buf)));
        }
    };

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '\\' if i + 1 < chars.len() => {
                buf.push(chars[i + 1]);
                i += 2;
                continue;
            },
            '*' if chars.get(i + 1) == Some(&'*') => {
                flush(&mut buf, &mut tokens);
                tokens.push(Token::Marker(Marker::Bold));
                i += 2;
                continue;
            },
            '*' => {
                flush(&mut buf, &mut tokens);
                tokens.push(Token::Marker(Marker::Star));
            },
            '_' => {
                let before = i.checked_sub(1).map(|j| chars[j]);
                let after = chars.get(i + 1).copied();
                let inside_word = before.is_some_and(char::is_alphanumeric)
                    && after.is_some_and(char::is_alphanumeric);
                if inside_word {
                    buf.push(ch);
                } else {
                    flush(&mut buf, &mut tokens);
                    tokens.push(Token::Marker(Marker::Underscore));
                }
            },
            _ => buf.push(ch),
        }
        i += 1;
    }
    flush(&mut buf, &mut tokens);
    tokens
}

/// Turn markers without a closing partner back into text.
fn demote_unpaired(tokens: &mut [Token]) {
    for kind in [Marker::Bold, Marker::Star, Marker::Underscore] {
        let mut open: Option<usize> = None;
        for i in 0..tokens.len() {
            if matches!(tokens[i], Token::Marker(m) if m == kind) {
                open = match open {
                    Some(_) => None,
                    None => Some(i),
                };
            }
        }
        if let Some(i) = open {
            tokens[i] = Token::Text(kind.literal().to_string());
        }
    }
}

/// Parse `text` into runs of uniform style.
///
/// # Examples
///
/// ```rust
/// use slidewright::common::FontStyle;
/// use slidewright::deck::{parse_inline, TextRun};
///
/// let runs = parse_inline("a **bold**  move");
/// assert_eq!(
///     runs,
///     vec![
///         TextRun::plain("a "),
///         TextRun::new(FontStyle::BOLD, "bold"),
///         TextRun::plain(" move"),
///     ]
/// );
/// ```
pub fn parse_inline(text: &str) -> Vec<TextRun> {
    let text = collapse_whitespace(text);
    let mut tokens = tokenize(&text);
    demote_unpaired(&mut tokens);

    let mut runs: Vec<TextRun> = Vec::new();
    let mut style = FontStyle::empty();
    for token in tokens {
        match token {
            Token::Marker(marker) => style.toggle(marker.style()),
            Token::Text(text) => match runs.last_mut() {
                Some(last) if last.style == style => last.text.push_str(&text),
                _ => runs.push(TextRun::new(style, text)),
            },
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(runs: &[TextRun]) -> Vec<(&str, FontStyle)> {
        runs.iter().map(|r| (r.text.as_str(), r.style)).collect()
    }

    #[test]
    fn test_plain_text_collapses_whitespace() {
        let runs = parse_inline("  several\n   spaced\twords ");
        assert_eq!(runs, vec![TextRun::plain("several spaced words")]);
    }

    #[test]
    fn test_bold_and_italic() {
        let runs = parse_inline("*it* and _also_ **strong**");
        assert_eq!(
            styles(&runs),
            vec![
                ("it", FontStyle::ITALIC),
                (" and ", FontStyle::empty()),
                ("also", FontStyle::ITALIC),
                (" ", FontStyle::empty()),
                ("strong", FontStyle::BOLD),
            ]
        );
    }

    #[test]
    fn test_nested_bold_italic() {
        let runs = parse_inline("**bold *both***");
        assert_eq!(
            styles(&runs),
            vec![("bold ", FontStyle::BOLD), ("both", FontStyle::BOLD | FontStyle::ITALIC)]
        );
    }

    #[test]
    fn test_unpaired_marker_is_literal() {
        assert_eq!(parse_inline("2 * 3 = 6"), vec![TextRun::plain("2 * 3 = 6")]);
        assert_eq!(parse_inline("**open"), vec![TextRun::plain("**open")]);
    }

    #[test]
    fn test_underscore_inside_word() {
        assert_eq!(parse_inline("call my_func now"), vec![TextRun::plain("call my_func now")]);
    }

    #[test]
    fn test_escape() {
        assert_eq!(parse_inline(r"\*not\* italic"), vec![TextRun::plain("*not* italic")]);
    }

    #[test]
    fn test_empty() {
        assert!(parse_inline("   ").is_empty());
    }
}
