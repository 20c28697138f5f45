//! YAML deck ingestion.
//!
//! A deck file holds one YAML document (the slides) or two (title-page
//! metadata, then the slides). The slides document maps titles to bodies in
//! order. Everything is validated here so rendering never meets malformed
//! content.

use super::inline::parse_inline;
use super::model::{
    BulletKind, CodeBlock, ColumnPos, ContentItem, Deck, DeckMeta, ImageAlign, ImageRef, LayoutMode,
    ListBlock, ListItem, Slide,
};
use crate::common::FormatError;
use crate::layout::code;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

impl Deck {
    /// Read and parse the deck at `path`. Relative image paths resolve against
    /// the file's directory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use slidewright::deck::Deck;
    ///
    /// let deck = Deck::load("talk.yaml")?;
    /// for slide in &deck.slides {
    ///     println!("{}", slide.title);
    /// }
    /// # Ok::<(), slidewright::common::FormatError>(())
    /// ```
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::load_with_base(path, base)
    }

    /// Read a deck whose relative image paths resolve against `base`.
    pub fn load_with_base(path: &Path, base: &Path) -> Result<Self, FormatError> {
        let text = std::fs::read_to_string(path).map_err(|source| FormatError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text, path, base)
    }

    /// Parse deck text. `path` only labels errors.
    pub fn from_yaml(text: &str, path: &Path, base: &Path) -> Result<Self, FormatError> {
        let mut docs = serde_yaml::Deserializer::from_str(text)
            .map(|doc| Value::deserialize(doc).map_err(|e| FormatError::parse(path, e)))
            .collect::<Result<Vec<_>, _>>()?;

        let (meta, slides) = match docs.len() {
            1 => (None, docs.remove(0)),
            2 => {
                let slides = docs.remove(1);
                (Some(parse_meta(docs.remove(0))?), slides)
            },
            n => return Err(FormatError::DocumentCount(n)),
        };

        let slides = match slides {
            Value::Null => IndexMap::new(),
            value => serde_yaml::from_value::<IndexMap<String, Value>>(value).map_err(|e| {
                FormatError::InvalidField {
                    kind: "deck",
                    field: "slides",
                    message: e.to_string(),
                }
            })?,
        };

        let parser = BodyParser { base };
        let slides = slides
            .into_iter()
            .map(|(title, body)| {
                let items = parser.body(&title, body)?;
                Ok(Slide { title, items })
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        debug!(slides = slides.len(), title_page = meta.is_some(), "deck parsed");
        Ok(Deck { meta, slides })
    }
}

fn parse_meta(value: Value) -> Result<DeckMeta, FormatError> {
    let map = match value {
        Value::Mapping(map) => map,
        _ => return Err(FormatError::InvalidMeta("title")),
    };

    let string = |key: &'static str| -> Result<Option<String>, FormatError> {
        match map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(FormatError::InvalidMeta(key)),
        }
    };

    let keywords = match map.get("keywords") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::Sequence(seq)) => seq
            .iter()
            .map(|k| k.as_str().map(String::from).ok_or(FormatError::InvalidMeta("keywords")))
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(FormatError::InvalidMeta("keywords")),
    };

    Ok(DeckMeta {
        title: string("title")?.ok_or(FormatError::InvalidMeta("title"))?,
        author: string("author")?.ok_or(FormatError::InvalidMeta("author"))?,
        email: string("email")?,
        keywords,
    })
}

/// Text of a scalar list entry.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Typed access to the fields of a tagged entry.
struct Fields<'a> {
    kind: &'static str,
    map: &'a Mapping,
}

impl<'a> Fields<'a> {
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    fn invalid(&self, field: &'static str, message: impl Into<String>) -> FormatError {
        FormatError::InvalidField {
            kind: self.kind,
            field,
            message: message.into(),
        }
    }

    fn string(&self, field: &'static str) -> Result<Option<&'a str>, FormatError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.invalid(field, "expected a string")),
        }
    }

    fn required_string(&self, field: &'static str) -> Result<&'a str, FormatError> {
        self.string(field)?.ok_or(FormatError::MissingField {
            kind: self.kind,
            field,
        })
    }

    fn number(&self, field: &'static str) -> Result<f64, FormatError> {
        match self.get(field) {
            None => Ok(0.0),
            Some(value) => value
                .as_f64()
                .filter(|n| *n >= 0.0)
                .ok_or_else(|| self.invalid(field, "expected a non-negative number")),
        }
    }

    fn pos(&self) -> Result<Option<ColumnPos>, FormatError> {
        match self.string("pos")? {
            None => Ok(None),
            Some("left") => Ok(Some(ColumnPos::Left)),
            Some("right") => Ok(Some(ColumnPos::Right)),
            Some(other) => Err(FormatError::InvalidPosition(other.to_string())),
        }
    }
}

struct BodyParser<'a> {
    base: &'a Path,
}

impl BodyParser<'_> {
    fn body(&self, title: &str, body: Value) -> Result<Vec<ContentItem>, FormatError> {
        let entries = match body {
            Value::Null => Vec::new(),
            Value::Sequence(seq) => seq,
            scalar => vec![scalar],
        };

        let mut items = Vec::new();
        let mut pending: Option<ListBlock> = None;

        for entry in entries {
            match entry {
                Value::Mapping(map) => {
                    if let Some(list) = pending.take() {
                        items.push(ContentItem::List(list));
                    }
                    items.push(self.directive(title, &map)?);
                },
                Value::Sequence(seq) => {
                    let Some(list) = pending.as_mut().filter(|l| !l.items.is_empty()) else {
                        return Err(FormatError::OrphanNestedList(title.to_string()));
                    };
                    let child = self.list(title, list.bullet, seq)?;
                    if let Some(parent) = list.items.last_mut() {
                        parent.children.push(child);
                    }
                },
                scalar => {
                    let text = scalar_text(&scalar).ok_or_else(|| FormatError::InvalidField {
                        kind: "list",
                        field: "items",
                        message: "unsupported entry".to_string(),
                    })?;
                    pending.get_or_insert_with(ListBlock::default).items.push(ListItem {
                        runs: parse_inline(&text),
                        children: Vec::new(),
                    });
                },
            }
        }

        if let Some(list) = pending {
            items.push(ContentItem::List(list));
        }
        Ok(items)
    }

    /// Build a list from a YAML sequence. Nested sequences and `type: list`
    /// mappings attach to the preceding item.
    fn list(&self, title: &str, bullet: BulletKind, entries: Vec<Value>) -> Result<ListBlock, FormatError> {
        let mut block = ListBlock {
            bullet,
            items: Vec::new(),
        };

        for entry in entries {
            let child = match entry {
                Value::Sequence(seq) => self.list(title, bullet, seq)?,
                Value::Mapping(map) => match self.directive(title, &map)? {
                    ContentItem::List(list) => list,
                    _ => {
                        return Err(FormatError::InvalidField {
                            kind: "list",
                            field: "items",
                            message: "only nested lists may appear inside a list".to_string(),
                        });
                    },
                },
                scalar => {
                    let text = scalar_text(&scalar).ok_or_else(|| FormatError::InvalidField {
                        kind: "list",
                        field: "items",
                        message: "unsupported entry".to_string(),
                    })?;
                    block.items.push(ListItem {
                        runs: parse_inline(&text),
                        children: Vec::new(),
                    });
                    continue;
                },
            };

            let parent = block
                .items
                .last_mut()
                .ok_or_else(|| FormatError::OrphanNestedList(title.to_string()))?;
            parent.children.push(child);
        }

        Ok(block)
    }

    fn directive(&self, title: &str, map: &Mapping) -> Result<ContentItem, FormatError> {
        let kind = match map.get("type") {
            None | Some(Value::Null) => return Err(FormatError::MissingType),
            Some(Value::String(kind)) => kind.as_str(),
            Some(other) => return Err(FormatError::UnknownType(format!("{:?}", other))),
        };

        match kind {
            "image" => self.image(map),
            "layout" => {
                let fields = Fields { kind: "layout", map };
                match fields.required_string("mode")? {
                    "simple" => Ok(ContentItem::Layout(LayoutMode::Simple)),
                    "two-col" | "two-column" => Ok(ContentItem::Layout(LayoutMode::TwoColumn)),
                    other => Err(FormatError::InvalidLayoutMode(other.to_string())),
                }
            },
            "code" => {
                let fields = Fields { kind: "code", map };
                let source = fields.required_string("code")?;
                let lang = fields.string("lang")?;
                if let Some(lang) = lang
                    && code::find_syntax(lang).is_none()
                {
                    return Err(FormatError::UnknownLanguage(lang.to_string()));
                }
                Ok(ContentItem::Code(CodeBlock {
                    source: source.to_string(),
                    lang: lang.map(String::from),
                    pos: fields.pos()?,
                }))
            },
            "text" => {
                let fields = Fields { kind: "text", map };
                let text = fields.required_string("text")?;
                Ok(ContentItem::Text(parse_inline(text)))
            },
            "list" => {
                let fields = Fields { kind: "list", map };
                let bullet = match fields.string("bullet")? {
                    None => BulletKind::Glyph,
                    Some(s) => BulletKind::parse(s).ok_or_else(|| FormatError::InvalidBullet(s.to_string()))?,
                };
                let entries = match fields.get("items") {
                    None => {
                        return Err(FormatError::MissingField {
                            kind: "list",
                            field: "items",
                        });
                    },
                    Some(Value::Sequence(seq)) => seq.clone(),
                    Some(_) => return Err(fields.invalid("items", "expected a sequence")),
                };
                Ok(ContentItem::List(self.list(title, bullet, entries)?))
            },
            "table" => Ok(ContentItem::Table),
            other => Err(FormatError::UnknownType(other.to_string())),
        }
    }

    fn image(&self, map: &Mapping) -> Result<ContentItem, FormatError> {
        let fields = Fields { kind: "image", map };
        let src = PathBuf::from(fields.required_string("src")?);
        let src = if src.is_absolute() { src } else { self.base.join(src) };

        let align = match fields.string("align")? {
            None | Some("center") => ImageAlign::Center,
            Some("float") => ImageAlign::Float,
            Some(other) => return Err(FormatError::InvalidAlign(other.to_string())),
        };

        Ok(ContentItem::Image(ImageRef {
            src,
            width: fields.number("width")?,
            height: fields.number("height")?,
            pos: fields.pos()?,
            align,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::TextRun;
    use crate::common::FontStyle;

    fn parse(text: &str) -> Result<Deck, FormatError> {
        Deck::from_yaml(text, Path::new("deck.yaml"), Path::new("/talks"))
    }

    fn list(item: &ContentItem) -> &ListBlock {
        match item {
            ContentItem::List(list) => list,
            other => panic!("expected a list, got {:?}", other),
        }
    }

    #[test]
    fn test_meta_and_ordered_slides() {
        let deck = parse(
            "title: Rust at Scale\nauthor: A. Person\nkeywords: [rust, slides]\n---\nZeta: one\nAlpha: two\nMid: three\n",
        )
        .unwrap();

        let meta = deck.meta.unwrap();
        assert_eq!(meta.title, "Rust at Scale");
        assert_eq!(meta.email, None);
        assert_eq!(meta.keywords, vec!["rust", "slides"]);

        let titles: Vec<&str> = deck.slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_single_document_has_no_meta() {
        let deck = parse("Intro:\n  - hello\n").unwrap();
        assert!(deck.meta.is_none());
        assert_eq!(deck.slides.len(), 1);
    }

    #[test]
    fn test_document_count() {
        assert!(matches!(parse("a: 1\n---\nb: 2\n---\nc: 3\n"), Err(FormatError::DocumentCount(3))));
    }

    #[test]
    fn test_meta_requires_author() {
        assert!(matches!(
            parse("title: T\n---\nS: x\n"),
            Err(FormatError::InvalidMeta("author"))
        ));
        assert!(matches!(
            parse("title: [T]\nauthor: A\n---\nS: x\n"),
            Err(FormatError::InvalidMeta("title"))
        ));
    }

    #[test]
    fn test_body_shapes() {
        let deck = parse("Empty:\nScalar: just one\n").unwrap();
        assert!(deck.slides[0].items.is_empty());

        let items = &deck.slides[1].items;
        assert_eq!(items.len(), 1);
        let block = list(&items[0]);
        assert!(block.is_bare());
        assert_eq!(block.items[0].runs, vec![TextRun::plain("just one")]);
    }

    #[test]
    fn test_nested_list_attaches_to_previous_item() {
        let deck = parse(
            r#"
Topics:
  - first
  - - child a
    - child b
    - - grandchild
  - second
"#,
        )
        .unwrap();

        let block = list(&deck.slides[0].items[0]);
        assert_eq!(block.items.len(), 2);
        let children = &block.items[0].children;
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].items.len(), 2);
        assert_eq!(children[0].items[1].children[0].items[0].runs[0].text, "grandchild");
        assert!(block.items[1].children.is_empty());
    }

    #[test]
    fn test_orphan_nested_list() {
        assert!(matches!(
            parse("Bad:\n  - - nested first\n"),
            Err(FormatError::OrphanNestedList(title)) if title == "Bad"
        ));
    }

    #[test]
    fn test_directives_split_implicit_lists() {
        let deck = parse(
            r#"
Mixed:
  - a
  - b
  - {type: layout, mode: two-col}
  - c
  - {type: image, src: fig.png, width: 200, pos: right}
  - {type: code, code: "fn main() {}", lang: rust, pos: left}
  - {type: text, text: "**Note** well"}
  - {type: table}
"#,
        )
        .unwrap();

        let items = &deck.slides[0].items;
        assert_eq!(items.len(), 7);
        assert_eq!(list(&items[0]).items.len(), 2);
        assert_eq!(items[1], ContentItem::Layout(LayoutMode::TwoColumn));
        assert_eq!(list(&items[2]).items.len(), 1);
        match &items[3] {
            ContentItem::Image(image) => {
                assert_eq!(image.src, PathBuf::from("/talks/fig.png"));
                assert_eq!(image.width, 200.0);
                assert_eq!(image.height, 0.0);
                assert_eq!(image.pos, Some(ColumnPos::Right));
                assert_eq!(image.align, ImageAlign::Center);
            },
            other => panic!("unexpected {:?}", other),
        }
        match &items[4] {
            ContentItem::Code(code) => {
                assert_eq!(code.lang.as_deref(), Some("rust"));
                assert_eq!(code.pos, Some(ColumnPos::Left));
            },
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            items[5],
            ContentItem::Text(vec![TextRun::new(FontStyle::BOLD, "Note"), TextRun::plain(" well")])
        );
        assert_eq!(items[6], ContentItem::Table);
    }

    #[test]
    fn test_explicit_ordinal_list() {
        let deck = parse(
            r#"
Steps:
  - type: list
    bullet: "1"
    items:
      - build
      - - nested inherits
      - ship
"#,
        )
        .unwrap();
        let block = list(&deck.slides[0].items[0]);
        assert_eq!(block.bullet, BulletKind::Ordinal);
        assert_eq!(block.items.len(), 2);
        assert_eq!(block.items[0].children[0].bullet, BulletKind::Ordinal);
    }

    #[test]
    fn test_invalid_bullet() {
        let err = parse("S:\n  - {type: list, bullet: '#', items: [a]}\n").unwrap_err();
        assert!(matches!(err, FormatError::InvalidBullet(b) if b == "#"));
    }

    #[test]
    fn test_image_without_src_fails_whole_slide() {
        let err = parse("S:\n  - {type: image, width: 100}\n  - {type: mystery}\n").unwrap_err();
        assert_eq!(err.to_string(), "Missing 'src' in 'image'");
    }

    #[test]
    fn test_tag_errors() {
        assert!(matches!(parse("S:\n  - {src: a.png}\n"), Err(FormatError::MissingType)));
        assert!(matches!(
            parse("S:\n  - {type: chart}\n"),
            Err(FormatError::UnknownType(t)) if t == "chart"
        ));
        assert!(matches!(
            parse("S:\n  - {type: layout}\n"),
            Err(FormatError::MissingField { kind: "layout", field: "mode" })
        ));
        assert!(matches!(
            parse("S:\n  - {type: layout, mode: grid}\n"),
            Err(FormatError::InvalidLayoutMode(_))
        ));
        assert!(matches!(
            parse("S:\n  - {type: code, code: x, lang: no-such-language}\n"),
            Err(FormatError::UnknownLanguage(_))
        ));
        assert!(matches!(
            parse("S:\n  - {type: image, src: a.png, pos: top}\n"),
            Err(FormatError::InvalidPosition(_))
        ));
        assert!(matches!(
            parse("S:\n  - {type: image, src: a.png, align: left}\n"),
            Err(FormatError::InvalidAlign(_))
        ));
        assert!(matches!(
            parse("S:\n  - {type: code}\n"),
            Err(FormatError::MissingField { kind: "code", field: "code" })
        ));
    }

    #[test]
    fn test_unparsable_yaml() {
        assert!(matches!(parse("S: [unclosed\n"), Err(FormatError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Deck::load("/nonexistent/deck.yaml"),
            Err(FormatError::Open { .. })
        ));
    }
}
