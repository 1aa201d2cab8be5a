//! Minimal HTML tag scanning.
//!
//! Enough to find elements by id, class and attribute in server-rendered
//! markup; it is not a parser and does not build a tree.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([a-zA-Z][a-zA-Z0-9-]*)((?:\s[^>]*)?)/?>").expect("open tag pattern")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|(quot|amp|lt|gt|apos));")
        .expect("entity pattern")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern")
});

/// An opening tag and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    /// Byte offset just past the closing `>` of this tag.
    pub end: usize,
}

impl Tag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }
}

/// All opening tags in document order. Tags inside `<!-- -->` comments
/// are skipped.
pub fn tags(html: &str) -> impl Iterator<Item = Tag> + '_ {
    let comments = comment_spans(html);
    OPEN_TAG
        .captures_iter(html)
        .filter(move |caps| caps.get(0).is_some_and(|m| !inside(&comments, m.start())))
        .map(|caps| {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let name = caps[1].to_ascii_lowercase();
            let attrs = caps
                .get(2)
                .map(|m| parse_attrs(m.as_str()))
                .unwrap_or_default();
            Tag {
                name,
                attrs,
                end: whole.end,
            }
        })
}

fn comment_spans(html: &str) -> Vec<Range<usize>> {
    COMMENT.find_iter(html).map(|m| m.range()).collect()
}

fn inside(spans: &[Range<usize>], pos: usize) -> bool {
    spans.iter().any(|span| span.contains(&pos))
}

pub fn find_by_id<'a>(html: &'a str, id: &'a str) -> Option<Tag> {
    tags(html).find(|tag| tag.id() == Some(id))
}

/// Markup between the opening tag of element `#id` and its matching
/// closing tag. Nested elements with the same tag name are balanced.
pub fn inner_html<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let open = find_by_id(html, id)?;
    let pattern = format!(r"(?i)<(/?){}\b[^>]*?(/?)>", regex::escape(&open.name));
    let same_name = Regex::new(&pattern).ok()?;

    let rest = &html[open.end..];
    let comments = comment_spans(rest);
    let mut depth = 1usize;
    for caps in same_name.captures_iter(rest) {
        if caps.get(0).is_some_and(|m| inside(&comments, m.start())) {
            continue;
        }
        let closing = !caps[1].is_empty();
        let self_closing = !caps[2].is_empty();
        if closing {
            depth -= 1;
            if depth == 0 {
                let start = caps.get(0)?.start();
                return Some(&html[open.end..open.end + start]);
            }
        } else if !self_closing {
            depth += 1;
        }
    }
    None
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(raw)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_entities(m.as_str()))
                .unwrap_or_default();
            (caps[1].to_ascii_lowercase(), value)
        })
        .collect()
}

/// Decodes character references: the named ones HTML attribute values
/// commonly carry, and every decimal or hex numeric reference. Unknown or
/// invalid references are left as written.
fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    ENTITY
        .replace_all(value, |caps: &Captures<'_>| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
            } else {
                match caps.get(3).map(|m| m.as_str()) {
                    Some("quot") => Some('"'),
                    Some("amp") => Some('&'),
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    Some("apos") => Some('\''),
                    _ => None,
                }
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
