//! Canonical body selection and HTML to text conversion

use crate::types::Message;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::warn;

static HEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?msi)<head.*?>.*?</head>").unwrap());

static ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?msi)<a\s.*?>").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?ms)<.*?>").unwrap());

static NEWLINE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)(\s*\n)+").unwrap());

/// Select the single text body of a message.
///
/// The first `text/plain` leaf in pre-order wins immediately. Without one,
/// the last `text/html` leaf seen is converted to text. `None` means the
/// message has no textual body at all.
#[must_use]
pub fn resolve_body(message: &Message) -> Option<String> {
    let mut html: Option<&Message> = None;

    for node in message.walk().filter(|m| m.is_leaf()) {
        if node.content_type.is_plain_text() {
            return Some(leaf_text(node).into_owned());
        }
        if node.content_type.is_html() {
            html = Some(node);
        }
    }

    html.map(|node| html_to_plain_text(&leaf_text(node)))
}

fn leaf_text(leaf: &Message) -> Cow<'_, str> {
    match leaf.content() {
        Ok(Some(text)) => Cow::Borrowed(text),
        Ok(None) => Cow::Borrowed(""),
        Err(e) => {
            warn!("{e}, falling back to raw payload");
            leaf.raw_text().unwrap_or_default()
        }
    }
}

/// Approximate plain-text rendering of HTML.
///
/// Regex based, not a parser: malformed markup may leak fragments.
#[must_use]
pub fn html_to_plain_text(html: &str) -> String {
    let text = HEAD_REGEX.replace_all(html, "");
    let text = ANCHOR_REGEX.replace_all(&text, " HYPERLINK ");
    let text = TAG_REGEX.replace_all(&text, "");
    let text = NEWLINE_RUN_REGEX.replace_all(&text, "\n");
    decode_entities(&text)
}

/// Decode character references with the HTML5 entity table, including the
/// legacy names browsers accept without a trailing semicolon. Unknown
/// references are kept.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    htmlize::unescape(text).into_owned()
}
