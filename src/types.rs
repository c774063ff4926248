//! Core types shared by the pipeline stages

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Content type of a message node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentType {
    /// Lower-cased MIME type, e.g. `text/plain`
    pub mimetype: String,

    /// Declared charset (mailparse defaults this to `us-ascii`)
    pub charset: String,
}

impl ContentType {
    #[must_use]
    pub fn new(mimetype: impl Into<String>, charset: impl Into<String>) -> Self {
        Self {
            mimetype: mimetype.into().to_lowercase(),
            charset: charset.into(),
        }
    }

    /// Check whether this is a `multipart/*` container type
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.mimetype.starts_with("multipart/")
    }

    #[must_use]
    pub fn is_plain_text(&self) -> bool {
        self.mimetype == "text/plain"
    }

    #[must_use]
    pub fn is_html(&self) -> bool {
        self.mimetype == "text/html"
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; charset={}", self.mimetype, self.charset)
    }
}

/// Payload of a leaf part
#[derive(Debug, Clone)]
pub struct Payload {
    /// Body bytes exactly as they appear in the message (still transfer-encoded)
    pub raw: Vec<u8>,

    /// Content after transfer and charset decoding
    pub decoded: Result<String, DecodeError>,
}

/// Body of a message node: either a leaf payload or child parts, never both
#[derive(Debug, Clone)]
pub enum Part {
    Leaf(Payload),
    Multipart(Vec<Message>),
}

/// A parsed message tree node. Parents own their children.
#[derive(Debug, Clone)]
pub struct Message {
    /// Headers in original order, keys as written
    pub headers: Vec<(String, String)>,

    /// Content type of this node
    pub content_type: ContentType,

    /// Payload or children
    pub part: Part,
}

impl Message {
    /// Build a leaf node
    #[must_use]
    pub const fn leaf(
        headers: Vec<(String, String)>,
        content_type: ContentType,
        payload: Payload,
    ) -> Self {
        Self {
            headers,
            content_type,
            part: Part::Leaf(payload),
        }
    }

    /// Build a multipart node
    #[must_use]
    pub const fn multipart(
        headers: Vec<(String, String)>,
        content_type: ContentType,
        children: Vec<Self>,
    ) -> Self {
        Self {
            headers,
            content_type,
            part: Part::Multipart(children),
        }
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.part, Part::Leaf(_))
    }

    /// Child parts in order (empty for leaves)
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.part {
            Part::Multipart(children) => children,
            Part::Leaf(_) => &[],
        }
    }

    /// First header value with the given name, compared case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decoded content of a leaf.
    ///
    /// Returns `Ok(None)` for multipart nodes and the stored [`DecodeError`]
    /// when the leaf could not be decoded.
    pub fn content(&self) -> Result<Option<&str>, DecodeError> {
        match &self.part {
            Part::Leaf(payload) => payload.decoded.as_deref().map(Some).map_err(Clone::clone),
            Part::Multipart(_) => Ok(None),
        }
    }

    /// Raw payload of a leaf as a string, used when decoding fails
    #[must_use]
    pub fn raw_text(&self) -> Option<Cow<'_, str>> {
        match &self.part {
            Part::Leaf(payload) => Some(String::from_utf8_lossy(&payload.raw)),
            Part::Multipart(_) => None,
        }
    }

    /// Pre-order iterator over this node and all descendants
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order traversal over a message tree, children visited in order
pub struct Walk<'a> {
    stack: Vec<&'a Message>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Message;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Word to occurrence count mapping for one message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenMultiset(BTreeMap<String, usize>);

impl TokenMultiset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `word`, summing with any existing count
    pub fn add(&mut self, word: impl Into<String>, count: usize) {
        *self.0.entry(word.into()).or_insert(0) += count;
    }

    #[must_use]
    pub fn get(&self, word: &str) -> usize {
        self.0.get(word).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains_key(word)
    }

    /// Number of distinct words
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for TokenMultiset {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut multiset = Self::new();
        for (word, count) in iter {
            multiset.add(word, count);
        }
        multiset
    }
}

impl IntoIterator for TokenMultiset {
    type Item = (String, usize);
    type IntoIter = std::collections::btree_map::IntoIter<String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Class label of a corpus email
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    /// Numeric target as used by downstream classifiers (ham = 0, spam = 1)
    #[must_use]
    pub const fn as_target(self) -> u8 {
        match self {
            Self::Ham => 0,
            Self::Spam => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ham => write!(f, "ham"),
            Self::Spam => write!(f, "spam"),
        }
    }
}
