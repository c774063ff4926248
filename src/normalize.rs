//! Body text to token multiset normalization

use crate::body::resolve_body;
use crate::config::NormalizationConfig;
use crate::pipeline::Transform;
use crate::stem::stem;
use crate::stopwords::is_stopword;
use crate::types::{Message, TokenMultiset};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

// Scheme or `www.` URLs, then bare hosts under a common top-level domain
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:(?:https?|ftp)://|www\.)[^\s<>"'()\[\]{}]+|\b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+(?:com|net|org|biz|info|edu|gov|mil|io|co|uk|de|ru|cn|jp|fr|nl|ca|au|tv|cc|ws|mobi|xyz|top|online|site|club|shop|store)\b(?:/[^\s<>"'()\[\]{}]*)?"#,
    )
    .unwrap()
});

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d*)?(?:[eE][+-]?\d+)?").unwrap());

static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Trailing characters that end a sentence rather than a URL
const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Turns messages into token multisets using a fixed configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    config: NormalizationConfig,
}

impl Normalizer {
    #[must_use]
    pub const fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Resolve the body of `message` and normalize it.
    ///
    /// A message without a text body yields an empty multiset.
    #[must_use]
    pub fn normalize_message(&self, message: &Message) -> TokenMultiset {
        let body = resolve_body(message).unwrap_or_default();

        if self.config.strip_headers() {
            return self.normalize_text(&body);
        }

        let mut text: String = message
            .headers
            .iter()
            .map(|(key, value)| format!("{key}: {value}\n"))
            .collect();
        text.push_str(&body);
        self.normalize_text(&text)
    }

    /// Run the enabled normalization steps over `text`
    #[must_use]
    pub fn normalize_text(&self, text: &str) -> TokenMultiset {
        let mut text = if self.config.lower_case() {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        if self.config.replace_urls() {
            text = replace_urls(&text);
        }

        if self.config.replace_numbers() {
            text = NUMBER_REGEX.replace_all(&text, "NUMBER").into_owned();
        }

        if self.config.remove_punctuation() {
            text = NON_WORD_REGEX.replace_all(&text, " ").into_owned();
        }

        let counts: TokenMultiset = if self.config.remove_stopwords() {
            text.unicode_words()
                .filter(|word| !is_stopword(word))
                .map(|word| (word, 1))
                .collect()
        } else {
            text.split_whitespace().map(|word| (word, 1)).collect()
        };

        if self.config.stemming() {
            stem_counts(counts)
        } else {
            counts
        }
    }
}

impl Transform<Message> for Normalizer {
    type Output = Vec<TokenMultiset>;

    fn transform(&self, docs: &[Message]) -> Self::Output {
        docs.iter().map(|m| self.normalize_message(m)).collect()
    }
}

/// Normalize a batch of messages with one configuration
#[must_use]
pub fn normalize(messages: &[Message], config: &NormalizationConfig) -> Vec<TokenMultiset> {
    Normalizer::new(*config).transform(messages)
}

/// Distinct URLs in `text`, longest first. Mail address domains are not URLs.
#[must_use]
pub fn find_urls(text: &str) -> Vec<&str> {
    let distinct: HashSet<&str> = URL_REGEX
        .find_iter(text)
        .filter(|m| !text[..m.start()].ends_with('@') && !text[m.end()..].starts_with('@'))
        .map(|m| m.as_str().trim_end_matches(URL_TRAILING))
        .filter(|url| !url.is_empty())
        .collect();

    let mut urls: Vec<&str> = distinct.into_iter().collect();
    urls.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    urls
}

/// Replace every URL with ` URL `, longer URLs before their prefixes
#[must_use]
pub fn replace_urls(text: &str) -> String {
    let urls = find_urls(text);
    if urls.is_empty() {
        return text.to_string();
    }

    debug!("Replacing {} distinct URLs", urls.len());
    let mut result = text.to_string();
    for url in urls {
        result = result.replace(url, " URL ");
    }
    result
}

/// Stem every word, summing the counts of words sharing a stem
#[must_use]
pub fn stem_counts(counts: TokenMultiset) -> TokenMultiset {
    counts
        .into_iter()
        .map(|(word, count)| (stem(&word), count))
        .collect()
}
