//! Capped-frequency vocabulary fitting

use crate::error::{Error, Result};
use crate::pipeline::Fit;
use crate::types::TokenMultiset;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Most a single document contributes to one word's corpus total
pub const MAX_DOCUMENT_CONTRIBUTION: usize = 10;

/// Column reserved for out-of-vocabulary words
pub const OOV_INDEX: usize = 0;

/// A size must leave room for the OOV column: `1 <= size < usize::MAX`
pub(crate) fn validate_size(vocabulary_size: usize) -> Result<()> {
    if vocabulary_size == 0 {
        return Err(Error::Configuration(
            "vocabulary_size must be at least 1".into(),
        ));
    }
    if vocabulary_size == usize::MAX {
        return Err(Error::Configuration(
            "vocabulary_size leaves no room for the out-of-vocabulary column".into(),
        ));
    }
    Ok(())
}

/// Fitted word to column mapping.
///
/// Words are ranked by capped corpus frequency; rank `r` (from 0) maps to
/// column `r + 1`. Immutable once fitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VocabularyRepr", into = "VocabularyRepr")]
pub struct Vocabulary {
    size: usize,
    words: Vec<String>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct VocabularyRepr {
    size: usize,
    words: Vec<String>,
}

impl TryFrom<VocabularyRepr> for Vocabulary {
    type Error = Error;

    fn try_from(repr: VocabularyRepr) -> Result<Self> {
        validate_size(repr.size)?;
        if repr.words.len() > repr.size {
            return Err(Error::Configuration(format!(
                "vocabulary holds {} words but its size is {}",
                repr.words.len(),
                repr.size
            )));
        }

        let mut seen = HashSet::with_capacity(repr.words.len());
        if let Some(word) = repr.words.iter().find(|word| !seen.insert(word.as_str())) {
            return Err(Error::Configuration(format!(
                "duplicate vocabulary word {word:?}"
            )));
        }

        Ok(Self::from_ranked(repr.size, repr.words))
    }
}

impl From<Vocabulary> for VocabularyRepr {
    fn from(vocabulary: Vocabulary) -> Self {
        Self {
            size: vocabulary.size,
            words: vocabulary.words,
        }
    }
}

impl Vocabulary {
    fn from_ranked(size: usize, mut words: Vec<String>) -> Self {
        words.truncate(size);
        let index = words
            .iter()
            .enumerate()
            .map(|(rank, word)| (word.clone(), rank + 1))
            .collect();
        Self { size, words, index }
    }

    /// Configured size. Matrices built from this vocabulary have `size + 1`
    /// columns even when fewer words were available during fit.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of words actually present
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Column for `word`, `None` when out of vocabulary
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Column for `word`, [`OOV_INDEX`] when out of vocabulary
    #[must_use]
    pub fn column(&self, word: &str) -> usize {
        self.index_of(word).unwrap_or(OOV_INDEX)
    }

    /// Word at column `index`
    #[must_use]
    pub fn word(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|rank| self.words.get(rank))
            .map(String::as_str)
    }

    /// Words in rank order, paired with their columns
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.words
            .iter()
            .enumerate()
            .map(|(rank, word)| (word.as_str(), rank + 1))
    }
}

/// Fits a [`Vocabulary`] from a training corpus
#[derive(Debug, Clone, Copy)]
pub struct VocabularyBuilder {
    vocabulary_size: usize,
}

impl VocabularyBuilder {
    /// Create a builder keeping at most `vocabulary_size` words
    pub fn new(vocabulary_size: usize) -> Result<Self> {
        validate_size(vocabulary_size)?;
        Ok(Self { vocabulary_size })
    }

    #[must_use]
    pub const fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Corpus totals with each document's count capped per word
    #[must_use]
    pub fn capped_totals(corpus: &[TokenMultiset]) -> HashMap<String, usize> {
        let mut totals: HashMap<String, usize> = HashMap::new();
        for doc in corpus {
            for (word, count) in doc.iter() {
                *totals.entry(word.to_string()).or_insert(0) +=
                    count.min(MAX_DOCUMENT_CONTRIBUTION);
            }
        }
        totals
    }

    /// Rank words by total descending, ties by word ascending
    #[must_use]
    pub fn fit_vocabulary(&self, corpus: &[TokenMultiset]) -> Vocabulary {
        let mut ranked: Vec<(String, usize)> = Self::capped_totals(corpus).into_iter().collect();
        ranked.sort_unstable_by(|(a_word, a_total), (b_word, b_total)| {
            b_total.cmp(a_total).then_with(|| a_word.cmp(b_word))
        });

        let words = ranked
            .into_iter()
            .take(self.vocabulary_size)
            .map(|(word, _)| word)
            .collect();
        let vocabulary = Vocabulary::from_ranked(self.vocabulary_size, words);

        debug!(
            "Fitted vocabulary with {} of {} words from {} documents",
            vocabulary.len(),
            self.vocabulary_size,
            corpus.len()
        );

        vocabulary
    }
}

impl Fit<TokenMultiset> for VocabularyBuilder {
    type Fitted = Vocabulary;

    fn fit(&self, corpus: &[TokenMultiset]) -> Result<Self::Fitted> {
        Ok(self.fit_vocabulary(corpus))
    }
}

/// Fit a vocabulary of at most `vocabulary_size` words
pub fn fit_vocabulary(
    token_multisets: &[TokenMultiset],
    vocabulary_size: usize,
) -> Result<Vocabulary> {
    VocabularyBuilder::new(vocabulary_size)?.fit(token_multisets)
}
