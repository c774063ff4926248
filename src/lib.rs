// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Feature Extraction
//!
//! Turns raw emails into bag-of-words count vectors for spam/ham
//! classification.
//!
//! # Stages
//!
//! - Message extraction: raw bytes to an owned MIME tree
//! - Body resolution: first plain-text part, else the last HTML part as text
//! - Normalization: case folding, URL and number substitution, punctuation
//!   removal, stopword filtering, Porter stemming
//! - Vocabulary fitting: capped corpus frequencies, deterministic ranking
//! - Vectorization: sparse CSR counts with an out-of-vocabulary column 0
//!
//! # Example
//!
//! ```rust
//! use email_features::{NormalizationConfig, extract_messages, fit_vocabulary, normalize, vectorize};
//!
//! let raw = [b"Subject: Hi\r\n\r\nWin money now at http://spam.example".as_slice()];
//! let messages: Vec<_> = extract_messages(&raw).into_iter().filter_map(Result::ok).collect();
//! let docs = normalize(&messages, &NormalizationConfig::default());
//!
//! let vocabulary = fit_vocabulary(&docs, 100).unwrap();
//! let features = vectorize(&docs, &vocabulary);
//!
//! assert_eq!(features.rows(), 1);
//! assert_eq!(features.cols(), 101);
//! ```

mod body;
mod config;
mod corpus;
mod error;
mod normalize;
mod parser;
mod pipeline;
mod stem;
mod stopwords;
mod store;
mod types;
mod vectorize;
mod vocabulary;

pub use body::{decode_entities, html_to_plain_text, resolve_body};
pub use config::{
    DEFAULT_VOCABULARY_SIZE, NormalizationConfig, NormalizationConfigBuilder, PipelineConfig,
};
pub use corpus::{Corpus, CorpusProvider, DirectoryCorpus};
pub use error::{DecodeError, Error, Result};
pub use normalize::{Normalizer, find_urls, normalize, replace_urls, stem_counts};
pub use parser::{extract_message, extract_messages};
pub use pipeline::{Batch, Fit, FittedBatch, Pipeline, Transform};
pub use stem::stem;
pub use stopwords::is_stopword;
pub use store::{FeatureStore, JsonStore, MemoryStore};
pub use types::*;
pub use vectorize::{FeatureMatrix, vectorize};
pub use vocabulary::{
    MAX_DOCUMENT_CONTRIBUTION, OOV_INDEX, Vocabulary, VocabularyBuilder, fit_vocabulary,
};
