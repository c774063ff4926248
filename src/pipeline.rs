//! Fit/transform composition over raw email buffers

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::normalize::Normalizer;
use crate::parser::extract_messages;
use crate::types::TokenMultiset;
use crate::vectorize::FeatureMatrix;
use crate::vocabulary::{Vocabulary, VocabularyBuilder};
use tracing::{debug, warn};

/// A stage that learns state from a training corpus
pub trait Fit<D> {
    type Fitted;

    fn fit(&self, corpus: &[D]) -> Result<Self::Fitted>;
}

/// A stage that maps documents with no further learning
pub trait Transform<D> {
    type Output;

    fn transform(&self, docs: &[D]) -> Self::Output;
}

/// Normalized documents of one batch, aligned with the input buffers
#[derive(Debug, Default)]
pub struct Batch {
    /// One multiset per input buffer; failed messages contribute an empty one
    pub documents: Vec<TokenMultiset>,

    /// Input index and error of every buffer that failed to parse
    pub failures: Vec<(usize, Error)>,
}

impl Batch {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Output of [`Pipeline::fit_transform`]
#[derive(Debug)]
pub struct FittedBatch {
    pub vocabulary: Vocabulary,
    pub features: FeatureMatrix,
    pub failures: Vec<(usize, Error)>,
}

/// Raw bytes to sparse features, end to end
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    normalizer: Normalizer,
    builder: VocabularyBuilder,
}

impl Pipeline {
    /// Validate `config` and assemble the stages
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            normalizer: Normalizer::new(config.normalization),
            builder: VocabularyBuilder::new(config.vocabulary_size)?,
        })
    }

    #[must_use]
    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Parse and normalize every buffer, isolating per-message failures
    #[must_use]
    pub fn prepare<B: AsRef<[u8]>>(&self, raw_buffers: &[B]) -> Batch {
        let mut batch = Batch::default();

        for (index, parsed) in extract_messages(raw_buffers).into_iter().enumerate() {
            match parsed {
                Ok(message) => batch
                    .documents
                    .push(self.normalizer.normalize_message(&message)),
                Err(e) => {
                    batch.documents.push(TokenMultiset::new());
                    batch.failures.push((index, e));
                }
            }
        }

        if !batch.is_clean() {
            warn!(
                "{} of {} messages failed to parse",
                batch.failures.len(),
                raw_buffers.len()
            );
        }
        debug!("Prepared {} documents", batch.documents.len());

        batch
    }

    /// Fit a vocabulary on `raw_buffers` and vectorize them with it
    pub fn fit_transform<B: AsRef<[u8]>>(&self, raw_buffers: &[B]) -> Result<FittedBatch> {
        let batch = self.prepare(raw_buffers);
        let vocabulary = self.builder.fit(&batch.documents)?;
        let features = vocabulary.transform(&batch.documents);

        Ok(FittedBatch {
            vocabulary,
            features,
            failures: batch.failures,
        })
    }

    /// Vectorize `raw_buffers` with a vocabulary fitted earlier
    #[must_use]
    pub fn transform<B: AsRef<[u8]>>(
        &self,
        raw_buffers: &[B],
        vocabulary: &Vocabulary,
    ) -> (FeatureMatrix, Vec<(usize, Error)>) {
        let batch = self.prepare(raw_buffers);
        (vocabulary.transform(&batch.documents), batch.failures)
    }
}
