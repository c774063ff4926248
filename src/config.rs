//! Pipeline configuration

use crate::error::{Error, Result};
use crate::vocabulary::validate_size;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of words kept in a fitted vocabulary
pub const DEFAULT_VOCABULARY_SIZE: usize = 1000;

/// Normalization flags, fixed for the lifetime of a pipeline.
///
/// Construct through [`NormalizationConfig::builder`] or deserialize; both
/// paths validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NormalizationConfigBuilder")]
pub struct NormalizationConfig {
    strip_headers: bool,
    lower_case: bool,
    remove_punctuation: bool,
    replace_urls: bool,
    replace_numbers: bool,
    remove_stopwords: bool,
    stemming: bool,
}

impl NormalizationConfig {
    #[must_use]
    pub fn builder() -> NormalizationConfigBuilder {
        NormalizationConfigBuilder::default()
    }

    /// Configuration that only splits the body on whitespace
    #[must_use]
    pub const fn raw() -> Self {
        Self {
            strip_headers: true,
            lower_case: false,
            remove_punctuation: false,
            replace_urls: false,
            replace_numbers: false,
            remove_stopwords: false,
            stemming: false,
        }
    }

    #[must_use]
    pub const fn strip_headers(&self) -> bool {
        self.strip_headers
    }

    #[must_use]
    pub const fn lower_case(&self) -> bool {
        self.lower_case
    }

    #[must_use]
    pub const fn remove_punctuation(&self) -> bool {
        self.remove_punctuation
    }

    #[must_use]
    pub const fn replace_urls(&self) -> bool {
        self.replace_urls
    }

    #[must_use]
    pub const fn replace_numbers(&self) -> bool {
        self.replace_numbers
    }

    #[must_use]
    pub const fn remove_stopwords(&self) -> bool {
        self.remove_stopwords
    }

    #[must_use]
    pub const fn stemming(&self) -> bool {
        self.stemming
    }
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            strip_headers: true,
            lower_case: true,
            remove_punctuation: true,
            replace_urls: true,
            replace_numbers: true,
            remove_stopwords: false,
            stemming: true,
        }
    }
}

/// Builder for [`NormalizationConfig`]. Starts from the defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizationConfigBuilder {
    strip_headers: bool,
    lower_case: bool,
    remove_punctuation: bool,
    replace_urls: bool,
    replace_numbers: bool,
    remove_stopwords: bool,
    stemming: bool,
}

impl Default for NormalizationConfigBuilder {
    fn default() -> Self {
        let defaults = NormalizationConfig::default();
        Self {
            strip_headers: defaults.strip_headers,
            lower_case: defaults.lower_case,
            remove_punctuation: defaults.remove_punctuation,
            replace_urls: defaults.replace_urls,
            replace_numbers: defaults.replace_numbers,
            remove_stopwords: defaults.remove_stopwords,
            stemming: defaults.stemming,
        }
    }
}

impl NormalizationConfigBuilder {
    #[must_use]
    pub const fn strip_headers(mut self, enabled: bool) -> Self {
        self.strip_headers = enabled;
        self
    }

    #[must_use]
    pub const fn lower_case(mut self, enabled: bool) -> Self {
        self.lower_case = enabled;
        self
    }

    #[must_use]
    pub const fn remove_punctuation(mut self, enabled: bool) -> Self {
        self.remove_punctuation = enabled;
        self
    }

    #[must_use]
    pub const fn replace_urls(mut self, enabled: bool) -> Self {
        self.replace_urls = enabled;
        self
    }

    #[must_use]
    pub const fn replace_numbers(mut self, enabled: bool) -> Self {
        self.replace_numbers = enabled;
        self
    }

    /// Requires `lower_case`: the stopword table is lower-case only, so
    /// [`build`](Self::build) rejects stopword removal on cased text.
    #[must_use]
    pub const fn remove_stopwords(mut self, enabled: bool) -> Self {
        self.remove_stopwords = enabled;
        self
    }

    #[must_use]
    pub const fn stemming(mut self, enabled: bool) -> Self {
        self.stemming = enabled;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// The stopword table is lower-case, so stopword removal requires
    /// lower-casing.
    pub fn build(self) -> Result<NormalizationConfig> {
        if self.remove_stopwords && !self.lower_case {
            return Err(Error::Configuration(
                "remove_stopwords requires lower_case".into(),
            ));
        }

        Ok(NormalizationConfig {
            strip_headers: self.strip_headers,
            lower_case: self.lower_case,
            remove_punctuation: self.remove_punctuation,
            replace_urls: self.replace_urls,
            replace_numbers: self.replace_numbers,
            remove_stopwords: self.remove_stopwords,
            stemming: self.stemming,
        })
    }
}

impl TryFrom<NormalizationConfigBuilder> for NormalizationConfig {
    type Error = Error;

    fn try_from(builder: NormalizationConfigBuilder) -> Result<Self> {
        builder.build()
    }
}

/// Full pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Text normalization flags
    pub normalization: NormalizationConfig,

    /// Maximum number of words in the fitted vocabulary
    pub vocabulary_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationConfig::default(),
            vocabulary_size: DEFAULT_VOCABULARY_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            Error::Configuration(format!("invalid pipeline configuration: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        validate_size(self.vocabulary_size)
    }
}
