//! Labeled corpus sources

use crate::error::{Error, Result};
use crate::types::Label;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Index file shipped inside the public spam corpus archives
const ARCHIVE_INDEX_FILE: &str = "cmds";

/// Raw emails with their labels, in a fixed order
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    emails: Vec<Vec<u8>>,
    labels: Vec<Label>,
}

impl Corpus {
    /// Pair buffers with labels; both must have the same length
    pub fn new(emails: Vec<Vec<u8>>, labels: Vec<Label>) -> Result<Self> {
        if emails.len() != labels.len() {
            return Err(Error::Configuration(format!(
                "{} emails but {} labels",
                emails.len(),
                labels.len()
            )));
        }
        Ok(Self { emails, labels })
    }

    pub fn push(&mut self, email: Vec<u8>, label: Label) {
        self.emails.push(email);
        self.labels.push(label);
    }

    #[must_use]
    pub fn emails(&self) -> &[Vec<u8>] {
        &self.emails
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Count of emails carrying `label`
    #[must_use]
    pub fn count(&self, label: Label) -> usize {
        self.labels.iter().filter(|l| **l == label).count()
    }
}

/// Supplies a labeled corpus. Fetching and unpacking archives happens elsewhere.
pub trait CorpusProvider {
    fn load(&self) -> Result<Corpus>;
}

/// Corpus read from already extracted ham and spam directories.
///
/// Every regular file is one email; files are read in name order, ham first.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    ham_dir: PathBuf,
    spam_dir: PathBuf,
}

impl DirectoryCorpus {
    pub fn new(ham_dir: impl Into<PathBuf>, spam_dir: impl Into<PathBuf>) -> Self {
        Self {
            ham_dir: ham_dir.into(),
            spam_dir: spam_dir.into(),
        }
    }
}

impl CorpusProvider for DirectoryCorpus {
    fn load(&self) -> Result<Corpus> {
        let mut corpus = Corpus::default();
        for (dir, label) in [(&self.ham_dir, Label::Ham), (&self.spam_dir, Label::Spam)] {
            for path in email_files(dir)? {
                corpus.push(fs::read(&path)?, label);
            }
        }

        debug!(
            "Loaded {} ham and {} spam emails",
            corpus.count(Label::Ham),
            corpus.count(Label::Spam)
        );

        Ok(corpus)
    }
}

fn email_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && entry.file_name() != ARCHIVE_INDEX_FILE {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
