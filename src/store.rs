//! Key-value persistence for fitted vocabularies and feature matrices

use crate::error::{Error, Result};
use crate::vectorize::FeatureMatrix;
use crate::vocabulary::Vocabulary;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores artifacts under caller-chosen keys. Loads of absent keys give `None`.
pub trait FeatureStore {
    fn save_vocabulary(&mut self, key: &str, vocabulary: &Vocabulary) -> Result<()>;

    fn load_vocabulary(&self, key: &str) -> Result<Option<Vocabulary>>;

    fn save_matrix(&mut self, key: &str, matrix: &FeatureMatrix) -> Result<()>;

    fn load_matrix(&self, key: &str) -> Result<Option<FeatureMatrix>>;
}

/// Reject keys that could escape the store root
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
        return Err(Error::Configuration(format!("invalid store key: {key:?}")));
    }
    Ok(())
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    vocabularies: HashMap<String, Vocabulary>,
    matrices: HashMap<String, FeatureMatrix>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeatureStore for MemoryStore {
    fn save_vocabulary(&mut self, key: &str, vocabulary: &Vocabulary) -> Result<()> {
        validate_key(key)?;
        self.vocabularies.insert(key.to_string(), vocabulary.clone());
        Ok(())
    }

    fn load_vocabulary(&self, key: &str) -> Result<Option<Vocabulary>> {
        validate_key(key)?;
        Ok(self.vocabularies.get(key).cloned())
    }

    fn save_matrix(&mut self, key: &str, matrix: &FeatureMatrix) -> Result<()> {
        validate_key(key)?;
        self.matrices.insert(key.to_string(), matrix.clone());
        Ok(())
    }

    fn load_matrix(&self, key: &str) -> Result<Option<FeatureMatrix>> {
        validate_key(key)?;
        Ok(self.matrices.get(key).cloned())
    }
}

/// One JSON file per artifact under a root directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str, kind: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{kind}.json")))
    }
}

impl FeatureStore for JsonStore {
    fn save_vocabulary(&mut self, key: &str, vocabulary: &Vocabulary) -> Result<()> {
        let path = self.path(key, "vocabulary")?;
        write_json(&path, vocabulary)
    }

    fn load_vocabulary(&self, key: &str) -> Result<Option<Vocabulary>> {
        let path = self.path(key, "vocabulary")?;
        read_json(&path)
    }

    fn save_matrix(&mut self, key: &str, matrix: &FeatureMatrix) -> Result<()> {
        let path = self.path(key, "matrix")?;
        write_json(&path, matrix)
    }

    fn load_matrix(&self, key: &str) -> Result<Option<FeatureMatrix>> {
        let path = self.path(key, "matrix")?;
        read_json(&path)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec(value)?;
    fs::write(path, json)?;
    debug!("Stored {}", path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
