//! JSON dictionaries: the bundled list and files on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use verbs_core::model::Verb;

use crate::repository::{StorageError, VerbRecord, VerbRepository, records_into_verbs};

const BUNDLED_DICTIONARY: &str = include_str!("../data/verbs.json");

/// Parse a JSON array of `[base, preterit, participle]` rows.
///
/// # Errors
///
/// Returns `StorageError::Parse` for malformed JSON and
/// `StorageError::InvalidRecord` for blank parts.
pub fn parse_dictionary(json: &str) -> Result<Vec<Verb>, StorageError> {
    let records: Vec<VerbRecord> = serde_json::from_str(json)?;
    records_into_verbs(records)
}

/// The dictionary compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledRepository;

#[async_trait]
impl VerbRepository for BundledRepository {
    async fn load_verbs(&self) -> Result<Vec<Verb>, StorageError> {
        let verbs = parse_dictionary(BUNDLED_DICTIONARY)?;
        tracing::info!(count = verbs.len(), "loaded bundled dictionary");
        Ok(verbs)
    }
}

/// A dictionary read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VerbRepository for JsonFileRepository {
    async fn load_verbs(&self) -> Result<Vec<Verb>, StorageError> {
        tracing::debug!(path = %self.path.display(), "reading dictionary");
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })?;
        let verbs = parse_dictionary(&raw)?;
        tracing::info!(count = verbs.len(), path = %self.path.display(), "loaded dictionary");
        Ok(verbs)
    }
}
