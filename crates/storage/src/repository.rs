use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use verbs_core::model::{Verb, VerbError, VerbId};

/// Errors surfaced by dictionary sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dictionary: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid dictionary row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: VerbError,
    },

    #[error("connection error: {0}")]
    Connection(String),
}

/// Source shape of one dictionary row: `["be", "was/were", "been"]`.
///
/// Alternatives are `/`-separated; they become accepted-form sets on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbRecord(pub String, pub String, pub String);

impl VerbRecord {
    #[must_use]
    pub fn new(base: impl Into<String>, preterit: impl Into<String>, participle: impl Into<String>) -> Self {
        Self(base.into(), preterit.into(), participle.into())
    }

    /// Convert the record into a domain `Verb`.
    ///
    /// # Errors
    ///
    /// Returns `VerbError` if any part is blank.
    pub fn into_verb(self, id: VerbId) -> Result<Verb, VerbError> {
        Verb::parse(id, &self.0, &self.1, &self.2)
    }
}

/// Turn rows into verbs, numbering them by position.
///
/// # Errors
///
/// Returns `StorageError::InvalidRecord` naming the first bad row.
pub fn records_into_verbs(
    records: impl IntoIterator<Item = VerbRecord>,
) -> Result<Vec<Verb>, StorageError> {
    records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            record
                .into_verb(VerbId::new(u64::try_from(row).unwrap_or(u64::MAX)))
                .map_err(|source| StorageError::InvalidRecord { row, source })
        })
        .collect()
}

/// Dictionary source contract. Loading is the only async boundary of a quiz.
#[async_trait]
pub trait VerbRepository: Send + Sync {
    /// Load the full dictionary.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or holds a bad row.
    async fn load_verbs(&self) -> Result<Vec<Verb>, StorageError>;
}

/// Simple in-memory dictionary for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    verbs: Arc<[Verb]>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if any row is malformed.
    pub fn from_records(records: impl IntoIterator<Item = VerbRecord>) -> Result<Self, StorageError> {
        let verbs = records_into_verbs(records)?;
        Ok(Self {
            verbs: verbs.into(),
        })
    }
}

#[async_trait]
impl VerbRepository for InMemoryRepository {
    async fn load_verbs(&self) -> Result<Vec<Verb>, StorageError> {
        Ok(self.verbs.to_vec())
    }
}
