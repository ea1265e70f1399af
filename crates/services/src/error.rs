//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use verbs_core::model::{SessionSummaryError, SettingsError};
use verbs_core::{HistoryError, PoolError};

use crate::sessions::SessionState;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("dictionary has {available} verbs but a session needs {required}")]
    DictionaryTooSmall { available: usize, required: usize },
    #[error("`{event}` is not valid while {state}")]
    UnexpectedEvent {
        event: &'static str,
        state: SessionState,
    },
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Configuration-class failures abort session startup and are never retried.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SessionError::DictionaryTooSmall { .. }
                | SessionError::Pool(_)
                | SessionError::Settings(_)
                | SessionError::Storage(_)
        )
    }
}
