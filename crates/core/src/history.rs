//! Append-only log of graded questions.

use thiserror::Error;

use crate::model::Attempt;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryError {
    #[error("no attempt recorded at index {index} (recorded: {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered attempts for the current session, indexed from zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunHistory {
    attempts: Vec<Attempt>,
}

impl RunHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, attempt: Attempt) {
        self.attempts.push(attempt);
    }

    /// # Errors
    ///
    /// Returns `HistoryError::IndexOutOfRange` if `index` has not been recorded yet.
    pub fn record_lookup(&self, index: usize) -> Result<&Attempt, HistoryError> {
        self.attempts.get(index).ok_or(HistoryError::IndexOutOfRange {
            index,
            len: self.attempts.len(),
        })
    }

    #[must_use]
    pub fn last(&self) -> Option<&Attempt> {
        self.attempts.last()
    }

    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Sum of derived scores.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.attempts.iter().map(Attempt::score).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
