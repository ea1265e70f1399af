use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question limit must be > 0")]
    InvalidQuestionLimit,
}

/// Configuration for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    question_limit: u32,
}

impl QuizSettings {
    pub const DEFAULT_QUESTION_LIMIT: u32 = 10;

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidQuestionLimit` if `question_limit` is zero.
    pub fn new(question_limit: u32) -> Result<Self, SettingsError> {
        if question_limit == 0 {
            return Err(SettingsError::InvalidQuestionLimit);
        }
        Ok(Self { question_limit })
    }

    #[must_use]
    pub fn question_limit(&self) -> u32 {
        self.question_limit
    }

    /// Two points per question.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.question_limit.saturating_mul(2)
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_limit: Self::DEFAULT_QUESTION_LIMIT,
        }
    }
}
