use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Attempt, AttemptOutcome, SessionId};
use crate::verdict::{Verdict, evaluate};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many attempts for a single session: {len}")]
    TooManyAttempts { len: usize },
}

/// Aggregate result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    session_id: SessionId,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    score: u32,
    max_score: u32,
    verdict: Verdict,
    correct: u32,
    half_correct: u32,
    incorrect: u32,
}

impl SessionSummary {
    /// Build a summary from the attempts of a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `SessionSummaryError::TooManyAttempts` if the attempt count cannot fit in `u32`.
    pub fn from_attempts(
        session_id: SessionId,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        max_score: u32,
        attempts: &[Attempt],
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        u32::try_from(attempts.len()).map_err(|_| SessionSummaryError::TooManyAttempts {
            len: attempts.len(),
        })?;

        let mut score = 0_u32;
        let mut correct = 0_u32;
        let mut half_correct = 0_u32;
        let mut incorrect = 0_u32;

        for attempt in attempts {
            score = score.saturating_add(attempt.score());
            match attempt.outcome() {
                AttemptOutcome::Correct => correct += 1,
                AttemptOutcome::HalfCorrect => half_correct += 1,
                AttemptOutcome::Incorrect => incorrect += 1,
            }
        }

        Ok(Self {
            session_id,
            started_at,
            completed_at,
            score,
            max_score,
            verdict: evaluate(score, max_score),
            correct,
            half_correct,
            incorrect,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn half_correct(&self) -> u32 {
        self.half_correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.correct + self.half_correct + self.incorrect
    }

    /// Closing line shown when a session finishes.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Your score is {} out of a possible {}. {}",
            self.score,
            self.max_score,
            self.verdict.message()
        )
    }
}
