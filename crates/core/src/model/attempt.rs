use serde::{Deserialize, Serialize};

use crate::model::verb::Verb;

/// Three-level classification of a graded question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Both forms right.
    Correct,
    /// Exactly one form right.
    HalfCorrect,
    /// Neither form right.
    Incorrect,
}

impl AttemptOutcome {
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            2.. => Self::Correct,
            1 => Self::HalfCorrect,
            0 => Self::Incorrect,
        }
    }
}

/// Graded outcome of presenting one verb once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    verb: Verb,
    preterit_correct: bool,
    participle_correct: bool,
}

impl Attempt {
    #[must_use]
    pub fn new(verb: Verb, preterit_correct: bool, participle_correct: bool) -> Self {
        Self {
            verb,
            preterit_correct,
            participle_correct,
        }
    }

    #[must_use]
    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    #[must_use]
    pub fn preterit_correct(&self) -> bool {
        self.preterit_correct
    }

    #[must_use]
    pub fn participle_correct(&self) -> bool {
        self.participle_correct
    }

    /// Number of correct fields: 0, 1 or 2.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::from(self.preterit_correct) + u32::from(self.participle_correct)
    }

    #[must_use]
    pub fn outcome(&self) -> AttemptOutcome {
        AttemptOutcome::from_score(self.score())
    }
}
