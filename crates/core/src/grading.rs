//! Answer normalization and grading.

use crate::model::{Attempt, Verb};

/// Trim surrounding whitespace and lower-case. Nothing else is folded.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Grades a pair of free-text answers against a verb's accepted forms.
///
/// Grading is pure: the same inputs always produce the same [`Attempt`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerGrader;

impl AnswerGrader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Each field is checked against its own accepted set, so a verb like
    /// `put/put/put` can score both fields with identical strings.
    #[must_use]
    pub fn grade(&self, verb: &Verb, raw_preterit: &str, raw_participle: &str) -> Attempt {
        let preterit_correct = verb.preterit().contains(&normalize(raw_preterit));
        let participle_correct = verb.participle().contains(&normalize(raw_participle));
        Attempt::new(verb.clone(), preterit_correct, participle_correct)
    }
}
