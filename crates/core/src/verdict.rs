//! Final score evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative band for a final score, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Perfect,
    Good,
    Mediocre,
    Bad,
    Poor,
    Disaster,
}

impl Verdict {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect score! Well done indeed.",
            Verdict::Good => "That was pretty good!",
            Verdict::Mediocre => "You can do better than this.",
            Verdict::Bad => "Well, that was pretty bad.",
            Verdict::Poor => "Rather awful.",
            Verdict::Disaster => "Quite the disaster, really.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Map `score` out of `max_score` to a [`Verdict`].
///
/// Band edges are strict: a score sitting exactly on 80% of the maximum is
/// `Mediocre`, not `Good`. Compared in integer tenths so edges are exact.
#[must_use]
pub fn evaluate(score: u32, max_score: u32) -> Verdict {
    if score >= max_score {
        return Verdict::Perfect;
    }

    let scaled = u64::from(score) * 10;
    let max = u64::from(max_score);
    if scaled > max * 8 {
        Verdict::Good
    } else if scaled > max * 6 {
        Verdict::Mediocre
    } else if scaled > max * 4 {
        Verdict::Bad
    } else if scaled > max * 2 {
        Verdict::Poor
    } else {
        Verdict::Disaster
    }
}
