//! Random draw without repetition.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::model::Verb;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PoolError {
    #[error("verb dictionary is empty")]
    EmptyDictionary,
    #[error("no verbs left to draw")]
    PoolExhausted,
}

/// Remaining verbs for one session. A drawn verb is removed, so it cannot
/// come up twice.
pub struct VerbPool {
    remaining: Vec<Verb>,
    rng: StdRng,
}

impl VerbPool {
    /// Pool seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Pool with a reproducible draw order.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            remaining: Vec::new(),
            rng,
        }
    }

    /// Replace the pool contents.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::EmptyDictionary` if `verbs` is empty. The pool is
    /// left untouched in that case.
    pub fn initialize(&mut self, verbs: impl IntoIterator<Item = Verb>) -> Result<(), PoolError> {
        let verbs: Vec<Verb> = verbs.into_iter().collect();
        if verbs.is_empty() {
            return Err(PoolError::EmptyDictionary);
        }
        self.remaining = verbs;
        Ok(())
    }

    /// Remove and return a uniformly random remaining verb.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::PoolExhausted` if nothing is left.
    pub fn draw_random(&mut self) -> Result<Verb, PoolError> {
        if self.remaining.is_empty() {
            return Err(PoolError::PoolExhausted);
        }
        let index = self.rng.random_range(0..self.remaining.len());
        let verb = self.remaining.swap_remove(index);
        tracing::trace!(verb = verb.base(), left = self.remaining.len(), "drew verb");
        Ok(verb)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl Default for VerbPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VerbPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerbPool")
            .field("remaining", &self.remaining.len())
            .finish_non_exhaustive()
    }
}
