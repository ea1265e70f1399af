use std::sync::Arc;

use storage::VerbRepository;
use verbs_core::model::QuizSettings;
use verbs_core::{Clock, VerbPool};

use super::service::Session;
use crate::error::SessionError;

/// Loads the dictionary and builds sessions ready to `start`.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    verbs: Arc<dyn VerbRepository>,
    settings: QuizSettings,
    seed: Option<u64>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, verbs: Arc<dyn VerbRepository>) -> Self {
        Self {
            clock,
            verbs,
            settings: QuizSettings::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Fix the verb draw order.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Load the dictionary once and build a session awaiting `start`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if loading fails, and the
    /// configuration errors of [`Session::new`] for an unusable dictionary.
    pub async fn load_session(&self) -> Result<Session, SessionError> {
        let verbs = self.verbs.load_verbs().await?;
        tracing::debug!(verbs = verbs.len(), "dictionary ready");

        let pool = match self.seed {
            Some(seed) => VerbPool::with_seed(seed),
            None => VerbPool::new(),
        };
        Session::new(verbs, self.settings, self.clock, pool)
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("clock", &self.clock)
            .field("settings", &self.settings)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
