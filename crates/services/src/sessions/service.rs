use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use verbs_core::model::{
    Attempt, AttemptOutcome, QuizSettings, SessionId, SessionSummary, Verb,
};
use verbs_core::{AnswerGrader, Clock, RunHistory, VerbPool};

use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a session is in the question lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    AwaitingStart,
    Answering,
    AnswerShown,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::AwaitingStart => "awaiting start",
            SessionState::Answering => "answering",
            SessionState::AnswerShown => "showing the answer",
            SessionState::Finished => "finished",
        };
        f.write_str(label)
    }
}

/// Which answer field was left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Preterit,
    Participle,
    Both,
}

/// Result of a `submit` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Both fields present; the question was graded.
    Graded(Attempt),
    /// Nothing changed. The caller should re-prompt for `missing`.
    Incomplete { missing: MissingField },
}

/// Result of an `advance` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion,
    Finished(SessionSummary),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz run over a fixed number of questions.
///
/// The dictionary is kept so `start` can rebuild a fresh pool after a
/// session finishes. Score always equals the sum of recorded attempt scores.
pub struct Session {
    id: SessionId,
    settings: QuizSettings,
    dictionary: Arc<[Verb]>,
    pool: VerbPool,
    history: RunHistory,
    grader: AnswerGrader,
    clock: Clock,
    current: Option<Verb>,
    score: u32,
    question_index: u32,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
    summary: Option<SessionSummary>,
}

impl Session {
    /// Build a session awaiting `start`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Pool(PoolError::EmptyDictionary)` for an empty
    /// dictionary and `SessionError::DictionaryTooSmall` when it holds fewer
    /// verbs than the question limit.
    pub fn new(
        dictionary: Vec<Verb>,
        settings: QuizSettings,
        clock: Clock,
        pool: VerbPool,
    ) -> Result<Self, SessionError> {
        if dictionary.is_empty() {
            return Err(verbs_core::PoolError::EmptyDictionary.into());
        }
        let required = usize::try_from(settings.question_limit()).unwrap_or(usize::MAX);
        if dictionary.len() < required {
            return Err(SessionError::DictionaryTooSmall {
                available: dictionary.len(),
                required,
            });
        }

        Ok(Self {
            id: SessionId::new_random(),
            settings,
            dictionary: dictionary.into(),
            pool,
            history: RunHistory::new(),
            grader: AnswerGrader::new(),
            clock,
            current: None,
            score: 0,
            question_index: 0,
            state: SessionState::AwaitingStart,
            started_at: None,
            summary: None,
        })
    }

    /// Begin a session, discarding any previous run, and draw the first verb.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnexpectedEvent` unless awaiting start or finished.
    pub fn start(&mut self) -> Result<&Verb, SessionError> {
        if !matches!(
            self.state,
            SessionState::AwaitingStart | SessionState::Finished
        ) {
            return Err(self.unexpected("start"));
        }

        self.pool.initialize(self.dictionary.iter().cloned())?;
        self.id = SessionId::new_random();
        self.history = RunHistory::new();
        self.score = 0;
        self.question_index = 0;
        self.summary = None;
        self.started_at = Some(self.clock.now());
        tracing::info!(
            session = %self.id,
            questions = self.settings.question_limit(),
            "session started"
        );

        self.enter_answering()
    }

    /// Grade the current question if both answers are present.
    ///
    /// Only an empty field counts as missing; the session is left untouched
    /// and `SubmitOutcome::Incomplete` says which field. Whitespace is an
    /// answer and is graded like any other.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnexpectedEvent` outside the answering state.
    pub fn submit(&mut self, preterit: &str, participle: &str) -> Result<SubmitOutcome, SessionError> {
        if self.state != SessionState::Answering {
            return Err(self.unexpected("submit"));
        }

        let missing = match (preterit.is_empty(), participle.is_empty()) {
            (true, true) => Some(MissingField::Both),
            (true, false) => Some(MissingField::Preterit),
            (false, true) => Some(MissingField::Participle),
            (false, false) => None,
        };
        if let Some(missing) = missing {
            tracing::debug!(session = %self.id, ?missing, "submission incomplete");
            return Ok(SubmitOutcome::Incomplete { missing });
        }

        let Some(verb) = self.current.as_ref() else {
            return Err(self.unexpected("submit"));
        };
        let attempt = self.grader.grade(verb, preterit, participle);
        self.score += attempt.score();
        self.history.append(attempt.clone());
        self.state = SessionState::AnswerShown;
        tracing::debug!(
            session = %self.id,
            question = self.question_index,
            verb = attempt.verb().base(),
            points = attempt.score(),
            score = self.score,
            "graded"
        );

        Ok(SubmitOutcome::Graded(attempt))
    }

    /// Move on from a shown answer: next question or end of session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnexpectedEvent` unless an answer is shown.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        if self.state != SessionState::AnswerShown {
            return Err(self.unexpected("advance"));
        }

        if self.question_index < self.settings.question_limit() {
            self.enter_answering()?;
            return Ok(AdvanceOutcome::NextQuestion);
        }

        let completed_at = self.clock.now();
        let started_at = self.started_at.unwrap_or(completed_at);
        let summary = SessionSummary::from_attempts(
            self.id,
            started_at,
            completed_at,
            self.settings.max_score(),
            self.history.attempts(),
        )?;
        self.current = None;
        self.state = SessionState::Finished;
        tracing::info!(
            session = %self.id,
            score = summary.score(),
            max = summary.max_score(),
            verdict = ?summary.verdict(),
            "session finished"
        );
        self.summary = Some(summary.clone());

        Ok(AdvanceOutcome::Finished(summary))
    }

    /// Look up an answered question without changing anything.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::History` if `index` has not been answered yet.
    pub fn review_attempt(&self, index: usize) -> Result<&Attempt, SessionError> {
        Ok(self.history.record_lookup(index)?)
    }

    fn enter_answering(&mut self) -> Result<&Verb, SessionError> {
        let verb = self.pool.draw_random()?;
        self.question_index += 1;
        self.state = SessionState::Answering;
        tracing::debug!(
            session = %self.id,
            question = self.question_index,
            verb_id = %verb.id(),
            verb = verb.base(),
            "question drawn"
        );
        Ok(&*self.current.insert(verb))
    }

    fn unexpected(&self, event: &'static str) -> SessionError {
        tracing::debug!(session = %self.id, event, state = %self.state, "event rejected");
        SessionError::UnexpectedEvent {
            event,
            state: self.state,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.settings.max_score()
    }

    /// 1-based number of the question on screen, 0 before the first draw.
    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn question_limit(&self) -> u32 {
        self.settings.question_limit()
    }

    /// Verb being asked, while answering or showing its answer.
    #[must_use]
    pub fn current_verb(&self) -> Option<&Verb> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        self.history.attempts()
    }

    #[must_use]
    pub fn remaining_verbs(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Available once the session has finished.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// One slot per question: the outcome if answered, `None` if pending.
    #[must_use]
    pub fn progress(&self) -> Vec<Option<AttemptOutcome>> {
        let limit = usize::try_from(self.settings.question_limit()).unwrap_or(usize::MAX);
        let mut slots: Vec<Option<AttemptOutcome>> =
            self.attempts().iter().map(|a| Some(a.outcome())).collect();
        slots.resize(limit, None);
        slots
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("question_index", &self.question_index)
            .field("question_limit", &self.settings.question_limit())
            .field("score", &self.score)
            .field("attempts_len", &self.history.len())
            .field("pool_len", &self.pool.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use verbs_core::model::VerbId;
    use verbs_core::time::{fixed_clock, fixed_now};
    use verbs_core::{HistoryError, PoolError, Verdict};

    fn dictionary(n: u64) -> Vec<Verb> {
        (0..n)
            .map(|i| {
                Verb::parse(VerbId::new(i), &format!("base{i}"), &format!("pret{i}"), &format!("part{i}"))
                    .unwrap()
            })
            .collect()
    }

    fn session(n: u64, limit: u32) -> Session {
        Session::new(
            dictionary(n),
            QuizSettings::new(limit).unwrap(),
            fixed_clock(),
            VerbPool::with_seed(11),
        )
        .unwrap()
    }

    fn answers(session: &Session) -> (String, String) {
        let verb = session.current_verb().unwrap();
        (
            verb.preterit().iter().next().unwrap().to_string(),
            verb.participle().iter().next().unwrap().to_string(),
        )
    }

    fn assert_score_matches_history(session: &Session) {
        let sum: u32 = session.attempts().iter().map(Attempt::score).sum();
        assert_eq!(session.score(), sum);
    }

    #[test]
    fn empty_dictionary_is_rejected() {
        let err = Session::new(Vec::new(), QuizSettings::default(), fixed_clock(), VerbPool::with_seed(1))
            .unwrap_err();
        assert!(matches!(err, SessionError::Pool(PoolError::EmptyDictionary)));
        assert!(err.is_configuration());
    }

    #[test]
    fn dictionary_smaller_than_limit_is_rejected() {
        let err = Session::new(dictionary(9), QuizSettings::default(), fixed_clock(), VerbPool::with_seed(1))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::DictionaryTooSmall {
                available: 9,
                required: 10
            }
        ));
    }

    #[test]
    fn start_draws_first_question() {
        let mut s = session(12, 10);
        assert_eq!(s.state(), SessionState::AwaitingStart);
        assert_eq!(s.question_index(), 0);

        s.start().unwrap();
        assert_eq!(s.state(), SessionState::Answering);
        assert_eq!(s.question_index(), 1);
        assert!(s.current_verb().is_some());
        assert_eq!(s.remaining_verbs(), 11);
        assert_eq!(s.started_at(), Some(fixed_now()));
        assert!(s.attempts().is_empty());
    }

    #[test]
    fn incomplete_submission_changes_nothing() {
        let mut s = session(10, 10);
        s.start().unwrap();

        for (p, pp, missing) in [
            ("", "gone", MissingField::Preterit),
            ("went", "", MissingField::Participle),
            ("", "", MissingField::Both),
        ] {
            let outcome = s.submit(p, pp).unwrap();
            assert_eq!(outcome, SubmitOutcome::Incomplete { missing });
            assert_eq!(s.state(), SessionState::Answering);
            assert_eq!(s.question_index(), 1);
            assert_eq!(s.score(), 0);
            assert!(s.attempts().is_empty());
        }
    }

    #[test]
    fn whitespace_answer_is_graded_not_rejected() {
        let mut s = session(10, 10);
        s.start().unwrap();
        let (_, pp) = answers(&s);

        let SubmitOutcome::Graded(attempt) = s.submit("   ", &pp).unwrap() else {
            panic!("whitespace is a present answer");
        };
        assert!(!attempt.preterit_correct());
        assert!(attempt.participle_correct());
        assert_eq!(s.state(), SessionState::AnswerShown);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn submit_grades_once_and_locks_answers() {
        let mut s = session(10, 10);
        s.start().unwrap();
        let (p, pp) = answers(&s);

        let SubmitOutcome::Graded(attempt) = s.submit(&p, &pp).unwrap() else {
            panic!("expected a graded attempt");
        };
        assert_eq!(attempt.score(), 2);
        assert_eq!(s.state(), SessionState::AnswerShown);
        assert_eq!(s.score(), 2);
        assert_eq!(s.attempts().len(), 1);

        let err = s.submit(&p, &pp).unwrap_err();
        assert!(matches!(
            err,
            SessionError::UnexpectedEvent {
                event: "submit",
                state: SessionState::AnswerShown
            }
        ));
        assert_eq!(s.score(), 2);
        assert_eq!(s.attempts().len(), 1);
    }

    #[test]
    fn events_out_of_order_are_rejected() {
        let mut s = session(10, 10);
        assert!(matches!(s.submit("a", "b"), Err(SessionError::UnexpectedEvent { .. })));
        assert!(matches!(s.advance(), Err(SessionError::UnexpectedEvent { .. })));

        s.start().unwrap();
        assert!(matches!(s.start(), Err(SessionError::UnexpectedEvent { event: "start", .. })));
        assert!(matches!(s.advance(), Err(SessionError::UnexpectedEvent { event: "advance", .. })));
        assert_eq!(s.question_index(), 1);
    }

    #[test]
    fn full_session_runs_to_limit_without_repeats() {
        let mut s = session(10, 10);
        s.start().unwrap();

        let mut finished = None;
        for question in 1..=10 {
            assert_eq!(s.question_index(), question);
            assert_eq!(s.attempts().len() as u32, question - 1);
            // alternate right and wrong answers
            let outcome = if question % 2 == 0 {
                let (p, pp) = answers(&s);
                s.submit(&p, &pp).unwrap()
            } else {
                s.submit("nope", "nope").unwrap()
            };
            assert!(matches!(outcome, SubmitOutcome::Graded(_)));
            assert_eq!(s.attempts().len() as u32, question);
            assert_score_matches_history(&s);

            match s.advance().unwrap() {
                AdvanceOutcome::NextQuestion => assert!(question < 10),
                AdvanceOutcome::Finished(summary) => {
                    assert_eq!(question, 10);
                    finished = Some(summary);
                }
            }
            assert_score_matches_history(&s);
        }

        let summary = finished.unwrap();
        assert_eq!(s.state(), SessionState::Finished);
        assert_eq!(s.attempts().len(), 10);
        assert_eq!(s.remaining_verbs(), 0);
        assert_eq!(summary.score(), 10);
        assert_eq!(summary.verdict(), Verdict::Bad);
        assert_eq!(s.summary(), Some(&summary));
        assert!(s.current_verb().is_none());

        let ids: HashSet<_> = s.attempts().iter().map(|a| a.verb().id()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn zero_score_does_not_end_early() {
        let mut s = session(3, 3);
        s.start().unwrap();
        for _ in 0..2 {
            s.submit("x", "y").unwrap();
            assert_eq!(s.advance().unwrap(), AdvanceOutcome::NextQuestion);
        }
        s.submit("x", "y").unwrap();
        let AdvanceOutcome::Finished(summary) = s.advance().unwrap() else {
            panic!("expected the session to finish");
        };
        assert_eq!(summary.score(), 0);
        assert_eq!(summary.verdict(), Verdict::Disaster);
    }

    #[test]
    fn review_reads_any_answered_question() {
        let mut s = session(5, 5);
        s.start().unwrap();
        let first = s.current_verb().unwrap().id();
        let (p, pp) = answers(&s);
        s.submit(&p, &pp).unwrap();
        s.advance().unwrap();
        s.submit("wrong", "wrong").unwrap();

        assert_eq!(s.review_attempt(0).unwrap().verb().id(), first);
        assert_eq!(s.review_attempt(1).unwrap().score(), 0);
        let err = s.review_attempt(2).unwrap_err();
        assert!(matches!(
            err,
            SessionError::History(HistoryError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(s.state(), SessionState::AnswerShown);
    }

    #[test]
    fn restart_after_finish_resets_everything() {
        let mut s = session(2, 2);
        s.start().unwrap();
        let first_id = s.id();
        for _ in 0..2 {
            let (p, pp) = answers(&s);
            s.submit(&p, &pp).unwrap();
            s.advance().unwrap();
        }
        assert_eq!(s.state(), SessionState::Finished);
        assert_eq!(s.score(), 4);

        s.start().unwrap();
        assert_ne!(s.id(), first_id);
        assert_eq!(s.state(), SessionState::Answering);
        assert_eq!(s.score(), 0);
        assert_eq!(s.question_index(), 1);
        assert!(s.attempts().is_empty());
        assert!(s.summary().is_none());
        assert_eq!(s.remaining_verbs(), 1);
    }

    #[test]
    fn progress_has_one_slot_per_question() {
        let mut s = session(4, 4);
        s.start().unwrap();
        let (p, _) = answers(&s);
        s.submit(&p, "wrong").unwrap();

        let progress = s.progress();
        assert_eq!(progress.len(), 4);
        assert_eq!(progress[0], Some(AttemptOutcome::HalfCorrect));
        assert!(progress[1..].iter().all(Option::is_none));
    }
}
