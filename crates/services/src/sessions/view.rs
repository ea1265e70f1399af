use verbs_core::model::{Attempt, AttemptOutcome, SessionSummary, Verb};

use super::service::{MissingField, Session};

/// What to show when a new question comes up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question_number: u32,
    pub question_limit: u32,
    pub base: String,
    pub score: u32,
    /// One slot per question, `None` while unanswered.
    pub progress: Vec<Option<AttemptOutcome>>,
}

impl QuestionView {
    #[must_use]
    pub fn new(session: &Session, verb: &Verb) -> Self {
        Self {
            question_number: session.question_index(),
            question_limit: session.question_limit(),
            base: verb.base().to_string(),
            score: session.score(),
            progress: session.progress(),
        }
    }
}

/// What to show once a question has been graded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerView {
    pub question_number: u32,
    pub base: String,
    pub preterit_correct: bool,
    pub participle_correct: bool,
    pub preterit_forms: String,
    pub participle_forms: String,
    pub outcome: AttemptOutcome,
    pub score: u32,
    pub max_score: u32,
    pub progress: Vec<Option<AttemptOutcome>>,
}

impl AnswerView {
    #[must_use]
    pub fn new(session: &Session, attempt: &Attempt) -> Self {
        let verb = attempt.verb();
        Self {
            question_number: session.question_index(),
            base: verb.base().to_string(),
            preterit_correct: attempt.preterit_correct(),
            participle_correct: attempt.participle_correct(),
            preterit_forms: verb.preterit().to_string(),
            participle_forms: verb.participle().to_string(),
            outcome: attempt.outcome(),
            score: session.score(),
            max_score: session.max_score(),
            progress: session.progress(),
        }
    }
}

/// End-of-session screen: the summary plus every question's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedView {
    pub summary: SessionSummary,
    pub progress: Vec<Option<AttemptOutcome>>,
}

impl FinishedView {
    #[must_use]
    pub fn new(session: &Session, summary: SessionSummary) -> Self {
        Self {
            summary,
            progress: session.progress(),
        }
    }
}

/// A past question re-surfaced for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewView {
    pub index: usize,
    pub answer_line: String,
    pub outcome: AttemptOutcome,
}

impl ReviewView {
    #[must_use]
    pub fn new(index: usize, attempt: &Attempt) -> Self {
        Self {
            index,
            answer_line: attempt.verb().answer_line(),
            outcome: attempt.outcome(),
        }
    }

    /// Only a fully correct answer counts as "got it right".
    #[must_use]
    pub fn is_user_correct(&self) -> bool {
        self.outcome == AttemptOutcome::Correct
    }

    #[must_use]
    pub fn message(&self) -> String {
        if self.is_user_correct() {
            format!("{}: you got that right!", self.answer_line)
        } else {
            format!("Remember, it's {}", self.answer_line)
        }
    }
}

/// Rendering side of the quiz. Each method corresponds to entering a state.
pub trait DisplaySink {
    fn show_question(&mut self, view: &QuestionView);

    fn show_answer(&mut self, view: &AnswerView);

    fn show_finished(&mut self, view: &FinishedView);

    fn show_review(&mut self, view: &ReviewView);

    /// A submission was rejected; re-focus `missing`.
    fn submission_incomplete(&mut self, _missing: MissingField) {}
}
