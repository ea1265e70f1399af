use std::collections::VecDeque;

use super::service::{AdvanceOutcome, MissingField, Session, SubmitOutcome};
use super::view::{AnswerView, DisplaySink, FinishedView, QuestionView, ReviewView};
use crate::error::SessionError;

/// Input events, delivered in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Submit { preterit: String, participle: String },
    Advance,
    Review(usize),
}

impl SessionEvent {
    #[must_use]
    pub fn submit(preterit: impl Into<String>, participle: impl Into<String>) -> Self {
        Self::Submit {
            preterit: preterit.into(),
            participle: participle.into(),
        }
    }
}

/// Single consumer of quiz events: applies each to the session and forwards
/// the resulting state to the display.
pub struct QuizController<D> {
    session: Session,
    display: D,
    queue: VecDeque<SessionEvent>,
}

impl<D: DisplaySink> QuizController<D> {
    #[must_use]
    pub fn new(session: Session, display: D) -> Self {
        Self {
            session,
            display,
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.queue.push_back(event);
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Process queued events in order until the queue is empty.
    ///
    /// Returns the number of events processed.
    ///
    /// # Errors
    ///
    /// Stops at the first failing event and returns its error; events queued
    /// after it stay queued.
    pub fn run_pending(&mut self) -> Result<usize, SessionError> {
        let mut processed = 0;
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event)?;
            processed += 1;
        }
        Ok(processed)
    }

    /// Apply one event immediately.
    ///
    /// Returns the blank field when a submission was rejected, so the caller
    /// can keep what was typed and ask only for the rest.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the session; nothing is displayed then.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<Option<MissingField>, SessionError> {
        match event {
            SessionEvent::Start => {
                let verb = self.session.start()?.clone();
                let view = QuestionView::new(&self.session, &verb);
                self.display.show_question(&view);
            }
            SessionEvent::Submit {
                preterit,
                participle,
            } => match self.session.submit(&preterit, &participle)? {
                SubmitOutcome::Graded(attempt) => {
                    let view = AnswerView::new(&self.session, &attempt);
                    self.display.show_answer(&view);
                }
                SubmitOutcome::Incomplete { missing } => {
                    self.display.submission_incomplete(missing);
                    return Ok(Some(missing));
                }
            },
            SessionEvent::Advance => match self.session.advance()? {
                AdvanceOutcome::NextQuestion => {
                    if let Some(verb) = self.session.current_verb() {
                        let view = QuestionView::new(&self.session, verb);
                        self.display.show_question(&view);
                    }
                }
                AdvanceOutcome::Finished(summary) => {
                    let view = FinishedView::new(&self.session, summary);
                    self.display.show_finished(&view);
                }
            },
            SessionEvent::Review(index) => {
                let attempt = self.session.review_attempt(index)?;
                let view = ReviewView::new(index, attempt);
                self.display.show_review(&view);
            }
        }
        Ok(None)
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_parts(self) -> (Session, D) {
        (self.session, self.display)
    }
}
