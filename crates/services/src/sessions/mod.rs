mod controller;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{QuizController, SessionEvent};
pub use service::{AdvanceOutcome, MissingField, Session, SessionState, SubmitOutcome};
pub use view::{AnswerView, DisplaySink, FinishedView, QuestionView, ReviewView};
pub use workflow::QuizLoopService;
