#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use verbs_core::Clock;

pub use error::SessionError;
pub use sessions::{
    AdvanceOutcome, AnswerView, DisplaySink, FinishedView, MissingField, QuestionView,
    QuizController, QuizLoopService, ReviewView, Session, SessionEvent, SessionState,
    SubmitOutcome,
};
