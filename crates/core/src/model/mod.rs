mod attempt;
mod ids;
mod session;
mod settings;
mod verb;

pub use attempt::{Attempt, AttemptOutcome};
pub use ids::{SessionId, VerbId};
pub use session::{SessionSummary, SessionSummaryError};
pub use settings::{QuizSettings, SettingsError};
pub use verb::{FormSet, Verb, VerbError};
