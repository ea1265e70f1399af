#![forbid(unsafe_code)]

pub mod grading;
pub mod history;
pub mod model;
pub mod pool;
pub mod time;
pub mod verdict;

pub use grading::{AnswerGrader, normalize};
pub use history::{HistoryError, RunHistory};
pub use pool::{PoolError, VerbPool};
pub use time::Clock;
pub use verdict::{Verdict, evaluate};
