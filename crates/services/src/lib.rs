#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use wic_core::Clock;

pub use error::QuizServiceError;
pub use sessions::{HistoryListItem, QuizLoopService, history_list};
