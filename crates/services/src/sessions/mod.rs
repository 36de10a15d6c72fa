mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::QuizServiceError;
pub use view::{HistoryListItem, history_list};
pub use workflow::QuizLoopService;
