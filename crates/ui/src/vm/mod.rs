mod quiz_vm;
mod summary_vm;
mod time_fmt;

pub use quiz_vm::{ChoiceRowVm, EliminationRowVm, QuizVm, VerificationVm, start_quiz};
pub use summary_vm::{SummaryRowVm, SummaryVm, map_summary};
