mod confidence;
mod history;
mod ids;
mod policy;
mod question;
mod session;

pub use confidence::{Confidence, ConfidenceError};
pub use history::{History, HistoryItem, HistoryStats};
pub use ids::QuestionId;
pub use policy::{AdvancePolicy, ParsePolicyError, SessionConfig};
pub use question::{
    BLANK, ChoiceLabel, ParseChoiceLabelError, Question, QuestionDraft, QuestionError,
    choice_content, choice_letter,
};
pub use session::{
    IgnoreReason, Phase, QuizIntent, SessionError, SessionProgress, SessionState, Transition,
};
