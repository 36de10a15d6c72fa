use chrono::{DateTime, Utc};

use wic_core::model::{Confidence, History, QuestionId, choice_letter};

/// One row of the session summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryListItem {
    /// 1-based position in the history.
    pub ordinal: usize,
    pub question_id: QuestionId,
    pub letter: char,
    pub is_correct: bool,
    pub confidence: Confidence,
    pub answered_at: DateTime<Utc>,
}

impl HistoryListItem {
    /// Summary line, e.g. `1. Q1 — You chose A; correct; confidence 4/5`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{}. Q{} — You chose {}; {}; confidence {}",
            self.ordinal,
            self.question_id,
            self.letter,
            if self.is_correct { "correct" } else { "incorrect" },
            self.confidence,
        )
    }
}

#[must_use]
pub fn history_list(history: &History) -> Vec<HistoryListItem> {
    history
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| HistoryListItem {
            ordinal: i + 1,
            question_id: item.question_id,
            letter: choice_letter(&item.selected_choice).unwrap_or_else(|| item.selected.letter()),
            is_correct: item.is_correct,
            confidence: item.confidence,
            answered_at: item.answered_at,
        })
        .collect()
}
