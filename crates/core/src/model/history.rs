use chrono::{DateTime, Utc};

use crate::model::confidence::Confidence;
use crate::model::ids::QuestionId;
use crate::model::question::ChoiceLabel;

/// Result record for one submitted question.
///
/// Correctness is computed once at submission and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub question_id: QuestionId,
    pub selected: ChoiceLabel,
    pub selected_choice: String,
    pub is_correct: bool,
    pub confidence: Confidence,
    pub answered_at: DateTime<Utc>,
}

/// Append-only, session-scoped list of results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    items: Vec<HistoryItem>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, item: HistoryItem) {
        self.items.push(item);
    }

    #[must_use]
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&HistoryItem> {
        self.items.last()
    }

    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        HistoryStats::from_items(&self.items)
    }
}

/// Aggregates over the session history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistoryStats {
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy_percent: u8,
    pub mean_confidence: Option<f32>,
    /// Incorrect answers given with confidence 4 or 5.
    pub overconfident: usize,
    /// Correct answers given with confidence 1 or 2.
    pub underconfident: usize,
}

impl HistoryStats {
    #[must_use]
    pub fn from_items(items: &[HistoryItem]) -> Self {
        let answered = items.len();
        if answered == 0 {
            return Self::default();
        }

        let correct = items.iter().filter(|item| item.is_correct).count();
        let overconfident = items
            .iter()
            .filter(|item| !item.is_correct && item.confidence.value() >= 4)
            .count();
        let underconfident = items
            .iter()
            .filter(|item| item.is_correct && item.confidence.value() <= 2)
            .count();
        let confidence_sum: u32 = items
            .iter()
            .map(|item| u32::from(item.confidence.value()))
            .sum();

        #[allow(clippy::cast_precision_loss)]
        let mean_confidence = Some(confidence_sum as f32 / answered as f32);
        let accuracy_percent = u8::try_from(correct * 100 / answered).unwrap_or(100);

        Self {
            answered,
            correct,
            incorrect: answered - correct,
            accuracy_percent,
            mean_confidence,
            overconfident,
            underconfident,
        }
    }
}
