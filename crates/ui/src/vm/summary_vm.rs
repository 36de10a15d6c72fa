use services::HistoryListItem;
use wic_core::model::HistoryStats;

use crate::vm::time_fmt::{format_datetime, format_time};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryRowVm {
    pub label: String,
    pub is_correct: bool,
    pub answered_at_str: String,
}

impl From<&HistoryListItem> for SummaryRowVm {
    fn from(item: &HistoryListItem) -> Self {
        Self {
            label: item.label(),
            is_correct: item.is_correct,
            answered_at_str: format_time(item.answered_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub started_at_str: String,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy_str: String,
    pub mean_confidence_str: String,
    pub overconfident: usize,
    pub underconfident: usize,
    pub rows: Vec<SummaryRowVm>,
}

#[must_use]
pub fn map_summary(
    started_at: chrono::DateTime<chrono::Utc>,
    stats: HistoryStats,
    items: &[HistoryListItem],
) -> SummaryVm {
    SummaryVm {
        started_at_str: format_datetime(started_at),
        answered: stats.answered,
        correct: stats.correct,
        incorrect: stats.incorrect,
        accuracy_str: format!("{}%", stats.accuracy_percent),
        mean_confidence_str: stats
            .mean_confidence
            .map_or_else(|| "n/a".to_string(), |mean| format!("{mean:.1}/5")),
        overconfident: stats.overconfident,
        underconfident: stats.underconfident,
        rows: items.iter().map(SummaryRowVm::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wic_core::model::{Confidence, QuestionId};
    use wic_core::time::fixed_now;

    fn item(ordinal: usize, is_correct: bool, confidence: i64) -> HistoryListItem {
        HistoryListItem {
            ordinal,
            question_id: QuestionId::new(ordinal as u64),
            letter: 'B',
            is_correct,
            confidence: Confidence::clamped(confidence),
            answered_at: fixed_now(),
        }
    }

    #[test]
    fn empty_history_has_no_mean() {
        let vm = map_summary(fixed_now(), HistoryStats::default(), &[]);
        assert_eq!(vm.answered, 0);
        assert_eq!(vm.accuracy_str, "0%");
        assert_eq!(vm.mean_confidence_str, "n/a");
        assert!(vm.rows.is_empty());
    }

    #[test]
    fn rows_carry_labels_and_times() {
        let items = vec![item(1, true, 4), item(2, false, 5)];
        let stats = HistoryStats {
            answered: 2,
            correct: 1,
            incorrect: 1,
            accuracy_percent: 50,
            mean_confidence: Some(4.5),
            overconfident: 1,
            underconfident: 0,
        };
        let vm = map_summary(fixed_now(), stats, &items);
        assert_eq!(vm.accuracy_str, "50%");
        assert_eq!(vm.mean_confidence_str, "4.5/5");
        assert_eq!(vm.rows[1].label, "2. Q2 — You chose B; incorrect; confidence 5/5");
        assert_eq!(vm.rows[0].answered_at_str, "22:13:20");
    }
}
