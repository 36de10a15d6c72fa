use services::{HistoryListItem, QuizLoopService, history_list};
use wic_core::model::{
    ChoiceLabel, Confidence, HistoryStats, Phase, QuizIntent, SessionState, Transition,
};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceRowVm {
    pub label: ChoiceLabel,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EliminationRowVm {
    pub text: String,
    /// The learner picked this distractor.
    pub chosen: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationVm {
    pub correct_answer: String,
    pub explanation: String,
    pub substitution: String,
}

/// View-model over the live quiz session.
///
/// Owns the `SessionState`; every change goes through [`QuizVm::dispatch`].
#[derive(Clone, Debug)]
pub struct QuizVm {
    session: SessionState,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn dispatch(&mut self, quiz_loop: &QuizLoopService, intent: QuizIntent) -> Transition {
        quiz_loop.dispatch(&mut self.session, intent)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.session.is_locked()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.can_submit()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.session.progress();
        format!("Question {} of {}", progress.position, progress.total)
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.session.progress().percent
    }

    #[must_use]
    pub fn passage(&self) -> &str {
        self.session.current_question().passage()
    }

    #[must_use]
    pub fn blank_sentence(&self) -> &str {
        self.session.current_question().blank_sentence()
    }

    #[must_use]
    pub fn choice_rows(&self) -> Vec<ChoiceRowVm> {
        let selected = self.session.selected();
        self.session
            .current_question()
            .choices()
            .map(|(label, text)| ChoiceRowVm {
                label,
                text: text.to_string(),
                selected: selected == Some(label),
            })
            .collect()
    }

    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.session.confidence()
    }

    #[must_use]
    pub fn confidence_label(&self) -> String {
        format!("Confidence Level: {}", self.session.confidence())
    }

    /// `Some(true)` once the current question was answered correctly.
    #[must_use]
    pub fn result(&self) -> Option<bool> {
        self.session.current_result().map(|item| item.is_correct)
    }

    #[must_use]
    pub fn strategy_line(&self) -> String {
        format!(
            "This is a {} item.",
            self.session.current_question().strategy_tag()
        )
    }

    #[must_use]
    pub fn elimination_rows(&self) -> Vec<EliminationRowVm> {
        let picked = self
            .session
            .current_result()
            .map(|item| item.selected_choice.as_str());
        self.session
            .current_question()
            .distractors()
            .map(|(_, text)| EliminationRowVm {
                text: text.to_string(),
                chosen: picked == Some(text),
            })
            .collect()
    }

    #[must_use]
    pub fn verification(&self) -> VerificationVm {
        let question = self.session.current_question();
        VerificationVm {
            correct_answer: question.correct_answer().to_string(),
            explanation: question.explanation().to_string(),
            substitution: question.substituted_sentence(),
        }
    }

    #[must_use]
    pub fn history_rows(&self) -> Vec<HistoryListItem> {
        history_list(self.session.history())
    }

    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        self.session.history().stats()
    }

    /// Intent bound to the Enter key in the current state.
    #[must_use]
    pub fn intent_for_enter(&self) -> Option<QuizIntent> {
        if self.session.is_finished() {
            return Some(QuizIntent::Restart);
        }
        match self.session.phase() {
            Phase::Answering => self.session.can_submit().then_some(QuizIntent::Submit),
            Phase::Feedback | Phase::Strategy | Phase::Elimination => Some(QuizIntent::NextPhase),
            Phase::Verification => Some(QuizIntent::NextQuestion),
        }
    }

    /// Letter shortcuts select a choice while answering.
    #[must_use]
    pub fn intent_for_char(&self, value: &str) -> Option<QuizIntent> {
        if self.session.is_locked() || self.session.is_finished() {
            return None;
        }
        let mut chars = value.chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        ChoiceLabel::from_letter(letter).map(QuizIntent::Select)
    }
}

/// # Errors
///
/// Returns `ViewError::EmptySession` when the bank has no questions.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    match quiz_loop.start_session().await {
        Ok(session) => Ok(QuizVm::new(session)),
        Err(err) if err.is_empty_bank() => Err(ViewError::EmptySession),
        Err(_) => Err(ViewError::Unknown),
    }
}
