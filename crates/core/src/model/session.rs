use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::model::confidence::Confidence;
use crate::model::history::{History, HistoryItem};
use crate::model::ids::QuestionId;
use crate::model::policy::{AdvancePolicy, SessionConfig};
use crate::model::question::{ChoiceLabel, Question};
use crate::time::Clock;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available")]
    Empty,

    #[error("question id {0} appears more than once")]
    DuplicateQuestionId(QuestionId),
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Per-question presentation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Answering,
    Feedback,
    Strategy,
    Elimination,
    Verification,
}

impl Phase {
    /// The coaching phase reached by a "Next" action, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Feedback => Some(Self::Strategy),
            Self::Strategy => Some(Self::Elimination),
            Self::Elimination => Some(Self::Verification),
            Self::Answering | Self::Verification => None,
        }
    }

    /// Choices are unselectable in every phase after submission.
    #[must_use]
    pub fn is_locked(self) -> bool {
        !matches!(self, Self::Answering)
    }
}

//
// ─── INTENTS & TRANSITIONS ─────────────────────────────────────────────────────
//

/// One discrete user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizIntent {
    Select(ChoiceLabel),
    SetConfidence(Confidence),
    Submit,
    NextPhase,
    NextQuestion,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Locked,
    NoSelection,
    NotSubmitted,
    AwaitingNextQuestion,
    CoachingIncomplete,
    Finished,
    NotFinished,
}

/// What an intent did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Submitted { is_correct: bool },
    Advanced { index: usize, wrapped: bool },
    Finished,
    /// A finished session rewound to its first question.
    Restarted,
    Ignored(IgnoreReason),
}

impl Transition {
    #[must_use]
    pub fn is_ignored(self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub percent: u8,
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// The whole quiz view-state: question bank, per-question transients and history.
///
/// Every user action goes through [`SessionState::apply`]; there are no other
/// mutators.
#[derive(Clone)]
pub struct SessionState {
    questions: Vec<Question>,
    order: Vec<usize>,
    current: usize,
    selected: Option<ChoiceLabel>,
    confidence: Confidence,
    phase: Phase,
    history: History,
    finished: bool,
    started_at: DateTime<Utc>,
    clock: Clock,
    config: SessionConfig,
    rng: StdRng,
}

impl SessionState {
    /// Start a session over `questions`, presented in the given order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when no questions are supplied and
    /// `SessionError::DuplicateQuestionId` when two questions share an id.
    pub fn new(
        questions: Vec<Question>,
        config: SessionConfig,
        clock: Clock,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(SessionError::DuplicateQuestionId(question.id()));
            }
        }

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            order: (0..questions.len()).collect(),
            questions,
            current: 0,
            selected: None,
            confidence: Confidence::DEFAULT,
            phase: Phase::Answering,
            history: History::new(),
            finished: false,
            started_at: clock.now(),
            clock,
            config,
            rng,
        })
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.order[self.current]]
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions in the order the bank supplied them.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn selected(&self) -> Option<ChoiceLabel> {
        self.selected
    }

    /// The highlighted choice string, or `""` when nothing is selected.
    #[must_use]
    pub fn selected_choice(&self) -> &str {
        self.selected
            .map_or("", |label| self.current_question().choice(label))
    }

    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.finished && !self.is_locked() && self.selected.is_some()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The record appended for the current question, once it is submitted.
    #[must_use]
    pub fn current_result(&self) -> Option<&HistoryItem> {
        if self.is_locked() {
            self.history.last()
        } else {
            None
        }
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let position = self.current + 1;
        SessionProgress {
            position,
            total,
            percent: u8::try_from(position * 100 / total).unwrap_or(100),
        }
    }

    /// Apply one user intent. Intents outside their valid state leave the
    /// session untouched and report why.
    pub fn apply(&mut self, intent: QuizIntent) -> Transition {
        if self.finished && intent != QuizIntent::Restart {
            return Transition::Ignored(IgnoreReason::Finished);
        }

        match intent {
            QuizIntent::Select(label) => self.select(label),
            QuizIntent::SetConfidence(confidence) => self.set_confidence(confidence),
            QuizIntent::Submit => self.submit(),
            QuizIntent::NextPhase => self.next_phase(),
            QuizIntent::NextQuestion => self.next_question(),
            QuizIntent::Restart => self.restart(),
        }
    }

    /// Pure form of [`SessionState::apply`]: consume the state and return the next one.
    #[must_use]
    pub fn reduce(mut self, intent: QuizIntent) -> Self {
        self.apply(intent);
        self
    }

    fn select(&mut self, label: ChoiceLabel) -> Transition {
        if self.is_locked() {
            return Transition::Ignored(IgnoreReason::Locked);
        }
        self.selected = Some(label);
        Transition::Applied
    }

    fn set_confidence(&mut self, confidence: Confidence) -> Transition {
        if self.is_locked() {
            return Transition::Ignored(IgnoreReason::Locked);
        }
        self.confidence = confidence;
        Transition::Applied
    }

    fn submit(&mut self) -> Transition {
        if self.is_locked() {
            return Transition::Ignored(IgnoreReason::Locked);
        }
        let Some(label) = self.selected else {
            return Transition::Ignored(IgnoreReason::NoSelection);
        };

        let question = self.current_question();
        let is_correct = question.is_correct(label);
        let item = HistoryItem {
            question_id: question.id(),
            selected: label,
            selected_choice: question.choice(label).to_string(),
            is_correct,
            confidence: self.confidence,
            answered_at: self.clock.now(),
        };

        // Feedback and the first coaching phase are revealed by the same action.
        self.history.push(item);
        self.phase = Phase::Strategy;
        Transition::Submitted { is_correct }
    }

    fn next_phase(&mut self) -> Transition {
        match self.phase.next() {
            Some(next) => {
                self.phase = next;
                Transition::Applied
            }
            None if self.phase == Phase::Answering => {
                Transition::Ignored(IgnoreReason::NotSubmitted)
            }
            None => Transition::Ignored(IgnoreReason::AwaitingNextQuestion),
        }
    }

    fn next_question(&mut self) -> Transition {
        match self.phase {
            Phase::Verification => {}
            Phase::Answering => return Transition::Ignored(IgnoreReason::NotSubmitted),
            Phase::Feedback | Phase::Strategy | Phase::Elimination => {
                return Transition::Ignored(IgnoreReason::CoachingIncomplete);
            }
        }

        let is_last = self.current + 1 >= self.questions.len();
        let transition = if !is_last {
            self.current += 1;
            Transition::Advanced {
                index: self.current,
                wrapped: false,
            }
        } else {
            match self.config.advance {
                AdvancePolicy::Loop => {
                    self.current = 0;
                    Transition::Advanced {
                        index: 0,
                        wrapped: true,
                    }
                }
                AdvancePolicy::Reshuffle => {
                    self.reshuffle();
                    self.current = 0;
                    Transition::Advanced {
                        index: 0,
                        wrapped: true,
                    }
                }
                AdvancePolicy::Stop => {
                    self.finished = true;
                    Transition::Finished
                }
            }
        };

        self.reset_transients();
        transition
    }

    fn restart(&mut self) -> Transition {
        if !self.finished {
            return Transition::Ignored(IgnoreReason::NotFinished);
        }
        self.finished = false;
        self.current = 0;
        self.reset_transients();
        Transition::Restarted
    }

    fn reset_transients(&mut self) {
        self.selected = None;
        self.confidence = Confidence::DEFAULT;
        self.phase = Phase::Answering;
    }

    fn reshuffle(&mut self) {
        let last_shown = self.order[self.current];
        self.order.shuffle(&mut self.rng);
        // Avoid showing the same question twice in a row across the wrap.
        if self.order.len() > 1 && self.order[0] == last_shown {
            let swap_with = self.order.len() - 1;
            self.order.swap(0, swap_with);
        }
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("confidence", &self.confidence)
            .field("phase", &self.phase)
            .field("history_len", &self.history.len())
            .field("finished", &self.finished)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
