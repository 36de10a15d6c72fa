use std::sync::Arc;

use storage::repository::QuestionRepository;
use wic_core::model::{QuizIntent, SessionConfig, SessionState, Transition};

use crate::Clock;
use crate::error::QuizServiceError;

/// Orchestrates session start and intent dispatch.
///
/// Holds the question source and session configuration so the UI only deals
/// with `SessionState` and intents.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    config: SessionConfig,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            clock,
            questions,
            config: SessionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Load the question bank and start a new session over it.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the bank cannot be loaded and
    /// `QuizServiceError::Session` if it is empty or has duplicate ids.
    pub async fn start_session(&self) -> Result<SessionState, QuizServiceError> {
        let questions = self.questions.list_questions().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to load question bank");
        })?;
        let count = questions.len();
        let session = SessionState::new(questions, self.config, self.clock)?;
        tracing::info!(
            questions = count,
            advance = %self.config.advance,
            "quiz session started"
        );
        Ok(session)
    }

    /// Apply an intent to the session and log what happened.
    pub fn dispatch(&self, session: &mut SessionState, intent: QuizIntent) -> Transition {
        let question_id = session.current_question().id();
        let transition = session.apply(intent);

        match transition {
            Transition::Submitted { is_correct } => {
                let confidence = session
                    .history()
                    .last()
                    .map_or(0, |item| item.confidence.value());
                tracing::info!(
                    question = %question_id,
                    is_correct,
                    confidence,
                    answered = session.history().len(),
                    "answer submitted"
                );
            }
            Transition::Advanced { index, wrapped } => {
                tracing::debug!(index, wrapped, "advanced to next question");
                if wrapped {
                    tracing::info!(answered = session.history().len(), "question bank wrapped");
                }
            }
            Transition::Finished => {
                let stats = session.history().stats();
                tracing::info!(
                    answered = stats.answered,
                    correct = stats.correct,
                    "quiz session finished"
                );
            }
            Transition::Restarted => {
                tracing::info!(answered = session.history().len(), "quiz session restarted");
            }
            Transition::Ignored(reason) => {
                tracing::debug!(?intent, ?reason, "intent ignored");
            }
            Transition::Applied => {}
        }

        transition
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
