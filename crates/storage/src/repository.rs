use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use wic_core::model::{ChoiceLabel, Question, QuestionDraft, QuestionError, QuestionId};

/// Errors surfaced by question bank sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid question at position {position}: {source}")]
    InvalidRecord {
        position: usize,
        #[source]
        source: QuestionError,
    },
}

/// Persisted shape of a question, one JSON object per question.
///
/// Field names match the bank's CSV header and JSON keys
/// (`choice_A`..`choice_D`, snake_case elsewhere). `id` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub passage: String,
    pub blank_sentence: String,
    #[serde(rename = "choice_A")]
    pub choice_a: String,
    #[serde(rename = "choice_B")]
    pub choice_b: String,
    #[serde(rename = "choice_C")]
    pub choice_c: String,
    #[serde(rename = "choice_D")]
    pub choice_d: String,
    pub correct_answer: String,
    pub strategy_tag: String,
    pub explanation: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: Some(question.id().value()),
            passage: question.passage().to_owned(),
            blank_sentence: question.blank_sentence().to_owned(),
            choice_a: question.choice(ChoiceLabel::A).to_owned(),
            choice_b: question.choice(ChoiceLabel::B).to_owned(),
            choice_c: question.choice(ChoiceLabel::C).to_owned(),
            choice_d: question.choice(ChoiceLabel::D).to_owned(),
            correct_answer: question.correct_answer().to_owned(),
            strategy_tag: question.strategy_tag().to_owned(),
            explanation: question.explanation().to_owned(),
        }
    }

    /// Convert the record into a domain `Question`.
    ///
    /// `position` is the 0-based index in the bank; records without an id get
    /// `position + 1`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidRecord` if the question fails validation.
    pub fn into_question(self, position: usize) -> Result<Question, StorageError> {
        let fallback_id = u64::try_from(position).map_or(u64::MAX, |p| p.saturating_add(1));
        QuestionDraft {
            id: QuestionId::new(self.id.unwrap_or(fallback_id)),
            passage: self.passage,
            blank_sentence: self.blank_sentence,
            choices: [self.choice_a, self.choice_b, self.choice_c, self.choice_d],
            correct_answer: self.correct_answer,
            strategy_tag: self.strategy_tag,
            explanation: self.explanation,
        }
        .validate()
        .map_err(|source| StorageError::InvalidRecord { position, source })
    }
}

/// Read-only source of the question bank for a session.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Return every question, in bank order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank cannot be read or contains invalid records.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// Fixed question bank held in memory (built-in samples, tests).
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    questions: Vec<Question>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Ok(self.questions.clone())
    }
}

/// Aggregates the question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            questions: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Storage pre-loaded with the built-in sample questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the embedded sample bank fails to parse.
    pub fn samples() -> Result<Self, StorageError> {
        let questions = crate::sample::sample_questions()?;
        Ok(Self {
            questions: Arc::new(InMemoryRepository::with_questions(questions)),
        })
    }

    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            questions: Arc::new(crate::json::JsonFileRepository::new(path)),
        }
    }

    #[must_use]
    pub fn csv_file(path: impl Into<PathBuf>) -> Self {
        Self {
            questions: Arc::new(crate::csv_bank::CsvFileRepository::new(path)),
        }
    }

    /// Pick the file backend from the extension: `.csv` is read as CSV,
    /// anything else as JSON.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::csv_file(path)
        } else {
            Self::json_file(path)
        }
    }
}
