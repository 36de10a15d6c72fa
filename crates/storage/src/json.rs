use std::path::{Path, PathBuf};

use async_trait::async_trait;
use wic_core::model::Question;

use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

/// Parse a question bank: a JSON array of `QuestionRecord`s.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or missing keys, and
/// `StorageError::InvalidRecord` for records that fail validation.
pub fn parse_question_bank(raw: &str) -> Result<Vec<Question>, StorageError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_question(position))
        .collect()
}

/// Render questions in the bank format, pretty-printed.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn render_question_bank(questions: &[Question]) -> Result<String, StorageError> {
    let records: Vec<_> = questions.iter().map(QuestionRecord::from_question).collect();
    serde_json::to_string_pretty(&records).map_err(|e| StorageError::Serialization(e.to_string()))
}

pub(crate) async fn read_bank_file(path: &Path) -> Result<String, StorageError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound,
            _ => StorageError::Io(e.to_string()),
        })
}

/// Question bank backed by a JSON file, re-read on every listing.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionRepository for JsonFileRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let raw = read_bank_file(&self.path).await?;
        let questions = parse_question_bank(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            count = questions.len(),
            "loaded question bank"
        );
        Ok(questions)
    }
}
