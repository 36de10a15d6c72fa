use std::path::{Path, PathBuf};

use async_trait::async_trait;
use wic_core::model::Question;

use crate::json::read_bank_file;
use crate::repository::{QuestionRecord, QuestionRepository, StorageError};

/// Header columns every CSV bank must carry. `id` is optional.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "passage",
    "blank_sentence",
    "choice_A",
    "choice_B",
    "choice_C",
    "choice_D",
    "correct_answer",
    "strategy_tag",
    "explanation",
];

fn csv_error(err: csv::Error) -> StorageError {
    StorageError::Serialization(err.to_string())
}

/// Parse a CSV question bank with a header row.
///
/// Rows without an `id` (missing column or empty cell) are numbered from
/// their 0-based row position plus one. Extra columns are ignored.
///
/// # Errors
///
/// Returns `StorageError::MissingColumns` naming every absent required column,
/// `StorageError::Serialization` for malformed rows, and
/// `StorageError::InvalidRecord` for rows that fail validation.
pub fn parse_question_csv(raw: &str) -> Result<Vec<Question>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let headers = reader.headers().map_err(csv_error)?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| (*column).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StorageError::MissingColumns(missing));
    }

    reader
        .deserialize::<QuestionRecord>()
        .enumerate()
        .map(|(position, record)| {
            record
                .map_err(csv_error)
                .and_then(|record| record.into_question(position))
        })
        .collect()
}

/// Question bank backed by a CSV file, re-read on every listing.
#[derive(Debug, Clone)]
pub struct CsvFileRepository {
    path: PathBuf,
}

impl CsvFileRepository {
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
impl QuestionRepository for CsvFileRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let raw = read_bank_file(&self.path).await?;
        let questions = parse_question_csv(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            count = questions.len(),
            "loaded csv question bank"
        );
        Ok(questions)
    }
}
