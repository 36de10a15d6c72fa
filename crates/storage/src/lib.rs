#![forbid(unsafe_code)]

pub mod csv_bank;
pub mod json;
pub mod repository;
pub mod sample;

pub use csv_bank::{CsvFileRepository, REQUIRED_COLUMNS, parse_question_csv};
pub use json::{JsonFileRepository, parse_question_bank, render_question_bank};
pub use repository::{InMemoryRepository, QuestionRecord, QuestionRepository, Storage, StorageError};
