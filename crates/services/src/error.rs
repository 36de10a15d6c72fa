//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use wic_core::model::SessionError;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizServiceError {
    /// True when the bank loaded fine but had nothing to ask.
    #[must_use]
    pub fn is_empty_bank(&self) -> bool {
        matches!(self, Self::Session(SessionError::Empty))
    }
}
