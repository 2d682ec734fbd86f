use std::path::PathBuf;

use thiserror::Error;

use crate::models::ReviewList;

/// Errors surfaced by the key/value store backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported synchronously to the action that triggered them.
///
/// None of these are retried. Apart from `LoadFailure`, each one leaves the
/// quiz state exactly as it was before the call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("failed to load question bank {path}: {reason}")]
    LoadFailure { path: PathBuf, reason: String },

    #[error("the {0} list is empty")]
    EmptyList(ReviewList),

    #[error("select an answer first")]
    NoSelection,

    #[error("no question to show")]
    NoQuestion,

    #[error("no questions in chapter {0}")]
    ChapterEmpty(String),

    #[error("only available in practice mode")]
    NotInPractice,

    #[error("only available while reviewing a list")]
    NotInReview,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl QuizError {
    pub(crate) fn load_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        QuizError::LoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
