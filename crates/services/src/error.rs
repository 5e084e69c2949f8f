//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ExerciseError, LevelId, SessionKey};
use storage::StorageError;

/// Errors emitted by session services.
///
/// `UnknownLevel`, `MissingCategory` and `Empty` are configuration problems:
/// the data source cannot supply a batch and the host should stop rendering
/// exercises. `DataIntegrity` concerns a single exercise.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("level {0} is not in the exercise catalog")]
    UnknownLevel(LevelId),
    #[error("level {level} has no {category:?} exercises")]
    MissingCategory { level: LevelId, category: String },
    #[error("no exercises available for level {0}")]
    Empty(LevelId),
    #[error("session already finished")]
    Finished,
    #[error("{0:?} is not one of the current options")]
    UnknownOption(String),
    #[error("no session registered under {0}")]
    UnknownSession(SessionKey),
    #[error("session state lock poisoned: {0}")]
    LockPoisoned(String),
    #[error(transparent)]
    DataIntegrity(#[from] ExerciseError),
    #[error(transparent)]
    Storage(StorageError),
}

impl SessionError {
    /// True when the data source cannot provide exercises for the request.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownLevel(_) | Self::MissingCategory { .. } | Self::Empty(_)
        )
    }
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::LevelNotFound(level) => Self::UnknownLevel(level),
            StorageError::CategoryNotFound { level, category } => {
                Self::MissingCategory { level, category }
            }
            other => Self::Storage(other),
        }
    }
}
