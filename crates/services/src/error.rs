//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CategoryId, QuizId};
use quiz_core::{SessionConfigError, TransitionError};
use storage::StorageError;

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("category {0} not found")]
    CategoryNotFound(CategoryId),
    #[error("quiz {0} not found")]
    QuizNotFound(QuizId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CatalogError {
    /// True for the recoverable "unknown id" case the UI shows a back/retry view for.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::CategoryNotFound(_) | CatalogError::QuizNotFound(_)
        )
    }
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz {0} not found")]
    QuizNotFound(QuizId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Config(#[from] SessionConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
