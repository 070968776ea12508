// ABOUTME: Error kinds surfaced by the todo item store
// ABOUTME: Validation, not-found and persistence failures with readable messages

use thiserror::Error;
use todo_storage::StorageError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Bad or missing input
    #[error("{0}")]
    Validation(String),

    /// The referenced item does not exist
    #[error("{0}")]
    NotFound(String),

    /// The backend failed or refused a write; the transaction was rolled back
    #[error("{0}")]
    Persistence(String),
}

pub type TodoResult<T> = Result<T, TodoError>;

impl TodoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

// Backend causes are reported as "Error: <cause>"
impl From<sqlx::Error> for TodoError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(format!("Error: {}", err))
    }
}

impl From<StorageError> for TodoError {
    fn from(err: StorageError) -> Self {
        Self::Persistence(format!("Error: {}", err))
    }
}
