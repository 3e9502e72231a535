//! Engine-boundary errors. Surfaced verbatim, never retried.

use super::error_code::{self, RowmapErrorCode};

/// Errors raised by an `ISqlEngine` implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Database busy (another operation in progress)")]
    DbBusy,

    #[error("Operation not supported: {operation} ({reason})")]
    NotSupported { operation: String, reason: String },

    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: String },
}

impl StorageError {
    pub fn sqlite(message: impl Into<String>) -> Self {
        Self::SqliteError {
            message: message.into(),
        }
    }
}

impl RowmapErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConstraintViolation { .. } => error_code::CONSTRAINT_VIOLATION,
            Self::DbBusy => error_code::DB_BUSY,
            Self::NotSupported { .. } => error_code::NOT_SUPPORTED,
            _ => error_code::ENGINE_FAILURE,
        }
    }
}
