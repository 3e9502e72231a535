//! Mapper errors: schema synthesis, mapping build and row decode.

use super::error_code::{self, RowmapErrorCode};
use super::storage_error::StorageError;

/// Errors that can occur while binding a record type to a table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    #[error("{type_name}.{field} has unsupported kind `{kind}`")]
    UnsupportedFieldKind {
        type_name: String,
        field: String,
        kind: String,
    },

    #[error("`{name}` is not a plain SQL identifier")]
    InvalidIdentifier { name: String },

    #[error("column `{column}` declared twice for table `{table}`")]
    DuplicateColumn { table: String, column: String },

    #[error("column `{column}` of table `{table}` has no matching field")]
    UnmappedColumn { table: String, column: String },

    #[error("failed to instantiate {type_name}: {reason}")]
    InstantiationFailure { type_name: String, reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl MappingError {
    /// Whether this error permanently poisons the owning gateway.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFieldKind { .. }
                | Self::InvalidIdentifier { .. }
                | Self::DuplicateColumn { .. }
                | Self::UnmappedColumn { .. }
        )
    }
}

impl RowmapErrorCode for MappingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFieldKind { .. } => error_code::UNSUPPORTED_FIELD_KIND,
            Self::InvalidIdentifier { .. } => error_code::INVALID_IDENTIFIER,
            Self::DuplicateColumn { .. } => error_code::DUPLICATE_COLUMN,
            Self::UnmappedColumn { .. } => error_code::UNMAPPED_COLUMN,
            Self::InstantiationFailure { .. } => error_code::INSTANTIATION_FAILURE,
            Self::Storage(e) => e.error_code(),
        }
    }
}
