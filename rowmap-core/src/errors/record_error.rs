//! Errors raised by a `Record` implementation while reading or assigning fields.

use crate::types::PrimitiveKind;

use super::error_code::{self, RowmapErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("{type_name} has no field `{field}`")]
    UnknownField { type_name: String, field: String },

    #[error("field `{field}` expects {expected:?}, got {actual:?}")]
    KindMismatch {
        field: String,
        expected: PrimitiveKind,
        actual: PrimitiveKind,
    },

    #[error("cannot construct {type_name}: {reason}")]
    Construction { type_name: String, reason: String },
}

impl RowmapErrorCode for RecordError {
    fn error_code(&self) -> &'static str {
        error_code::RECORD_ERROR
    }
}
