//! Stable error codes shared by every rowmap error enum.

/// Maps an error to a stable, machine-readable code.
pub trait RowmapErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const UNSUPPORTED_FIELD_KIND: &str = "UNSUPPORTED_FIELD_KIND";
pub const INVALID_IDENTIFIER: &str = "INVALID_IDENTIFIER";
pub const DUPLICATE_COLUMN: &str = "DUPLICATE_COLUMN";
pub const UNMAPPED_COLUMN: &str = "UNMAPPED_COLUMN";
pub const INSTANTIATION_FAILURE: &str = "INSTANTIATION_FAILURE";
pub const CONSTRAINT_VIOLATION: &str = "CONSTRAINT_VIOLATION";
pub const ENGINE_FAILURE: &str = "ENGINE_FAILURE";
pub const DB_BUSY: &str = "DB_BUSY";
pub const NOT_SUPPORTED: &str = "NOT_SUPPORTED";
pub const RECORD_ERROR: &str = "RECORD_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
