//! # rowmap-core
//!
//! Foundation crate for the rowmap table mapper.
//! Defines primitive kinds, values, record descriptors, the `Record` capability,
//! the `ISqlEngine` boundary trait, errors, config and logging.
//! `rowmap-storage` builds the gateway on top of these.

pub mod config;
pub mod descriptor;
pub mod errors;
pub mod logging;
pub mod traits;
pub mod types;

pub use config::RowmapConfig;
pub use descriptor::{FieldDescriptor, TypeDescriptor};
pub use errors::error_code::RowmapErrorCode;
pub use errors::{ConfigError, MappingError, RecordError, StorageError};
pub use traits::{FieldValue, ISqlEngine, Record};
pub use types::{FieldKind, PrimitiveKind, StoredValue, Value};
