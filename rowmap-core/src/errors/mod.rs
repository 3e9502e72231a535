//! Error taxonomy for the mapper, the engine boundary and configuration.

pub mod config_error;
pub mod error_code;
pub mod mapping_error;
pub mod record_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use mapping_error::MappingError;
pub use record_error::RecordError;
pub use storage_error::StorageError;
