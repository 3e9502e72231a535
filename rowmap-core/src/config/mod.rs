//! Configuration loaded from a `rowmap.toml` file or string.

pub mod mapper_config;
pub mod storage_config;

pub use mapper_config::MapperConfig;
pub use storage_config::StorageConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration with one table per subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RowmapConfig {
    pub storage: StorageConfig,
    pub mapper: MapperConfig,
}

impl RowmapConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mapper.validate()
    }
}
