//! Mapper behaviour settings.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::PageWindow;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MapperConfig {
    /// Fail initialisation when the live table has a column no field maps to.
    /// Default: false (such columns are dropped from the mapping).
    pub strict_columns: Option<bool>,
    /// Offset of the default query window. Default: 1.
    pub default_offset: Option<u64>,
    /// Limit of the default query window. Default: 100.
    pub default_limit: Option<u64>,
}

impl MapperConfig {
    pub fn effective_strict_columns(&self) -> bool {
        self.strict_columns.unwrap_or(false)
    }

    pub fn effective_default_offset(&self) -> u64 {
        self.default_offset.unwrap_or(PageWindow::DEFAULT_OFFSET)
    }

    pub fn effective_default_limit(&self) -> u64 {
        self.default_limit.unwrap_or(PageWindow::DEFAULT_LIMIT)
    }

    /// Window used by `query` when the caller gives none.
    pub fn default_window(&self) -> PageWindow {
        PageWindow::new(
            self.effective_default_offset(),
            self.effective_default_limit(),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effective_default_limit() == 0 {
            return Err(ConfigError::Invalid {
                field: "mapper.default_limit".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
