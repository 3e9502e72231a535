//! SQLite connection settings.

use serde::{Deserialize, Serialize};

/// PRAGMA settings applied to every connection the engine opens.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Lock wait in milliseconds. Default: 5000.
    pub busy_timeout_ms: Option<u32>,
    /// Use WAL journaling. Default: true.
    pub wal: Option<bool>,
    /// Page cache size in KiB. Default: 8000.
    pub cache_size_kib: Option<u32>,
    /// Enforce foreign keys. Default: true.
    pub foreign_keys: Option<bool>,
}

impl StorageConfig {
    pub fn effective_busy_timeout_ms(&self) -> u32 {
        self.busy_timeout_ms.unwrap_or(5000)
    }

    pub fn effective_wal(&self) -> bool {
        self.wal.unwrap_or(true)
    }

    pub fn effective_cache_size_kib(&self) -> u32 {
        self.cache_size_kib.unwrap_or(8000)
    }

    pub fn effective_foreign_keys(&self) -> bool {
        self.foreign_keys.unwrap_or(true)
    }
}
