//! SQLite PRAGMA configuration.
//!
//! Must be called on every connection immediately after opening.

use rusqlite::Connection;

use rowmap_core::config::StorageConfig;
use rowmap_core::errors::StorageError;

use crate::engine::sqe;

/// Apply the PRAGMAs described by `config`.
///
/// - WAL for readers during writes (in-memory databases report `memory`)
/// - busy_timeout for lock contention
/// - NORMAL synchronous for the WAL durability trade-off
pub fn configure_connection(conn: &Connection, config: &StorageConfig) -> Result<(), StorageError> {
    let journal_mode = if config.effective_wal() { "WAL" } else { "DELETE" };
    let foreign_keys = if config.effective_foreign_keys() { "ON" } else { "OFF" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal_mode};
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = {foreign_keys};
        PRAGMA busy_timeout = {busy_timeout};
        PRAGMA cache_size = -{cache_size};
        PRAGMA temp_store = MEMORY;
        ",
        busy_timeout = config.effective_busy_timeout_ms(),
        cache_size = config.effective_cache_size_kib(),
    ))
    .map_err(sqe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_connection_sets_wal() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn, &StorageConfig::default()).unwrap();

        let journal_mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        // In-memory databases report "memory" instead of "wal"
        assert!(
            journal_mode == "wal" || journal_mode == "memory",
            "Expected wal or memory, got: {}",
            journal_mode
        );
    }

    #[test]
    fn test_configure_connection_sets_busy_timeout() {
        let conn = Connection::open_in_memory().unwrap();
        let config = StorageConfig {
            busy_timeout_ms: Some(1234),
            ..Default::default()
        };
        configure_connection(&conn, &config).unwrap();

        let timeout: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 1234);
    }

    #[test]
    fn test_configure_connection_toggles_foreign_keys() {
        let conn = Connection::open_in_memory().unwrap();
        let config = StorageConfig {
            foreign_keys: Some(false),
            ..Default::default()
        };
        configure_connection(&conn, &config).unwrap();

        let fk: i64 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 0);
    }
}
