//! `SqliteEngine`: `ISqlEngine` over a single rusqlite connection.
//!
//! All statements are serialized through one `Mutex<Connection>`. Cursors are
//! scoped to the `query` call and dropped on every exit path.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, ErrorCode, ToSql};
use tracing::debug;

use rowmap_core::config::StorageConfig;
use rowmap_core::errors::StorageError;
use rowmap_core::traits::ISqlEngine;
use rowmap_core::types::{PageWindow, Predicate, RowValues, StoredRow, StoredValue, Value};

use crate::pragmas;

/// Embedded SQLite engine.
pub struct SqliteEngine {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteEngine {
    /// Open (or create) a file-backed database.
    pub fn open(path: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::sqlite(format!("Failed to create database directory: {e}"))
            })?;
        }
        let conn = Connection::open(path).map_err(sqe)?;
        pragmas::configure_connection(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(sqe)?;
        pragmas::configure_connection(&conn, &StorageConfig::default())?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw connection access for statements the gateway does not cover.
    pub fn with_connection<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.conn.lock().map_err(|e| StorageError::LockPoisoned {
            resource: format!("sqlite connection: {e}"),
        })?;
        f(&conn)
    }
}

// ─── Helper: StorageError from rusqlite ─────────────────────────────────────

/// Classify a rusqlite error by its SQLite result code.
pub(crate) fn sqe(e: rusqlite::Error) -> StorageError {
    match &e {
        rusqlite::Error::SqliteFailure(err, msg) => match err.code {
            ErrorCode::ConstraintViolation => StorageError::ConstraintViolation {
                message: msg.clone().unwrap_or_else(|| e.to_string()),
            },
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => StorageError::DbBusy,
            _ => StorageError::sqlite(e.to_string()),
        },
        rusqlite::Error::ToSqlConversionFailure(cause) => StorageError::NotSupported {
            operation: "bind parameter".to_string(),
            reason: cause.to_string(),
        },
        _ => StorageError::sqlite(e.to_string()),
    }
}

/// Typed bind for a mapper value. NaN is refused: SQLite would store it as NULL.
struct Bind<'a>(&'a Value);

impl ToSql for Bind<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Integer32(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            Value::Integer64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            Value::Float64(v) if v.is_nan() => {
                return Err(rusqlite::Error::ToSqlConversionFailure(
                    "NaN cannot be stored in a REAL column".into(),
                ));
            }
            Value::Float64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            Value::Binary(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

fn stored_value(value: ValueRef<'_>) -> StoredValue {
    match value {
        ValueRef::Null => StoredValue::Null,
        ValueRef::Integer(v) => StoredValue::Integer(v),
        ValueRef::Real(v) => StoredValue::Real(v),
        ValueRef::Text(t) => StoredValue::Text(t.to_vec()),
        ValueRef::Blob(b) => StoredValue::Blob(b.to_vec()),
    }
}

fn rendered<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<String> {
    values.map(Value::render).collect()
}

fn where_sql(predicate: &Predicate) -> String {
    format!(" WHERE {}", predicate.clause)
}

impl ISqlEngine for SqliteEngine {
    fn execute_ddl(&self, sql: &str) -> Result<(), StorageError> {
        debug!(sql, "execute ddl");
        self.with_connection(|conn| conn.execute_batch(sql).map_err(sqe))
    }

    fn describe_columns(&self, table: &str) -> Result<Vec<String>, StorageError> {
        // Prepared but never stepped: no row is fetched.
        let sql = format!("SELECT * FROM {table} LIMIT 0");
        self.with_connection(|conn| {
            let stmt = conn.prepare(&sql).map_err(sqe)?;
            Ok(stmt.column_names().into_iter().map(String::from).collect())
        })
    }

    fn insert(&self, table: &str, values: &RowValues) -> Result<i64, StorageError> {
        let sql = if values.is_empty() {
            format!("INSERT INTO {table} DEFAULT VALUES")
        } else {
            let columns: Vec<&str> = values.columns().collect();
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {table} ({}) VALUES ({placeholders})",
                columns.join(", ")
            )
        };
        debug!(sql = %sql, params = ?rendered(values.values()), "insert");
        self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
            stmt.execute(params_from_iter(values.values().map(Bind)))
                .map_err(sqe)?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn update(
        &self,
        table: &str,
        values: &RowValues,
        predicate: &Predicate,
    ) -> Result<usize, StorageError> {
        if values.is_empty() {
            return Err(StorageError::NotSupported {
                operation: format!("update {table}"),
                reason: "no column values to set".to_string(),
            });
        }
        let assignments: Vec<String> = values.columns().map(|c| format!("{c}=?")).collect();
        let sql = format!(
            "UPDATE {table} SET {}{}",
            assignments.join(", "),
            where_sql(predicate)
        );
        debug!(
            sql = %sql,
            params = ?rendered(values.values().chain(predicate.params.iter())),
            "update"
        );
        self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
            let binds = values.values().chain(predicate.params.iter()).map(Bind);
            stmt.execute(params_from_iter(binds)).map_err(sqe)
        })
    }

    fn delete(&self, table: &str, predicate: &Predicate) -> Result<usize, StorageError> {
        let sql = format!("DELETE FROM {table}{}", where_sql(predicate));
        debug!(sql = %sql, params = ?rendered(predicate.params.iter()), "delete");
        self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
            stmt.execute(params_from_iter(predicate.params.iter().map(Bind)))
                .map_err(sqe)
        })
    }

    fn query(
        &self,
        table: &str,
        predicate: &Predicate,
        order_by: Option<&str>,
        window: Option<PageWindow>,
        visitor: &mut dyn FnMut(StoredRow),
    ) -> Result<usize, StorageError> {
        let mut sql = format!("SELECT * FROM {table}{}", where_sql(predicate));
        if let Some(order_by) = order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        if let Some(window) = window {
            sql.push_str(" LIMIT ");
            sql.push_str(&window.to_limit_clause());
        }
        debug!(sql = %sql, params = ?rendered(predicate.params.iter()), "query");
        self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(&sql).map_err(sqe)?;
            let columns: Arc<[String]> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
                .into();
            let mut rows = stmt
                .query(params_from_iter(predicate.params.iter().map(Bind)))
                .map_err(sqe)?;
            let mut visited = 0;
            while let Some(row) = rows.next().map_err(sqe)? {
                let mut values = Vec::with_capacity(columns.len());
                for i in 0..columns.len() {
                    values.push(stored_value(row.get_ref(i).map_err(sqe)?));
                }
                visitor(StoredRow::new(Arc::clone(&columns), values));
                visited += 1;
            }
            Ok(visited)
        })
    }
}
