//! `ISqlEngine` trait: the embedded SQL engine the gateway delegates to.
//!
//! The engine owns the connection and its locking discipline. Implementations
//! bind parameters with their own typed bind and must release any cursor they
//! open before returning, including when the visitor is called partway.

use crate::errors::StorageError;
use crate::types::{PageWindow, Predicate, RowValues, StoredRow};

pub trait ISqlEngine: Send + Sync {
    /// Run a DDL statement.
    fn execute_ddl(&self, sql: &str) -> Result<(), StorageError>;

    /// Column names of a live table, in table order, without fetching rows.
    fn describe_columns(&self, table: &str) -> Result<Vec<String>, StorageError>;

    /// Insert one row, returning the generated row id.
    fn insert(&self, table: &str, values: &RowValues) -> Result<i64, StorageError>;

    /// Update matching rows, returning the affected row count.
    fn update(
        &self,
        table: &str,
        values: &RowValues,
        predicate: &Predicate,
    ) -> Result<usize, StorageError>;

    /// Delete matching rows, returning the affected row count.
    fn delete(&self, table: &str, predicate: &Predicate) -> Result<usize, StorageError>;

    /// Select matching rows and hand each one to `visitor`, in engine order.
    /// Returns the number of rows visited.
    fn query(
        &self,
        table: &str,
        predicate: &Predicate,
        order_by: Option<&str>,
        window: Option<PageWindow>,
        visitor: &mut dyn FnMut(StoredRow),
    ) -> Result<usize, StorageError>;
}
