//! Encoded column values (write side) and stored rows (read side).

use std::sync::Arc;

use super::value::{StoredValue, Value};

/// Column name → value pairs handed to the engine for insert/update.
///
/// Only populated fields appear; order follows the column mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowValues {
    entries: Vec<(String, Value)>,
}

impl RowValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.entries.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, v)| (name.as_str(), v))
    }
}

/// One physical row returned by a query cursor.
///
/// Column names are shared across all rows of the same cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    columns: Arc<[String]>,
    values: Vec<StoredValue>,
}

impl StoredRow {
    pub fn new(columns: Arc<[String]>, values: Vec<StoredValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Value of a column, `None` when the row has no such column.
    pub fn get(&self, column: &str) -> Option<&StoredValue> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|i| self.values.get(i))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
