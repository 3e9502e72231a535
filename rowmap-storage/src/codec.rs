//! Row codec: record ↔ column values through a `ColumnMapping`.

use rowmap_core::errors::MappingError;
use rowmap_core::traits::Record;
use rowmap_core::types::{PrimitiveKind, RowValues, StoredRow, StoredValue, Value};

use crate::mapping::ColumnMapping;

/// Collect the populated fields of `record`, keyed by column.
///
/// Absent fields are omitted, so the result may be a partial row. Values stay
/// typed rather than rendered to text so the engine binds them natively and
/// Binary round-trips as a blob.
pub fn encode<R: Record>(record: &R, mapping: &ColumnMapping) -> RowValues {
    let mut values = RowValues::new();
    for binding in mapping.bindings() {
        if let Some(value) = record.read_field(&binding.field) {
            values.push(binding.column.as_str(), value);
        }
    }
    values
}

/// Build a fresh record from one stored row.
///
/// Columns missing from the row, NULL cells and fields of unsupported kind are
/// skipped. Construction failure, a rejected assignment or a cell that cannot
/// be read as the field's kind fail the whole row.
pub fn decode<R: Record>(row: &StoredRow, mapping: &ColumnMapping) -> Result<R, MappingError> {
    let failure = |reason: String| MappingError::InstantiationFailure {
        type_name: mapping.type_name().to_string(),
        reason,
    };

    let mut record = R::instantiate().map_err(|e| failure(e.to_string()))?;
    for binding in mapping.bindings() {
        let Some(stored) = row.get(&binding.column) else {
            continue;
        };
        let Some(kind) = binding.kind.primitive() else {
            continue;
        };
        let value = coerce(kind, stored)
            .map_err(|reason| failure(format!("column `{}`: {reason}", binding.column)))?;
        if let Some(value) = value {
            record
                .write_field(&binding.field, value)
                .map_err(|e| failure(e.to_string()))?;
        }
    }
    Ok(record)
}

/// Read a stored cell as `kind`, the way a cursor's typed getters do.
/// NULL yields `None`.
///
/// Text cells are kept as raw bytes until a field reads them: a Binary field
/// takes the bytes as-is, other kinds require valid UTF-8.
pub fn coerce(kind: PrimitiveKind, stored: &StoredValue) -> Result<Option<Value>, String> {
    if stored.is_null() {
        return Ok(None);
    }
    let value = match (kind, stored) {
        (PrimitiveKind::Text, StoredValue::Text(b)) => Value::Text(utf8(b)?.to_string()),
        (PrimitiveKind::Text, StoredValue::Integer(v)) => Value::Text(v.to_string()),
        (PrimitiveKind::Text, StoredValue::Real(v)) => Value::Text(format!("{v:?}")),

        (PrimitiveKind::Integer32, StoredValue::Integer(v)) => Value::Integer32(*v as i32),
        (PrimitiveKind::Integer32, StoredValue::Real(v)) => Value::Integer32(*v as i32),
        (PrimitiveKind::Integer32, StoredValue::Text(b)) => {
            Value::Integer32(parse_number(utf8(b)?, kind)?)
        }

        (PrimitiveKind::Integer64, StoredValue::Integer(v)) => Value::Integer64(*v),
        (PrimitiveKind::Integer64, StoredValue::Real(v)) => Value::Integer64(*v as i64),
        (PrimitiveKind::Integer64, StoredValue::Text(b)) => {
            Value::Integer64(parse_number(utf8(b)?, kind)?)
        }

        (PrimitiveKind::Float64, StoredValue::Real(v)) => Value::Float64(*v),
        (PrimitiveKind::Float64, StoredValue::Integer(v)) => Value::Float64(*v as f64),
        (PrimitiveKind::Float64, StoredValue::Text(b)) => {
            Value::Float64(parse_number(utf8(b)?, kind)?)
        }

        (PrimitiveKind::Binary, StoredValue::Blob(b)) => Value::Binary(b.clone()),
        (PrimitiveKind::Binary, StoredValue::Text(b)) => Value::Binary(b.clone()),

        (kind, other) => {
            return Err(format!("cannot read {} as {kind}", storage_class(other)));
        }
    };
    Ok(Some(value))
}

fn utf8(bytes: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(bytes).map_err(|e| format!("text cell is not valid UTF-8: {e}"))
}

fn parse_number<T: std::str::FromStr>(s: &str, kind: PrimitiveKind) -> Result<T, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("text {s:?} is not a valid {kind}"))
}

fn storage_class(value: &StoredValue) -> &'static str {
    match value {
        StoredValue::Null => "NULL",
        StoredValue::Integer(_) => "INTEGER",
        StoredValue::Real(_) => "REAL",
        StoredValue::Text(_) => "TEXT",
        StoredValue::Blob(_) => "BLOB",
    }
}
