//! Typed field values and the five storage classes.

use std::fmt::Write as _;

use super::kind::PrimitiveKind;

/// A present field value, tagged with its primitive kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer32(i32),
    Integer64(i64),
    /// SQLite has no NaN; the engine rejects it on bind.
    Float64(f64),
    Binary(Vec<u8>),
}

impl Value {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Text(_) => PrimitiveKind::Text,
            Self::Integer32(_) => PrimitiveKind::Integer32,
            Self::Integer64(_) => PrimitiveKind::Integer64,
            Self::Float64(_) => PrimitiveKind::Float64,
            Self::Binary(_) => PrimitiveKind::Binary,
        }
    }

    /// Canonical textual form, used for parameter logging.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer32(v) => v.to_string(),
            Self::Integer64(v) => v.to_string(),
            Self::Float64(v) => v.to_string(),
            Self::Binary(bytes) => {
                let mut out = String::with_capacity(bytes.len() * 2 + 3);
                out.push_str("x'");
                for b in bytes {
                    let _ = write!(out, "{b:02x}");
                }
                out.push('\'');
                out
            }
        }
    }
}

/// One cell of a stored row. Columns are restricted to these storage classes.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Null,
    Integer(i64),
    Real(f64),
    /// Raw text bytes as the engine returned them. Not guaranteed to be UTF-8.
    Text(Vec<u8>),
    Blob(Vec<u8>),
}

impl StoredValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Value> for StoredValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(s) => Self::Text(s.into_bytes()),
            Value::Integer32(v) => Self::Integer(i64::from(v)),
            Value::Integer64(v) => Self::Integer(v),
            Value::Float64(v) => Self::Real(v),
            Value::Binary(b) => Self::Blob(b),
        }
    }
}

impl From<&Value> for StoredValue {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_canonical() {
        assert_eq!(Value::Text("Ann".into()).render(), "Ann");
        assert_eq!(Value::Integer32(-7).render(), "-7");
        assert_eq!(Value::Integer64(1 << 40).render(), "1099511627776");
        assert_eq!(Value::Float64(2.5).render(), "2.5");
        assert_eq!(Value::Binary(vec![0x00, 0xab]).render(), "x'00ab'");
    }

    #[test]
    fn integers_widen_into_storage() {
        assert_eq!(StoredValue::from(Value::Integer32(42)), StoredValue::Integer(42));
        assert_eq!(StoredValue::from(&Value::Float64(1.5)), StoredValue::Real(1.5));
    }

    #[test]
    fn text_is_stored_as_its_bytes() {
        let stored = StoredValue::from(Value::Text("zoë".into()));
        assert_eq!(stored, StoredValue::Text("zoë".as_bytes().to_vec()));
        assert!(!stored.is_null());
        assert!(StoredValue::Null.is_null());
    }
}
