//! Primitive kinds and their storage column types.

use std::fmt;

/// The closed set of field kinds the mapper can persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Text,
    Integer32,
    Integer64,
    Float64,
    Binary,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        Self::Text,
        Self::Integer32,
        Self::Integer64,
        Self::Float64,
        Self::Binary,
    ];

    /// Column type used in `CREATE TABLE`.
    pub fn storage_type(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer32 => "INTEGER",
            Self::Float64 => "DOUBLE",
            Self::Integer64 => "BIGINT",
            Self::Binary => "BLOB",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "Text",
            Self::Integer32 => "Integer32",
            Self::Integer64 => "Integer64",
            Self::Float64 => "Float64",
            Self::Binary => "Binary",
        })
    }
}

/// Declared kind of a descriptor field.
///
/// `Unsupported` carries the name of a field type the mapper cannot store
/// (a nested object, a collection). Schema synthesis rejects it; decode skips it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    Unsupported { type_name: String },
}

impl FieldKind {
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            Self::Unsupported { .. } => None,
        }
    }
}

impl From<PrimitiveKind> for FieldKind {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => fmt::Display::fmt(kind, f),
            Self::Unsupported { type_name } => f.write_str(type_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_types_follow_the_fixed_table() {
        assert_eq!(PrimitiveKind::Text.storage_type(), "TEXT");
        assert_eq!(PrimitiveKind::Integer32.storage_type(), "INTEGER");
        assert_eq!(PrimitiveKind::Float64.storage_type(), "DOUBLE");
        assert_eq!(PrimitiveKind::Integer64.storage_type(), "BIGINT");
        assert_eq!(PrimitiveKind::Binary.storage_type(), "BLOB");
    }

    #[test]
    fn all_kinds_in_declaration_order() {
        let names: Vec<String> = PrimitiveKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["Text", "Integer32", "Integer64", "Float64", "Binary"]);
        let integers = PrimitiveKind::ALL
            .iter()
            .filter(|k| k.storage_type().contains("INT"))
            .count();
        assert_eq!(integers, 2);
    }

    #[test]
    fn unsupported_kind_has_no_primitive() {
        let kind = FieldKind::unsupported("Address");
        assert_eq!(kind.primitive(), None);
        assert_eq!(kind.to_string(), "Address");
    }
}
