//! Type descriptors: the static metadata a record type exposes to the mapper.
//!
//! A descriptor is derived once when a gateway is bound to a record type and is
//! never mutated afterwards. Field order is the declaration order and drives
//! column order in the synthesized `CREATE TABLE`.

use crate::types::FieldKind;

/// One persisted field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    identifier: String,
    kind: FieldKind,
    column: Option<String>,
}

impl FieldDescriptor {
    pub fn new(identifier: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            identifier: identifier.into(),
            kind: kind.into(),
            column: None,
        }
    }

    /// Override the column name (defaults to the field identifier).
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn column_override(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Column name this field binds to: the override if present, else the identifier.
    pub fn effective_name(&self) -> &str {
        self.column_override().unwrap_or(&self.identifier)
    }
}

/// Field list plus storage naming for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    type_name: String,
    table: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn builder(type_name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            inner: TypeDescriptor {
                type_name: type_name.into(),
                table: None,
                fields: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn table_override(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Table name: the override if present, else the record type's own name.
    pub fn table_name(&self) -> &str {
        self.table_override().unwrap_or(&self.type_name)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, identifier: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }

    /// First field whose effective name equals `column`.
    pub fn field_for_column(&self, column: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.effective_name() == column)
    }
}

pub struct TypeDescriptorBuilder {
    inner: TypeDescriptor,
}

impl TypeDescriptorBuilder {
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.inner.table = Some(table.into());
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.inner.fields.push(field);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;

    fn user() -> TypeDescriptor {
        TypeDescriptor::builder("User")
            .field(FieldDescriptor::new("id", PrimitiveKind::Integer32))
            .field(FieldDescriptor::new("name", PrimitiveKind::Text).column("user_name"))
            .build()
    }

    #[test]
    fn table_name_falls_back_to_type_name() {
        assert_eq!(user().table_name(), "User");
        assert_eq!(user().table_override(), None);
        let renamed = TypeDescriptor::builder("User").table("users").build();
        assert_eq!(renamed.table_override(), Some("users"));
        assert_eq!(renamed.table_name(), "users");
    }

    #[test]
    fn column_override_wins() {
        let d = user();
        assert_eq!(d.field("name").and_then(|f| f.column_override()), Some("user_name"));
        assert_eq!(d.field("id").and_then(|f| f.column_override()), None);
        assert_eq!(d.field("name").map(|f| f.effective_name()), Some("user_name"));
        assert_eq!(d.field("id").map(|f| f.effective_name()), Some("id"));
        assert!(d.field_for_column("name").is_none());
        assert_eq!(
            d.field_for_column("user_name").map(|f| f.identifier()),
            Some("name")
        );
    }
}
