//! Column mapping cache: live table columns reconciled with descriptor fields.
//!
//! A mapping is built once per gateway from a zero-row structural probe and is
//! immutable afterwards. It is never rebuilt, even if the table is altered
//! out-of-band while the process runs; callers who change the schema at
//! runtime must bind a new gateway.

use tracing::{debug, warn};

use rowmap_core::descriptor::TypeDescriptor;
use rowmap_core::errors::MappingError;
use rowmap_core::traits::ISqlEngine;
use rowmap_core::types::collections::FxHashMap;
use rowmap_core::types::FieldKind;

/// One live column bound to a descriptor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    pub column: String,
    pub field: String,
    pub kind: FieldKind,
}

/// Column name → field binding for one record type against one live table.
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    type_name: String,
    table: String,
    bindings: Vec<ColumnBinding>,
    by_column: FxHashMap<String, usize>,
    unmapped: Vec<String>,
}

impl ColumnMapping {
    /// Reconcile `live_columns` (table order) with the descriptor.
    ///
    /// For each column the first field whose effective name matches wins.
    /// Columns without a field are dropped, or rejected when `strict` is set.
    pub fn build(
        live_columns: &[String],
        descriptor: &TypeDescriptor,
        strict: bool,
    ) -> Result<Self, MappingError> {
        let table = descriptor.table_name().to_string();
        let mut bindings = Vec::with_capacity(live_columns.len());
        let mut by_column = FxHashMap::default();
        let mut unmapped = Vec::new();

        for column in live_columns {
            match descriptor.field_for_column(column) {
                Some(field) => {
                    by_column.insert(column.clone(), bindings.len());
                    bindings.push(ColumnBinding {
                        column: column.clone(),
                        field: field.identifier().to_string(),
                        kind: field.kind().clone(),
                    });
                }
                None if strict => {
                    return Err(MappingError::UnmappedColumn {
                        table,
                        column: column.clone(),
                    });
                }
                None => {
                    warn!(table = %table, column = %column, "column has no matching field, dropped from mapping");
                    unmapped.push(column.clone());
                }
            }
        }

        debug!(
            table = %table,
            mapped = bindings.len(),
            unmapped = unmapped.len(),
            "column mapping built"
        );
        Ok(Self {
            type_name: descriptor.type_name().to_string(),
            table,
            bindings,
            by_column,
            unmapped,
        })
    }

    /// Probe the live table through the engine, then [`ColumnMapping::build`].
    pub fn probe(
        engine: &dyn ISqlEngine,
        descriptor: &TypeDescriptor,
        strict: bool,
    ) -> Result<Self, MappingError> {
        let live_columns = engine.describe_columns(descriptor.table_name())?;
        Self::build(&live_columns, descriptor, strict)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Bindings in live-table column order.
    pub fn bindings(&self) -> &[ColumnBinding] {
        &self.bindings
    }

    pub fn binding(&self, column: &str) -> Option<&ColumnBinding> {
        self.by_column.get(column).map(|&i| &self.bindings[i])
    }

    /// Live columns that matched no field.
    pub fn unmapped_columns(&self) -> &[String] {
        &self.unmapped
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::descriptor::FieldDescriptor;
    use rowmap_core::types::PrimitiveKind;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::builder("User")
            .table("users")
            .field(FieldDescriptor::new("id", PrimitiveKind::Integer32))
            .field(FieldDescriptor::new("name", PrimitiveKind::Text).column("user_name"))
            .field(FieldDescriptor::new("ghost", PrimitiveKind::Text))
            .build()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn binds_by_effective_name_in_table_order() {
        let m = ColumnMapping::build(&cols(&["user_name", "id"]), &descriptor(), false).unwrap();
        let columns: Vec<_> = m.bindings().iter().map(|b| b.column.as_str()).collect();
        assert_eq!(columns, vec!["user_name", "id"]);
        assert_eq!(m.binding("user_name").map(|b| b.field.as_str()), Some("name"));
        // Field without a live column is simply absent.
        assert!(m.bindings().iter().all(|b| b.field != "ghost"));
    }

    #[test]
    fn unmatched_columns_are_dropped() {
        let m = ColumnMapping::build(&cols(&["id", "legacy", "name"]), &descriptor(), false)
            .unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.unmapped_columns(), &["legacy".to_string(), "name".to_string()]);
        assert!(m.binding("legacy").is_none());
    }

    #[test]
    fn strict_mode_rejects_unmatched_columns() {
        let err = ColumnMapping::build(&cols(&["id", "legacy"]), &descriptor(), true).unwrap_err();
        assert_eq!(
            err,
            MappingError::UnmappedColumn {
                table: "users".into(),
                column: "legacy".into(),
            }
        );
    }

    #[test]
    fn first_matching_field_wins() {
        let d = TypeDescriptor::builder("T")
            .field(FieldDescriptor::new("a", PrimitiveKind::Text).column("x"))
            .field(FieldDescriptor::new("b", PrimitiveKind::Integer64).column("x"))
            .build();
        let m = ColumnMapping::build(&cols(&["x"]), &d, false).unwrap();
        assert_eq!(m.binding("x").map(|b| b.field.as_str()), Some("a"));
    }
}
