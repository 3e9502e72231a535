//! Schema synthesis: descriptor → `CREATE TABLE IF NOT EXISTS`.

use rowmap_core::descriptor::TypeDescriptor;
use rowmap_core::errors::MappingError;
use rowmap_core::types::collections::FxHashSet;
use rowmap_core::types::FieldKind;

/// SQLite keywords that cannot stand unquoted as a table or column name.
/// Keywords the parser falls back to identifiers for (`key`, `first`, ...)
/// are allowed.
const RESERVED_WORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "AUTOINCREMENT", "BETWEEN", "CASE",
    "CHECK", "COLLATE", "COMMIT", "CONSTRAINT", "CREATE", "CURRENT_DATE",
    "CURRENT_TIME", "CURRENT_TIMESTAMP", "DEFAULT", "DEFERRABLE", "DELETE",
    "DISTINCT", "DROP", "ELSE", "ESCAPE", "EXCEPT", "EXISTS", "FOREIGN", "FROM",
    "GROUP", "HAVING", "IN", "INDEX", "INDEXED", "INSERT", "INTERSECT", "INTO",
    "IS", "ISNULL", "JOIN", "LIMIT", "NOT", "NOTHING", "NOTNULL", "NULL", "ON",
    "OR", "ORDER", "PRIMARY", "REFERENCES", "RETURNING", "SELECT", "SET",
    "TABLE", "THEN", "TO", "TRANSACTION", "UNION", "UNIQUE", "UPDATE", "USING",
    "VALUES", "WHEN", "WHERE",
];

/// Whether `name` is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`) and
/// not a reserved word.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(name))
}

fn check_identifier(name: &str) -> Result<(), MappingError> {
    if is_plain_identifier(name) {
        Ok(())
    } else {
        Err(MappingError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Build the DDL for a record type.
///
/// Columns follow the descriptor's field order. The first field of an
/// unsupported kind aborts synthesis; no partial statement is produced.
pub fn synthesize(descriptor: &TypeDescriptor) -> Result<String, MappingError> {
    let table = descriptor.table_name();
    check_identifier(table)?;

    let mut seen = FxHashSet::default();
    let mut columns = Vec::with_capacity(descriptor.fields().len());
    for field in descriptor.fields() {
        let kind = match field.kind() {
            FieldKind::Primitive(kind) => *kind,
            FieldKind::Unsupported { type_name } => {
                return Err(MappingError::UnsupportedFieldKind {
                    type_name: descriptor.type_name().to_string(),
                    field: field.identifier().to_string(),
                    kind: type_name.clone(),
                });
            }
        };
        let column = field.effective_name();
        check_identifier(column)?;
        // SQLite column names are case-insensitive.
        if !seen.insert(column.to_ascii_lowercase()) {
            return Err(MappingError::DuplicateColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
        columns.push(format!("{column} {}", kind.storage_type()));
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {table}({})",
        columns.join(", ")
    ))
}
