//! Value-level types shared by the mapper and the engine boundary.

pub mod collections;
pub mod kind;
pub mod query;
pub mod row;
pub mod value;

pub use kind::{FieldKind, PrimitiveKind};
pub use query::{PageWindow, Predicate};
pub use row::{RowValues, StoredRow};
pub use value::{StoredValue, Value};
