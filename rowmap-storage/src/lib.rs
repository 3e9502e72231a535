//! # rowmap-storage
//!
//! SQLite-backed table gateway for record types described by `rowmap-core`.
//! Synthesizes `CREATE TABLE` once per gateway, caches the column mapping,
//! encodes/decodes rows and builds query-by-example predicates.

pub mod codec;
pub mod engine;
pub mod gateway;
pub mod mapping;
pub mod pragmas;
pub mod predicate;
pub mod schema;

pub use engine::SqliteEngine;
pub use gateway::{QueryOptions, QueryOutcome, RowFailure, TableGateway};
pub use mapping::{ColumnBinding, ColumnMapping};
