//! Capability traits at the two seams of the mapper.

pub mod engine;
pub mod record;

pub use engine::ISqlEngine;
pub use record::{FieldValue, Record};
