//! Fast hash collections used for column lookups.

pub use rustc_hash::{FxHashMap, FxHashSet};
