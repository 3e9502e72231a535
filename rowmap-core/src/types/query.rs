//! Predicates and paging windows passed to the engine.

use super::value::Value;

/// Always-true base every predicate clause starts from.
pub const ALWAYS_TRUE: &str = "1==1";

/// An equality-conjunction clause with positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub clause: String,
    pub params: Vec<Value>,
}

impl Predicate {
    /// The clause that matches every row.
    pub fn match_all() -> Self {
        Self {
            clause: ALWAYS_TRUE.to_string(),
            params: Vec::new(),
        }
    }

    pub fn is_match_all(&self) -> bool {
        self.params.is_empty()
    }
}

/// `LIMIT <offset>, <limit>` window for a query.
///
/// The default window is offset 1, limit 100, which skips the first matching
/// row. Use [`PageWindow::first_page`] for a window starting at row zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    pub const DEFAULT_OFFSET: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 100;

    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    pub fn first_page(limit: u64) -> Self {
        Self { offset: 0, limit }
    }

    /// The `LIMIT` clause body, e.g. `1, 100`.
    pub fn to_limit_clause(&self) -> String {
        format!("{}, {}", self.offset, self.limit)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            offset: Self::DEFAULT_OFFSET,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_preserves_offset_one() {
        let window = PageWindow::default();
        assert_eq!(window.to_limit_clause(), "1, 100");
        assert_eq!(PageWindow::first_page(10).to_limit_clause(), "0, 10");
    }

    #[test]
    fn match_all_has_no_params() {
        let p = Predicate::match_all();
        assert_eq!(p.clause, "1==1");
        assert!(p.is_match_all());
    }
}
