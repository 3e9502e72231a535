//! Query-by-example: an equality conjunction over the populated fields of a record.

use rowmap_core::traits::Record;
use rowmap_core::types::query::ALWAYS_TRUE;
use rowmap_core::types::{Predicate, RowValues};

use crate::codec;
use crate::mapping::ColumnMapping;

/// Build the predicate for `example`.
///
/// Only populated fields participate, in mapping order. An example with no
/// populated field yields the always-true clause and no parameters.
pub fn build<R: Record>(example: &R, mapping: &ColumnMapping) -> Predicate {
    from_values(&codec::encode(example, mapping))
}

/// Build the predicate for already-encoded column values.
pub fn from_values(values: &RowValues) -> Predicate {
    let mut clause = String::from(ALWAYS_TRUE);
    let mut params = Vec::with_capacity(values.len());
    for (column, value) in values.iter() {
        clause.push_str(" and ");
        clause.push_str(column);
        clause.push_str("=?");
        params.push(value.clone());
    }
    Predicate { clause, params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::impl_record;
    use rowmap_core::types::Value;

    #[derive(Debug, Default)]
    struct Person {
        id: Option<i32>,
        name: Option<String>,
    }

    impl_record!(Person {
        id: i32,
        name: String,
    });

    fn mapping() -> ColumnMapping {
        ColumnMapping::build(&["id".to_string(), "name".to_string()], &Person::descriptor(), false).unwrap()
    }

    #[test]
    fn name_only_example() {
        let p = build(
            &Person {
                name: Some("Ann".into()),
                ..Default::default()
            },
            &mapping(),
        );
        assert_eq!(p.clause, "1==1 and name=?");
        assert_eq!(p.params, vec![Value::Text("Ann".into())]);
    }

    #[test]
    fn empty_example_matches_all() {
        let p = build(&Person::default(), &mapping());
        assert_eq!(p.clause, "1==1");
        assert!(p.params.is_empty());
    }

    #[test]
    fn params_follow_clause_order() {
        let p = build(
            &Person {
                id: Some(3),
                name: Some("Bo".into()),
            },
            &mapping(),
        );
        assert_eq!(p.clause, "1==1 and id=? and name=?");
        assert_eq!(
            p.params,
            vec![Value::Integer32(3), Value::Text("Bo".into())]
        );
    }
}
