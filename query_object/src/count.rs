//! Count-query rewriting
//!
//! Rewrites a query into an equivalent query whose execution returns the
//! original's row count as a single integer, preferring the cheapest correct
//! strategy. Two strategies exist:
//!
//! - **in-place**: replace the outer query's own selection with a COUNT
//!   expression, reusing its FROM/WHERE. Single pass, cheapest.
//! - **wrapping**: nest the original query (unordered) as a subquery and
//!   count its rows from outside. Always correct, never the cheapest.
//!
//! The rewriter is a pure function over immutable values; it never executes
//! SQL. Preparing the result and extracting the integer belongs to the
//! execution layer.

use crate::query::Query;
use crate::selection::{CountShape, SelectField};

/// Produce a query that counts the rows `query` would return.
///
/// # Panics
///
/// Panics if the in-place branch is reached with an empty selection; that is
/// a bug in calling code, not a runtime condition.
pub fn count_query(query: &Query) -> Query {
    // GROUP BY changes row cardinality and LIMIT caps the scanned rows, so
    // neither survives a selection rewrite.
    if query.has_group() || query.limit_value().is_some() {
        tracing::debug!("[COUNT] wrapping: query has GROUP BY or LIMIT");
        return wrapped_count(query);
    }

    // A one-to-many join fans out parent rows; a flattened COUNT over the
    // joined rows would miscount.
    if query.relation().has_multiplying_child() {
        tracing::debug!("[COUNT] wrapping: row-multiplying join present");
        return wrapped_count(query);
    }

    // Rewriting the selection of a nested source is not guaranteed safe.
    if !query.relation().source().is_table() {
        tracing::debug!("[COUNT] wrapping: source is not a plain table");
        return wrapped_count(query);
    }

    let selection = query.relation().selection();
    assert!(
        !selection.is_empty(),
        "cannot count a query with an empty selection"
    );

    if selection.len() == 1 {
        // The default `SELECT *` yields one row per source row, so it
        // collapses like an explicit COUNT(*). Under DISTINCT whole rows are
        // deduplicated first and only the wrapping strategy counts correctly.
        let shape = selection[0].count_shape().or_else(|| {
            (matches!(selection[0], SelectField::All) && !query.is_distinct())
                .then_some(CountShape::All)
        });

        match shape {
            Some(CountShape::All) => {
                tracing::debug!("[COUNT] in-place: COUNT(*)");
                in_place_count(query, SelectField::count_all())
            }
            Some(CountShape::Distinct(column)) => {
                tracing::debug!("[COUNT] in-place: COUNT(DISTINCT {})", column);
                in_place_count(query, SelectField::count_distinct(column))
            }
            None => {
                tracing::debug!("[COUNT] wrapping: single non-count selection");
                wrapped_count(query)
            }
        }
    } else if query.is_distinct() {
        // DISTINCT over multiple expressions cannot collapse into COUNT(*).
        tracing::debug!("[COUNT] wrapping: DISTINCT over multiple expressions");
        wrapped_count(query)
    } else {
        tracing::debug!("[COUNT] in-place: COUNT(*) over multi-column selection");
        in_place_count(query, SelectField::count_all())
    }
}

/// `SELECT COUNT(*) FROM (<original query, unordered>)`
fn wrapped_count(query: &Query) -> Query {
    Query::subquery(query.clone().unordered())
        .select(vec![SelectField::count_all()])
        .expecting_single_result()
}

/// Reuse the original FROM/WHERE, counting in a single pass
fn in_place_count(query: &Query, count_field: SelectField) -> Query {
    let mut counted = query.clone().unordered().select(vec![count_field]);
    counted.is_distinct = false;
    counted.expecting_single_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{Association, RelationSource};
    use serde_json::json;

    use crate::expression::SqlPredicate;
    use crate::ordering::OrderingTerm;

    fn assert_wraps(counted: &Query) {
        match counted.relation().source() {
            RelationSource::Subquery { .. } => {}
            other => panic!("Expected Subquery source, got {:?}", other),
        }
        assert_eq!(counted.relation().selection(), &[SelectField::count_all()]);
    }

    #[test]
    fn test_limit_forces_wrapping() {
        let query = Query::table("users").limit(10, None);
        let counted = count_query(&query);

        assert_wraps(&counted);
        // The nested query is unordered but otherwise the original
        match counted.relation().source() {
            RelationSource::Subquery { query: inner, .. } => {
                assert!(inner.relation().ordering.is_none());
                assert_eq!(inner.limit_value().unwrap().count(), 10);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_group_forces_wrapping() {
        let query = Query::table("orders").group_by(vec!["customer_id".to_string()]);
        assert_wraps(&count_query(&query));
    }

    #[test]
    fn test_multiplying_join_forces_wrapping() {
        let query = Query::table("users").joining_optional(Association::to_many(
            "orders",
            "orders",
            "users.id",
            "orders.user_id",
        ));
        assert_wraps(&count_query(&query));
    }

    #[test]
    fn test_default_selection_counts_in_place() {
        let query = Query::table("users").filter_value(SqlPredicate::is_not_null("email"));
        let counted = count_query(&query);

        assert!(counted.relation().source().is_table());
        assert_eq!(counted.relation().selection(), &[SelectField::count_all()]);
    }

    #[test]
    fn test_distinct_default_selection_forces_wrapping() {
        // SELECT DISTINCT * deduplicates whole rows; COUNT(*) would overcount
        let query = Query::table("users").distinct();
        assert_wraps(&count_query(&query));
    }

    #[test]
    fn test_to_one_join_counts_in_place() {
        let query = Query::table("users").joining_required(Association::to_one(
            "profile",
            "profiles",
            "users.id",
            "profiles.user_id",
        ));
        let counted = count_query(&query);

        assert!(counted.relation().source().is_table());
        assert_eq!(counted.relation().selection(), &[SelectField::count_all()]);
    }

    #[test]
    fn test_subquery_source_forces_wrapping() {
        let inner = Query::table("events").filter_value(SqlPredicate::eq("kind", json!("login")));
        let query = Query::subquery(inner);
        assert_wraps(&count_query(&query));
    }

    #[test]
    fn test_count_all_shape_rewrites_in_place() {
        let query = Query::table("users")
            .select(vec![SelectField::count_all()])
            .order_by(vec![OrderingTerm::asc("name")]);
        let counted = count_query(&query);

        assert!(counted.relation().source().is_table());
        assert_eq!(counted.relation().selection(), &[SelectField::count_all()]);
        assert!(counted.relation().ordering.is_none());
        assert!(counted.expects_single_result());
    }

    #[test]
    fn test_count_distinct_shape_rewrites_in_place() {
        let query = Query::table("visits").select(vec![SelectField::count_distinct("visitor_id")]);
        let counted = count_query(&query);

        assert!(counted.relation().source().is_table());
        assert_eq!(
            counted.relation().selection(),
            &[SelectField::count_distinct("visitor_id")]
        );
    }

    #[test]
    fn test_single_plain_column_forces_wrapping() {
        let query = Query::table("users").select(vec![SelectField::field("email")]);
        assert_wraps(&count_query(&query));
    }

    #[test]
    fn test_multi_column_selection_counts_in_place() {
        let query = Query::table("users").select(vec![
            SelectField::field("id"),
            SelectField::field("email"),
        ]);
        let counted = count_query(&query);

        assert!(counted.relation().source().is_table());
        assert_eq!(counted.relation().selection(), &[SelectField::count_all()]);
    }

    #[test]
    fn test_distinct_multi_column_selection_forces_wrapping() {
        let query = Query::table("users")
            .select(vec![SelectField::field("id"), SelectField::field("email")])
            .distinct();
        assert_wraps(&count_query(&query));
    }

    #[test]
    fn test_in_place_clears_distinct() {
        let query = Query::table("users").select(vec![SelectField::count_all()]).distinct();
        let counted = count_query(&query);
        assert!(!counted.is_distinct());
    }

    #[test]
    fn test_rewrite_leaves_original_untouched() {
        let query = Query::table("users")
            .select(vec![SelectField::field("id"), SelectField::field("email")])
            .order_by(vec![OrderingTerm::asc("email")]);
        let _ = count_query(&query);

        assert_eq!(query.relation().selection().len(), 2);
        assert!(query.relation().ordering.is_some());
        assert!(!query.expects_single_result());
    }

    #[test]
    #[should_panic(expected = "empty selection")]
    fn test_empty_selection_panics() {
        let query = Query::table("users").select(vec![]);
        let _ = count_query(&query);
    }
}
