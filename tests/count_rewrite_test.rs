//! End-to-end tests for count-query rewriting through the public API

use queryhaus::prelude::*;

fn generate(query: &Query) -> (String, Vec<Value>) {
    SqlGenerator::generate(query, &GenerationContext::new()).unwrap()
}

#[test]
fn test_plain_table_count_collapses_in_place() {
    let query = Query::table("users")
        .filter_value(SqlPredicate::eq("status", json!("active")))
        .order_by(vec![OrderingTerm::asc("name")]);

    let counted = count_query(&query.clone().select(vec![SelectField::count_all()]));
    let (sql, params) = generate(&counted);

    assert_eq!(sql, "SELECT COUNT(*) FROM users WHERE status = $1");
    assert_eq!(params, vec![json!("active")]);
}

#[test]
fn test_limited_query_count_wraps() {
    let query = Query::table("users")
        .order_by(vec![OrderingTerm::asc("name")])
        .limit(10, Some(20));

    let counted = count_query(&query);
    let (sql, _) = generate(&counted);

    // The original keeps its LIMIT inside the subquery, loses its ordering,
    // and is counted from outside.
    assert_eq!(
        sql,
        "SELECT COUNT(*) FROM (SELECT * FROM users LIMIT 10 OFFSET 20)"
    );
}

#[test]
fn test_grouped_query_count_wraps() {
    let query = Query::table("orders")
        .select(vec![SelectField::field("customer_id")])
        .group_by(vec!["customer_id".to_string()])
        .having(SqlPredicate::gt("COUNT(*)", json!(3)));

    let counted = count_query(&query);
    let (sql, params) = generate(&counted);

    assert_eq!(
        sql,
        "SELECT COUNT(*) FROM (SELECT customer_id FROM orders \
         GROUP BY customer_id HAVING COUNT(*) > $1)"
    );
    assert_eq!(params, vec![json!(3)]);
}

#[test]
fn test_one_to_many_join_count_wraps() {
    let query = Query::table("users").joining_optional(Association::to_many(
        "orders",
        "orders",
        "users.id",
        "orders.user_id",
    ));

    let counted = count_query(&query);
    let (sql, _) = generate(&counted);

    assert_eq!(
        sql,
        "SELECT COUNT(*) FROM (SELECT * FROM users \
         LEFT JOIN orders ON users.id = orders.user_id)"
    );
}

#[test]
fn test_to_one_join_count_stays_in_place() {
    let query = Query::table("users").joining_required(Association::to_one(
        "profile",
        "profiles",
        "users.id",
        "profiles.user_id",
    ));

    let counted = count_query(&query);
    let (sql, _) = generate(&counted);

    assert_eq!(
        sql,
        "SELECT COUNT(*) FROM users \
         INNER JOIN profiles ON users.id = profiles.user_id"
    );
}

#[test]
fn test_count_distinct_survives_rewrite() {
    let query = Query::table("visits")
        .select(vec![SelectField::count_distinct("visitor_id")])
        .order_by(vec![OrderingTerm::desc("occurred_at")]);

    let counted = count_query(&query);
    let (sql, _) = generate(&counted);

    assert_eq!(sql, "SELECT COUNT(DISTINCT visitor_id) FROM visits");
}

#[test]
fn test_distinct_multi_column_count_wraps() {
    let query = Query::table("users")
        .select(vec![
            SelectField::field("first_name"),
            SelectField::field("last_name"),
        ])
        .distinct();

    let counted = count_query(&query);
    let (sql, _) = generate(&counted);

    assert_eq!(
        sql,
        "SELECT COUNT(*) FROM (SELECT DISTINCT first_name, last_name FROM users)"
    );
}

#[test]
fn test_counting_leaves_original_executable() {
    let query = Query::table("users")
        .filter_value(SqlPredicate::is_not_null("email"))
        .order_by(vec![OrderingTerm::asc("email")])
        .limit(5, None);

    let _ = count_query(&query);
    let (sql, _) = generate(&query);

    assert_eq!(
        sql,
        "SELECT * FROM users WHERE email IS NOT NULL ORDER BY email ASC LIMIT 5"
    );
}

#[test]
fn test_deferred_filter_resolves_inside_count_subquery() {
    let query = Query::table("events")
        .filter(|ctx: &GenerationContext| {
            Ok(SqlPredicate::eq(
                "tenant",
                json!(ctx.schema().unwrap_or("public")),
            ))
        })
        .limit(100, None);

    let counted = count_query(&query);
    let context = GenerationContext::new().with_schema("tenant_b");
    let (sql, params) = SqlGenerator::generate(&counted, &context).unwrap();

    assert_eq!(
        sql,
        "SELECT COUNT(*) FROM (SELECT * FROM tenant_b.events WHERE tenant = $1 LIMIT 100)"
    );
    assert_eq!(params, vec![json!("tenant_b")]);
}
