//! Integration tests for the shared lock and the capability-trait surface

use queryhaus::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn test_lock_guards_query_cache() {
    // Typical toolkit usage: a shared statement cache keyed by generated SQL.
    let cache: Arc<Lock<Vec<String>>> = Arc::new(Lock::new(Vec::new()));
    let context = GenerationContext::new();

    let mut handles = Vec::new();
    for i in 0..4 {
        let cache = Arc::clone(&cache);
        let context = context.clone();
        handles.push(thread::spawn(move || {
            let query = Query::table("users").filter_value(SqlPredicate::eq("id", json!(i)));
            let (sql, _) = SqlGenerator::generate(&query, &context).unwrap();
            cache.with_lock(|entries| entries.push(sql));
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.read(|entries| entries.len()), 4);
}

#[test]
fn test_lock_counter_across_threads() {
    let executed: Arc<Lock<i64>> = Arc::new(Lock::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let executed = Arc::clone(&executed);
        handles.push(thread::spawn(move || {
            for _ in 0..500 {
                executed.increment();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(executed.get(), 4000);
}

#[test]
fn test_capability_traits_compose_generically() {
    // A call site that only needs filtering and ordering
    fn newest_active<R>(request: R) -> R
    where
        R: FilteredRequest + OrderedRequest,
    {
        request
            .filter_value(SqlPredicate::eq("status", json!("active")))
            .order_by(vec![OrderingTerm::desc("created_at")])
    }

    let query = newest_active(Query::table("users"));
    let (sql, _) = SqlGenerator::generate(&query, &GenerationContext::new()).unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM users WHERE status = $1 ORDER BY created_at DESC"
    );
}
