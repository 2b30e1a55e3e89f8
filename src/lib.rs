//! # Queryhaus
//!
//! A modern Rust query-representation and SQL-generation core for
//! PostgreSQL-style databases: an immutable, composable model of a SELECT
//! query, a count-query rewriter that picks the cheapest correct counting
//! strategy, and a reusable read/write-locked container for shared state.
//!
//! ## Quick Start
//!
//! ```rust
//! use queryhaus::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let query = Query::table("users")
//!         .filter_value(SqlPredicate::eq("status", json!("active")))
//!         .order_by(vec![OrderingTerm::asc("name")])
//!         .limit(20, None);
//!
//!     let context = GenerationContext::new();
//!     let (sql, params) = SqlGenerator::generate(&query, &context)?;
//!     assert_eq!(
//!         sql,
//!         "SELECT * FROM users WHERE status = $1 ORDER BY name ASC LIMIT 20"
//!     );
//!     assert_eq!(params.len(), 1);
//!
//!     // Rewrite into a count query; the LIMIT forces the wrapping strategy.
//!     let counted = count_query(&query);
//!     let (count_sql, _) = SqlGenerator::generate(&counted, &context)?;
//!     assert!(count_sql.starts_with("SELECT COUNT(*) FROM ("));
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use errors::QueryhausError;
pub use query_object::{
    count_query, Association, CountShape, Deferred, GenerationContext, JoinCondition, JoinKind,
    Limit, OrderingTerm, Query, QueryError, Relation, RelationSource, SelectField, SortOrder,
    SqlGenerator, SqlPredicate,
};
pub use lock_system::Lock;

// Re-export internal crates for direct access to their full API
pub use lock_system;
pub use query_object;

// Re-export external dependencies used in public API
pub use serde_json;
