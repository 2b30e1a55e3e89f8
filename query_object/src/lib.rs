//! Query Object - Query representation core for Queryhaus
//!
//! This crate provides the immutable query model (relations, selections,
//! predicates, ordering, grouping, joins), the count-query rewriter, and the
//! SQL generation step that renders query values into SQL text with `$n`
//! bound parameters.

pub mod context;
pub mod count;
pub mod errors;
pub mod expression;
pub mod ordering;
pub mod prelude;
pub mod query;
pub mod relation;
pub mod selection;
pub mod sql_generation;
pub mod traits;


pub use context::{Deferred, GenerationContext};
pub use count::count_query;
pub use errors::QueryError;
pub use expression::{LogicalOperator, SqlCondition, SqlOperator, SqlPredicate};
pub use ordering::{OrderingTerm, SortOrder};
pub use query::{Limit, Query};
pub use relation::{
    Association, ChildRelation, JoinCondition, JoinKind, Relation, RelationSource,
};
pub use selection::{AggregateFunction, CountShape, SelectField};
pub use sql_generation::SqlGenerator;
pub use traits::{
    AggregatingRequest, FilteredRequest, JoinableRequest, OrderedRequest, SelectionRequest,
};
