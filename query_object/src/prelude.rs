//! Convenience re-exports for common query-object usage

// Query values and the algebra surface
pub use crate::query::{Limit, Query};
pub use crate::relation::{Association, JoinCondition, JoinKind, Relation, RelationSource};

// Capability traits
pub use crate::traits::{
    AggregatingRequest, FilteredRequest, JoinableRequest, OrderedRequest, SelectionRequest,
};

// Expressions, selections, ordering terms
pub use crate::expression::{SqlOperator, SqlPredicate};
pub use crate::ordering::{OrderingTerm, SortOrder};
pub use crate::selection::{AggregateFunction, CountShape, SelectField};

// Generation
pub use crate::context::{Deferred, GenerationContext};
pub use crate::count::count_query;
pub use crate::sql_generation::SqlGenerator;

// Error types
pub use crate::errors::QueryError;

// Common external dependencies that are frequently used
pub use serde_json::{json, Value};
