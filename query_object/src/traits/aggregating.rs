use crate::context::GenerationContext;
use crate::errors::QueryError;
use crate::expression::SqlPredicate;
use crate::query::Query;

/// Requests that support grouping and group filtering
pub trait AggregatingRequest: Sized {
    /// Set GROUP BY expressions from a deferred list
    fn group<F>(self, expressions: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<Vec<String>, QueryError> + Send + Sync + 'static;

    /// Set GROUP BY expressions from an already-known list
    fn group_by(self, columns: Vec<String>) -> Self;

    /// Append one HAVING predicate (flat conjunction)
    fn having(self, predicate: SqlPredicate) -> Self;
}

impl AggregatingRequest for Query {
    fn group<F>(self, expressions: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<Vec<String>, QueryError> + Send + Sync + 'static,
    {
        Query::group(self, expressions)
    }

    fn group_by(self, columns: Vec<String>) -> Self {
        Query::group_by(self, columns)
    }

    fn having(self, predicate: SqlPredicate) -> Self {
        Query::having(self, predicate)
    }
}
