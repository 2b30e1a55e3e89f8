use crate::context::GenerationContext;
use crate::errors::QueryError;
use crate::expression::SqlPredicate;
use crate::query::Query;

/// Requests that can be narrowed by predicates
pub trait FilteredRequest: Sized {
    /// AND a deferred predicate into the filter
    fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<SqlPredicate, QueryError> + Send + Sync + 'static;

    /// AND an already-known predicate into the filter
    fn filter_value(self, predicate: SqlPredicate) -> Self;
}

impl FilteredRequest for Query {
    fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<SqlPredicate, QueryError> + Send + Sync + 'static,
    {
        Query::filter(self, predicate)
    }

    fn filter_value(self, predicate: SqlPredicate) -> Self {
        Query::filter_value(self, predicate)
    }
}
