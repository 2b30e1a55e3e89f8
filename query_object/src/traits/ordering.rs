use crate::context::GenerationContext;
use crate::errors::QueryError;
use crate::ordering::OrderingTerm;
use crate::query::Query;

/// Requests with replaceable, reversible ordering
pub trait OrderedRequest: Sized {
    /// Replace the ordering terms with a deferred list
    fn order<F>(self, orderings: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<Vec<OrderingTerm>, QueryError> + Send + Sync + 'static;

    /// Replace the ordering terms with an already-known list
    fn order_by(self, terms: Vec<OrderingTerm>) -> Self;

    /// Reverse the direction of every ordering term
    fn reversed(self) -> Self;

    /// Clear the ordering terms
    fn unordered(self) -> Self;
}

impl OrderedRequest for Query {
    fn order<F>(self, orderings: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<Vec<OrderingTerm>, QueryError> + Send + Sync + 'static,
    {
        Query::order(self, orderings)
    }

    fn order_by(self, terms: Vec<OrderingTerm>) -> Self {
        Query::order_by(self, terms)
    }

    fn reversed(self) -> Self {
        Query::reversed(self)
    }

    fn unordered(self) -> Self {
        Query::unordered(self)
    }
}
