use crate::query::Query;
use crate::relation::Association;

/// Requests that can join associations resolved by the association layer
pub trait JoinableRequest: Sized {
    /// INNER JOIN, child columns selected
    fn including_required(self, association: Association) -> Self;

    /// LEFT JOIN, child columns selected
    fn including_optional(self, association: Association) -> Self;

    /// LEFT JOIN keeping every child row, child columns selected
    fn including_all(self, association: Association) -> Self;

    /// INNER JOIN, join only
    fn joining_required(self, association: Association) -> Self;

    /// LEFT JOIN, join only
    fn joining_optional(self, association: Association) -> Self;

    /// LEFT JOIN keeping every child row, join only
    fn joining_all(self, association: Association) -> Self;
}

impl JoinableRequest for Query {
    fn including_required(self, association: Association) -> Self {
        Query::including_required(self, association)
    }

    fn including_optional(self, association: Association) -> Self {
        Query::including_optional(self, association)
    }

    fn including_all(self, association: Association) -> Self {
        Query::including_all(self, association)
    }

    fn joining_required(self, association: Association) -> Self {
        Query::joining_required(self, association)
    }

    fn joining_optional(self, association: Association) -> Self {
        Query::joining_optional(self, association)
    }

    fn joining_all(self, association: Association) -> Self {
        Query::joining_all(self, association)
    }
}
