use crate::query::Query;
use crate::selection::SelectField;

/// Requests whose selection can be replaced or extended
pub trait SelectionRequest: Sized {
    /// Replace the selection
    fn select(self, fields: Vec<SelectField>) -> Self;

    /// Append to the selection without replacing it
    fn annotated(self, fields: Vec<SelectField>) -> Self;
}

impl SelectionRequest for Query {
    fn select(self, fields: Vec<SelectField>) -> Self {
        Query::select(self, fields)
    }

    fn annotated(self, fields: Vec<SelectField>) -> Self {
        Query::annotated(self, fields)
    }
}
