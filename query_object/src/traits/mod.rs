//! Capability traits for query values
//!
//! Call sites rarely need the whole query algebra; most operate on "anything
//! that supports filtering" or "anything that supports ordering". Each concern
//! gets its own narrow trait, and [`Query`](crate::query::Query) implements
//! all of them.

pub mod aggregating;
pub mod filtering;
pub mod joining;
pub mod ordering;
pub mod selection;

// Re-export all public items for convenience
pub use aggregating::AggregatingRequest;
pub use filtering::FilteredRequest;
pub use joining::JoinableRequest;
pub use ordering::OrderedRequest;
pub use selection::SelectionRequest;
