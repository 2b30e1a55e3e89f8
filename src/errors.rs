//! Error types for the Queryhaus crate
//!
//! This module contains all error types that can be returned by Queryhaus operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryhausError {
    #[error("Query error: {0}")]
    Query(#[from] query_object::QueryError),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
