//! Convenience re-exports for common Queryhaus usage
//!
//! This prelude module re-exports the most commonly used items from the Queryhaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use queryhaus::prelude::*;
//!
//! // Now you have access to all the common Queryhaus types and traits
//! ```

// Core Queryhaus components
pub use crate::errors::QueryhausError;

// Re-export commonly used query-object types for convenience
pub use query_object::prelude::*;

// Re-export query_object module for call sites that need the full API
pub use query_object;

// Re-export the lock system
pub use lock_system::prelude::*;
