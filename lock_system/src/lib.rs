//! Lock system for shared mutable state
//!
//! This crate provides a reusable read/write-locked container used across the
//! toolkit to guard mutable shared state such as counters and caches.

pub mod lock;
pub mod prelude;

pub use lock::Lock;
