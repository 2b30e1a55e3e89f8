//! Convenience re-exports for common lock-system usage

pub use crate::lock::Lock;
