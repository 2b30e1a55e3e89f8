//! Generation-time context and deferred arguments
//!
//! Filter, ordering, and grouping arguments may depend on live connection
//! state (for example the current schema), which is only known when the query
//! is finally rendered. They are therefore stored as deferred computations and
//! resolved against a [`GenerationContext`] during SQL generation.

use crate::errors::QueryError;
use std::fmt;
use std::sync::Arc;

/// Connection-derived state available to deferred arguments at generation time
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    schema: Option<String>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current schema reported by the connection
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// The current schema, if the connection reported one
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Qualify a table name with the current schema, if any
    pub fn qualify_table(&self, table: &str) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, table),
            None => table.to_string(),
        }
    }
}

/// A replayable computation resolved against a [`GenerationContext`].
///
/// Values built from closures capture no mutable external state; resolving
/// never mutates the query that owns the deferred argument. Resolution may
/// fail, which propagates as [`QueryError::ContextEvaluation`] out of the
/// generation step.
pub struct Deferred<T> {
    compute: Arc<dyn Fn(&GenerationContext) -> Result<T, QueryError> + Send + Sync>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            compute: Arc::clone(&self.compute),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}

impl<T> Deferred<T> {
    /// Defer a context-dependent computation
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<T, QueryError> + Send + Sync + 'static,
    {
        Self {
            compute: Arc::new(compute),
        }
    }

    /// Evaluate against the generation context
    pub fn resolve(&self, context: &GenerationContext) -> Result<T, QueryError> {
        (self.compute)(context)
    }
}

impl<T> Deferred<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap an already-known value
    pub fn value(value: T) -> Self {
        Self::new(move |_| Ok(value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_value_resolves() {
        let deferred = Deferred::value(42);
        let context = GenerationContext::new();
        assert_eq!(deferred.resolve(&context).unwrap(), 42);
        // Replayable
        assert_eq!(deferred.resolve(&context).unwrap(), 42);
    }

    #[test]
    fn test_deferred_reads_context() {
        let deferred = Deferred::new(|ctx: &GenerationContext| {
            Ok(ctx.schema().unwrap_or("public").to_string())
        });
        let context = GenerationContext::new().with_schema("tenant_a");
        assert_eq!(deferred.resolve(&context).unwrap(), "tenant_a");
    }

    #[test]
    fn test_deferred_failure_propagates() {
        let deferred: Deferred<i32> = Deferred::new(|_| {
            Err(QueryError::ContextEvaluation("unknown column".to_string()))
        });
        let err = deferred.resolve(&GenerationContext::new()).unwrap_err();
        assert!(matches!(err, QueryError::ContextEvaluation(_)));
    }

    #[test]
    fn test_qualify_table() {
        let context = GenerationContext::new().with_schema("audit");
        assert_eq!(context.qualify_table("events"), "audit.events");
        assert_eq!(GenerationContext::new().qualify_table("events"), "events");
    }
}
