//! Immutable query values
//!
//! A [`Query`] wraps a [`Relation`] and adds distinctness, a single-result
//! hint, grouping, having, and limit. Every algebra operation consumes the
//! receiver and returns a new value; callers that want to keep the original
//! clone it first. No operation ever mutates state reachable from another
//! live query, so values can be freely shared across threads.

use crate::context::{Deferred, GenerationContext};
use crate::errors::QueryError;
use crate::expression::SqlPredicate;
use crate::ordering::OrderingTerm;
use crate::relation::{Association, JoinKind, Relation};
use crate::selection::SelectField;

/// LIMIT with optional OFFSET.
///
/// An offset is only constructible alongside a count, matching SQL's grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    pub(crate) count: i64,
    pub(crate) offset: Option<i64>,
}

impl Limit {
    /// Create a limit. Both values must be non-negative.
    pub fn new(count: i64, offset: Option<i64>) -> Self {
        assert!(count >= 0, "limit count must be non-negative, got {}", count);
        if let Some(offset) = offset {
            assert!(offset >= 0, "limit offset must be non-negative, got {}", offset);
        }
        Self { count, offset }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Render the clause body: `"5 OFFSET 2"` or `"5"`
    pub fn sql(&self) -> String {
        match self.offset {
            Some(offset) => format!("{} OFFSET {}", self.count, offset),
            None => self.count.to_string(),
        }
    }
}

/// An immutable SELECT query value
#[derive(Debug, Clone)]
pub struct Query {
    pub(crate) relation: Relation,
    pub(crate) is_distinct: bool,
    pub(crate) expects_single_result: bool,
    pub(crate) group_expressions: Option<Deferred<Vec<String>>>,
    pub(crate) having_expressions: Vec<SqlPredicate>,
    pub(crate) limit: Option<Limit>,
}

impl Query {
    /// Query over a plain table, selecting all columns
    pub fn table(name: impl Into<String>) -> Self {
        Self::from_relation(Relation::table(name))
    }

    /// Query over a nested query
    pub fn subquery(query: Query) -> Self {
        Self::from_relation(Relation::subquery(query))
    }

    /// Query over an already-built relation
    pub fn from_relation(relation: Relation) -> Self {
        Self {
            relation,
            is_distinct: false,
            expects_single_result: false,
            group_expressions: None,
            having_expressions: Vec::new(),
            limit: None,
        }
    }

    /// The wrapped relation
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn is_distinct(&self) -> bool {
        self.is_distinct
    }

    pub fn expects_single_result(&self) -> bool {
        self.expects_single_result
    }

    pub fn has_group(&self) -> bool {
        self.group_expressions.is_some()
    }

    pub fn having_expressions(&self) -> &[SqlPredicate] {
        &self.having_expressions
    }

    pub fn limit_value(&self) -> Option<&Limit> {
        self.limit.as_ref()
    }

    /// Request DISTINCT rows
    pub fn distinct(mut self) -> Self {
        self.is_distinct = true;
        self
    }

    /// Hint that at most one row is expected.
    ///
    /// Affects downstream fetch optimization only; row generation is
    /// unchanged.
    pub fn expecting_single_result(mut self) -> Self {
        self.expects_single_result = true;
        self
    }

    /// Set LIMIT and optional OFFSET. Both must be non-negative.
    pub fn limit(mut self, count: i64, offset: Option<i64>) -> Self {
        self.limit = Some(Limit::new(count, offset));
        self
    }

    /// Alias the relation's source.
    ///
    /// Group and having expressions are deliberately left untouched: they are
    /// qualified later, in a single pass over the fully assembled query,
    /// during final SQL generation.
    pub fn qualified(mut self, alias: impl Into<String>) -> Self {
        self.relation = self.relation.qualified(alias);
        self
    }

    /// Replace the relation's selection
    pub fn select(mut self, fields: Vec<SelectField>) -> Self {
        self.relation = self.relation.select(fields);
        self
    }

    /// Append to the relation's selection, preserving existing entries' order
    pub fn annotated(mut self, fields: Vec<SelectField>) -> Self {
        self.relation = self.relation.annotated(fields);
        self
    }

    /// AND a deferred predicate into the relation's filter.
    ///
    /// The closure runs once, at generation time, against the live
    /// [`GenerationContext`], and may fail with a recoverable error.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<SqlPredicate, QueryError> + Send + Sync + 'static,
    {
        self.relation = self.relation.filter(Deferred::new(predicate));
        self
    }

    /// AND an already-known predicate into the relation's filter
    pub fn filter_value(mut self, predicate: SqlPredicate) -> Self {
        self.relation = self.relation.filter(Deferred::value(predicate));
        self
    }

    /// Replace the ordering terms with a deferred list
    pub fn order<F>(mut self, orderings: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<Vec<OrderingTerm>, QueryError> + Send + Sync + 'static,
    {
        self.relation = self.relation.order(Deferred::new(orderings));
        self
    }

    /// Replace the ordering terms with an already-known list
    pub fn order_by(mut self, terms: Vec<OrderingTerm>) -> Self {
        self.relation = self.relation.order(Deferred::value(terms));
        self
    }

    /// Reverse the direction of every ordering term
    pub fn reversed(mut self) -> Self {
        self.relation = self.relation.reversed();
        self
    }

    /// Clear the ordering terms
    pub fn unordered(mut self) -> Self {
        self.relation = self.relation.unordered();
        self
    }

    /// Set GROUP BY expressions from a deferred list.
    ///
    /// A list that resolves empty at generation time collapses to "no GROUP
    /// BY": an empty grouping is never rendered.
    pub fn group<F>(mut self, expressions: F) -> Self
    where
        F: Fn(&GenerationContext) -> Result<Vec<String>, QueryError> + Send + Sync + 'static,
    {
        self.group_expressions = Some(Deferred::new(expressions));
        self
    }

    /// Set GROUP BY expressions from an already-known list.
    ///
    /// An empty list clears the grouping instead of storing an empty one.
    pub fn group_by(mut self, columns: Vec<String>) -> Self {
        if columns.is_empty() {
            self.group_expressions = None;
        } else {
            self.group_expressions = Some(Deferred::value(columns));
        }
        self
    }

    /// Append one HAVING predicate.
    ///
    /// Predicates are kept as a flat list and conjoined with AND at render
    /// time, so repeated calls produce a flat conjunction rather than a
    /// deepening nested tree. HAVING renders even without GROUP BY.
    pub fn having(mut self, predicate: SqlPredicate) -> Self {
        self.having_expressions.push(predicate);
        self
    }

    /// Join an association with INNER JOIN, selecting its columns
    pub fn including_required(mut self, association: Association) -> Self {
        self.relation = self.relation.including(association, JoinKind::Required);
        self
    }

    /// Join an association with LEFT JOIN, selecting its columns
    pub fn including_optional(mut self, association: Association) -> Self {
        self.relation = self.relation.including(association, JoinKind::Optional);
        self
    }

    /// Join an association with LEFT JOIN, selecting its columns and keeping
    /// every child row
    pub fn including_all(mut self, association: Association) -> Self {
        self.relation = self.relation.including(association, JoinKind::Optional);
        self
    }

    /// Join an association with INNER JOIN without selecting its columns
    pub fn joining_required(mut self, association: Association) -> Self {
        self.relation = self.relation.joining(association, JoinKind::Required);
        self
    }

    /// Join an association with LEFT JOIN without selecting its columns
    pub fn joining_optional(mut self, association: Association) -> Self {
        self.relation = self.relation.joining(association, JoinKind::Optional);
        self
    }

    /// Join an association with LEFT JOIN without selecting its columns,
    /// keeping every child row
    pub fn joining_all(mut self, association: Association) -> Self {
        self.relation = self.relation.joining(association, JoinKind::Optional);
        self
    }
}
