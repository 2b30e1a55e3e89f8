//! Predicate expressions
//!
//! This module provides the WHERE/HAVING predicate model.

use serde_json::Value;

/// Comparison operators usable in predicates
#[derive(Debug, Clone, PartialEq)]
pub enum SqlOperator {
    Eq,        // =
    Ne,        // !=
    Gt,        // >
    Gte,       // >=
    Lt,        // <
    Lte,       // <=
    Like,      // LIKE
    ILike,     // ILIKE (case insensitive)
    In,        // IN
    NotIn,     // NOT IN
    IsNull,    // IS NULL
    IsNotNull, // IS NOT NULL
}

/// Single comparison against a column
#[derive(Debug, Clone, PartialEq)]
pub struct SqlCondition {
    pub column: String,
    pub operator: SqlOperator,
    pub value: Option<Value>, // None for IS NULL/IS NOT NULL
}

/// Logical operators for combining predicates
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalOperator {
    And,
    Or,
}

/// Predicate tree rendered into WHERE/HAVING clauses
#[derive(Debug, Clone, PartialEq)]
pub enum SqlPredicate {
    Condition(SqlCondition),
    Group {
        operator: LogicalOperator,
        predicates: Vec<SqlPredicate>,
    },
}

impl SqlPredicate {
    /// Create a simple condition
    pub fn condition(column: &str, operator: SqlOperator, value: Option<Value>) -> Self {
        Self::Condition(SqlCondition {
            column: column.to_string(),
            operator,
            value,
        })
    }

    /// Create AND group
    pub fn and(predicates: Vec<SqlPredicate>) -> Self {
        Self::Group {
            operator: LogicalOperator::And,
            predicates,
        }
    }

    /// Create OR group
    pub fn or(predicates: Vec<SqlPredicate>) -> Self {
        Self::Group {
            operator: LogicalOperator::Or,
            predicates,
        }
    }

    /// Equal condition
    pub fn eq(column: &str, value: Value) -> Self {
        Self::condition(column, SqlOperator::Eq, Some(value))
    }

    /// Not equal condition
    pub fn ne(column: &str, value: Value) -> Self {
        Self::condition(column, SqlOperator::Ne, Some(value))
    }

    /// Greater than condition
    pub fn gt(column: &str, value: Value) -> Self {
        Self::condition(column, SqlOperator::Gt, Some(value))
    }

    /// Greater than or equal condition
    pub fn gte(column: &str, value: Value) -> Self {
        Self::condition(column, SqlOperator::Gte, Some(value))
    }

    /// Less than condition
    pub fn lt(column: &str, value: Value) -> Self {
        Self::condition(column, SqlOperator::Lt, Some(value))
    }

    /// Less than or equal condition
    pub fn lte(column: &str, value: Value) -> Self {
        Self::condition(column, SqlOperator::Lte, Some(value))
    }

    /// LIKE condition
    pub fn like(column: &str, pattern: &str) -> Self {
        Self::condition(
            column,
            SqlOperator::Like,
            Some(Value::String(pattern.to_string())),
        )
    }

    /// ILIKE condition (case insensitive)
    pub fn ilike(column: &str, pattern: &str) -> Self {
        Self::condition(
            column,
            SqlOperator::ILike,
            Some(Value::String(pattern.to_string())),
        )
    }

    /// IN condition
    pub fn in_values(column: &str, values: Vec<Value>) -> Self {
        Self::condition(column, SqlOperator::In, Some(Value::Array(values)))
    }

    /// NOT IN condition
    pub fn not_in_values(column: &str, values: Vec<Value>) -> Self {
        Self::condition(column, SqlOperator::NotIn, Some(Value::Array(values)))
    }

    /// IS NULL condition
    pub fn is_null(column: &str) -> Self {
        Self::condition(column, SqlOperator::IsNull, None)
    }

    /// IS NOT NULL condition
    pub fn is_not_null(column: &str) -> Self {
        Self::condition(column, SqlOperator::IsNotNull, None)
    }
}
