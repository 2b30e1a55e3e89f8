//! SQL generation
//!
//! Renders an immutable [`Query`] into SQL text and bound parameters.
//! Deferred filter/ordering/grouping arguments are resolved here, against the
//! [`GenerationContext`], exactly once per generation pass. Placeholders use
//! Postgres-style `$n` numbering with a single counter threaded across WHERE,
//! HAVING, and nested subqueries.

use crate::context::GenerationContext;
use crate::errors::QueryError;
use crate::expression::{LogicalOperator, SqlCondition, SqlOperator, SqlPredicate};
use crate::ordering::OrderingTerm;
use crate::query::{Limit, Query};
use crate::relation::{ChildRelation, JoinCondition, Relation, RelationSource};
use crate::selection::SelectField;
use serde_json::Value;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Render a query into SQL text and bound parameter values
    pub fn generate(
        query: &Query,
        context: &GenerationContext,
    ) -> Result<(String, Vec<Value>), QueryError> {
        let mut values = Vec::new();
        let mut param_counter = 1;
        let sql = Self::generate_inner(query, context, &mut values, &mut param_counter)?;

        tracing::debug!("[GENERATE] SQL: {}", sql);
        tracing::debug!("[GENERATE] param count: {}", values.len());

        Ok((sql, values))
    }

    fn generate_inner(
        query: &Query,
        context: &GenerationContext,
        values: &mut Vec<Value>,
        param_counter: &mut i32,
    ) -> Result<String, QueryError> {
        let relation = query.relation();

        let mut sql = String::from("SELECT ");
        if query.is_distinct() {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&Self::build_select_clause(relation));

        sql.push_str(" FROM ");
        sql.push_str(&Self::build_source_sql(
            relation.source(),
            context,
            values,
            param_counter,
        )?);

        let join_clause = Self::build_join_clause(relation.children(), context)?;
        if !join_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&join_clause);
        }

        // WHERE: resolve each deferred predicate, conjoin with AND
        let mut predicates = Vec::with_capacity(relation.predicates.len());
        for deferred in &relation.predicates {
            predicates.push(deferred.resolve(context)?);
        }
        if !predicates.is_empty() {
            let conditions_sql = predicates
                .iter()
                .map(|predicate| Self::build_predicate_sql(predicate, values, param_counter))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&conditions_sql);
        }

        // GROUP BY: an empty resolved list means no clause
        if let Some(group) = &query.group_expressions {
            let columns = group.resolve(context)?;
            if !columns.is_empty() {
                sql.push_str(" GROUP BY ");
                sql.push_str(&columns.join(", "));
            }
        }

        // HAVING renders even without GROUP BY; SQL permits it
        if !query.having_expressions().is_empty() {
            let having_sql = query
                .having_expressions()
                .iter()
                .map(|predicate| Self::build_predicate_sql(predicate, values, param_counter))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" HAVING ");
            sql.push_str(&having_sql);
        }

        if let Some(ordering) = &relation.ordering {
            let mut terms = ordering.resolve(context)?;
            if relation.ordering_reversed {
                terms = terms.into_iter().map(OrderingTerm::reversed).collect();
            }
            let order_clause = Self::build_order_clause(&terms);
            if !order_clause.is_empty() {
                sql.push(' ');
                sql.push_str(&order_clause);
            }
        }

        if let Some(limit) = query.limit_value() {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.sql());
        }

        Ok(sql)
    }

    fn build_source_sql(
        source: &RelationSource,
        context: &GenerationContext,
        values: &mut Vec<Value>,
        param_counter: &mut i32,
    ) -> Result<String, QueryError> {
        match source {
            RelationSource::Table { name, alias } => {
                let table = context.qualify_table(name);
                Ok(match alias {
                    Some(alias) => format!("{} AS {}", table, alias),
                    None => table,
                })
            }
            RelationSource::Subquery { query, alias } => {
                let inner = Self::generate_inner(query, context, values, param_counter)?;
                Ok(match alias {
                    Some(alias) => format!("({}) AS {}", inner, alias),
                    None => format!("({})", inner),
                })
            }
        }
    }

    /// Build SELECT clause, appending the selections of included children
    fn build_select_clause(relation: &Relation) -> String {
        let mut parts: Vec<String> = relation
            .selection()
            .iter()
            .map(Self::build_select_field)
            .collect();

        for child in relation.children().values() {
            if child.selects_columns {
                parts.extend(child.relation.selection().iter().map(Self::build_select_field));
            }
        }

        if parts.is_empty() {
            "*".to_string()
        } else {
            parts.join(", ")
        }
    }

    fn build_select_field(field: &SelectField) -> String {
        match field {
            SelectField::All => "*".to_string(),
            SelectField::Field(name) => name.clone(),
            SelectField::FieldWithAlias { field, alias } => {
                format!("{} AS {}", field, alias)
            }
            SelectField::Aggregate {
                function,
                field,
                alias,
            } => {
                let func_name = function.to_sql();
                let field_part = if function.is_distinct() {
                    if let Some(f) = field {
                        format!("DISTINCT {}", f)
                    } else {
                        "*".to_string()
                    }
                } else {
                    field.as_deref().unwrap_or("*").to_string()
                };

                let aggregate = format!("{}({})", func_name, field_part);

                if let Some(alias) = alias {
                    format!("{} AS {}", aggregate, alias)
                } else {
                    aggregate
                }
            }
        }
    }

    /// Build JOIN clauses for a relation's children, depth first.
    ///
    /// Fails with [`QueryError::Generation`] if a join target is not a plain
    /// table; associations always point at tables.
    pub fn build_join_clause(
        children: &std::collections::BTreeMap<String, ChildRelation>,
        context: &GenerationContext,
    ) -> Result<String, QueryError> {
        let mut parts = Vec::new();
        Self::append_join_clauses(children, context, &mut parts)?;
        Ok(parts.join(" "))
    }

    fn append_join_clauses(
        children: &std::collections::BTreeMap<String, ChildRelation>,
        context: &GenerationContext,
        parts: &mut Vec<String>,
    ) -> Result<(), QueryError> {
        for (key, child) in children {
            let table_part = match child.relation.source() {
                RelationSource::Table {
                    name,
                    alias: Some(alias),
                } => format!("{} AS {}", context.qualify_table(name), alias),
                RelationSource::Table { name, alias: None } => context.qualify_table(name),
                RelationSource::Subquery { .. } => {
                    return Err(QueryError::Generation(format!(
                        "join target for association '{}' must be a plain table",
                        key
                    )));
                }
            };

            let condition_part = match &child.condition {
                JoinCondition::On {
                    left_column,
                    right_column,
                } => format!("ON {} = {}", left_column, right_column),
                JoinCondition::Using(columns) => {
                    format!("USING ({})", columns.join(", "))
                }
            };

            parts.push(format!(
                "{} {} {}",
                child.kind.to_sql(),
                table_part,
                condition_part
            ));

            Self::append_join_clauses(child.relation.children(), context, parts)?;
        }

        Ok(())
    }

    /// Build WHERE clause from already-resolved predicates
    pub fn build_where_clause(predicates: &[SqlPredicate]) -> (String, Vec<Value>) {
        if predicates.is_empty() {
            return ("".to_string(), Vec::new());
        }

        let mut values = Vec::new();
        let mut param_counter = 1;

        let conditions_sql = predicates
            .iter()
            .map(|predicate| Self::build_predicate_sql(predicate, &mut values, &mut param_counter))
            .collect::<Vec<_>>()
            .join(" AND ");

        if conditions_sql.is_empty() {
            ("".to_string(), values)
        } else {
            (format!("WHERE {}", conditions_sql), values)
        }
    }

    fn build_predicate_sql(
        predicate: &SqlPredicate,
        values: &mut Vec<Value>,
        param_counter: &mut i32,
    ) -> String {
        match predicate {
            SqlPredicate::Condition(condition) => {
                Self::build_condition_sql(condition, values, param_counter)
            }
            SqlPredicate::Group {
                operator,
                predicates,
            } => {
                let operator_str = match operator {
                    LogicalOperator::And => " AND ",
                    LogicalOperator::Or => " OR ",
                };

                let group_conditions = predicates
                    .iter()
                    .map(|p| Self::build_predicate_sql(p, values, param_counter))
                    .collect::<Vec<_>>()
                    .join(operator_str);

                format!("({})", group_conditions)
            }
        }
    }

    fn build_condition_sql(
        condition: &SqlCondition,
        values: &mut Vec<Value>,
        param_counter: &mut i32,
    ) -> String {
        let column = &condition.column;

        match &condition.operator {
            SqlOperator::Eq => {
                if let Some(value) = &condition.value {
                    values.push(value.clone());
                    let param = format!("${}", param_counter);
                    *param_counter += 1;
                    format!("{} = {}", column, param)
                } else {
                    format!("{} IS NULL", column)
                }
            }
            SqlOperator::Ne => {
                if let Some(value) = &condition.value {
                    values.push(value.clone());
                    let param = format!("${}", param_counter);
                    *param_counter += 1;
                    format!("{} != {}", column, param)
                } else {
                    format!("{} IS NOT NULL", column)
                }
            }
            SqlOperator::Gt => {
                Self::build_binary_sql(column, ">", condition, values, param_counter)
            }
            SqlOperator::Gte => {
                Self::build_binary_sql(column, ">=", condition, values, param_counter)
            }
            SqlOperator::Lt => {
                Self::build_binary_sql(column, "<", condition, values, param_counter)
            }
            SqlOperator::Lte => {
                Self::build_binary_sql(column, "<=", condition, values, param_counter)
            }
            SqlOperator::Like => {
                Self::build_binary_sql(column, "LIKE", condition, values, param_counter)
            }
            SqlOperator::ILike => {
                Self::build_binary_sql(column, "ILIKE", condition, values, param_counter)
            }
            SqlOperator::In => {
                if let Some(Value::Array(array_values)) = &condition.value {
                    if array_values.is_empty() {
                        return "1=0".to_string(); // Empty IN clause
                    }

                    let placeholders: Vec<String> = array_values
                        .iter()
                        .map(|_| {
                            let param = format!("${}", param_counter);
                            *param_counter += 1;
                            param
                        })
                        .collect();

                    values.extend(array_values.clone());
                    format!("{} IN ({})", column, placeholders.join(", "))
                } else {
                    "1=0".to_string()
                }
            }
            SqlOperator::NotIn => {
                if let Some(Value::Array(array_values)) = &condition.value {
                    if array_values.is_empty() {
                        return "1=1".to_string(); // Empty NOT IN clause
                    }

                    let placeholders: Vec<String> = array_values
                        .iter()
                        .map(|_| {
                            let param = format!("${}", param_counter);
                            *param_counter += 1;
                            param
                        })
                        .collect();

                    values.extend(array_values.clone());
                    format!("{} NOT IN ({})", column, placeholders.join(", "))
                } else {
                    "1=1".to_string()
                }
            }
            SqlOperator::IsNull => format!("{} IS NULL", column),
            SqlOperator::IsNotNull => format!("{} IS NOT NULL", column),
        }
    }

    fn build_binary_sql(
        column: &str,
        operator: &str,
        condition: &SqlCondition,
        values: &mut Vec<Value>,
        param_counter: &mut i32,
    ) -> String {
        if let Some(value) = &condition.value {
            values.push(value.clone());
            let param = format!("${}", param_counter);
            *param_counter += 1;
            format!("{} {} {}", column, operator, param)
        } else {
            "1=0".to_string() // Invalid condition
        }
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(terms: &[OrderingTerm]) -> String {
        if terms.is_empty() {
            return "".to_string();
        }

        let order_items: Vec<String> = terms
            .iter()
            .map(|term| format!("{} {}", term.column, term.direction.to_sql()))
            .collect();

        format!("ORDER BY {}", order_items.join(", "))
    }

    /// Build LIMIT/OFFSET clause
    pub fn build_limit_clause(limit: Option<&Limit>) -> String {
        match limit {
            Some(limit) => format!("LIMIT {}", limit.sql()),
            None => "".to_string(),
        }
    }

    /// Build GROUP BY clause
    pub fn build_group_by_clause(columns: &[String]) -> String {
        if columns.is_empty() {
            return "".to_string();
        }

        format!("GROUP BY {}", columns.join(", "))
    }

    /// Build HAVING clause from predicates, conjoined with AND
    pub fn build_having_clause(predicates: &[SqlPredicate]) -> (String, Vec<Value>) {
        if predicates.is_empty() {
            return ("".to_string(), Vec::new());
        }

        let mut values = Vec::new();
        let mut param_counter = 1;

        let conditions_sql = predicates
            .iter()
            .map(|predicate| Self::build_predicate_sql(predicate, &mut values, &mut param_counter))
            .collect::<Vec<_>>()
            .join(" AND ");

        (format!("HAVING {}", conditions_sql), values)
    }
}
