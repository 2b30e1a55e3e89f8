/// Represents SQL aggregate functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateFunction {
    /// COUNT(*) or COUNT(field)
    Count,
    /// COUNT(DISTINCT field)
    CountDistinct,
    /// SUM(field)
    Sum,
    /// AVG(field)
    Avg,
    /// MIN(field)
    Min,
    /// MAX(field)
    Max,
}

impl AggregateFunction {
    /// Convert aggregate function to SQL string
    pub fn to_sql(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::CountDistinct => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }

    /// Check if this is a DISTINCT aggregate
    pub fn is_distinct(&self) -> bool {
        matches!(self, AggregateFunction::CountDistinct)
    }
}

/// The count pattern a selected field represents, if any.
///
/// The count-query rewriter uses this to decide whether a selection can be
/// replaced in place instead of wrapping the whole query in a subquery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountShape {
    /// COUNT(*)
    All,
    /// COUNT(DISTINCT column)
    Distinct(String),
}

/// Represents a field selection in a SELECT clause
#[derive(Debug, Clone, PartialEq)]
pub enum SelectField {
    /// Select all fields: SELECT *
    All,
    /// Select specific field: SELECT field_name
    Field(String),
    /// Select field with alias: SELECT field_name AS alias
    FieldWithAlias { field: String, alias: String },
    /// Select aggregate function: SELECT COUNT(field)
    Aggregate {
        function: AggregateFunction,
        field: Option<String>, // None for COUNT(*)
        alias: Option<String>,
    },
}

impl SelectField {
    /// Create a simple field selection
    pub fn field(field: impl Into<String>) -> Self {
        SelectField::Field(field.into())
    }

    /// Create a field with alias
    pub fn field_as(field: impl Into<String>, alias: impl Into<String>) -> Self {
        SelectField::FieldWithAlias {
            field: field.into(),
            alias: alias.into(),
        }
    }

    /// Create COUNT(*) aggregate
    pub fn count_all() -> Self {
        SelectField::Aggregate {
            function: AggregateFunction::Count,
            field: None,
            alias: None,
        }
    }

    /// Create COUNT(field) aggregate
    pub fn count(field: impl Into<String>) -> Self {
        SelectField::Aggregate {
            function: AggregateFunction::Count,
            field: Some(field.into()),
            alias: None,
        }
    }

    /// Create COUNT(DISTINCT field) aggregate
    pub fn count_distinct(field: impl Into<String>) -> Self {
        SelectField::Aggregate {
            function: AggregateFunction::CountDistinct,
            field: Some(field.into()),
            alias: None,
        }
    }

    /// Create SUM(field) aggregate
    pub fn sum(field: impl Into<String>) -> Self {
        SelectField::Aggregate {
            function: AggregateFunction::Sum,
            field: Some(field.into()),
            alias: None,
        }
    }

    /// Create AVG(field) aggregate
    pub fn avg(field: impl Into<String>) -> Self {
        SelectField::Aggregate {
            function: AggregateFunction::Avg,
            field: Some(field.into()),
            alias: None,
        }
    }

    /// Create MIN(field) aggregate
    pub fn min(field: impl Into<String>) -> Self {
        SelectField::Aggregate {
            function: AggregateFunction::Min,
            field: Some(field.into()),
            alias: None,
        }
    }

    /// Create MAX(field) aggregate
    pub fn max(field: impl Into<String>) -> Self {
        SelectField::Aggregate {
            function: AggregateFunction::Max,
            field: Some(field.into()),
            alias: None,
        }
    }

    /// Add an alias to this select field
    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        match self {
            SelectField::Field(field) => SelectField::FieldWithAlias {
                field,
                alias: alias.into(),
            },
            SelectField::Aggregate {
                function,
                field,
                alias: _,
            } => SelectField::Aggregate {
                function,
                field,
                alias: Some(alias.into()),
            },
            other => other,
        }
    }

    /// Report whether this field is a recognizable count pattern.
    ///
    /// `COUNT(*)` reports [`CountShape::All`]; `COUNT(DISTINCT col)` reports
    /// [`CountShape::Distinct`]. Anything else, including `COUNT(col)` over a
    /// nullable column (which skips NULLs and is not a row count), reports
    /// `None`.
    pub fn count_shape(&self) -> Option<CountShape> {
        match self {
            SelectField::Aggregate {
                function: AggregateFunction::Count,
                field: None,
                ..
            } => Some(CountShape::All),
            SelectField::Aggregate {
                function: AggregateFunction::CountDistinct,
                field: Some(column),
                ..
            } => Some(CountShape::Distinct(column.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_function_to_sql() {
        assert_eq!(AggregateFunction::Count.to_sql(), "COUNT");
        assert_eq!(AggregateFunction::CountDistinct.to_sql(), "COUNT");
        assert_eq!(AggregateFunction::Sum.to_sql(), "SUM");
        assert_eq!(AggregateFunction::Avg.to_sql(), "AVG");
        assert_eq!(AggregateFunction::Min.to_sql(), "MIN");
        assert_eq!(AggregateFunction::Max.to_sql(), "MAX");
    }

    #[test]
    fn test_aggregate_function_is_distinct() {
        assert!(!AggregateFunction::Count.is_distinct());
        assert!(AggregateFunction::CountDistinct.is_distinct());
        assert!(!AggregateFunction::Sum.is_distinct());
    }

    #[test]
    fn test_select_field_with_alias_chaining() {
        let field = SelectField::field("user_name").with_alias("name");
        assert_eq!(
            field,
            SelectField::FieldWithAlias {
                field: "user_name".to_string(),
                alias: "name".to_string(),
            }
        );
    }

    #[test]
    fn test_count_shape_all() {
        assert_eq!(SelectField::count_all().count_shape(), Some(CountShape::All));
    }

    #[test]
    fn test_count_shape_distinct() {
        assert_eq!(
            SelectField::count_distinct("user_id").count_shape(),
            Some(CountShape::Distinct("user_id".to_string()))
        );
    }

    #[test]
    fn test_count_shape_not_recognized() {
        // COUNT(col) skips NULLs, so it is not a row count
        assert_eq!(SelectField::count("email").count_shape(), None);
        assert_eq!(SelectField::field("name").count_shape(), None);
        assert_eq!(SelectField::sum("amount").count_shape(), None);
        assert_eq!(SelectField::All.count_shape(), None);
    }

    #[test]
    fn test_count_shape_survives_alias() {
        let field = SelectField::count_all().with_alias("total");
        assert_eq!(field.count_shape(), Some(CountShape::All));
    }
}
