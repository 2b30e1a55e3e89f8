//! ORDER BY terms

/// Sort direction for an ordering term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// The opposite direction
    pub fn reversed(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Single ORDER BY term
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingTerm {
    pub column: String,
    pub direction: SortOrder,
}

impl OrderingTerm {
    /// Ascending term
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortOrder::Asc,
        }
    }

    /// Descending term
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortOrder::Desc,
        }
    }

    /// Same column, opposite direction
    pub fn reversed(self) -> Self {
        Self {
            column: self.column,
            direction: self.direction.reversed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_to_sql() {
        assert_eq!(SortOrder::Asc.to_sql(), "ASC");
        assert_eq!(SortOrder::Desc.to_sql(), "DESC");
    }

    #[test]
    fn test_ordering_term_reversed() {
        let term = OrderingTerm::asc("created_at").reversed();
        assert_eq!(term.direction, SortOrder::Desc);
        assert_eq!(term.column, "created_at");
        assert_eq!(term.reversed().direction, SortOrder::Asc);
    }
}
