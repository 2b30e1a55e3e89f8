//! Relations
//!
//! A [`Relation`] describes the FROM/selection/filter/join portion of a query.
//! Grouping, having, limit, and distinctness live one level up, on
//! [`Query`](crate::query::Query). All transformations are pure: they consume
//! the receiver and return a new value, so no previously returned relation is
//! ever observably changed.

use crate::context::Deferred;
use crate::expression::SqlPredicate;
use crate::ordering::OrderingTerm;
use crate::query::Query;
use crate::selection::SelectField;
use std::collections::BTreeMap;

/// What a relation selects FROM
#[derive(Debug, Clone)]
pub enum RelationSource {
    /// A plain table, optionally aliased
    Table {
        name: String,
        alias: Option<String>,
    },
    /// A nested query, optionally aliased
    ///
    /// Many rewrites (notably the in-place count rewrite) are only valid when
    /// the source is a plain table, so this distinction is load-bearing.
    Subquery {
        query: Box<Query>,
        alias: Option<String>,
    },
}

impl RelationSource {
    /// Whether this source is a plain table reference
    pub fn is_table(&self) -> bool {
        matches!(self, RelationSource::Table { .. })
    }
}

/// How a child relation is joined to its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN - the child row must exist
    Required,
    /// LEFT JOIN - the child row may be absent
    Optional,
}

impl JoinKind {
    /// Convert join kind to SQL string
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinKind::Required => "INNER JOIN",
            JoinKind::Optional => "LEFT JOIN",
        }
    }
}

/// Condition joining a child relation to its parent
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    /// Join on a column equality (e.g., ON users.id = orders.user_id)
    On {
        left_column: String,
        right_column: String,
    },
    /// Join using common column names (e.g., USING (id, name))
    Using(Vec<String>),
}

/// A resolved association, as handed to the core by the association layer.
///
/// The core never builds these itself; it only attaches them to a relation's
/// children. `multiplies_rows` is the one-to-many/many-to-many flag: the
/// count-query rewriter reads it, the core never sets it.
#[derive(Debug, Clone)]
pub struct Association {
    pub key: String,
    pub relation: Relation,
    pub condition: JoinCondition,
    pub multiplies_rows: bool,
}

impl Association {
    /// Describe an association to a plain table joined on a column equality
    pub fn to_one(
        key: impl Into<String>,
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            relation: Relation::table(table),
            condition: JoinCondition::On {
                left_column: left_column.into(),
                right_column: right_column.into(),
            },
            multiplies_rows: false,
        }
    }

    /// Same as [`Association::to_one`], but flagged as able to multiply parent rows
    pub fn to_many(
        key: impl Into<String>,
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self {
            multiplies_rows: true,
            ..Self::to_one(key, table, left_column, right_column)
        }
    }
}

/// A joined child relation
#[derive(Debug, Clone)]
pub struct ChildRelation {
    pub relation: Relation,
    pub kind: JoinKind,
    pub condition: JoinCondition,
    /// Whether this child can increase the parent's row count (one-to-many)
    pub multiplies_rows: bool,
    /// Whether the child's selection appears in the parent's SELECT list
    /// (`including` semantics) or the join exists only for filtering
    /// (`joining` semantics)
    pub selects_columns: bool,
}

/// The FROM/selection/filter/ordering/join portion of a query
#[derive(Debug, Clone)]
pub struct Relation {
    pub(crate) source: RelationSource,
    pub(crate) selection: Vec<SelectField>,
    pub(crate) predicates: Vec<Deferred<SqlPredicate>>,
    pub(crate) ordering: Option<Deferred<Vec<OrderingTerm>>>,
    pub(crate) ordering_reversed: bool,
    pub(crate) children: BTreeMap<String, ChildRelation>,
}

impl Relation {
    /// Relation over a plain table, selecting all columns
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            source: RelationSource::Table {
                name: name.into(),
                alias: None,
            },
            selection: vec![SelectField::All],
            predicates: Vec::new(),
            ordering: None,
            ordering_reversed: false,
            children: BTreeMap::new(),
        }
    }

    /// Relation over a nested query
    pub fn subquery(query: Query) -> Self {
        Self {
            source: RelationSource::Subquery {
                query: Box::new(query),
                alias: None,
            },
            selection: vec![SelectField::All],
            predicates: Vec::new(),
            ordering: None,
            ordering_reversed: false,
            children: BTreeMap::new(),
        }
    }

    /// The source this relation selects from
    pub fn source(&self) -> &RelationSource {
        &self.source
    }

    /// The current selection
    pub fn selection(&self) -> &[SelectField] {
        &self.selection
    }

    /// The joined children, keyed by association key
    pub fn children(&self) -> &BTreeMap<String, ChildRelation> {
        &self.children
    }

    /// Alias the source with a table alias
    pub fn qualified(mut self, alias: impl Into<String>) -> Self {
        match &mut self.source {
            RelationSource::Table { alias: slot, .. } => *slot = Some(alias.into()),
            RelationSource::Subquery { alias: slot, .. } => *slot = Some(alias.into()),
        }
        self
    }

    /// Replace the selection
    pub fn select(mut self, fields: Vec<SelectField>) -> Self {
        self.selection = fields;
        self
    }

    /// Append to the selection, preserving existing entries' order
    pub fn annotated(mut self, fields: Vec<SelectField>) -> Self {
        self.selection.extend(fields);
        self
    }

    /// AND a deferred predicate into the filter
    pub fn filter(mut self, predicate: Deferred<SqlPredicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Replace the ordering terms
    pub fn order(mut self, ordering: Deferred<Vec<OrderingTerm>>) -> Self {
        self.ordering = Some(ordering);
        self.ordering_reversed = false;
        self
    }

    /// Reverse the direction of every ordering term.
    ///
    /// Ordering terms are deferred, so the reversal is recorded as a flag and
    /// applied after the terms resolve at generation time.
    pub fn reversed(mut self) -> Self {
        self.ordering_reversed = !self.ordering_reversed;
        self
    }

    /// Clear the ordering terms
    pub fn unordered(mut self) -> Self {
        self.ordering = None;
        self.ordering_reversed = false;
        self
    }

    /// Join an association, selecting its columns in the parent's SELECT list
    pub fn including(self, association: Association, kind: JoinKind) -> Self {
        self.join_child(association, kind, true)
    }

    /// Join an association without selecting its columns
    pub fn joining(self, association: Association, kind: JoinKind) -> Self {
        self.join_child(association, kind, false)
    }

    fn join_child(mut self, association: Association, kind: JoinKind, selects_columns: bool) -> Self {
        self.children.insert(
            association.key,
            ChildRelation {
                relation: association.relation,
                kind,
                condition: association.condition,
                multiplies_rows: association.multiplies_rows,
                selects_columns,
            },
        );
        self
    }

    /// Whether any reachable child is flagged as able to multiply parent rows.
    ///
    /// Walks the whole children tree: a one-to-many join nested below a
    /// to-one join still fans out the parent's rows.
    pub fn has_multiplying_child(&self) -> bool {
        self.children
            .values()
            .any(|child| child.multiplies_rows || child.relation.has_multiplying_child())
    }
}
