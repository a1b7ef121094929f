//! Clause-level nodes shared between statements.

use super::{
    Expr, Identifier, IndirectionItem, LogicalOp, NodeError, NodeList, Operator, QualifiedName,
    Statement,
};

/// `expr [AS alias]` in a target list or `RETURNING` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetElement {
    pub expression: Expr,
    pub alias: Option<Identifier>,
}

impl TargetElement {
    #[must_use]
    pub const fn new(expression: Expr) -> Self {
        Self {
            expression,
            alias: None,
        }
    }

    #[must_use]
    pub fn with_alias(expression: Expr, alias: impl Into<Identifier>) -> Self {
        Self {
            expression,
            alias: Some(alias.into()),
        }
    }
}

/// Sort direction in `ORDER BY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    Asc,
    Desc,
    Using(Operator),
}

/// `NULLS FIRST` / `NULLS LAST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByElement {
    pub expression: Expr,
    pub direction: Option<OrderDirection>,
    pub nulls: Option<NullsOrder>,
}

impl OrderByElement {
    #[must_use]
    pub const fn new(expression: Expr) -> Self {
        Self {
            expression,
            direction: None,
            nulls: None,
        }
    }
}

/// A `WHERE` or `HAVING` condition holder; empty when the clause is absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereClause {
    pub condition: Option<Expr>,
}

impl WhereClause {
    #[must_use]
    pub const fn new(condition: Option<Expr>) -> Self {
        Self { condition }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.condition.is_none()
    }

    /// Adds a condition with `AND`.
    pub fn and(&mut self, condition: Expr) -> &mut Self {
        self.combine(LogicalOp::And, condition)
    }

    /// Adds a condition with `OR`.
    pub fn or(&mut self, condition: Expr) -> &mut Self {
        self.combine(LogicalOp::Or, condition)
    }

    fn combine(&mut self, operator: LogicalOp, condition: Expr) -> &mut Self {
        self.condition = Some(match self.condition.take() {
            None => condition,
            Some(existing) => Expr::logical(operator, existing, condition),
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameMode {
    Range,
    Rows,
    Groups,
}

impl FrameMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Rows => "rows",
            Self::Groups => "groups",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameDirection {
    Preceding,
    Following,
    CurrentRow,
}

impl FrameDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preceding => "preceding",
            Self::Following => "following",
            Self::CurrentRow => "current row",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameExclusion {
    CurrentRow,
    Group,
    Ties,
}

impl FrameExclusion {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentRow => "current row",
            Self::Group => "group",
            Self::Ties => "ties",
        }
    }
}

/// One end of a window frame; `value` is `None` for `UNBOUNDED` and `CURRENT ROW`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrameBound {
    pub direction: FrameDirection,
    pub value: Option<Expr>,
}

impl WindowFrameBound {
    #[must_use]
    pub const fn unbounded(direction: FrameDirection) -> Self {
        Self {
            direction,
            value: None,
        }
    }

    #[must_use]
    pub const fn current_row() -> Self {
        Self::unbounded(FrameDirection::CurrentRow)
    }

    #[must_use]
    pub const fn offset(direction: FrameDirection, value: Expr) -> Self {
        Self {
            direction,
            value: Some(value),
        }
    }

    const fn is_unbounded(&self, direction: FrameDirection) -> bool {
        self.value.is_none() && matches!(
            (self.direction, direction),
            (FrameDirection::Preceding, FrameDirection::Preceding)
                | (FrameDirection::Following, FrameDirection::Following)
        )
    }
}

/// `ROWS|RANGE|GROUPS start` or `... BETWEEN start AND end`, with exclusion.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrameClause {
    mode: FrameMode,
    start: WindowFrameBound,
    end: Option<WindowFrameBound>,
    exclusion: Option<FrameExclusion>,
}

impl WindowFrameClause {
    /// Creates a frame, rejecting bound combinations the server rejects.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::InvalidFrame` describing the invalid combination.
    pub fn new(
        mode: FrameMode,
        start: WindowFrameBound,
        end: Option<WindowFrameBound>,
        exclusion: Option<FrameExclusion>,
    ) -> Result<Self, NodeError> {
        if start.is_unbounded(FrameDirection::Following) {
            return Err(NodeError::InvalidFrame(
                "Frame start cannot be UNBOUNDED FOLLOWING",
            ));
        }
        match &end {
            None => {
                if start.direction == FrameDirection::Following {
                    return Err(NodeError::InvalidFrame(
                        "Frame starting from following row cannot end with current row",
                    ));
                }
            }
            Some(end) => {
                if end.is_unbounded(FrameDirection::Preceding) {
                    return Err(NodeError::InvalidFrame(
                        "Frame end cannot be UNBOUNDED PRECEDING",
                    ));
                }
                if start.direction == FrameDirection::CurrentRow
                    && end.direction == FrameDirection::Preceding
                {
                    return Err(NodeError::InvalidFrame(
                        "Frame starting from current row cannot have preceding rows",
                    ));
                }
                if start.direction == FrameDirection::Following
                    && matches!(
                        end.direction,
                        FrameDirection::CurrentRow | FrameDirection::Preceding
                    )
                {
                    return Err(NodeError::InvalidFrame(
                        "Frame starting from following row cannot have preceding rows",
                    ));
                }
            }
        }
        Ok(Self {
            mode,
            start,
            end,
            exclusion,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> FrameMode {
        self.mode
    }

    #[must_use]
    pub const fn start(&self) -> &WindowFrameBound {
        &self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<&WindowFrameBound> {
        self.end.as_ref()
    }

    #[must_use]
    pub const fn exclusion(&self) -> Option<FrameExclusion> {
        self.exclusion
    }

    /// The offset expressions of both bounds.
    pub fn bound_values(&self) -> impl Iterator<Item = &Expr> {
        self.start
            .value
            .iter()
            .chain(self.end.iter().flat_map(|end| end.value.iter()))
    }

    pub fn bound_values_mut(&mut self) -> impl Iterator<Item = &mut Expr> {
        self.start
            .value
            .iter_mut()
            .chain(self.end.iter_mut().flat_map(|end| end.value.iter_mut()))
    }
}

/// A window specification, named when it comes from a `WINDOW` clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowDefinition {
    pub name: Option<Identifier>,
    pub ref_name: Option<Identifier>,
    pub partition: NodeList<Expr>,
    pub order_by: NodeList<OrderByElement>,
    pub frame: Option<WindowFrameClause>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockingStrength {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

impl LockingStrength {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::NoKeyUpdate => "no key update",
            Self::Share => "share",
            Self::KeyShare => "key share",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockWaitPolicy {
    Nowait,
    SkipLocked,
}

/// `FOR UPDATE [OF a, b] [NOWAIT | SKIP LOCKED]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LockingElement {
    pub strength: LockingStrength,
    pub relations: NodeList<QualifiedName>,
    pub wait_policy: Option<LockWaitPolicy>,
}

/// `WITH [RECURSIVE] cte, ...`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: NodeList<CommonTableExpression>,
}

/// `SEARCH BREADTH|DEPTH FIRST BY cols SET column`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchClause {
    pub breadth_first: bool,
    pub columns: NodeList<Identifier>,
    pub sequence_column: Identifier,
}

/// `CYCLE cols SET mark [TO value DEFAULT default] USING path`.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleClause {
    pub columns: NodeList<Identifier>,
    pub mark_column: Identifier,
    pub path_column: Identifier,
    pub mark_value: Option<Expr>,
    pub mark_default: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommonTableExpression {
    pub name: Identifier,
    pub columns: NodeList<Identifier>,
    /// `Some(true)` for `MATERIALIZED`, `Some(false)` for `NOT MATERIALIZED`.
    pub materialized: Option<bool>,
    pub statement: Box<Statement>,
    pub search: Option<SearchClause>,
    pub cycle: Option<CycleClause>,
}

/// Target of an `UPDATE SET` assignment: a column with optional field or
/// subscript selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SetTargetElement {
    pub name: Identifier,
    pub indirection: NodeList<IndirectionItem>,
}

impl SetTargetElement {
    #[must_use]
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            indirection: NodeList::new(),
        }
    }
}

/// An assignment in `UPDATE SET`, `ON CONFLICT DO UPDATE SET` or `MERGE ... UPDATE SET`.
#[derive(Debug, Clone, PartialEq)]
pub enum SetClause {
    /// `column = value`
    Single { column: SetTargetElement, value: Expr },
    /// `(a, b) = value`, value being a row, a subquery or `DEFAULT`.
    Multiple {
        columns: NodeList<SetTargetElement>,
        value: Expr,
    },
}

impl SetClause {
    /// Creates a multiple-column assignment.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::ColumnCountMismatch` if `value` is a row
    /// constructor of a different width than `columns`.
    pub fn multiple(columns: NodeList<SetTargetElement>, value: Expr) -> Result<Self, NodeError> {
        if let Expr::Row(row) = &value {
            if row.items.len() != columns.len() {
                return Err(NodeError::ColumnCountMismatch {
                    columns: columns.len(),
                    values: row.items.len(),
                });
            }
        }
        Ok(Self::Multiple { columns, value })
    }

    #[must_use]
    pub const fn value(&self) -> &Expr {
        match self {
            Self::Single { value, .. } | Self::Multiple { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexDirection {
    Asc,
    Desc,
}

impl IndexDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// What an index element refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexTarget {
    Column(Identifier),
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexElement {
    pub target: IndexTarget,
    pub collation: Option<QualifiedName>,
    pub opclass: Option<QualifiedName>,
    pub direction: Option<IndexDirection>,
    pub nulls: Option<NullsOrder>,
}

/// `(element, ...) [WHERE condition]`, used as an `ON CONFLICT` target.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexParameters {
    pub elements: NodeList<IndexElement>,
    pub where_clause: WhereClause,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConflictTarget {
    Constraint(Identifier),
    Index(IndexParameters),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    Nothing,
    Update {
        set: NodeList<SetClause>,
        where_clause: WhereClause,
    },
}

/// `ON CONFLICT [target] DO NOTHING | DO UPDATE SET ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflictClause {
    pub target: Option<ConflictTarget>,
    pub action: ConflictAction,
}

/// An element of `GROUP BY`.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupingElement {
    Expression(Expr),
    /// `()`
    Empty,
    Cube(NodeList<Expr>),
    Rollup(NodeList<Expr>),
    Sets(NodeList<GroupingElement>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupByClause {
    pub distinct: bool,
    pub items: NodeList<GroupingElement>,
}

impl GroupByClause {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
