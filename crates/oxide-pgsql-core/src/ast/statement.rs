//! Statement AST types.

use super::{
    Expr, FromElement, GroupByClause, InsertTarget, LockingElement, NodeError, NodeList,
    OnConflictClause, OrderByElement, RowExpr, SetClause, SetTargetElement, TargetElement,
    UpdateOrDeleteTarget, WhereClause, WindowDefinition, WithClause,
};

/// `DISTINCT` or `DISTINCT ON (...)` in a simple `SELECT`.
#[derive(Debug, Clone, PartialEq)]
pub enum Distinct {
    Rows,
    On(NodeList<Expr>),
}

/// `SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ... WINDOW ...`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimpleSelect {
    pub distinct: Option<Distinct>,
    pub targets: NodeList<TargetElement>,
    pub from: NodeList<FromElement>,
    pub where_clause: WhereClause,
    pub group_by: GroupByClause,
    pub having: WhereClause,
    pub window: NodeList<WindowDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

impl SetOperator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::UnionAll => "union all",
            Self::Intersect => "intersect",
            Self::IntersectAll => "intersect all",
            Self::Except => "except",
            Self::ExceptAll => "except all",
        }
    }

    /// Binding strength: `INTERSECT` binds tighter than `UNION` and `EXCEPT`.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Union | Self::UnionAll | Self::Except | Self::ExceptAll => 1,
            Self::Intersect | Self::IntersectAll => 2,
        }
    }
}

/// Two queries combined with `UNION`, `INTERSECT` or `EXCEPT`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOpSelect {
    pub left: SelectStatement,
    pub right: SelectStatement,
    pub operator: SetOperator,
}

/// The part of a query that produces rows.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectBody {
    Select(Box<SimpleSelect>),
    SetOp(Box<SetOpSelect>),
    /// `VALUES (...), (...)`
    Values(NodeList<RowExpr>),
}

impl SelectBody {
    /// Precedence used when combining queries with set operators.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::SetOp(set_op) => set_op.operator.precedence(),
            Self::Select(_) | Self::Values(_) => 3,
        }
    }
}

/// A query: a row-producing body plus the clauses every query form accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub with: Option<WithClause>,
    pub body: SelectBody,
    pub order_by: NodeList<OrderByElement>,
    pub limit: Option<Expr>,
    /// `FETCH FIRST ... WITH TIES`.
    pub limit_with_ties: bool,
    pub offset: Option<Expr>,
    pub locking: NodeList<LockingElement>,
}

impl SelectStatement {
    #[must_use]
    pub const fn new(body: SelectBody) -> Self {
        Self {
            with: None,
            body,
            order_by: NodeList::new(),
            limit: None,
            limit_with_ties: false,
            offset: None,
            locking: NodeList::new(),
        }
    }

    #[must_use]
    pub fn select(select: SimpleSelect) -> Self {
        Self::new(SelectBody::Select(Box::new(select)))
    }

    #[must_use]
    pub fn values(rows: Vec<RowExpr>) -> Self {
        Self::new(SelectBody::Values(rows.into()))
    }

    /// Combines two queries with a set operator.
    #[must_use]
    pub fn set_op(left: Self, operator: SetOperator, right: Self) -> Self {
        Self::new(SelectBody::SetOp(Box::new(SetOpSelect {
            left,
            right,
            operator,
        })))
    }

    /// Returns true if any of `ORDER BY`, `LIMIT`, `OFFSET`, locking or
    /// `WITH` is present.
    #[must_use]
    pub fn has_common_clauses(&self) -> bool {
        self.with.is_some()
            || !self.order_by.is_empty()
            || self.limit.is_some()
            || self.offset.is_some()
            || !self.locking.is_empty()
    }

    /// Returns the simple select if that is what this query is.
    #[must_use]
    pub fn as_simple_select(&self) -> Option<&SimpleSelect> {
        match &self.body {
            SelectBody::Select(select) => Some(select),
            _ => None,
        }
    }

    #[must_use]
    pub const fn precedence(&self) -> u8 {
        self.body.precedence()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertOverriding {
    User,
    System,
}

impl InsertOverriding {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub with: Option<WithClause>,
    pub target: InsertTarget,
    pub columns: NodeList<SetTargetElement>,
    pub overriding: Option<InsertOverriding>,
    /// `None` for `DEFAULT VALUES`.
    pub values: Option<SelectStatement>,
    pub on_conflict: Option<OnConflictClause>,
    pub returning: NodeList<TargetElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub with: Option<WithClause>,
    pub target: UpdateOrDeleteTarget,
    pub set: NodeList<SetClause>,
    pub from: NodeList<FromElement>,
    pub where_clause: WhereClause,
    pub returning: NodeList<TargetElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub with: Option<WithClause>,
    pub target: UpdateOrDeleteTarget,
    pub using: NodeList<FromElement>,
    pub where_clause: WhereClause,
    pub returning: NodeList<TargetElement>,
}

/// Which rows a `WHEN` clause of `MERGE` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeMatch {
    Matched,
    NotMatchedBySource,
    /// `NOT MATCHED [BY TARGET]`
    NotMatched,
}

/// `INSERT [(cols)] [OVERRIDING ... VALUE] VALUES (...) | DEFAULT VALUES`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeInsert {
    pub columns: NodeList<SetTargetElement>,
    pub overriding: Option<InsertOverriding>,
    /// `None` for `DEFAULT VALUES`.
    pub values: Option<NodeList<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeWhenAction {
    Update(NodeList<SetClause>),
    Delete,
    Insert(MergeInsert),
}

/// `WHEN [NOT] MATCHED [AND condition] THEN action`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeWhenClause {
    matched: MergeMatch,
    pub condition: Option<Expr>,
    action: Option<MergeWhenAction>,
}

impl MergeWhenClause {
    /// Creates a clause; `action` is `None` for `DO NOTHING`.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::WrongKind` for `INSERT` on matched rows or
    /// `UPDATE`/`DELETE` on rows not matched in the target.
    pub fn new(
        matched: MergeMatch,
        condition: Option<Expr>,
        action: Option<MergeWhenAction>,
    ) -> Result<Self, NodeError> {
        let allowed = match (&matched, &action) {
            (_, None)
            | (MergeMatch::NotMatched, Some(MergeWhenAction::Insert(_)))
            | (
                MergeMatch::Matched | MergeMatch::NotMatchedBySource,
                Some(MergeWhenAction::Update(_) | MergeWhenAction::Delete),
            ) => true,
            _ => false,
        };
        if !allowed {
            let found = match &action {
                Some(MergeWhenAction::Insert(_)) => "INSERT",
                Some(MergeWhenAction::Update(_)) => "UPDATE",
                _ => "DELETE",
            };
            return Err(NodeError::WrongKind {
                role: match matched {
                    MergeMatch::NotMatched => "action for WHEN NOT MATCHED",
                    _ => "action for WHEN MATCHED",
                },
                found: found.to_string(),
            });
        }
        Ok(Self {
            matched,
            condition,
            action,
        })
    }

    #[must_use]
    pub const fn matched(&self) -> MergeMatch {
        self.matched
    }

    #[must_use]
    pub const fn action(&self) -> Option<&MergeWhenAction> {
        self.action.as_ref()
    }

    pub fn action_mut(&mut self) -> Option<&mut MergeWhenAction> {
        self.action.as_mut()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeStatement {
    pub with: Option<WithClause>,
    pub target: UpdateOrDeleteTarget,
    pub using: FromElement,
    pub on: Expr,
    pub when: NodeList<MergeWhenClause>,
    pub returning: NodeList<TargetElement>,
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    Insert(Box<InsertStatement>),
    Update(Box<UpdateStatement>),
    Delete(Box<DeleteStatement>),
    Merge(Box<MergeStatement>),
}

impl Statement {
    /// Returns the statement's `WITH` clause slot.
    pub fn with_mut(&mut self) -> &mut Option<WithClause> {
        match self {
            Self::Select(select) => &mut select.with,
            Self::Insert(insert) => &mut insert.with,
            Self::Update(update) => &mut update.with,
            Self::Delete(delete) => &mut delete.with,
            Self::Merge(merge) => &mut merge.with,
        }
    }

    #[must_use]
    pub const fn as_select(&self) -> Option<&SelectStatement> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }
}

impl From<SelectStatement> for Statement {
    fn from(select: SelectStatement) -> Self {
        Self::Select(select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_operator_precedence() {
        let select = SelectStatement::select(SimpleSelect::default());
        assert_eq!(select.precedence(), 3);
        let union = SelectStatement::set_op(select.clone(), SetOperator::Union, select.clone());
        let intersect = SelectStatement::set_op(select.clone(), SetOperator::IntersectAll, select);
        assert!(union.precedence() < intersect.precedence());
        assert!(!union.has_common_clauses());
    }

    #[test]
    fn test_merge_action_validation() {
        assert!(MergeWhenClause::new(MergeMatch::Matched, None, Some(MergeWhenAction::Delete)).is_ok());
        assert!(MergeWhenClause::new(MergeMatch::NotMatched, None, None).is_ok());
        let insert = MergeWhenAction::Insert(MergeInsert {
            columns: NodeList::new(),
            overriding: None,
            values: None,
        });
        assert!(matches!(
            MergeWhenClause::new(MergeMatch::NotMatchedBySource, None, Some(insert)),
            Err(NodeError::WrongKind { found, .. }) if found == "INSERT"
        ));
        assert!(MergeWhenClause::new(
            MergeMatch::NotMatched,
            None,
            Some(MergeWhenAction::Update(NodeList::new()))
        )
        .is_err());
    }
}
