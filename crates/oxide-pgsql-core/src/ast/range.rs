//! Items of `FROM` and `USING` lists and statement targets.

use super::{Expr, Identifier, NodeList, QualifiedName, SelectStatement, TypeName};

/// `name type [COLLATE collation]` in a column definition list.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: Identifier,
    pub type_name: TypeName,
    pub collation: Option<QualifiedName>,
}

/// Column aliases following a table alias.
#[derive(Debug, Clone, PartialEq)]
pub enum AliasColumns {
    Names(NodeList<Identifier>),
    /// Column definitions for functions returning `record`.
    Definitions(NodeList<ColumnDefinition>),
}

/// `AS alias (columns)`; either part may be missing but not both.
#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: Option<Identifier>,
    pub columns: Option<AliasColumns>,
}

impl Alias {
    #[must_use]
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self {
            name: Some(name.into()),
            columns: None,
        }
    }
}

/// A table, view or other relation referred to by name.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationReference {
    pub name: QualifiedName,
    /// `Some(false)` for `ONLY name`, `Some(true)` for `name *`.
    pub inherit: Option<bool>,
    pub alias: Option<Alias>,
}

impl RelationReference {
    #[must_use]
    pub const fn new(name: QualifiedName) -> Self {
        Self {
            name,
            inherit: None,
            alias: None,
        }
    }
}

/// A function call in `FROM`; `function` is a function-like expression.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFunction {
    pub function: Expr,
    pub lateral: bool,
    pub with_ordinality: bool,
    pub alias: Option<Alias>,
}

/// A function in `ROWS FROM (...)` with its optional column definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct RowsFromElement {
    pub function: Expr,
    pub column_definitions: NodeList<ColumnDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowsFrom {
    pub functions: NodeList<RowsFromElement>,
    pub lateral: bool,
    pub with_ordinality: bool,
    pub alias: Option<Alias>,
}

/// A parenthesized subquery in `FROM`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSubselect {
    pub query: SelectStatement,
    pub lateral: bool,
    pub alias: Option<Alias>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Cross,
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cross => "cross",
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Right => "right",
            Self::Full => "full",
        }
    }
}

/// `USING (a, b) [AS alias]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsingClause {
    pub columns: NodeList<Identifier>,
    pub alias: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    On(Expr),
    Using(UsingClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinExpression {
    pub left: FromElement,
    pub right: FromElement,
    pub join_type: JoinType,
    pub natural: bool,
    pub condition: Option<JoinCondition>,
    pub alias: Option<Alias>,
}

/// `relation TABLESAMPLE method (args) [REPEATABLE (seed)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSample {
    pub relation: RelationReference,
    pub method: QualifiedName,
    pub arguments: NodeList<Expr>,
    pub repeatable: Option<Expr>,
}

/// An item of a `FROM` list.
#[derive(Debug, Clone, PartialEq)]
pub enum FromElement {
    Relation(RelationReference),
    Function(Box<RangeFunction>),
    RowsFrom(Box<RowsFrom>),
    Subselect(Box<RangeSubselect>),
    Join(Box<JoinExpression>),
    TableSample(Box<TableSample>),
}

impl FromElement {
    /// A reference to a relation by (possibly qualified) name.
    #[must_use]
    pub const fn relation(name: QualifiedName) -> Self {
        Self::Relation(RelationReference::new(name))
    }

    /// Returns the alias slot of this element.
    pub fn alias_mut(&mut self) -> &mut Option<Alias> {
        match self {
            Self::Relation(relation) => &mut relation.alias,
            Self::Function(function) => &mut function.alias,
            Self::RowsFrom(rows_from) => &mut rows_from.alias,
            Self::Subselect(subselect) => &mut subselect.alias,
            Self::Join(join) => &mut join.alias,
            Self::TableSample(sample) => &mut sample.relation.alias,
        }
    }
}

/// Target of `INSERT INTO name [AS alias]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertTarget {
    pub relation: QualifiedName,
    pub alias: Option<Identifier>,
}

/// Target of `UPDATE`, `DELETE` and `MERGE`: `[ONLY] name [*] [[AS] alias]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOrDeleteTarget {
    pub relation: QualifiedName,
    pub inherit: Option<bool>,
    pub alias: Option<Identifier>,
}

impl UpdateOrDeleteTarget {
    #[must_use]
    pub const fn new(relation: QualifiedName) -> Self {
        Self {
            relation,
            inherit: None,
            alias: None,
        }
    }
}
