//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node owns its children; a node moved into another slot leaves its
//! previous place, so a node has at most one parent and a tree can never
//! contain itself. Deep copies are made with `Clone`, structural comparison
//! with `PartialEq`.
//!
//! Only [`NodeList`] has `replace_child` and `remove_child`. A single child
//! slot is a plain field (`Expr`, `Option<Box<..>>`, ...): assign to it
//! through `&mut`, or from a [`VisitorMut`](crate::visit::VisitorMut) when
//! the slot has to be found first.

mod clause;
mod expression;
mod json;
mod name;
mod node;
mod range;
mod statement;
mod types;
mod xml;

pub use clause::{
    CommonTableExpression, ConflictAction, ConflictTarget, CycleClause, FrameDirection,
    FrameExclusion, FrameMode, GroupByClause, GroupingElement, IndexDirection, IndexElement,
    IndexParameters, IndexTarget, LockWaitPolicy, LockingElement, LockingStrength, NullsOrder,
    OnConflictClause, OrderByElement, OrderDirection, SearchClause, SetClause, SetTargetElement,
    TargetElement, WhereClause, WindowDefinition, WindowFrameBound, WindowFrameClause, WithClause,
};
pub use expression::{
    ArrayComparison, ArrayComparisonKind, ArrayExpr, ArrayIndexes, AtTimeZoneExpr,
    BetweenExpr, BetweenPredicate, CaseExpr, CollateExpr, ColumnName, ColumnReference, Constant,
    ConstantTypecast, Expr, ExtractExpr, FunctionArguments, FunctionCall, InExpr, InList,
    Indirection, IndirectionItem, IsDistinctFromExpr, IsExpr, IsJsonExpr, IsJsonType, IsOfExpr,
    IsPredicate, LogicalExpr, LogicalOp, NormalizeExpr, NormalizeForm, NullIfExpr, Operator,
    OperatorExpr, OverlapsExpr, OverlayExpr, Parameter, PatternExpr, PatternOp, PositionExpr,
    RowExpr, SqlValueFunction, SqlValueFunctionName, SubselectExpr, SubselectOp,
    SubstringFromExpr, SubstringSimilarExpr, SystemFunctionCall, SystemFunctionName, TrimExpr,
    TrimSide, Typecast, WhenExpr,
};
pub use json::{
    JsonArgument, JsonArray, JsonArrayAgg, JsonArraySubselect, JsonBehaviour, JsonConstructor,
    JsonEncoding, JsonExists, JsonExpr, JsonFormat, JsonFormattedValue, JsonKeyValue, JsonObject,
    JsonObjectAgg, JsonQuery, JsonQueryCommon, JsonReturning, JsonSerialize, JsonValue,
    JsonWrapper,
};
pub use name::{Identifier, QualifiedName, QualifiedOperator};
pub use node::{NodeError, NodeList};
pub use range::{
    Alias, AliasColumns, ColumnDefinition, FromElement, InsertTarget, JoinCondition,
    JoinExpression, JoinType, RangeFunction, RangeSubselect, RelationReference, RowsFrom,
    RowsFromElement, TableSample, UpdateOrDeleteTarget, UsingClause,
};
pub use statement::{
    DeleteStatement, Distinct, InsertOverriding, InsertStatement, MergeInsert, MergeMatch,
    MergeStatement, MergeWhenAction, MergeWhenClause, SelectBody, SelectStatement, SetOpSelect,
    SetOperator, SimpleSelect, Statement, UpdateStatement,
};
pub use types::{IntervalMask, TypeModifier, TypeName, TypeNameKind};
pub use xml::{
    XmlElement, XmlExists, XmlExpr, XmlOption, XmlParse, XmlPi, XmlRoot, XmlSerialize,
    XmlStandalone,
};
