//! Scalar expression AST types.

use super::{
    Identifier, JsonExpr, NodeError, NodeList, OrderByElement, QualifiedName, QualifiedOperator,
    SelectStatement, TypeName, WindowDefinition, XmlExpr,
};

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Null,
    True,
    False,
    /// Integer or floating point literal, kept as written.
    Numeric(String),
    /// Character string, already unescaped.
    String(String),
    /// Bit string: `b'0101'`.
    BinaryString(String),
    /// Hexadecimal bit string: `x'ff'`.
    HexString(String),
}

/// A query parameter placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// `:name`
    Named(String),
    /// `$n`, one-based.
    Positional(u32),
}

/// The last part of a column reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnName {
    Name(Identifier),
    /// `*` in `table.*` or a bare `*` target.
    Star,
}

/// A possibly qualified column reference: `[[[catalog.]schema.]relation.]column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnReference {
    pub qualifiers: Vec<Identifier>,
    pub column: ColumnName,
}

impl ColumnReference {
    #[must_use]
    pub fn new(column: impl Into<Identifier>) -> Self {
        Self {
            qualifiers: Vec::new(),
            column: ColumnName::Name(column.into()),
        }
    }

    /// A bare `*`.
    #[must_use]
    pub const fn star() -> Self {
        Self {
            qualifiers: Vec::new(),
            column: ColumnName::Star,
        }
    }

    /// Builds a reference from its parts, the last one being the column.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::TooManyNameParts` for more than four parts and
    /// `NodeError::InvalidName` for none.
    pub fn from_parts(mut qualifiers: Vec<Identifier>, column: ColumnName) -> Result<Self, NodeError> {
        if qualifiers.len() > 3 {
            let mut parts: Vec<&str> = qualifiers.iter().map(Identifier::as_str).collect();
            parts.push(match &column {
                ColumnName::Name(name) => name.as_str(),
                ColumnName::Star => "*",
            });
            return Err(NodeError::TooManyNameParts(parts.join(".")));
        }
        qualifiers.shrink_to_fit();
        Ok(Self { qualifiers, column })
    }
}

/// An array subscript or slice: `[1]`, `[1:2]`, `[:]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayIndexes {
    pub lower: Option<Expr>,
    pub upper: Option<Expr>,
    pub is_slice: bool,
}

/// One step of an indirection chain.
#[derive(Debug, Clone, PartialEq)]
pub enum IndirectionItem {
    Field(Identifier),
    Star,
    Index(ArrayIndexes),
}

/// Field selection or subscripting applied to an expression: `(foo).bar[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Indirection {
    pub base: Expr,
    pub items: NodeList<IndirectionItem>,
}

/// A row constructor: `ROW(a, b)` or `(a, b)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowExpr {
    pub items: NodeList<Expr>,
}

impl RowExpr {
    #[must_use]
    pub fn new(items: impl Into<NodeList<Expr>>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

/// An array constructor: `ARRAY[1, 2]`; nested arrays are items of kind [`Expr::Array`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayExpr {
    pub items: NodeList<Expr>,
}

/// Keyword before a parenthesized subquery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubselectOp {
    Exists,
    Any,
    All,
    Some,
    Array,
}

impl SubselectOp {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exists => "exists",
            Self::Any => "any",
            Self::All => "all",
            Self::Some => "some",
            Self::Array => "array",
        }
    }
}

/// A subquery used as an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SubselectExpr {
    pub query: SelectStatement,
    pub operator: Option<SubselectOp>,
}

/// `ANY`/`ALL`/`SOME` applied to an array: `a = any(b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayComparisonKind {
    Any,
    All,
    Some,
}

impl ArrayComparisonKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
            Self::Some => "some",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayComparison {
    pub kind: ArrayComparisonKind,
    pub array: Expr,
}

/// Arguments of a generic function call.
///
/// Positional arguments always come before named ones; names are unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionArguments {
    star: bool,
    positional: Vec<Expr>,
    named: Vec<(Identifier, Expr)>,
}

impl FunctionArguments {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            star: false,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// The `*` argument of `count(*)`.
    #[must_use]
    pub const fn star() -> Self {
        Self {
            star: true,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Creates a list of positional arguments.
    #[must_use]
    pub fn positional(arguments: Vec<Expr>) -> Self {
        Self {
            star: false,
            positional: arguments,
            named: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_star(&self) -> bool {
        self.star
    }

    #[must_use]
    pub fn positional_arguments(&self) -> &[Expr] {
        &self.positional
    }

    #[must_use]
    pub fn named_arguments(&self) -> &[(Identifier, Expr)] {
        &self.named
    }

    /// Returns the named argument `name`.
    #[must_use]
    pub fn get_named(&self, name: &str) -> Option<&Expr> {
        self.named
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Appends a positional argument.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::PositionalAfterNamed` once a named argument was added.
    pub fn push_positional(&mut self, argument: Expr) -> Result<(), NodeError> {
        if !self.named.is_empty() {
            return Err(NodeError::PositionalAfterNamed);
        }
        self.star = false;
        self.positional.push(argument);
        Ok(())
    }

    /// Appends a named argument.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::DuplicateArgument` if the name is already used.
    pub fn push_named(&mut self, name: Identifier, argument: Expr) -> Result<(), NodeError> {
        if self.get_named(name.as_str()).is_some() {
            return Err(NodeError::DuplicateArgument(name.to_string()));
        }
        self.star = false;
        self.named.push((name, argument));
        Ok(())
    }

    /// Merges another argument list into this one: positional arguments are
    /// appended, named ones overwrite existing arguments with the same name.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::PositionalAfterNamed` when `other` brings positional
    /// arguments into a list that already has named ones.
    pub fn merge(&mut self, other: Self) -> Result<(), NodeError> {
        if !other.positional.is_empty() && !self.named.is_empty() {
            return Err(NodeError::PositionalAfterNamed);
        }
        self.star = self.star && other.is_empty();
        self.positional.extend(other.positional);
        for (name, value) in other.named {
            match self.named.iter_mut().find(|(key, _)| *key == name) {
                Some(slot) => slot.1 = value,
                None => self.named.push((name, value)),
            }
        }
        Ok(())
    }

    /// Iterates over all argument values, positional first.
    pub fn values(&self) -> impl Iterator<Item = &Expr> {
        self.positional
            .iter()
            .chain(self.named.iter().map(|(_, value)| value))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Expr> {
        self.positional
            .iter_mut()
            .chain(self.named.iter_mut().map(|(_, value)| value))
    }
}

/// A call of a function referred to by name, including aggregates and
/// window functions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub arguments: FunctionArguments,
    pub distinct: bool,
    /// The last argument is marked `VARIADIC`.
    pub variadic: bool,
    pub order_by: NodeList<OrderByElement>,
    /// `order_by` was given in `WITHIN GROUP (...)`.
    pub within_group: bool,
    pub filter: Option<Expr>,
    pub over: Option<WindowDefinition>,
}

impl FunctionCall {
    #[must_use]
    pub fn new(name: QualifiedName, arguments: FunctionArguments) -> Self {
        Self {
            name,
            arguments,
            distinct: false,
            variadic: false,
            order_by: NodeList::new(),
            within_group: false,
            filter: None,
            over: None,
        }
    }
}

/// Functions with SQL-standard syntax that take no parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlValueFunctionName {
    CurrentDate,
    CurrentRole,
    CurrentUser,
    SessionUser,
    User,
    CurrentCatalog,
    CurrentSchema,
    SystemUser,
    CurrentTime,
    CurrentTimestamp,
    Localtime,
    Localtimestamp,
}

impl SqlValueFunctionName {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentDate => "current_date",
            Self::CurrentRole => "current_role",
            Self::CurrentUser => "current_user",
            Self::SessionUser => "session_user",
            Self::User => "user",
            Self::CurrentCatalog => "current_catalog",
            Self::CurrentSchema => "current_schema",
            Self::SystemUser => "system_user",
            Self::CurrentTime => "current_time",
            Self::CurrentTimestamp => "current_timestamp",
            Self::Localtime => "localtime",
            Self::Localtimestamp => "localtimestamp",
        }
    }

    /// Returns true for functions that accept a precision: `current_time(3)`.
    #[must_use]
    pub const fn allows_precision(&self) -> bool {
        matches!(
            self,
            Self::CurrentTime | Self::CurrentTimestamp | Self::Localtime | Self::Localtimestamp
        )
    }
}

/// `CURRENT_DATE`, `CURRENT_TIMESTAMP(3)`, `SESSION_USER` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlValueFunction {
    pub name: SqlValueFunctionName,
    pub precision: Option<u32>,
}

/// Functions with a keyword name taking a plain expression list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemFunctionName {
    Coalesce,
    Greatest,
    Least,
    Xmlconcat,
}

impl SystemFunctionName {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Coalesce => "coalesce",
            Self::Greatest => "greatest",
            Self::Least => "least",
            Self::Xmlconcat => "xmlconcat",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemFunctionCall {
    pub name: SystemFunctionName,
    pub arguments: NodeList<Expr>,
}

/// `expr::type` or `CAST(expr AS type)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Typecast {
    pub argument: Expr,
    pub type_name: TypeName,
}

/// A typed literal that must keep its `type 'value'` spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantTypecast {
    pub argument: Constant,
    pub type_name: TypeName,
}

/// An operator, either as a plain symbol or `OPERATOR(schema.op)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Symbol(String),
    Qualified(QualifiedOperator),
}

impl Operator {
    #[must_use]
    pub fn symbol(op: impl Into<String>) -> Self {
        Self::Symbol(op.into())
    }

    /// Returns the symbol of an unqualified operator.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(op) => Some(op),
            Self::Qualified(_) => None,
        }
    }
}

/// A prefix, infix or (legacy) postfix operator application.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorExpr {
    pub operator: Operator,
    pub left: Option<Expr>,
    pub right: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// A flat `AND` or `OR` over two or more terms.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr {
    pub operator: LogicalOp,
    pub items: NodeList<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BetweenPredicate {
    #[default]
    Between,
    Symmetric,
    Asymmetric,
}

impl BetweenPredicate {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Between => "between",
            Self::Symmetric => "between symmetric",
            Self::Asymmetric => "between asymmetric",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetweenExpr {
    pub argument: Expr,
    pub left: Expr,
    pub right: Expr,
    pub predicate: BetweenPredicate,
    pub not: bool,
}

/// The right-hand side of `IN`.
#[derive(Debug, Clone, PartialEq)]
pub enum InList {
    Values(NodeList<Expr>),
    Subselect(SelectStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InExpr {
    pub left: Expr,
    pub right: InList,
    pub not: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternOp {
    Like,
    Ilike,
    SimilarTo,
}

impl PatternOp {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::SimilarTo => "similar to",
        }
    }
}

/// `LIKE`, `ILIKE` and `SIMILAR TO` with an optional `ESCAPE`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternExpr {
    pub argument: Expr,
    pub pattern: Expr,
    pub operator: PatternOp,
    pub not: bool,
    pub escape: Option<Expr>,
}

/// What an `IS [NOT] ...` test checks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsPredicate {
    Null,
    True,
    False,
    Unknown,
    Document,
    Normalized,
    NfcNormalized,
    NfdNormalized,
    NfkcNormalized,
    NfkdNormalized,
}

impl IsPredicate {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
            Self::Unknown => "unknown",
            Self::Document => "document",
            Self::Normalized => "normalized",
            Self::NfcNormalized => "nfc normalized",
            Self::NfdNormalized => "nfd normalized",
            Self::NfkcNormalized => "nfkc normalized",
            Self::NfkdNormalized => "nfkd normalized",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsExpr {
    pub argument: Expr,
    pub predicate: IsPredicate,
    pub not: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsDistinctFromExpr {
    pub left: Expr,
    pub right: Expr,
    pub not: bool,
}

/// `expr IS [NOT] OF (type, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsOfExpr {
    pub left: Expr,
    pub right: NodeList<TypeName>,
    pub not: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsJsonType {
    Value,
    Array,
    Object,
    Scalar,
}

impl IsJsonType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Array => "array",
            Self::Object => "object",
            Self::Scalar => "scalar",
        }
    }
}

/// `expr IS [NOT] JSON [VALUE|ARRAY|OBJECT|SCALAR] [WITH|WITHOUT UNIQUE KEYS]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsJsonExpr {
    pub argument: Expr,
    pub not: bool,
    pub json_type: Option<IsJsonType>,
    pub unique_keys: Option<bool>,
}

/// `(a, b) OVERLAPS (c, d)`; both rows hold exactly two items.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapsExpr {
    pub left: RowExpr,
    pub right: RowExpr,
}

impl OverlapsExpr {
    /// # Errors
    ///
    /// Returns `NodeError::WrongKind` unless both rows have two items.
    pub fn new(left: RowExpr, right: RowExpr) -> Result<Self, NodeError> {
        for row in [&left, &right] {
            if row.items.len() != 2 {
                return Err(NodeError::WrongKind {
                    role: "OVERLAPS argument",
                    found: format!("a row with {} items", row.items.len()),
                });
            }
        }
        Ok(Self { left, right })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenExpr {
    pub when: Expr,
    pub then: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub argument: Option<Expr>,
    pub when: NodeList<WhenExpr>,
    pub else_clause: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollateExpr {
    pub argument: Expr,
    pub collation: QualifiedName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtTimeZoneExpr {
    pub argument: Expr,
    pub zone: Expr,
}

/// `EXTRACT(field FROM source)`; the field is kept as given.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractExpr {
    pub field: String,
    pub source: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizeForm {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl NormalizeForm {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nfc => "nfc",
            Self::Nfd => "nfd",
            Self::Nfkc => "nfkc",
            Self::Nfkd => "nfkd",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeExpr {
    pub argument: Expr,
    pub form: Option<NormalizeForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullIfExpr {
    pub first: Expr,
    pub second: Expr,
}

/// `OVERLAY(string PLACING new FROM start [FOR count])`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayExpr {
    pub string: Expr,
    pub new_substring: Expr,
    pub start: Expr,
    pub count: Option<Expr>,
}

/// `POSITION(substring IN string)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionExpr {
    pub substring: Expr,
    pub string: Expr,
}

/// `SUBSTRING(string [FROM start] [FOR count])`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstringFromExpr {
    pub string: Expr,
    pub from: Option<Expr>,
    pub count: Option<Expr>,
}

/// `SUBSTRING(string SIMILAR pattern ESCAPE escape)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstringSimilarExpr {
    pub string: Expr,
    pub pattern: Expr,
    pub escape: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrimSide {
    Leading,
    Trailing,
    #[default]
    Both,
}

impl TrimSide {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Leading => "leading",
            Self::Trailing => "trailing",
            Self::Both => "both",
        }
    }
}

/// `TRIM([side] [characters] FROM string)`.
///
/// `arguments` holds the source string first and the characters to remove
/// last, matching the argument order of the underlying functions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimExpr {
    pub arguments: NodeList<Expr>,
    pub side: TrimSide,
}

/// A scalar expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Constant),
    Parameter(Parameter),
    ColumnRef(ColumnReference),
    Indirection(Box<Indirection>),
    Row(RowExpr),
    Array(ArrayExpr),
    Subselect(Box<SubselectExpr>),
    ArrayComparison(Box<ArrayComparison>),
    Function(Box<FunctionCall>),
    SqlValueFunction(SqlValueFunction),
    SystemFunction(SystemFunctionCall),
    Typecast(Box<Typecast>),
    ConstantTypecast(Box<ConstantTypecast>),
    Operator(Box<OperatorExpr>),
    Logical(LogicalExpr),
    Not(Box<Expr>),
    Between(Box<BetweenExpr>),
    In(Box<InExpr>),
    Pattern(Box<PatternExpr>),
    Is(Box<IsExpr>),
    IsDistinctFrom(Box<IsDistinctFromExpr>),
    IsOf(Box<IsOfExpr>),
    IsJson(Box<IsJsonExpr>),
    Overlaps(Box<OverlapsExpr>),
    Case(Box<CaseExpr>),
    Collate(Box<CollateExpr>),
    /// `COLLATION FOR (expr)`
    CollationFor(Box<Expr>),
    AtTimeZone(Box<AtTimeZoneExpr>),
    /// `expr AT LOCAL`
    AtLocal(Box<Expr>),
    Extract(Box<ExtractExpr>),
    Normalize(Box<NormalizeExpr>),
    NullIf(Box<NullIfExpr>),
    Overlay(Box<OverlayExpr>),
    Position(Box<PositionExpr>),
    SubstringFrom(Box<SubstringFromExpr>),
    SubstringSimilar(Box<SubstringSimilarExpr>),
    Trim(Box<TrimExpr>),
    /// `GROUPING(a, b)`
    Grouping(NodeList<Expr>),
    /// `MERGE_ACTION()`
    MergeAction,
    /// `DEFAULT` as a value in `VALUES` rows and `SET` clauses.
    SetToDefault,
    Xml(Box<XmlExpr>),
    Json(Box<JsonExpr>),
}

impl Expr {
    #[must_use]
    pub fn column(name: &str) -> Self {
        Self::ColumnRef(ColumnReference::new(name))
    }

    #[must_use]
    pub fn numeric(value: impl Into<String>) -> Self {
        Self::Constant(Constant::Numeric(value.into()))
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Constant(Constant::String(value.into()))
    }

    #[must_use]
    pub fn named_param(name: impl Into<String>) -> Self {
        Self::Parameter(Parameter::Named(name.into()))
    }

    #[must_use]
    pub const fn positional_param(position: u32) -> Self {
        Self::Parameter(Parameter::Positional(position))
    }

    /// Creates a binary operator expression.
    #[must_use]
    pub fn binary(left: Self, op: &str, right: Self) -> Self {
        Self::Operator(Box::new(OperatorExpr {
            operator: Operator::symbol(op),
            left: Some(left),
            right: Some(right),
        }))
    }

    /// Creates a prefix operator expression.
    #[must_use]
    pub fn prefix(op: &str, right: Self) -> Self {
        Self::Operator(Box::new(OperatorExpr {
            operator: Operator::symbol(op),
            left: None,
            right: Some(right),
        }))
    }

    #[must_use]
    pub fn typecast(self, type_name: TypeName) -> Self {
        Self::Typecast(Box::new(Typecast {
            argument: self,
            type_name,
        }))
    }

    /// Combines two expressions with `AND` or `OR`, flattening nested
    /// expressions of the same kind.
    #[must_use]
    pub fn logical(operator: LogicalOp, left: Self, right: Self) -> Self {
        let mut items = NodeList::new();
        for side in [left, right] {
            match side {
                Self::Logical(inner) if inner.operator == operator => items.extend(inner.items),
                other => items.push(other),
            }
        }
        Self::Logical(LogicalExpr { operator, items })
    }

    #[must_use]
    pub const fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_arguments_ordering() {
        let mut args = FunctionArguments::new();
        args.push_positional(Expr::numeric("1")).unwrap();
        args.push_named("a".into(), Expr::numeric("2")).unwrap();
        assert_eq!(
            args.push_positional(Expr::numeric("3")),
            Err(NodeError::PositionalAfterNamed)
        );
        assert_eq!(
            args.push_named("a".into(), Expr::numeric("4")),
            Err(NodeError::DuplicateArgument("a".into()))
        );
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_function_arguments_merge() {
        let mut args = FunctionArguments::positional(vec![Expr::numeric("1")]);
        let mut other = FunctionArguments::positional(vec![Expr::numeric("2")]);
        other.push_named("x".into(), Expr::numeric("3")).unwrap();
        args.merge(other).unwrap();

        let mut overwrite = FunctionArguments::new();
        overwrite.push_named("x".into(), Expr::numeric("4")).unwrap();
        args.merge(overwrite).unwrap();

        assert_eq!(args.positional_arguments().len(), 2);
        assert_eq!(args.get_named("x"), Some(&Expr::numeric("4")));
        assert!(args
            .merge(FunctionArguments::positional(vec![Expr::numeric("5")]))
            .is_err());
    }

    #[test]
    fn test_logical_flattens() {
        let inner = Expr::logical(LogicalOp::And, Expr::column("a"), Expr::column("b"));
        let outer = Expr::logical(LogicalOp::And, inner, Expr::column("c"));
        let Expr::Logical(logical) = outer else {
            panic!("expected logical expression");
        };
        assert_eq!(logical.items.len(), 3);

        let mixed = Expr::logical(
            LogicalOp::Or,
            Expr::logical(LogicalOp::And, Expr::column("a"), Expr::column("b")),
            Expr::column("c"),
        );
        let Expr::Logical(logical) = mixed else {
            panic!("expected logical expression");
        };
        assert_eq!(logical.items.len(), 2);
    }

    #[test]
    fn test_column_reference_parts() {
        assert!(ColumnReference::from_parts(
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            ColumnName::Star
        )
        .is_err());
        let reference =
            ColumnReference::from_parts(vec!["t".into()], ColumnName::Name("id".into())).unwrap();
        assert_eq!(reference.qualifiers.len(), 1);
    }

    #[test]
    fn test_overlaps_requires_pairs() {
        let pair = RowExpr::new(vec![Expr::column("a"), Expr::column("b")]);
        assert!(OverlapsExpr::new(pair.clone(), pair.clone()).is_ok());
        assert!(OverlapsExpr::new(pair, RowExpr::new(vec![Expr::column("c")])).is_err());
    }
}
