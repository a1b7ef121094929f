//! SQL/JSON constructors and query functions.

use super::{Expr, Identifier, NodeList, OrderByElement, SelectStatement, TypeName, WindowDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonEncoding {
    Utf8,
    Utf16,
    Utf32,
}

impl JsonEncoding {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16 => "utf16",
            Self::Utf32 => "utf32",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" => Some(Self::Utf8),
            "utf16" => Some(Self::Utf16),
            "utf32" => Some(Self::Utf32),
            _ => None,
        }
    }
}

/// `FORMAT JSON [ENCODING enc]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JsonFormat {
    pub encoding: Option<JsonEncoding>,
}

/// `RETURNING type [FORMAT JSON ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonReturning {
    pub type_name: TypeName,
    pub format: Option<JsonFormat>,
}

/// `expr [FORMAT JSON ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonFormattedValue {
    pub expression: Expr,
    pub format: Option<JsonFormat>,
}

impl JsonFormattedValue {
    #[must_use]
    pub const fn new(expression: Expr) -> Self {
        Self {
            expression,
            format: None,
        }
    }
}

/// `key : value` or `key VALUE value`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonKeyValue {
    pub key: Expr,
    pub value: JsonFormattedValue,
}

/// `value AS name` in a `PASSING` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonArgument {
    pub value: JsonFormattedValue,
    pub alias: Identifier,
}

/// Behaviour in `ON EMPTY` / `ON ERROR` clauses.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonBehaviour {
    Null,
    Error,
    True,
    False,
    Unknown,
    EmptyArray,
    EmptyObject,
    Default(Expr),
}

impl JsonBehaviour {
    /// Keyword spelling, `None` for `DEFAULT expr`.
    #[must_use]
    pub const fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Null => Some("null"),
            Self::Error => Some("error"),
            Self::True => Some("true"),
            Self::False => Some("false"),
            Self::Unknown => Some("unknown"),
            Self::EmptyArray => Some("empty array"),
            Self::EmptyObject => Some("empty object"),
            Self::Default(_) => None,
        }
    }

    /// Name used in error messages.
    #[must_use]
    pub const fn message_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Error => "ERROR",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
            Self::EmptyArray => "EMPTY [ARRAY]",
            Self::EmptyObject => "EMPTY OBJECT",
            Self::Default(_) => "DEFAULT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonWrapper {
    Without,
    Conditional,
    Unconditional,
}

impl JsonWrapper {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Without => "without",
            Self::Conditional => "with conditional",
            Self::Unconditional => "with unconditional",
        }
    }
}

/// `JSON_ARRAYAGG(value [ORDER BY ...] [ABSENT|NULL ON NULL] [RETURNING ...])`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonArrayAgg {
    pub value: JsonFormattedValue,
    pub order_by: NodeList<OrderByElement>,
    pub absent_on_null: Option<bool>,
    pub returning: Option<JsonReturning>,
    pub filter: Option<Expr>,
    pub over: Option<WindowDefinition>,
}

/// `JSON_OBJECTAGG(key : value [... ON NULL] [WITH|WITHOUT UNIQUE KEYS] [RETURNING ...])`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObjectAgg {
    pub key_value: JsonKeyValue,
    pub absent_on_null: Option<bool>,
    pub unique_keys: Option<bool>,
    pub returning: Option<JsonReturning>,
    pub filter: Option<Expr>,
    pub over: Option<WindowDefinition>,
}

/// `JSON_ARRAY(values [... ON NULL] [RETURNING ...])`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonArray {
    pub values: NodeList<JsonFormattedValue>,
    pub absent_on_null: Option<bool>,
    pub returning: Option<JsonReturning>,
}

/// `JSON_ARRAY(query [FORMAT JSON] [RETURNING ...])`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonArraySubselect {
    pub query: SelectStatement,
    pub format: Option<JsonFormat>,
    pub returning: Option<JsonReturning>,
}

/// `JSON_OBJECT(key : value, ... [... ON NULL] [... UNIQUE KEYS] [RETURNING ...])`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonObject {
    pub arguments: NodeList<JsonKeyValue>,
    pub absent_on_null: Option<bool>,
    pub unique_keys: Option<bool>,
    pub returning: Option<JsonReturning>,
}

/// `JSON(value [WITH|WITHOUT UNIQUE KEYS])`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonConstructor {
    pub value: JsonFormattedValue,
    pub unique_keys: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonSerialize {
    pub value: JsonFormattedValue,
    pub returning: Option<JsonReturning>,
}

/// Arguments shared by `JSON_EXISTS`, `JSON_VALUE` and `JSON_QUERY`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonQueryCommon {
    pub context: JsonFormattedValue,
    pub path: Expr,
    pub passing: NodeList<JsonArgument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonExists {
    pub common: JsonQueryCommon,
    pub on_error: Option<JsonBehaviour>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonValue {
    pub common: JsonQueryCommon,
    pub returning: Option<JsonReturning>,
    pub on_empty: Option<JsonBehaviour>,
    pub on_error: Option<JsonBehaviour>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsonQuery {
    pub common: JsonQueryCommon,
    pub returning: Option<JsonReturning>,
    pub wrapper: Option<JsonWrapper>,
    pub keep_quotes: Option<bool>,
    pub on_empty: Option<JsonBehaviour>,
    pub on_error: Option<JsonBehaviour>,
}

/// A SQL/JSON function call.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonExpr {
    ArrayAgg(JsonArrayAgg),
    ObjectAgg(JsonObjectAgg),
    Array(JsonArray),
    ArraySubselect(JsonArraySubselect),
    Object(JsonObject),
    Constructor(JsonConstructor),
    Scalar(Expr),
    Serialize(JsonSerialize),
    Exists(JsonExists),
    Value(JsonValue),
    Query(JsonQuery),
}
