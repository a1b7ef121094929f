//! SQL/JSON functions: constructors, aggregates and query functions.

use super::classify::Parenthesized;
use super::functions::named_function;
use super::{Grammar, ParseError};
use crate::ast::{
    Expr, FunctionArguments, JsonArgument, JsonArray, JsonArrayAgg, JsonArraySubselect,
    JsonBehaviour, JsonConstructor, JsonEncoding, JsonExists, JsonExpr, JsonFormat,
    JsonFormattedValue, JsonKeyValue, JsonObject, JsonObjectAgg, JsonQuery, JsonQueryCommon,
    JsonReturning, JsonSerialize, JsonValue, JsonWrapper, NodeList,
};
use crate::lexer::{Keyword, TokenKind};

const BEHAVIOUR_KEYWORDS: &[Keyword] = &[
    Keyword::Null,
    Keyword::Error,
    Keyword::True,
    Keyword::False,
    Keyword::Unknown,
    Keyword::Empty,
    Keyword::Default,
];

/// Which of `JSON_EXISTS`, `JSON_VALUE` and `JSON_QUERY` is being parsed;
/// they accept different `ON EMPTY` / `ON ERROR` behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryFunction {
    Exists,
    Value,
    Query,
}

impl QueryFunction {
    /// Behaviours allowed in `ON ERROR`, as error message names.
    const fn on_error(self) -> &'static [&'static str] {
        match self {
            Self::Exists => &["ERROR", "TRUE", "FALSE", "UNKNOWN"],
            Self::Value => &["NULL", "ERROR", "DEFAULT"],
            Self::Query => &["NULL", "ERROR", "EMPTY [ARRAY]", "EMPTY OBJECT", "DEFAULT"],
        }
    }

    const fn on_empty(self) -> &'static [&'static str] {
        match self {
            Self::Exists => &[],
            _ => self.on_error(),
        }
    }
}

impl Grammar<'_> {
    /// `WITH UNIQUE [KEYS]` gives `Some(true)`, `WITHOUT ...` `Some(false)`.
    pub(super) fn json_uniqueness(&mut self) -> Result<Option<bool>, ParseError> {
        let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::With, Keyword::Without])
        else {
            return Ok(None);
        };
        self.next()?;
        self.expect_keyword(Keyword::Unique)?;
        self.eat_keyword(Keyword::Keys)?;
        Ok(Some(keyword == Keyword::With))
    }

    /// `ABSENT ON NULL` gives `Some(true)`, `NULL ON NULL` `Some(false)`.
    fn json_null_clause(&mut self) -> Result<Option<bool>, ParseError> {
        let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::Absent, Keyword::Null])
        else {
            return Ok(None);
        };
        self.next()?;
        self.expect_keyword(Keyword::On)?;
        self.expect_keyword(Keyword::Null)?;
        Ok(Some(keyword == Keyword::Absent))
    }

    fn json_format(&mut self) -> Result<Option<JsonFormat>, ParseError> {
        if !self.eat_keywords(&[Keyword::Format, Keyword::Json])? {
            return Ok(None);
        }
        let mut format = JsonFormat::default();
        if self.eat_keyword(Keyword::Encoding)? {
            let token = self.stream.current().clone();
            let name = self.col_id()?;
            format.encoding = Some(JsonEncoding::from_name(name.as_str()).ok_or_else(|| {
                self.error_at(format!("Unrecognized JSON encoding: {name}"), &token)
            })?);
        }
        Ok(Some(format))
    }

    fn json_formatted_value(&mut self) -> Result<JsonFormattedValue, ParseError> {
        let expression = self.expression()?;
        Ok(JsonFormattedValue {
            expression,
            format: self.json_format()?,
        })
    }

    /// `key : value` or `key VALUE value`.
    fn json_key_value(&mut self) -> Result<JsonKeyValue, ParseError> {
        let key = self.expression()?;
        self.json_key_value_tail(key)
    }

    fn json_key_value_tail(&mut self, key: Expr) -> Result<JsonKeyValue, ParseError> {
        if !self.eat_keyword(Keyword::Value)? {
            self.expect_special(':')?;
        }
        Ok(JsonKeyValue {
            key,
            value: self.json_formatted_value()?,
        })
    }

    fn json_returning(&mut self) -> Result<Option<JsonReturning>, ParseError> {
        if !self.eat_keyword(Keyword::Returning)? {
            return Ok(None);
        }
        let type_name = self.type_name()?;
        Ok(Some(JsonReturning {
            type_name,
            format: self.json_format()?,
        }))
    }

    /// `JSON_ARRAYAGG(...)` or `JSON_OBJECTAGG(...)` with `FILTER` and `OVER`.
    pub(super) fn json_aggregate(&mut self) -> Result<Option<Expr>, ParseError> {
        self.json_aggregate_call(false)
    }

    /// A JSON aggregate without `FILTER` and `OVER`, as accepted where only
    /// windowless function calls are: in `FROM` and index elements.
    pub(super) fn windowless_json_aggregate(&mut self) -> Result<Option<Expr>, ParseError> {
        self.json_aggregate_call(true)
    }

    fn json_aggregate_call(&mut self, windowless: bool) -> Result<Option<Expr>, ParseError> {
        let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::JsonArrayagg, Keyword::JsonObjectagg])
        else {
            return Ok(None);
        };
        self.next()?;
        self.expect_special('(')?;

        let mut aggregate = if keyword == Keyword::JsonArrayagg {
            let value = self.json_formatted_value()?;
            let order_by = if self.eat_keywords(&[Keyword::Order, Keyword::By])? {
                self.order_by_list()?
            } else {
                NodeList::new()
            };
            JsonExpr::ArrayAgg(JsonArrayAgg {
                value,
                order_by,
                absent_on_null: self.json_null_clause()?,
                returning: self.json_returning()?,
                filter: None,
                over: None,
            })
        } else {
            let key_value = self.json_key_value()?;
            let absent_on_null = self.json_null_clause()?;
            let unique_keys = self.json_uniqueness()?;
            JsonExpr::ObjectAgg(JsonObjectAgg {
                key_value,
                absent_on_null,
                unique_keys,
                returning: self.json_returning()?,
                filter: None,
                over: None,
            })
        };
        self.expect_special(')')?;

        if !windowless {
            let filter = self.filter_clause()?;
            let over = self.over_clause()?;
            match &mut aggregate {
                JsonExpr::ArrayAgg(agg) => (agg.filter, agg.over) = (filter, over),
                JsonExpr::ObjectAgg(agg) => (agg.filter, agg.over) = (filter, over),
                _ => {}
            }
        }
        Ok(Some(json(aggregate)))
    }

    /// Contents of `JSON_ARRAY(...)`: a value list or a single query.
    pub(super) fn json_array_constructor(&mut self) -> Result<Expr, ParseError> {
        if self.parenthesized(-1)? == Some(Parenthesized::Select) {
            let query = self.select_statement()?;
            let format = self.json_format()?;
            return Ok(json(JsonExpr::ArraySubselect(JsonArraySubselect {
                query,
                format,
                returning: self.json_returning()?,
            })));
        }
        if self.at_keyword(Keyword::Returning) || self.at_special(')') {
            return Ok(json(JsonExpr::Array(JsonArray {
                values: NodeList::new(),
                absent_on_null: None,
                returning: self.json_returning()?,
            })));
        }
        let values = self.comma_list(Self::json_formatted_value)?;
        let absent_on_null = self.json_null_clause()?;
        Ok(json(JsonExpr::Array(JsonArray {
            values,
            absent_on_null,
            returning: self.json_returning()?,
        })))
    }

    /// Contents of `JSON_OBJECT(...)`.
    ///
    /// `json_object` is also an ordinary function taking a text array or
    /// key and value arrays, so a call whose first argument is followed by
    /// `,` or `)` is parsed as a generic function call.
    pub(super) fn json_object_constructor(&mut self) -> Result<Expr, ParseError> {
        if self.at_special(')') {
            return Ok(json(JsonExpr::Object(JsonObject::default())));
        }
        if self.at_keyword(Keyword::Returning) {
            return Ok(json(JsonExpr::Object(JsonObject {
                returning: self.json_returning()?,
                ..JsonObject::default()
            })));
        }
        if matches!(
            self.stream.peek(1).kind,
            TokenKind::ColonEquals | TokenKind::EqualsGreater
        ) {
            let arguments = self.function_argument_list()?;
            return Ok(named_function("json_object", arguments));
        }

        let first = self.expression()?;
        if self.stream.matches_any_special(&[',', ')']) {
            let mut arguments = FunctionArguments::positional(vec![first]);
            if self.eat_special(',')? {
                let token = self.stream.current().clone();
                let rest = self.function_argument_list()?;
                arguments
                    .merge(rest)
                    .map_err(|err| self.node_error(&err, &token))?;
            }
            return Ok(named_function("json_object", arguments));
        }

        let mut arguments = NodeList::from(vec![self.json_key_value_tail(first)?]);
        if self.eat_special(',')? {
            arguments.extend(self.comma_list(Self::json_key_value)?);
        }
        let absent_on_null = self.json_null_clause()?;
        let unique_keys = self.json_uniqueness()?;
        Ok(json(JsonExpr::Object(JsonObject {
            arguments,
            absent_on_null,
            unique_keys,
            returning: self.json_returning()?,
        })))
    }

    /// Contents of `JSON(...)`.
    pub(super) fn json_constructor(&mut self) -> Result<Expr, ParseError> {
        let value = self.json_formatted_value()?;
        Ok(json(JsonExpr::Constructor(JsonConstructor {
            value,
            unique_keys: self.json_uniqueness()?,
        })))
    }

    pub(super) fn json_scalar(&mut self) -> Result<Expr, ParseError> {
        Ok(json(JsonExpr::Scalar(self.expression()?)))
    }

    pub(super) fn json_serialize(&mut self) -> Result<Expr, ParseError> {
        let value = self.json_formatted_value()?;
        Ok(json(JsonExpr::Serialize(JsonSerialize {
            value,
            returning: self.json_returning()?,
        })))
    }

    /// Contents of `JSON_EXISTS(...)`, `JSON_VALUE(...)` or `JSON_QUERY(...)`.
    pub(super) fn json_query_function(&mut self, keyword: Keyword) -> Result<Expr, ParseError> {
        let context = self.json_formatted_value()?;
        self.expect_special(',')?;
        let path = self.expression()?;
        let passing = if self.eat_keyword(Keyword::Passing)? {
            self.comma_list(|g| {
                let value = g.json_formatted_value()?;
                g.expect_keyword(Keyword::As)?;
                Ok(JsonArgument {
                    value,
                    alias: g.col_label()?,
                })
            })?
        } else {
            NodeList::new()
        };
        let common = JsonQueryCommon {
            context,
            path,
            passing,
        };

        let node = match keyword {
            Keyword::JsonExists => {
                let (_, on_error) = self.json_behaviours(QueryFunction::Exists)?;
                JsonExpr::Exists(JsonExists { common, on_error })
            }
            Keyword::JsonValue => {
                let returning = self.json_returning()?;
                let (on_empty, on_error) = self.json_behaviours(QueryFunction::Value)?;
                JsonExpr::Value(JsonValue {
                    common,
                    returning,
                    on_empty,
                    on_error,
                })
            }
            _ => {
                let returning = self.json_returning()?;
                let wrapper = self.json_wrapper()?;
                let keep_quotes = self.json_quotes()?;
                let (on_empty, on_error) = self.json_behaviours(QueryFunction::Query)?;
                JsonExpr::Query(JsonQuery {
                    common,
                    returning,
                    wrapper,
                    keep_quotes,
                    on_empty,
                    on_error,
                })
            }
        };
        Ok(json(node))
    }

    /// `WITHOUT [ARRAY] WRAPPER` or `WITH [CONDITIONAL|UNCONDITIONAL] [ARRAY] WRAPPER`.
    fn json_wrapper(&mut self) -> Result<Option<JsonWrapper>, ParseError> {
        let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::With, Keyword::Without])
        else {
            return Ok(None);
        };
        self.next()?;
        let wrapper = if keyword == Keyword::Without {
            JsonWrapper::Without
        } else if self.eat_keyword(Keyword::Conditional)? {
            JsonWrapper::Conditional
        } else {
            self.eat_keyword(Keyword::Unconditional)?;
            JsonWrapper::Unconditional
        };
        self.eat_keyword(Keyword::Array)?;
        self.expect_keyword(Keyword::Wrapper)?;
        Ok(Some(wrapper))
    }

    /// `KEEP|OMIT QUOTES [ON SCALAR STRING]`.
    fn json_quotes(&mut self) -> Result<Option<bool>, ParseError> {
        let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::Keep, Keyword::Omit])
        else {
            return Ok(None);
        };
        self.next()?;
        self.expect_keyword(Keyword::Quotes)?;
        if self.eat_keyword(Keyword::On)? {
            self.expect_keyword(Keyword::Scalar)?;
            self.expect_keyword(Keyword::String)?;
        }
        Ok(Some(keyword == Keyword::Keep))
    }

    /// `behaviour ON EMPTY` and `behaviour ON ERROR`, in that order, each
    /// at most once. Returns `(on_empty, on_error)`.
    fn json_behaviours(
        &mut self,
        function: QueryFunction,
    ) -> Result<(Option<JsonBehaviour>, Option<JsonBehaviour>), ParseError> {
        let (mut on_empty, mut on_error) = (None, None);
        while let Some(keyword) = self.stream.matches_any_keyword(BEHAVIOUR_KEYWORDS) {
            let behaviour_token = self.next()?;
            let behaviour = match keyword {
                Keyword::Null => JsonBehaviour::Null,
                Keyword::Error => JsonBehaviour::Error,
                Keyword::True => JsonBehaviour::True,
                Keyword::False => JsonBehaviour::False,
                Keyword::Unknown => JsonBehaviour::Unknown,
                Keyword::Empty => {
                    if self.eat_keyword(Keyword::Object)? {
                        JsonBehaviour::EmptyObject
                    } else {
                        self.eat_keyword(Keyword::Array)?;
                        JsonBehaviour::EmptyArray
                    }
                }
                _ => JsonBehaviour::Default(self.expression()?),
            };

            let on_token = self.stream.current().clone();
            self.expect_keyword(Keyword::On)?;
            let target = self
                .stream
                .expect_keyword(&[Keyword::Empty, Keyword::Error])?;
            let name = behaviour.message_name();
            if target == Keyword::Error && on_error.is_none() {
                on_error = Some(behaviour);
            } else if target == Keyword::Empty && on_empty.is_none() && on_error.is_none() {
                on_empty = Some(behaviour);
            } else {
                return Err(ParseError::unexpected(
                    "special character ')'",
                    &behaviour_token,
                    self.stream.source(),
                ));
            }

            let applicable = if target == Keyword::Empty {
                function.on_empty()
            } else {
                function.on_error()
            };
            if applicable.is_empty() {
                let clause = if target == Keyword::Empty {
                    "ON EMPTY"
                } else {
                    "ON ERROR"
                };
                return Err(self.error_at(format!("Unexpected {clause} clause"), &on_token));
            }
            if !applicable.contains(&name) {
                return Err(self.error_at(
                    format!(
                        "Unexpected {name}, expecting one of {}",
                        applicable.join(", ")
                    ),
                    &behaviour_token,
                ));
            }
        }
        Ok((on_empty, on_error))
    }
}

fn json(expr: JsonExpr) -> Expr {
    Expr::Json(Box::new(expr))
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::Parser;

    fn parse_json(sql: &str) -> JsonExpr {
        match Parser::new().parse_expression(sql).unwrap() {
            Expr::Json(json) => *json,
            other => panic!("expected JSON expression, got {other:?}"),
        }
    }

    fn error(sql: &str) -> String {
        Parser::new().parse_expression(sql).unwrap_err().message
    }

    #[test]
    fn test_json_object_forms() {
        let JsonExpr::Object(object) =
            parse_json("json_object('a' : 1, 'b' value 2 absent on null with unique keys)")
        else {
            panic!("expected json_object");
        };
        assert_eq!(object.arguments.len(), 2);
        assert_eq!(object.absent_on_null, Some(true));
        assert_eq!(object.unique_keys, Some(true));

        assert_eq!(parse_json("json_object()"), JsonExpr::Object(JsonObject::default()));
        let expr = Parser::new()
            .parse_expression("json_object('{a, 1}')")
            .unwrap();
        assert!(matches!(expr, Expr::Function(_)));
    }

    #[test]
    fn test_json_array_forms() {
        let JsonExpr::Array(array) = parse_json("json_array(1, 'a' format json null on null)")
        else {
            panic!("expected json_array");
        };
        assert_eq!(array.values.len(), 2);
        assert!(array.values[1].format.is_some());
        assert_eq!(array.absent_on_null, Some(false));

        assert!(matches!(
            parse_json("json_array(select 1 returning jsonb)"),
            JsonExpr::ArraySubselect(ref s) if s.returning.is_some()
        ));
        assert!(matches!(
            parse_json("json_array(returning json)"),
            JsonExpr::Array(ref a) if a.values.is_empty()
        ));
    }

    #[test]
    fn test_json_aggregates() {
        let JsonExpr::ArrayAgg(agg) =
            parse_json("json_arrayagg(a order by b absent on null) filter (where c) over ()")
        else {
            panic!("expected json_arrayagg");
        };
        assert_eq!(agg.order_by.len(), 1);
        assert!(agg.filter.is_some());
        assert!(agg.over.is_some());

        assert!(matches!(
            parse_json("json_objectagg(k : v without unique)"),
            JsonExpr::ObjectAgg(ref agg) if agg.unique_keys == Some(false)
        ));
    }

    #[test]
    fn test_json_format_encoding() {
        let JsonExpr::Serialize(serialize) =
            parse_json("json_serialize(a format json encoding utf8 returning bytea)")
        else {
            panic!("expected json_serialize");
        };
        assert_eq!(
            serialize.value.format,
            Some(JsonFormat {
                encoding: Some(JsonEncoding::Utf8)
            })
        );
        assert_eq!(
            error("json_serialize(a format json encoding latin1)"),
            "Unrecognized JSON encoding: latin1"
        );
    }

    #[test]
    fn test_json_query_functions() {
        let JsonExpr::Query(query) = parse_json(
            "json_query(doc, '$.a' passing 1 as x returning jsonb with conditional array wrapper \
             omit quotes on scalar string empty object on empty error on error)",
        ) else {
            panic!("expected json_query");
        };
        assert_eq!(query.common.passing.len(), 1);
        assert_eq!(query.wrapper, Some(JsonWrapper::Conditional));
        assert_eq!(query.keep_quotes, Some(false));
        assert_eq!(query.on_empty, Some(JsonBehaviour::EmptyObject));
        assert_eq!(query.on_error, Some(JsonBehaviour::Error));

        assert!(matches!(
            parse_json("json_value(doc, '$.a' default 0 on empty)"),
            JsonExpr::Value(ref v) if matches!(v.on_empty, Some(JsonBehaviour::Default(_)))
        ));
        assert!(matches!(
            parse_json("json_exists(doc, '$.a' unknown on error)"),
            JsonExpr::Exists(ref e) if e.on_error == Some(JsonBehaviour::Unknown)
        ));
    }

    #[test]
    fn test_json_behaviour_errors() {
        assert_eq!(
            error("json_exists(doc, '$' error on empty)"),
            "Unexpected ON EMPTY clause"
        );
        assert_eq!(
            error("json_value(doc, '$' empty array on error)"),
            "Unexpected EMPTY [ARRAY], expecting one of NULL, ERROR, DEFAULT"
        );
        assert!(error("json_value(doc, '$' null on error null on empty)")
            .ends_with("expecting special character ')'"));
    }

    #[test]
    fn test_is_json_uniqueness() {
        let expr = Parser::new()
            .parse_expression("a is json object with unique keys")
            .unwrap();
        assert!(matches!(expr, Expr::IsJson(is) if is.unique_keys == Some(true)));
    }
}
