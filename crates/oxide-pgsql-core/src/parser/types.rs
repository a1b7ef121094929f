//! Type names, including the SQL standard ones with their own syntax, and
//! `type 'literal'` casts.

use super::expressions::constant;
use super::{is_type_function_name, token_identifier, Grammar, ParseError};
use crate::ast::{
    Constant, Expr, Identifier, IntervalMask, QualifiedName, TypeModifier, TypeName,
};
use crate::lexer::{Keyword, Token, TokenKind};

const NUMERIC_TYPES: &[Keyword] = &[
    Keyword::Int,
    Keyword::Integer,
    Keyword::Smallint,
    Keyword::Bigint,
    Keyword::Real,
    Keyword::Float,
    Keyword::Decimal,
    Keyword::Dec,
    Keyword::Numeric,
    Keyword::Boolean,
    Keyword::Double,
];

const CHARACTER_TYPES: &[Keyword] = &[
    Keyword::Character,
    Keyword::Char,
    Keyword::Varchar,
    Keyword::Nchar,
    Keyword::National,
];

const INTERVAL_FIELDS: &[Keyword] = &[
    Keyword::Year,
    Keyword::Month,
    Keyword::Day,
    Keyword::Hour,
    Keyword::Minute,
    Keyword::Second,
];

/// The `pg_catalog` name of a SQL standard numeric type.
const fn numeric_type(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::Smallint => "int2",
        Keyword::Bigint => "int8",
        Keyword::Real => "float4",
        Keyword::Decimal | Keyword::Dec | Keyword::Numeric => "numeric",
        Keyword::Boolean => "bool",
        Keyword::Double => "float8",
        _ => "int4",
    }
}

impl Grammar<'_> {
    /// A full type name: `[SETOF] name [ARRAY[n] | [n]...]`.
    pub(super) fn type_name(&mut self) -> Result<TypeName, ParseError> {
        let setof = self.eat_keyword(Keyword::Setof)?;
        let mut type_name = self.simple_type_name()?;
        type_name.setof = setof;

        if self.eat_keyword(Keyword::Array)? {
            if self.eat_special('[')? {
                let bound = self.array_bound()?;
                type_name.bounds.push(bound);
                self.expect_special(']')?;
            } else {
                type_name.bounds.push(-1);
            }
        } else {
            while self.eat_special('[')? {
                let bound = if matches!(self.stream.current().kind, TokenKind::Integer(_)) {
                    self.array_bound()?
                } else {
                    -1
                };
                type_name.bounds.push(bound);
                self.expect_special(']')?;
            }
        }
        Ok(type_name)
    }

    fn array_bound(&mut self) -> Result<i32, ParseError> {
        let token = self.expect_integer()?;
        let text = token.text().unwrap_or_default();
        text.parse()
            .map_err(|_| self.error_at(format!("Invalid array bound {text}"), &token))
    }

    fn expect_integer(&mut self) -> Result<Token, ParseError> {
        self.stream
            .expect(|kind| matches!(kind, TokenKind::Integer(_)), "integer literal")
    }

    /// `(n)` with a single integer, as taken by most standard types.
    fn integer_modifier(&mut self) -> Result<Vec<TypeModifier>, ParseError> {
        if !self.eat_special('(')? {
            return Ok(Vec::new());
        }
        let value = constant(&self.expect_integer()?);
        self.expect_special(')')?;
        Ok(vec![TypeModifier::Constant(value)])
    }

    pub(super) fn simple_type_name(&mut self) -> Result<TypeName, ParseError> {
        if self.eat_keyword(Keyword::Interval)? {
            let modifiers = self.integer_modifier()?;
            return self.interval_mask(modifiers);
        }
        let standard = match self.datetime_type_name()? {
            Some(type_name) => Some(type_name),
            None => match self.character_type_name(false)? {
                Some(type_name) => Some(type_name),
                None => match self.bit_type_name(false)? {
                    Some(type_name) => Some(type_name),
                    None => match self.numeric_type_name()? {
                        Some(type_name) => Some(type_name),
                        None => self.json_type_name()?,
                    },
                },
            },
        };
        if let Some(type_name) = standard {
            return Ok(type_name);
        }
        if is_type_function_name(self.stream.current()) {
            return self.generic_type_name();
        }
        Err(self.stream.error_here("Expecting type name"))
    }

    fn numeric_type_name(&mut self) -> Result<Option<TypeName>, ParseError> {
        let Some(keyword) = self.stream.matches_any_keyword(NUMERIC_TYPES) else {
            return Ok(None);
        };
        if keyword == Keyword::Double && !self.stream.peek(1).is_keyword(Keyword::Precision) {
            return Ok(None);
        }
        self.next()?;

        let mut modifiers = Vec::new();
        match keyword {
            Keyword::Double => {
                self.next()?;
            }
            Keyword::Float => {
                let mut name = "float8";
                if self.eat_special('(')? {
                    let token = self.expect_integer()?;
                    let precision: i64 = token.text().unwrap_or_default().parse().unwrap_or(i64::MAX);
                    if precision < 1 {
                        return Err(self.error_at(
                            "Precision for type float must be at least 1 bit",
                            &token,
                        ));
                    } else if precision <= 24 {
                        name = "float4";
                    } else if precision >= 54 {
                        return Err(self.error_at(
                            "Precision for type float must be less than 54 bits",
                            &token,
                        ));
                    }
                    self.expect_special(')')?;
                }
                return Ok(Some(TypeName::catalog(name)));
            }
            Keyword::Decimal | Keyword::Dec | Keyword::Numeric => {
                // only constants, as in the server grammar
                if self.eat_special('(')? {
                    modifiers.push(TypeModifier::Constant(constant(&self.expect_integer()?)));
                    if self.eat_special(',')? {
                        modifiers.push(TypeModifier::Constant(constant(&self.expect_integer()?)));
                    }
                    self.expect_special(')')?;
                }
            }
            _ => {}
        }
        Ok(Some(
            TypeName::catalog(numeric_type(keyword)).with_modifiers(modifiers),
        ))
    }

    /// `BIT [VARYING] [(n)]`; a plain `BIT` means `bit(1)` except in
    /// `bit 'literal'`, where the length is taken from the literal.
    fn bit_type_name(&mut self, leading: bool) -> Result<Option<TypeName>, ParseError> {
        if !self.eat_keyword(Keyword::Bit)? {
            return Ok(None);
        }
        let varying = self.eat_keyword(Keyword::Varying)?;
        let mut modifiers = self.integer_modifier()?;
        if !leading && !varying && modifiers.is_empty() {
            modifiers.push(TypeModifier::Constant(Constant::Numeric(String::from("1"))));
        }
        let name = if varying { "varbit" } else { "bit" };
        Ok(Some(TypeName::catalog(name).with_modifiers(modifiers)))
    }

    /// The same defaults apply to `CHAR` as to `BIT`.
    fn character_type_name(&mut self, leading: bool) -> Result<Option<TypeName>, ParseError> {
        let Some(keyword) = self.stream.matches_any_keyword(CHARACTER_TYPES) else {
            return Ok(None);
        };
        if keyword == Keyword::National
            && !self
                .stream
                .peek(1)
                .is_any_keyword(&[Keyword::Character, Keyword::Char])
        {
            return Ok(None);
        }
        self.next()?;
        if keyword == Keyword::National {
            self.next()?;
        }

        let mut varying = keyword == Keyword::Varchar;
        if !varying {
            varying = self.eat_keyword(Keyword::Varying)?;
        }
        let mut modifiers = self.integer_modifier()?;
        if !leading && !varying && modifiers.is_empty() {
            modifiers.push(TypeModifier::Constant(Constant::Numeric(String::from("1"))));
        }
        let name = if varying { "varchar" } else { "bpchar" };
        Ok(Some(TypeName::catalog(name).with_modifiers(modifiers)))
    }

    fn datetime_type_name(&mut self) -> Result<Option<TypeName>, ParseError> {
        let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::Time, Keyword::Timestamp])
        else {
            return Ok(None);
        };
        self.next()?;
        let modifiers = self.integer_modifier()?;

        let mut name = String::from(keyword.as_str());
        if self.stream.matches_keyword_alternatives(&[
            &[Keyword::With, Keyword::Without],
            &[Keyword::Time],
            &[Keyword::Zone],
        ]) {
            if self.next()?.is_keyword(Keyword::With) {
                name.push_str("tz");
            }
            self.stream.skip(2)?;
        }
        Ok(Some(TypeName::catalog(&name).with_modifiers(modifiers)))
    }

    fn json_type_name(&mut self) -> Result<Option<TypeName>, ParseError> {
        if self.eat_keyword(Keyword::Json)? {
            Ok(Some(TypeName::catalog("json")))
        } else {
            Ok(None)
        }
    }

    /// The field mask after `INTERVAL [(p)]`; not allowed when a leading
    /// precision was given. A mask ending in `SECOND` takes its own precision.
    fn interval_mask(&mut self, mut modifiers: Vec<TypeModifier>) -> Result<TypeName, ParseError> {
        if !modifiers.is_empty() {
            return Ok(TypeName::interval(None).with_modifiers(modifiers));
        }
        let Some(start) = self.stream.matches_any_keyword(INTERVAL_FIELDS) else {
            return Ok(TypeName::interval(None));
        };
        self.next()?;

        let mask = if self.at_keyword(Keyword::To) {
            let to = self.next()?;
            let ends: &[Keyword] = match start {
                Keyword::Year => &[Keyword::Month],
                Keyword::Day => &[Keyword::Hour, Keyword::Minute, Keyword::Second],
                Keyword::Hour => &[Keyword::Minute, Keyword::Second],
                Keyword::Minute => &[Keyword::Second],
                _ => return Err(self.error_at(format!("Unexpected {}", to.kind), &to)),
            };
            let end = self.stream.expect_keyword(ends)?;
            match (start, end) {
                (Keyword::Year, _) => IntervalMask::YearToMonth,
                (Keyword::Day, Keyword::Hour) => IntervalMask::DayToHour,
                (Keyword::Day, Keyword::Minute) => IntervalMask::DayToMinute,
                (Keyword::Day, _) => IntervalMask::DayToSecond,
                (Keyword::Hour, Keyword::Minute) => IntervalMask::HourToMinute,
                (Keyword::Hour, _) => IntervalMask::HourToSecond,
                _ => IntervalMask::MinuteToSecond,
            }
        } else {
            match start {
                Keyword::Year => IntervalMask::Year,
                Keyword::Month => IntervalMask::Month,
                Keyword::Day => IntervalMask::Day,
                Keyword::Hour => IntervalMask::Hour,
                Keyword::Minute => IntervalMask::Minute,
                _ => IntervalMask::Second,
            }
        };
        if mask.ends_with_second() {
            modifiers = self.integer_modifier()?;
        }
        Ok(TypeName::interval(Some(mask)).with_modifiers(modifiers))
    }

    /// A possibly qualified user-defined type name with modifiers.
    fn generic_type_name(&mut self) -> Result<TypeName, ParseError> {
        let mut parts = vec![token_identifier(&self.next()?)];
        while self.eat_special('.')? {
            parts.push(self.col_label()?);
        }
        let name = self.qualified_from_parts(parts)?;
        let modifiers = self.generic_modifiers()?;
        Ok(TypeName::new(name).with_modifiers(modifiers))
    }

    fn qualified_from_parts(&self, parts: Vec<Identifier>) -> Result<QualifiedName, ParseError> {
        QualifiedName::from_parts(parts).map_err(|err| {
            self.node_error(&err, self.stream.current())
        })
    }

    fn generic_modifiers(&mut self) -> Result<Vec<TypeModifier>, ParseError> {
        if !self.eat_special('(')? {
            return Ok(Vec::new());
        }
        let modifiers = self.comma_list(Self::generic_modifier)?;
        self.expect_special(')')?;
        Ok(modifiers.into_vec())
    }

    fn generic_modifier(&mut self) -> Result<TypeModifier, ParseError> {
        let current = self.stream.current();
        if matches!(
            current.kind,
            TokenKind::Integer(_) | TokenKind::Float(_) | TokenKind::String(_)
        ) {
            return Ok(TypeModifier::Constant(constant(&self.next()?)));
        }
        if is_type_function_name(current) {
            return Ok(TypeModifier::Identifier(token_identifier(&self.next()?)));
        }
        Err(self.stream.error_here(format!(
            "Expecting a constant or an identifier, got {current}"
        )))
    }

    /// A standard type name followed by a string: `int4 '1'`,
    /// `interval '1' day`, `bit '101'`.
    pub(super) fn const_leading_typecast(&mut self) -> Result<Expr, ParseError> {
        if self.eat_keyword(Keyword::Interval)? {
            let modifiers = self.integer_modifier()?;
            let argument = self.string_constant()?;
            let type_name = self.interval_mask(modifiers)?;
            return Ok(Expr::Constant(argument).typecast(type_name));
        }

        let type_name = match self.datetime_type_name()? {
            Some(type_name) => Some(type_name),
            None => match self.character_type_name(true)? {
                Some(type_name) => Some(type_name),
                None => match self.bit_type_name(true)? {
                    Some(type_name) => Some(type_name),
                    None => match self.numeric_type_name()? {
                        Some(type_name) => Some(type_name),
                        None => self.json_type_name()?,
                    },
                },
            },
        };
        let Some(type_name) = type_name else {
            let current = self.stream.current();
            return Err(self
                .stream
                .error_here(format!("Expecting type name, got {current}")));
        };
        let argument = self.string_constant()?;
        Ok(Expr::Constant(argument).typecast(type_name))
    }

    /// `name [(modifiers)] 'literal'`, the name already consumed.
    pub(super) fn generic_leading_typecast(
        &mut self,
        identifiers: Vec<Identifier>,
    ) -> Result<Expr, ParseError> {
        let name = self.qualified_from_parts(identifiers)?;
        let modifiers = self.generic_modifiers()?;
        let argument = self.string_constant()?;
        Ok(Expr::Constant(argument).typecast(TypeName::new(name).with_modifiers(modifiers)))
    }

    fn string_constant(&mut self) -> Result<Constant, ParseError> {
        let token = self
            .stream
            .expect(|kind| matches!(kind, TokenKind::String(_)), "string literal")?;
        Ok(constant(&token))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::Parser;

    fn parse(sql: &str) -> TypeName {
        Parser::new().parse_type_name(sql).unwrap()
    }

    fn numeric(value: &str) -> TypeModifier {
        TypeModifier::Constant(Constant::Numeric(value.into()))
    }

    #[test]
    fn test_standard_names_are_mapped() {
        assert_eq!(parse("integer"), TypeName::catalog("int4"));
        assert_eq!(parse("bigint"), TypeName::catalog("int8"));
        assert_eq!(parse("double precision"), TypeName::catalog("float8"));
        assert_eq!(parse("boolean"), TypeName::catalog("bool"));
        assert_eq!(parse("json"), TypeName::catalog("json"));
        assert_eq!(
            parse("numeric(10, 2)"),
            TypeName::catalog("numeric").with_modifiers(vec![numeric("10"), numeric("2")])
        );
    }

    #[test]
    fn test_float_precision() {
        assert_eq!(parse("float"), TypeName::catalog("float8"));
        assert_eq!(parse("float(10)"), TypeName::catalog("float4"));
        assert_eq!(parse("float(40)"), TypeName::catalog("float8"));
        let err = Parser::new().parse_type_name("float(0)").unwrap_err();
        assert_eq!(err.message, "Precision for type float must be at least 1 bit");
        let err = Parser::new().parse_type_name("float(60)").unwrap_err();
        assert_eq!(err.message, "Precision for type float must be less than 54 bits");
    }

    #[test]
    fn test_character_types() {
        assert_eq!(
            parse("char"),
            TypeName::catalog("bpchar").with_modifiers(vec![numeric("1")])
        );
        assert_eq!(parse("character varying"), TypeName::catalog("varchar"));
        assert_eq!(
            parse("national character varying(5)"),
            TypeName::catalog("varchar").with_modifiers(vec![numeric("5")])
        );
        assert_eq!(
            parse("bit"),
            TypeName::catalog("bit").with_modifiers(vec![numeric("1")])
        );
        assert_eq!(parse("bit varying"), TypeName::catalog("varbit"));
    }

    #[test]
    fn test_datetime_types() {
        assert_eq!(parse("timestamp with time zone"), TypeName::catalog("timestamptz"));
        assert_eq!(parse("time without time zone"), TypeName::catalog("time"));
        assert_eq!(
            parse("timestamp(3)"),
            TypeName::catalog("timestamp").with_modifiers(vec![numeric("3")])
        );
    }

    #[test]
    fn test_interval_types() {
        assert_eq!(parse("interval"), TypeName::interval(None));
        assert_eq!(
            parse("interval day to second(3)"),
            TypeName::interval(Some(IntervalMask::DayToSecond)).with_modifiers(vec![numeric("3")])
        );
        assert_eq!(
            parse("interval(2)"),
            TypeName::interval(None).with_modifiers(vec![numeric("2")])
        );
        assert!(Parser::new().parse_type_name("interval month to day").is_err());
        assert!(Parser::new().parse_type_name("interval year to second").is_err());
    }

    #[test]
    fn test_generic_types_and_bounds() {
        let type_name = parse("setof myschema.mytype(foo, 'bar', 1)[][5]");
        assert!(type_name.setof);
        assert_eq!(type_name.bounds, vec![-1, 5]);
        assert_eq!(
            type_name.name(),
            Some(&QualifiedName::with_schema("myschema", "mytype"))
        );
        assert_eq!(type_name.modifiers.len(), 3);
        assert!(matches!(&type_name.modifiers[0], TypeModifier::Identifier(id) if id.as_str() == "foo"));

        assert_eq!(parse("int array").bounds, vec![-1]);
        assert_eq!(parse("int array[3]").bounds, vec![3]);
    }

    #[test]
    fn test_type_name_errors() {
        let err = Parser::new().parse_type_name("select").unwrap_err();
        assert_eq!(err.message, "Expecting type name");
        let err = Parser::new().parse_type_name("foo(+)").unwrap_err();
        assert!(err.message.starts_with("Expecting a constant or an identifier"));
    }

    #[test]
    fn test_leading_typecasts() {
        let parser = Parser::new();
        let Expr::Typecast(cast) = parser.parse_expression("interval '1' hour to minute").unwrap()
        else {
            panic!("expected typecast");
        };
        assert_eq!(
            cast.type_name,
            TypeName::interval(Some(IntervalMask::HourToMinute))
        );

        let Expr::Typecast(cast) = parser.parse_expression("char 'x'").unwrap() else {
            panic!("expected typecast");
        };
        assert!(cast.type_name.modifiers.is_empty());
    }
}
