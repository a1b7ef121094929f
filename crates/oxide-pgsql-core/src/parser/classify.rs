//! Lookahead checks deciding which rule to apply without consuming tokens.

use super::{is_name_start, Grammar, ParseError};
use crate::ast::SqlValueFunctionName;
use crate::lexer::{Keyword, KeywordCategory, Token, TokenKind};

/// What an opening parenthesis turned out to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Parenthesized {
    /// `(SELECT ...)`, `((SELECT ...) ORDER BY ...)`
    Select,
    /// `(a, b)`
    Row,
    /// `(a => 1)`, arguments of a function with named parameters
    Args,
    /// `(a + b)`
    Expression,
}

/// Keywords of functions that have a special grammar.
const SYSTEM_FUNCTIONS: &[Keyword] = &[
    Keyword::Cast,
    Keyword::Extract,
    Keyword::Overlay,
    Keyword::Position,
    Keyword::Substring,
    Keyword::Treat,
    Keyword::Trim,
    Keyword::Nullif,
    Keyword::Coalesce,
    Keyword::Greatest,
    Keyword::Least,
    Keyword::Xmlconcat,
    Keyword::Xmlelement,
    Keyword::Xmlexists,
    Keyword::Xmlforest,
    Keyword::Xmlparse,
    Keyword::Xmlpi,
    Keyword::Xmlroot,
    Keyword::Xmlserialize,
    Keyword::Normalize,
    Keyword::JsonObject,
    Keyword::JsonArray,
    Keyword::Json,
    Keyword::JsonScalar,
    Keyword::JsonSerialize,
    Keyword::JsonExists,
    Keyword::JsonValue,
    Keyword::JsonQuery,
    Keyword::MergeAction,
];

/// SQL standard type names that may start a `type 'literal'` cast.
const STANDARD_TYPES: &[Keyword] = &[
    Keyword::Character,
    Keyword::Char,
    Keyword::Varchar,
    Keyword::Nchar,
    Keyword::National,
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
    Keyword::Time,
    Keyword::Timestamp,
    Keyword::Bit,
    Keyword::Json,
    Keyword::Interval,
];

/// Keywords that may follow the set operation's closing parenthesis inside
/// a parenthesized query: `((SELECT 1) ORDER BY 1)`.
const SELECT_CONTINUATION: &[Keyword] = &[
    Keyword::Union,
    Keyword::Intersect,
    Keyword::Except,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Offset,
    Keyword::For,
    Keyword::Fetch,
];

/// Maps a keyword to the parenthesis-free function it names.
pub(super) const fn sql_value_function(keyword: Keyword) -> Option<SqlValueFunctionName> {
    Some(match keyword {
        Keyword::CurrentDate => SqlValueFunctionName::CurrentDate,
        Keyword::CurrentRole => SqlValueFunctionName::CurrentRole,
        Keyword::CurrentUser => SqlValueFunctionName::CurrentUser,
        Keyword::SessionUser => SqlValueFunctionName::SessionUser,
        Keyword::User => SqlValueFunctionName::User,
        Keyword::CurrentCatalog => SqlValueFunctionName::CurrentCatalog,
        Keyword::CurrentSchema => SqlValueFunctionName::CurrentSchema,
        Keyword::SystemUser => SqlValueFunctionName::SystemUser,
        Keyword::CurrentTime => SqlValueFunctionName::CurrentTime,
        Keyword::CurrentTimestamp => SqlValueFunctionName::CurrentTimestamp,
        Keyword::Localtime => SqlValueFunctionName::Localtime,
        Keyword::Localtimestamp => SqlValueFunctionName::Localtimestamp,
        _ => return None,
    })
}

/// Returns true if `token` may follow a complete element of a target list.
///
/// Used to decide whether a bare-label keyword after an expression is its
/// alias or a continuation of the expression.
pub(super) fn is_target_element_bound(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Eof => true,
        // ARRAY[...], CHAR '...' and CHARACTER VARYING '...' begin an operand
        TokenKind::Keyword(Keyword::Array | Keyword::Char | Keyword::Character) => false,
        TokenKind::Keyword(kw) => !kw.is_bare_label(),
        TokenKind::Special(c) => matches!(c, ',' | ')'),
        _ => false,
    }
}

impl Grammar<'_> {
    /// Classifies the parenthesized construct starting `offset` tokens from
    /// the current one; `None` if there is no `(` there.
    ///
    /// Nested parentheses and brackets are tracked; a top-level comma makes
    /// a row, a top-level `:=`/`=>` makes function arguments, and a leading
    /// `SELECT`/`VALUES`/`WITH` makes a query unless the query's own
    /// parentheses are closed before something that cannot continue it.
    pub(super) fn parenthesized(&self, offset: isize) -> Result<Option<Parenthesized>, ParseError> {
        let Some(mut idx) = self.stream.position().checked_add_signed(offset) else {
            return Ok(None);
        };
        let mut open = Vec::new();
        while self.stream.at(idx).is_special('(') {
            open.push(idx);
            idx += 1;
        }
        if open.is_empty() {
            return Ok(None);
        }

        let mut select_level = 0;
        if self
            .stream
            .at(idx)
            .is_any_keyword(&[Keyword::Values, Keyword::Select, Keyword::With])
        {
            if open.len() == 1 {
                return Ok(Some(Parenthesized::Select));
            }
            select_level = open.len();
        }

        while !open.is_empty() {
            idx += 1;
            let token = self.stream.at(idx);
            match &token.kind {
                TokenKind::Eof => break,
                TokenKind::Special('[') => idx = self.skip_parentheses(idx, true)? - 1,
                TokenKind::Special('(') => open.push(idx),
                TokenKind::Special(',') => {
                    if open.len() == 1 && select_level == 0 {
                        return Ok(Some(Parenthesized::Row));
                    }
                }
                TokenKind::Special(')') => {
                    if open.len() > 1 && select_level == open.len() {
                        let follow = self.stream.at(idx + 1);
                        if follow.is_any_keyword(SELECT_CONTINUATION) || follow.is_special(')') {
                            select_level -= 1;
                        } else {
                            select_level = 0;
                        }
                    }
                    open.pop();
                }
                TokenKind::ColonEquals | TokenKind::EqualsGreater => {
                    if open.len() == 1 && select_level == 0 {
                        return Ok(Some(Parenthesized::Args));
                    }
                }
                _ => {}
            }
        }

        if let Some(&first) = open.first() {
            return Err(self.error_at("Unbalanced '('", self.stream.at(first)));
        }
        Ok(Some(if select_level > 0 {
            Parenthesized::Select
        } else {
            Parenthesized::Expression
        }))
    }

    /// Returns the absolute index just past the bracket group opening at `start`.
    pub(super) fn skip_parentheses(&self, start: usize, square: bool) -> Result<usize, ParseError> {
        let (opening, closing) = if square { ('[', ']') } else { ('(', ')') };
        let mut idx = start;
        let mut depth = 1_usize;
        while depth > 0 {
            idx += 1;
            let token = self.stream.at(idx);
            if token.is_eof() {
                break;
            } else if token.is_special(opening) {
                depth += 1;
            } else if token.is_special(closing) {
                depth -= 1;
            }
        }
        if depth > 0 {
            return Err(self.error_at(format!("Unbalanced '{opening}'"), self.stream.at(start)));
        }
        Ok(idx + 1)
    }

    /// An operator token or `OPERATOR(`.
    pub(super) fn matches_operator(&self) -> bool {
        matches!(self.stream.current().kind, TokenKind::Operator(_))
            || (self.at_keyword(Keyword::Operator) && self.stream.peek(1).is_special('('))
    }

    /// Returns true if the current token is one of `+ - * / % ^ < > = <= >= != <>`.
    pub(super) fn matches_math_operator(&self) -> bool {
        is_math_operator(self.stream.current())
    }

    /// Matches a possibly qualified function name, returning the number of
    /// tokens it spans.
    pub(super) fn matches_function_name(&self) -> Option<usize> {
        let first = self.stream.current();
        if !is_name_start(first) {
            return None;
        }
        let mut idx = 1;
        while self.stream.peek(idx).is_special('.')
            && matches!(
                self.stream.peek(idx + 1).kind,
                TokenKind::Identifier(_) | TokenKind::Keyword(_)
            )
        {
            idx += 2;
        }
        match first.keyword_category() {
            Some(KeywordCategory::TypeFuncName) if idx > 1 => None,
            Some(KeywordCategory::ColumnName) if idx == 1 => None,
            _ => Some(idx),
        }
    }

    /// A function with a keyword name and its own argument grammar, or a
    /// parenthesis-free value function like `CURRENT_DATE`.
    pub(super) fn matches_special_function_call(&self) -> bool {
        let Some(keyword) = self.keyword() else {
            return false;
        };
        if sql_value_function(keyword).is_some() {
            true
        } else if keyword == Keyword::Collation {
            self.stream.peek(1).is_keyword(Keyword::For) && self.stream.peek(2).is_special('(')
        } else if SYSTEM_FUNCTIONS.contains(&keyword)
            || matches!(keyword, Keyword::JsonObjectagg | Keyword::JsonArrayagg)
        {
            self.stream.peek(1).is_special('(')
        } else {
            false
        }
    }

    pub(super) fn matches_function_call(&self) -> bool {
        self.matches_special_function_call()
            || self
                .matches_function_name()
                .is_some_and(|idx| self.stream.peek(idx).is_special('('))
    }

    /// A cast written as a standard type name followed by a string:
    /// `double precision '1.5'`, `timestamp(3) with time zone 'now'`.
    pub(super) fn matches_const_typecast(&self) -> Result<bool, ParseError> {
        let Some(base) = self.keyword().filter(|kw| STANDARD_TYPES.contains(kw)) else {
            return Ok(false);
        };
        let start = self.stream.position();
        let mut idx = start + 1;

        let companions: &[Keyword] = match base {
            Keyword::Double => &[Keyword::Precision],
            Keyword::National => &[Keyword::Character, Keyword::Char],
            _ => &[],
        };
        if !companions.is_empty() {
            if !self.stream.at(idx).is_any_keyword(companions) {
                return Ok(false);
            }
            idx += 1;
        }

        if matches!(
            base,
            Keyword::Bit | Keyword::Character | Keyword::Char | Keyword::Nchar | Keyword::National
        ) && self.stream.at(idx).is_keyword(Keyword::Varying)
        {
            idx += 1;
        }

        let no_modifiers = matches!(
            base,
            Keyword::Int
                | Keyword::Integer
                | Keyword::Smallint
                | Keyword::Bigint
                | Keyword::Real
                | Keyword::Boolean
                | Keyword::Double
        );
        if !no_modifiers && self.stream.at(idx).is_special('(') {
            idx = self.skip_parentheses(idx, false)?;
        }

        if matches!(base, Keyword::Time | Keyword::Timestamp)
            && self
                .stream
                .at(idx)
                .is_any_keyword(&[Keyword::With, Keyword::Without])
        {
            idx += 3;
        }

        Ok(matches!(self.stream.at(idx).kind, TokenKind::String(_)))
    }
}

pub(super) fn is_math_operator(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Special(c) => matches!(c, '+' | '-' | '*' | '/' | '%' | '^' | '<' | '>' | '='),
        TokenKind::Inequality(_) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Precedence;

    fn grammar(sql: &str) -> Grammar<'_> {
        Grammar {
            stream: Lexer::new(sql).tokenize().unwrap(),
            precedence: Precedence::Current,
        }
    }

    fn classify(sql: &str) -> Option<Parenthesized> {
        grammar(sql).parenthesized(0).unwrap()
    }

    #[test]
    fn test_parentheses_classification() {
        assert_eq!(classify("(1, 2)"), Some(Parenthesized::Row));
        assert_eq!(classify("(select 1)"), Some(Parenthesized::Select));
        assert_eq!(classify("(1 + 2)"), Some(Parenthesized::Expression));
        assert_eq!(classify("(a := 1)"), Some(Parenthesized::Args));
        assert_eq!(classify("((1), 2)"), Some(Parenthesized::Row));
        assert_eq!(classify("a"), None);
    }

    #[test]
    fn test_nested_select_classification() {
        assert_eq!(
            classify("((select 1) order by 1)"),
            Some(Parenthesized::Select)
        );
        assert_eq!(
            classify("((select 1) union (select 2))"),
            Some(Parenthesized::Select)
        );
        assert_eq!(
            classify("((select 1) + 2)"),
            Some(Parenthesized::Expression)
        );
        assert_eq!(classify("(a[1, 2], b)"), Some(Parenthesized::Row));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        let err = grammar("((1 + 2)").parenthesized(0).unwrap_err();
        assert_eq!(err.message, "Unbalanced '('");
        assert_eq!(err.span.start, 0);

        let err = grammar("(a[1)").parenthesized(0).unwrap_err();
        assert_eq!(err.message, "Unbalanced '['");
    }

    #[test]
    fn test_function_name_shapes() {
        assert_eq!(grammar("foo.bar(1)").matches_function_name(), Some(3));
        assert!(grammar("foo.bar(1)").matches_function_call());
        // column name keywords need qualification
        assert_eq!(grammar("between(1)").matches_function_name(), None);
        assert!(grammar("current_date").matches_special_function_call());
        assert!(!grammar("coalesce").matches_special_function_call());
        assert!(grammar("coalesce(a, b)").matches_function_call());
    }

    #[test]
    fn test_const_typecast_detection() {
        assert!(grammar("double precision '1.5'").matches_const_typecast().unwrap());
        assert!(grammar("varchar(10) 'foo'").matches_const_typecast().unwrap());
        assert!(grammar("timestamp(3) with time zone 'now'")
            .matches_const_typecast()
            .unwrap());
        assert!(!grammar("int4 '1'").matches_const_typecast().unwrap());
        assert!(!grammar("integer(1) '1'").matches_const_typecast().unwrap());
        assert!(!grammar("double '1'").matches_const_typecast().unwrap());
    }

    #[test]
    fn test_target_element_bounds() {
        let bound = |sql: &str| is_target_element_bound(grammar(sql).stream.current());
        assert!(bound(""));
        assert!(bound("from t"));
        assert!(bound(", b"));
        assert!(!bound("b"));
        assert!(!bound("array[1]"));
        assert!(!bound("char 'x'"));
        assert!(!bound("character varying 'x'"));
    }
}
