//! Expression levels of the pre-9.5 precedence rules.
//!
//! `=` is right-associative and binds looser than `<`/`>`, the other
//! comparison operators are generic operators, `IS`/`ISNULL`/`NOTNULL` bind
//! tighter than generic operators and an operator without a right operand
//! is a postfix operator.

use super::expressions::{apply_prefixes, infix, SUBQUERY_KEYWORDS};
use super::{Grammar, ParseError};
use crate::ast::{Expr, Operator, OperatorExpr};
use crate::lexer::{Keyword, KeywordCategory, TokenKind};

/// Reserved keywords that may still start an operand.
const OPERAND_KEYWORDS: &[Keyword] = &[
    Keyword::Not,
    Keyword::Null,
    Keyword::True,
    Keyword::False,
    Keyword::Case,
    Keyword::Cast,
    Keyword::Array,
    Keyword::CurrentCatalog,
    Keyword::CurrentDate,
    Keyword::CurrentRole,
    Keyword::CurrentTime,
    Keyword::CurrentTimestamp,
    Keyword::CurrentUser,
    Keyword::Localtime,
    Keyword::Localtimestamp,
    Keyword::SessionUser,
    Keyword::SystemUser,
    Keyword::User,
];

impl Grammar<'_> {
    pub(super) fn legacy_equality(
        &mut self,
        restricted: bool,
        target: bool,
    ) -> Result<Expr, ParseError> {
        let left = self.legacy_comparison(restricted, target)?;
        if self.eat_special('=')? {
            let right = self.legacy_equality(restricted, target)?;
            return Ok(Expr::binary(left, "=", right));
        }
        Ok(left)
    }

    fn legacy_comparison(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        let left = self.comparison_operand(restricted, target)?;
        if !self.stream.matches_any_special(&['<', '>']) {
            return Ok(left);
        }
        let operator = self.next()?;
        let right = self.comparison_operand(restricted, target)?;
        Ok(Expr::binary(
            left,
            if operator.is_special('<') { "<" } else { ">" },
            right,
        ))
    }

    pub(super) fn legacy_generic_op(
        &mut self,
        restricted: bool,
        target: bool,
    ) -> Result<Expr, ParseError> {
        let mut left = self.legacy_generic_term(restricted, target)?;
        loop {
            let named = self.matches_operator()
                || matches!(self.stream.current().kind, TokenKind::Inequality(_));
            if !named
                && !(self.matches_math_operator()
                    && self.stream.peek(1).is_any_keyword(SUBQUERY_KEYWORDS))
            {
                break;
            }
            let operator = if let TokenKind::Inequality(op) = &self.stream.current().kind {
                let op = op.clone();
                self.next()?;
                Operator::Symbol(op)
            } else if named {
                self.operator(false)?
            } else {
                self.operator(true)?
            };

            if !named || self.stream.matches_any_keyword(SUBQUERY_KEYWORDS).is_some() {
                let right = self.subquery_expression()?;
                left = infix(operator, left, right);
            } else if self.starts_operand() {
                let right = self.legacy_generic_term(restricted, target)?;
                left = infix(operator, left, right);
            } else {
                left = Expr::Operator(Box::new(OperatorExpr {
                    operator,
                    left: Some(left),
                    right: None,
                }));
            }
        }
        Ok(left)
    }

    fn legacy_generic_term(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        let prefixes = self.prefix_operators()?;
        let operand = self.arithmetic(restricted, target)?;
        let term = self.is_tests(operand, restricted, target)?;
        Ok(apply_prefixes(prefixes, term))
    }

    /// Returns true if the current token can begin the right operand of a
    /// binary operator; otherwise the operator is postfix.
    fn starts_operand(&self) -> bool {
        let token = self.stream.current();
        match &token.kind {
            TokenKind::Special(c) => matches!(c, '(' | '+' | '-'),
            TokenKind::Keyword(kw) => {
                kw.category() != KeywordCategory::Reserved || OPERAND_KEYWORDS.contains(kw)
            }
            TokenKind::Eof
            | TokenKind::Typecast
            | TokenKind::ColonEquals
            | TokenKind::EqualsGreater
            | TokenKind::Inequality(_) => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::{Parser, ParserConfig};

    fn legacy(sql: &str) -> Expr {
        Parser::with_config(ParserConfig::legacy())
            .parse_expression(sql)
            .unwrap()
    }

    fn operator(expr: &Expr) -> &OperatorExpr {
        match expr {
            Expr::Operator(op) => op,
            other => panic!("expected operator expression, got {other:?}"),
        }
    }

    #[test]
    fn test_equality_is_right_associative() {
        let expr = legacy("a = b = c");
        let op = operator(&expr);
        assert_eq!(op.operator, Operator::symbol("="));
        assert_eq!(op.left, Some(Expr::column("a")));
        assert!(matches!(op.right, Some(Expr::Operator(_))));
    }

    #[test]
    fn test_inequality_binds_tighter_than_equality() {
        let expr = legacy("a < b = c");
        let op = operator(&expr);
        assert_eq!(op.operator, Operator::symbol("="));
        let left = operator(op.left.as_ref().unwrap());
        assert_eq!(left.operator, Operator::symbol("<"));
    }

    #[test]
    fn test_two_character_comparisons_are_generic() {
        let expr = legacy("a <= b + 1");
        let op = operator(&expr);
        assert_eq!(op.operator, Operator::symbol("<="));
        let expr = legacy("a <> b = c");
        assert_eq!(operator(&expr).operator, Operator::symbol("="));
    }

    #[test]
    fn test_postfix_operator() {
        let expr = legacy("a !");
        let op = operator(&expr);
        assert_eq!(op.operator, Operator::symbol("!"));
        assert!(op.right.is_none());

        let expr = legacy("a ! = b");
        let op = operator(&expr);
        assert_eq!(op.operator, Operator::symbol("="));
    }

    #[test]
    fn test_is_binds_tighter_than_generic_operators() {
        let legacy_expr = legacy("a || b is null");
        let op = operator(&legacy_expr);
        assert!(matches!(op.right, Some(Expr::Is(_))));

        let current = Parser::new().parse_expression("a || b is null").unwrap();
        assert!(matches!(current, Expr::Is(is) if matches!(is.argument, Expr::Operator(_))));
    }

    #[test]
    fn test_subquery_operator_in_legacy_mode() {
        let expr = legacy("a = any(array[1, 2])");
        let op = operator(&expr);
        assert!(matches!(op.right, Some(Expr::ArrayComparison(_))));
    }
}
