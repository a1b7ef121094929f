//! Binding strength of expressions, used to decide where the builder must
//! add parentheses.

use crate::ast::{
    Constant, Expr, IndirectionItem, LogicalOp, Operator, OperatorExpr, SubselectOp,
};
use crate::parser::Precedence;

pub const OR: u16 = 10;
pub const AND: u16 = 20;
pub const NOT: u16 = 30;
pub const IS: u16 = 40;
pub const COMPARISON: u16 = 50;
pub const PATTERN: u16 = 60;
pub const OVERLAPS: u16 = 70;
pub const BETWEEN: u16 = 80;
pub const IN: u16 = 90;
pub const GENERIC_OP: u16 = 110;
pub const ADDITION: u16 = 130;
pub const MULTIPLICATION: u16 = 140;
pub const EXPONENTIATION: u16 = 150;
pub const TIME_ZONE: u16 = 160;
pub const COLLATE: u16 = 170;
pub const UNARY_MINUS: u16 = 180;
pub const TYPECAST: u16 = 190;
pub const ATOM: u16 = 666;

/// Levels that only exist under [`Precedence::Legacy`].
pub mod legacy {
    pub const EQUALITY: u16 = 40;
    pub const INEQUALITY: u16 = 50;
    pub const POSTFIX: u16 = 100;
    pub const IS: u16 = 120;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    NonAssoc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub precedence: u16,
    pub associativity: Associativity,
}

impl Binding {
    const fn new(precedence: u16, associativity: Associativity) -> Self {
        Self {
            precedence,
            associativity,
        }
    }
}

/// What an argument is being written into.
#[derive(Debug, Clone, Copy)]
pub enum Enclosing<'a> {
    Expr(&'a Expr),
    /// Arguments of `POSITION(a IN b)` and `XMLEXISTS(a PASSING b)`, which
    /// the grammar restricts to the operands of `::`.
    Restricted,
}

/// Returns how tightly `expr` binds under the given precedence rules.
#[must_use]
pub fn binding(expr: &Expr, regime: Precedence) -> Binding {
    use Associativity::{Left, NonAssoc, Right};

    let legacy = regime == Precedence::Legacy;
    match expr {
        Expr::Logical(logical) => match logical.operator {
            LogicalOp::And => Binding::new(AND, Left),
            LogicalOp::Or => Binding::new(OR, Left),
        },
        Expr::Not(_) => Binding::new(NOT, Right),
        Expr::Is(_) | Expr::IsDistinctFrom(_) | Expr::IsOf(_) | Expr::IsJson(_) => {
            Binding::new(if legacy { legacy::IS } else { IS }, NonAssoc)
        }
        Expr::Pattern(_) => Binding::new(PATTERN, NonAssoc),
        Expr::Overlaps(_) => Binding::new(OVERLAPS, NonAssoc),
        Expr::Between(_) => Binding::new(BETWEEN, NonAssoc),
        Expr::In(_) => Binding::new(IN, NonAssoc),
        Expr::Operator(operator) => operator_binding(operator, legacy),
        Expr::AtTimeZone(_) | Expr::AtLocal(_) => Binding::new(TIME_ZONE, Left),
        Expr::Collate(_) => Binding::new(COLLATE, Left),
        Expr::Typecast(_) => Binding::new(TYPECAST, Left),
        Expr::Indirection(_) => Binding::new(ATOM, Left),
        // the parser folds a leading minus into the literal
        Expr::Constant(Constant::Numeric(value)) if value.starts_with('-') => {
            Binding::new(UNARY_MINUS, Right)
        }
        _ => Binding::new(ATOM, NonAssoc),
    }
}

fn operator_binding(expr: &OperatorExpr, legacy: bool) -> Binding {
    use Associativity::{Left, NonAssoc, Right};

    let Operator::Symbol(symbol) = &expr.operator else {
        return Binding::new(GENERIC_OP, Left);
    };
    if expr.right.is_none() {
        return Binding::new(if legacy { legacy::POSTFIX } else { GENERIC_OP }, Left);
    }
    if expr.left.is_none() && matches!(symbol.as_str(), "+" | "-") {
        return Binding::new(UNARY_MINUS, Right);
    }
    // `x op ANY (...)` is attached at the generic operator level whatever `op` is
    if expr.right.as_ref().is_some_and(is_quantified) {
        return Binding::new(GENERIC_OP, Left);
    }
    match symbol.as_str() {
        "=" if legacy => Binding::new(legacy::EQUALITY, Right),
        "<" | ">" if legacy => Binding::new(legacy::INEQUALITY, NonAssoc),
        "<=" | ">=" | "<>" | "!=" if legacy => Binding::new(GENERIC_OP, Left),
        "=" | "<" | ">" | "<=" | ">=" | "<>" | "!=" => Binding::new(COMPARISON, NonAssoc),
        "+" | "-" => Binding::new(ADDITION, Left),
        "*" | "/" | "%" => Binding::new(MULTIPLICATION, Left),
        "^" => Binding::new(EXPONENTIATION, Left),
        _ => Binding::new(GENERIC_OP, Left),
    }
}

fn is_quantified(operand: &Expr) -> bool {
    match operand {
        Expr::ArrayComparison(_) => true,
        Expr::Subselect(subselect) => matches!(
            subselect.operator,
            Some(SubselectOp::Any | SubselectOp::All | SubselectOp::Some)
        ),
        _ => false,
    }
}

/// Returns true if `argument` has to be parenthesized when written inside
/// `enclosing`; `right` tells whether it is written to the right of the
/// enclosing operator.
#[must_use]
pub fn needs_parentheses(
    argument: &Expr,
    enclosing: Enclosing<'_>,
    right: bool,
    regime: Precedence,
) -> bool {
    let own = binding(argument, regime).precedence;
    let parent = match enclosing {
        Enclosing::Restricted => Binding::new(TYPECAST, Associativity::Left),
        Enclosing::Expr(Expr::Between(_)) => {
            return if right { own < TYPECAST } else { own <= BETWEEN };
        }
        Enclosing::Expr(Expr::Indirection(indirection)) => {
            let plain = match argument {
                Expr::Parameter(_) => true,
                Expr::Subselect(subselect) => subselect.operator.is_none(),
                Expr::ColumnRef(_) => {
                    matches!(indirection.items.first(), Some(IndirectionItem::Index(_)))
                }
                _ => false,
            };
            return !plain;
        }
        Enclosing::Expr(parent) => binding(parent, regime),
    };
    match parent.associativity {
        Associativity::Right => {
            own < parent.precedence || (!right && own == parent.precedence)
        }
        Associativity::Left => own < parent.precedence || (right && own == parent.precedence),
        Associativity::NonAssoc => own <= parent.precedence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeName;

    #[test]
    fn test_comparison_levels_differ_between_regimes() {
        let eq = Expr::binary(Expr::column("a"), "=", Expr::column("b"));
        let le = Expr::binary(Expr::column("a"), "<=", Expr::column("b"));

        assert_eq!(binding(&eq, Precedence::Current).precedence, COMPARISON);
        assert_eq!(binding(&le, Precedence::Current).precedence, COMPARISON);
        assert_eq!(
            binding(&eq, Precedence::Legacy),
            Binding::new(legacy::EQUALITY, Associativity::Right)
        );
        assert_eq!(binding(&le, Precedence::Legacy).precedence, GENERIC_OP);
    }

    #[test]
    fn test_non_associative_operands_are_wrapped() {
        let inner = Expr::binary(Expr::column("a"), "=", Expr::column("b"));
        let outer = Expr::binary(inner.clone(), "=", Expr::column("c"));
        let enclosing = Enclosing::Expr(&outer);

        assert!(needs_parentheses(&inner, enclosing, false, Precedence::Current));
        // right-associative under the old rules
        assert!(needs_parentheses(&inner, enclosing, false, Precedence::Legacy));
        assert!(!needs_parentheses(&inner, enclosing, true, Precedence::Legacy));
    }

    #[test]
    fn test_left_associative_operands() {
        let inner = Expr::binary(Expr::column("a"), "-", Expr::column("b"));
        let outer = Expr::binary(inner.clone(), "-", Expr::column("c"));
        let enclosing = Enclosing::Expr(&outer);

        assert!(!needs_parentheses(&inner, enclosing, false, Precedence::Current));
        assert!(needs_parentheses(&inner, enclosing, true, Precedence::Current));
    }

    #[test]
    fn test_negative_literal_binds_like_unary_minus() {
        let cast = Expr::numeric("-1").typecast(TypeName::catalog("int4"));
        let Expr::Typecast(typecast) = &cast else {
            unreachable!()
        };
        assert!(needs_parentheses(
            &typecast.argument,
            Enclosing::Expr(&cast),
            false,
            Precedence::Current
        ));
        assert!(!needs_parentheses(
            &Expr::numeric("1"),
            Enclosing::Expr(&cast),
            false,
            Precedence::Current
        ));
    }

    #[test]
    fn test_quantified_comparison_binds_as_generic_operator() {
        use crate::ast::{ArrayComparison, ArrayComparisonKind, PatternExpr, PatternOp};

        let all = Expr::ArrayComparison(Box::new(ArrayComparison {
            kind: ArrayComparisonKind::All,
            array: Expr::column("c"),
        }));
        let like = Expr::Pattern(Box::new(PatternExpr {
            argument: Expr::column("a"),
            pattern: Expr::column("b"),
            operator: PatternOp::Like,
            not: false,
            escape: None,
        }));
        let outer = Expr::binary(like.clone(), "=", all);
        let enclosing = Enclosing::Expr(&outer);

        for regime in [Precedence::Current, Precedence::Legacy] {
            assert_eq!(
                binding(&outer, regime),
                Binding::new(GENERIC_OP, Associativity::Left)
            );
            assert!(needs_parentheses(&like, enclosing, false, regime));
        }
        // a plain comparison keeps its own level
        let plain = Expr::binary(like.clone(), "=", Expr::column("c"));
        assert!(!needs_parentheses(&like, Enclosing::Expr(&plain), false, Precedence::Current));
    }

    #[test]
    fn test_between_bounds_are_restricted() {
        let sum = Expr::binary(Expr::column("a"), "+", Expr::column("b"));
        let between = Expr::Between(Box::new(crate::ast::BetweenExpr {
            argument: sum.clone(),
            left: sum.clone(),
            right: Expr::column("c"),
            predicate: crate::ast::BetweenPredicate::Between,
            not: false,
        }));
        let enclosing = Enclosing::Expr(&between);

        assert!(!needs_parentheses(&sum, enclosing, false, Precedence::Current));
        assert!(needs_parentheses(&sum, enclosing, true, Precedence::Current));
        assert!(needs_parentheses(&between, enclosing, false, Precedence::Current));
    }
}
