//! Scalar expressions: the precedence cascade shared by both regimes, the
//! current regime's comparison and operator levels, and expression atoms.

use super::classify::{is_target_element_bound, Parenthesized};
use super::{is_col_id, is_name_start, token_identifier, Grammar, ParseError, Precedence};
use crate::ast::{
    ArrayComparison, ArrayComparisonKind, ArrayExpr, ArrayIndexes, BetweenExpr, BetweenPredicate,
    CaseExpr, CollateExpr, AtTimeZoneExpr, ColumnName, ColumnReference, Constant,
    ConstantTypecast, Expr, Identifier, InExpr, InList, Indirection, IndirectionItem,
    IsDistinctFromExpr, IsExpr, IsJsonExpr, IsJsonType, IsOfExpr, IsPredicate, LogicalExpr,
    LogicalOp, NodeList, Operator, OperatorExpr, OverlapsExpr, Parameter, PatternExpr, PatternOp,
    QualifiedOperator, RowExpr, SelectStatement, SubselectExpr, SubselectOp, Typecast, WhenExpr,
};
use crate::lexer::{Keyword, KeywordCategory, Token, TokenKind};

/// `ANY`, `ALL` and `SOME` before a parenthesized array or subquery.
pub(super) const SUBQUERY_KEYWORDS: &[Keyword] = &[Keyword::Any, Keyword::All, Keyword::Some];

/// Keyword sequences of pattern matching; only the first four accept `ANY`/`ALL`/`SOME`.
const PATTERN_CHECKS: &[(&[Keyword], PatternOp, bool)] = &[
    (&[Keyword::Like], PatternOp::Like, false),
    (&[Keyword::Not, Keyword::Like], PatternOp::Like, true),
    (&[Keyword::Ilike], PatternOp::Ilike, false),
    (&[Keyword::Not, Keyword::Ilike], PatternOp::Ilike, true),
    (&[Keyword::Similar, Keyword::To], PatternOp::SimilarTo, false),
    (&[Keyword::Not, Keyword::Similar, Keyword::To], PatternOp::SimilarTo, true),
];

/// Keyword sequences following `IS [NOT]`.
const IS_CHECKS: &[(&[Keyword], IsPredicate)] = &[
    (&[Keyword::Null], IsPredicate::Null),
    (&[Keyword::True], IsPredicate::True),
    (&[Keyword::False], IsPredicate::False),
    (&[Keyword::Unknown], IsPredicate::Unknown),
    (&[Keyword::Normalized], IsPredicate::Normalized),
    (&[Keyword::Nfc, Keyword::Normalized], IsPredicate::NfcNormalized),
    (&[Keyword::Nfd, Keyword::Normalized], IsPredicate::NfdNormalized),
    (&[Keyword::Nfkc, Keyword::Normalized], IsPredicate::NfkcNormalized),
    (&[Keyword::Nfkd, Keyword::Normalized], IsPredicate::NfkdNormalized),
];

impl Grammar<'_> {
    pub(super) fn expression_list(&mut self) -> Result<NodeList<Expr>, ParseError> {
        self.comma_list(Self::expression)
    }

    pub(super) fn expression(&mut self) -> Result<Expr, ParseError> {
        self.logical_or(false)
    }

    /// An expression of a target list: a bare-label keyword following the
    /// expression is taken as its alias instead of continuing it.
    pub(super) fn target_expression(&mut self) -> Result<Expr, ParseError> {
        self.logical_or(true)
    }

    /// `DEFAULT` or an expression, as allowed in `VALUES` rows and `SET`.
    pub(super) fn expression_with_default(&mut self) -> Result<Expr, ParseError> {
        if self.eat_keyword(Keyword::Default)? {
            Ok(Expr::SetToDefault)
        } else {
            self.expression()
        }
    }

    /// The `b_expr` of the grammar: no boolean logic, pattern matching or
    /// `IN`, used where `AND` would otherwise be ambiguous.
    pub(super) fn restricted_expression(&mut self) -> Result<Expr, ParseError> {
        match self.precedence {
            Precedence::Current => self.comparison(true, false),
            Precedence::Legacy => self.legacy_equality(true, false),
        }
    }

    /// True if the current keyword is followed by the end of a target
    /// element, so it is an alias rather than an operator.
    fn at_target_bound(&self, target: bool) -> bool {
        target && is_target_element_bound(self.stream.peek(1))
    }

    fn logical_or(&mut self, target: bool) -> Result<Expr, ParseError> {
        let mut items = vec![self.logical_and(target)?];
        while self.at_keyword(Keyword::Or) && !self.at_target_bound(target) {
            self.next()?;
            items.push(self.logical_and(target)?);
        }
        Ok(logical(LogicalOp::Or, items))
    }

    fn logical_and(&mut self, target: bool) -> Result<Expr, ParseError> {
        let mut items = vec![self.logical_not(target)?];
        while self.at_keyword(Keyword::And) && !self.at_target_bound(target) {
            self.next()?;
            items.push(self.logical_not(target)?);
        }
        Ok(logical(LogicalOp::And, items))
    }

    /// Below `NOT` the two precedence regimes take different paths.
    fn logical_not(&mut self, target: bool) -> Result<Expr, ParseError> {
        if self.eat_keyword(Keyword::Not)? {
            return Ok(Expr::Not(Box::new(self.logical_not(target)?)));
        }
        match self.precedence {
            Precedence::Current => {
                let operand = self.comparison(false, target)?;
                self.is_tests(operand, false, target)
            }
            Precedence::Legacy => self.legacy_equality(false, target),
        }
    }

    /// `IS [NOT] ...`, `ISNULL` and `NOTNULL` applied to `operand`.
    ///
    /// In restricted context only `IS [NOT] DOCUMENT` and
    /// `IS [NOT] DISTINCT FROM` are available.
    pub(super) fn is_tests(
        &mut self,
        mut operand: Expr,
        restricted: bool,
        target: bool,
    ) -> Result<Expr, ParseError> {
        loop {
            let keyword = match self.keyword() {
                Some(Keyword::Is) => Keyword::Is,
                Some(kw @ (Keyword::Isnull | Keyword::Notnull)) if !restricted => kw,
                _ => break,
            };
            if keyword == Keyword::Is && self.at_target_bound(target) {
                break;
            }
            self.next()?;
            if keyword != Keyword::Is {
                operand = is_expr(operand, IsPredicate::Null, keyword == Keyword::Notnull);
                continue;
            }

            let not = self.eat_keyword(Keyword::Not)?;
            if let Some(predicate) = self.is_predicate(restricted)? {
                operand = is_expr(operand, predicate, not);
                continue;
            }
            if !restricted && self.eat_keyword(Keyword::Json)? {
                let json_type = match self.keyword() {
                    Some(Keyword::Value) => Some(IsJsonType::Value),
                    Some(Keyword::Array) => Some(IsJsonType::Array),
                    Some(Keyword::Object) => Some(IsJsonType::Object),
                    Some(Keyword::Scalar) => Some(IsJsonType::Scalar),
                    _ => None,
                };
                if json_type.is_some() {
                    self.next()?;
                }
                let unique_keys = self.json_uniqueness()?;
                operand = Expr::IsJson(Box::new(IsJsonExpr {
                    argument: operand,
                    not,
                    json_type,
                    unique_keys,
                }));
                continue;
            }
            if !restricted && self.at_keyword(Keyword::Of) && self.stream.peek(1).is_special('(') {
                self.stream.skip(2)?;
                let right = self.comma_list(Self::type_name)?;
                self.expect_special(')')?;
                operand = Expr::IsOf(Box::new(IsOfExpr {
                    left: operand,
                    right,
                    not,
                }));
                continue;
            }
            if self.eat_keywords(&[Keyword::Distinct, Keyword::From])? {
                let right = match self.precedence {
                    Precedence::Current => self.comparison(restricted, target)?,
                    Precedence::Legacy => self.arithmetic(restricted, target)?,
                };
                return Ok(Expr::IsDistinctFrom(Box::new(IsDistinctFromExpr {
                    left: operand,
                    right,
                    not,
                })));
            }
            return Err(self.unexpected_here());
        }
        Ok(operand)
    }

    fn is_predicate(&mut self, restricted: bool) -> Result<Option<IsPredicate>, ParseError> {
        if self.eat_keyword(Keyword::Document)? {
            return Ok(Some(IsPredicate::Document));
        }
        if restricted {
            return Ok(None);
        }
        for (check, predicate) in IS_CHECKS {
            if self.eat_keywords(check)? {
                return Ok(Some(*predicate));
            }
        }
        Ok(None)
    }

    /// All comparison operators share one non-associative level.
    pub(super) fn comparison(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        let left = self.comparison_operand(restricted, target)?;
        let Some(operator) = comparison_operator(self.stream.current()) else {
            return Ok(left);
        };
        self.next()?;
        let right = self.comparison_operand(restricted, target)?;
        Ok(Expr::binary(left, &operator, right))
    }

    pub(super) fn comparison_operand(
        &mut self,
        restricted: bool,
        target: bool,
    ) -> Result<Expr, ParseError> {
        if restricted {
            self.generic_op(true, false)
        } else {
            self.pattern(target)
        }
    }

    pub(super) fn pattern(&mut self, target: bool) -> Result<Expr, ParseError> {
        let argument = self.overlaps(target)?;
        let Some(keyword) = self.stream.matches_any_keyword(&[
            Keyword::Like,
            Keyword::Ilike,
            Keyword::Not,
            Keyword::Similar,
        ]) else {
            return Ok(argument);
        };
        if matches!(keyword, Keyword::Like | Keyword::Ilike) && self.at_target_bound(target) {
            return Ok(argument);
        }

        for (index, (check, operator, not)) in PATTERN_CHECKS.iter().enumerate() {
            if !self.eat_keywords(check)? {
                continue;
            }
            let mut escape = None;
            let pattern = if index < 4 && self.stream.matches_any_keyword(SUBQUERY_KEYWORDS).is_some()
            {
                self.subquery_expression()?
            } else {
                let pattern = self.overlaps(target)?;
                if self.eat_keyword(Keyword::Escape)? {
                    escape = Some(self.overlaps(target)?);
                }
                pattern
            };
            return Ok(Expr::Pattern(Box::new(PatternExpr {
                argument,
                pattern,
                operator: *operator,
                not: *not,
                escape,
            })));
        }
        Ok(argument)
    }

    /// `ANY|ALL|SOME (subquery)` or `ANY|ALL|SOME (array)`.
    pub(super) fn subquery_expression(&mut self) -> Result<Expr, ParseError> {
        let keyword = self.stream.expect_keyword(SUBQUERY_KEYWORDS)?;
        let contents = self.parenthesized(0)?;
        self.expect_special('(')?;
        let result = if contents == Some(Parenthesized::Select) {
            let operator = match keyword {
                Keyword::Any => SubselectOp::Any,
                Keyword::All => SubselectOp::All,
                _ => SubselectOp::Some,
            };
            subselect(self.select_statement()?, Some(operator))
        } else {
            let kind = match keyword {
                Keyword::Any => ArrayComparisonKind::Any,
                Keyword::All => ArrayComparisonKind::All,
                _ => ArrayComparisonKind::Some,
            };
            Expr::ArrayComparison(Box::new(ArrayComparison {
                kind,
                array: self.expression()?,
            }))
        };
        self.expect_special(')')?;
        Ok(result)
    }

    fn overlaps(&mut self, target: bool) -> Result<Expr, ParseError> {
        match self.between(target)? {
            Expr::Row(left) if self.at_keyword(Keyword::Overlaps) => {
                let token = self.next()?;
                let right = self.row_constructor()?;
                OverlapsExpr::new(left, right)
                    .map(|overlaps| Expr::Overlaps(Box::new(overlaps)))
                    .map_err(|err| self.node_error(&err, &token))
            }
            other => Ok(other),
        }
    }

    fn between(&mut self, target: bool) -> Result<Expr, ParseError> {
        let argument = self.in_expression(target)?;
        let not = match self.keyword() {
            Some(Keyword::Between) => {
                if self.at_target_bound(target) {
                    return Ok(argument);
                }
                self.next()?;
                false
            }
            Some(Keyword::Not) if self.stream.peek(1).is_keyword(Keyword::Between) => {
                self.stream.skip(2)?;
                true
            }
            _ => return Ok(argument),
        };
        let predicate = if self.eat_keyword(Keyword::Symmetric)? {
            BetweenPredicate::Symmetric
        } else if self.eat_keyword(Keyword::Asymmetric)? {
            BetweenPredicate::Asymmetric
        } else {
            BetweenPredicate::Between
        };

        let left = self.generic_op(true, false)?;
        self.expect_keyword(Keyword::And)?;
        let right = self.generic_op(true, target)?;
        Ok(Expr::Between(Box::new(BetweenExpr {
            argument,
            left,
            right,
            predicate,
            not,
        })))
    }

    /// `[NOT] IN (...)`; chains like `a in (b) in (c)` are accepted.
    fn in_expression(&mut self, target: bool) -> Result<Expr, ParseError> {
        let mut left = self.generic_op(false, target)?;
        loop {
            let not = match self.keyword() {
                Some(Keyword::In) => {
                    if self.at_target_bound(target) {
                        break;
                    }
                    self.next()?;
                    false
                }
                Some(Keyword::Not) if self.stream.peek(1).is_keyword(Keyword::In) => {
                    self.stream.skip(2)?;
                    true
                }
                _ => break,
            };
            let contents = self.parenthesized(0)?;
            self.expect_special('(')?;
            let right = if contents == Some(Parenthesized::Select) {
                InList::Subselect(self.select_statement()?)
            } else {
                InList::Values(self.expression_list()?)
            };
            self.expect_special(')')?;
            left = Expr::In(Box::new(InExpr { left, right, not }));
        }
        Ok(left)
    }

    pub(super) fn generic_op(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        match self.precedence {
            Precedence::Current => self.current_generic_op(restricted, target),
            Precedence::Legacy => self.legacy_generic_op(restricted, target),
        }
    }

    fn current_generic_op(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        let mut left = self.generic_term(restricted, target)?;
        loop {
            let named = self.matches_operator();
            if !named
                && !(self.matches_math_operator()
                    && self.stream.peek(1).is_any_keyword(SUBQUERY_KEYWORDS))
            {
                break;
            }
            let operator = if named {
                self.operator(false)?
            } else {
                Operator::Symbol(operator_symbol(&self.next()?))
            };
            let right = if !named || self.stream.matches_any_keyword(SUBQUERY_KEYWORDS).is_some() {
                self.subquery_expression()?
            } else {
                self.generic_term(restricted, target)?
            };
            left = infix(operator, left, right);
        }
        Ok(left)
    }

    fn generic_term(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        let prefixes = self.prefix_operators()?;
        let term = self.arithmetic(restricted, target)?;
        Ok(apply_prefixes(prefixes, term))
    }

    pub(super) fn prefix_operators(&mut self) -> Result<Vec<Operator>, ParseError> {
        let mut operators = Vec::new();
        while self.matches_operator() {
            operators.push(self.operator(false)?);
        }
        Ok(operators)
    }

    /// An operator token or `OPERATOR(schema.op)`; with `all` the math
    /// operators are accepted as well.
    pub(super) fn operator(&mut self, all: bool) -> Result<Operator, ParseError> {
        if matches!(self.stream.current().kind, TokenKind::Operator(_))
            || (all && self.matches_math_operator())
        {
            return Ok(Operator::Symbol(operator_symbol(&self.next()?)));
        }

        let start = self.stream.current().clone();
        self.expect_keyword(Keyword::Operator)?;
        self.expect_special('(')?;
        let mut qualifiers = Vec::new();
        while is_col_id(self.stream.current()) {
            qualifiers.push(token_identifier(&self.next()?));
            self.expect_special('.')?;
        }
        let symbol = if self.matches_math_operator() {
            operator_symbol(&self.next()?)
        } else {
            let token = self
                .stream
                .expect(|kind| matches!(kind, TokenKind::Operator(_)), "operator")?;
            operator_symbol(&token)
        };
        self.expect_special(')')?;

        let mut qualifiers = qualifiers.into_iter();
        let (catalog, schema) = match (qualifiers.next(), qualifiers.next(), qualifiers.next()) {
            (None, ..) => (None, None),
            (Some(schema), None, _) => (None, Some(schema)),
            (Some(catalog), Some(schema), None) => (Some(catalog), Some(schema)),
            (Some(_), Some(_), Some(_)) => {
                return Err(self.error_at("Too many dots in qualified operator name", &start));
            }
        };
        Ok(Operator::Qualified(QualifiedOperator {
            catalog,
            schema,
            operator: symbol,
        }))
    }

    pub(super) fn arithmetic(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        let mut left = self.arithmetic_term(restricted, target)?;
        while self.stream.matches_any_special(&['+', '-']) {
            let operator = operator_symbol(&self.next()?);
            let right = self.arithmetic_term(restricted, target)?;
            left = Expr::binary(left, &operator, right);
        }
        Ok(left)
    }

    fn arithmetic_term(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        let mut left = self.arithmetic_factor(restricted, target)?;
        while self.stream.matches_any_special(&['*', '/', '%']) {
            let operator = operator_symbol(&self.next()?);
            let right = self.arithmetic_factor(restricted, target)?;
            left = Expr::binary(left, &operator, right);
        }
        Ok(left)
    }

    fn arithmetic_factor(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        let mut left = self.exponent_operand(restricted, target)?;
        while self.eat_special('^')? {
            let right = self.exponent_operand(restricted, target)?;
            left = Expr::binary(left, "^", right);
        }
        Ok(left)
    }

    fn exponent_operand(&mut self, restricted: bool, target: bool) -> Result<Expr, ParseError> {
        if restricted {
            self.unary_sign()
        } else {
            self.at_time_zone(target)
        }
    }

    /// `AT TIME ZONE` and `AT LOCAL`, which chain to the left.
    fn at_time_zone(&mut self, target: bool) -> Result<Expr, ParseError> {
        let mut argument = self.collate(target)?;
        while self.at_keyword(Keyword::At) {
            if self.stream.peek(1).is_keyword(Keyword::Local) {
                self.stream.skip(2)?;
                argument = Expr::AtLocal(Box::new(argument));
            } else if self.stream.peek(1).is_keyword(Keyword::Time)
                && self.stream.peek(2).is_keyword(Keyword::Zone)
            {
                self.stream.skip(3)?;
                let zone = self.collate(target)?;
                argument = Expr::AtTimeZone(Box::new(AtTimeZoneExpr { argument, zone }));
            } else {
                break;
            }
        }
        Ok(argument)
    }

    fn collate(&mut self, target: bool) -> Result<Expr, ParseError> {
        let mut argument = self.unary_sign()?;
        while self.at_keyword(Keyword::Collate) && !self.at_target_bound(target) {
            self.next()?;
            let collation = self.qualified_name()?;
            argument = Expr::Collate(Box::new(CollateExpr {
                argument,
                collation,
            }));
        }
        Ok(argument)
    }

    /// Unary `+` and `-`; a minus applied to a numeric literal is folded into it.
    fn unary_sign(&mut self) -> Result<Expr, ParseError> {
        if !self.stream.matches_any_special(&['+', '-']) {
            return self.typecast_expression();
        }
        let operator = operator_symbol(&self.next()?);
        let operand = self.unary_sign()?;
        Ok(match operand {
            Expr::Constant(Constant::Numeric(value)) if operator == "-" => {
                Expr::numeric(match value.strip_prefix('-') {
                    Some(positive) => positive.to_string(),
                    None => format!("-{value}"),
                })
            }
            operand => Expr::prefix(&operator, operand),
        })
    }

    fn typecast_expression(&mut self) -> Result<Expr, ParseError> {
        let mut argument = self.expression_atom()?;
        while self.stream.matches(|kind| matches!(kind, TokenKind::Typecast)) {
            self.next()?;
            argument = argument.typecast(self.type_name()?);
        }
        Ok(argument)
    }

    pub(super) fn expression_atom(&mut self) -> Result<Expr, ParseError> {
        match self.keyword() {
            Some(Keyword::Row) if self.stream.peek(1).is_special('(') => {
                return Ok(Expr::Row(self.row_constructor()?));
            }
            Some(Keyword::Array) => return self.array_constructor(),
            Some(Keyword::Exists) => {
                self.next()?;
                let query = self.select_with_parentheses()?;
                return Ok(subselect(query, Some(SubselectOp::Exists)));
            }
            Some(Keyword::Case) => return self.case_expression(),
            Some(Keyword::Grouping) => return self.grouping_expression(),
            Some(keyword @ (Keyword::True | Keyword::False | Keyword::Null)) => {
                self.next()?;
                return Ok(Expr::Constant(keyword_constant(keyword)));
            }
            _ => {}
        }

        let current = self.stream.current();
        let atom = if current.is_special('(') {
            match self.parenthesized(0)? {
                Some(Parenthesized::Row) => return Ok(Expr::Row(self.row_constructor()?)),
                Some(Parenthesized::Select) => subselect(self.select_with_parentheses()?, None),
                _ => {
                    self.next()?;
                    let inner = self.expression()?;
                    self.expect_special(')')?;
                    inner
                }
            }
        } else if current.kind.is_parameter() {
            parameter(&self.next()?)
        } else if current.kind.is_literal() {
            return Ok(Expr::Constant(constant(&self.next()?)));
        } else {
            if self.keyword().is_some() {
                if self.matches_const_typecast()? {
                    return self.const_leading_typecast();
                }
                if self.matches_special_function_call() {
                    if let Some(function) = self.special_function_call()? {
                        return Ok(function);
                    }
                    if let Some(aggregate) = self.json_aggregate()? {
                        return Ok(aggregate);
                    }
                }
            }
            return self.named_expression_atom();
        };

        let items = self.indirection(true)?;
        Ok(with_indirection(atom, items))
    }

    /// A literal, or a typed literal like `date '2024-01-01'`.
    pub(super) fn constant_expression(&mut self) -> Result<Expr, ParseError> {
        if let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::Null, Keyword::True, Keyword::False])
        {
            self.next()?;
            return Ok(Expr::Constant(keyword_constant(keyword)));
        }
        if self.stream.current().kind.is_literal() {
            return Ok(Expr::Constant(constant(&self.next()?)));
        }

        let token = self.stream.current().clone();
        let typecast = if self.matches_const_typecast()? {
            self.const_leading_typecast()?
        } else {
            self.named_expression_atom()?
        };
        if let Expr::Typecast(cast) = typecast {
            let Typecast {
                argument,
                type_name,
            } = *cast;
            if let Expr::Constant(argument) = argument {
                return Ok(Expr::ConstantTypecast(Box::new(ConstantTypecast {
                    argument,
                    type_name,
                })));
            }
        }
        Err(self.error_at(
            format!("Unexpected {}, expecting constant expression", token.kind),
            &token,
        ))
    }

    /// Anything starting with a possibly qualified name: a column reference,
    /// a function call or a `type 'literal'` cast.
    fn named_expression_atom(&mut self) -> Result<Expr, ParseError> {
        let first = self.stream.current().clone();
        if !is_name_start(&first) {
            return Err(self.stream.unexpected("identifier"));
        }

        let mut identifiers = vec![token_identifier(&first)];
        let mut idx = 1;
        while self.stream.peek(idx).is_special('.') {
            let part = self.stream.peek(idx + 1);
            if !matches!(part.kind, TokenKind::Identifier(_) | TokenKind::Keyword(_)) {
                break;
            }
            identifiers.push(token_identifier(part));
            idx += 2;
        }

        let category = first.keyword_category();
        let function_shape = if identifiers.len() == 1 {
            category != Some(KeywordCategory::ColumnName)
        } else {
            category != Some(KeywordCategory::TypeFuncName)
        };
        if function_shape {
            let follow = self.stream.peek(idx);
            let string_follows = matches!(follow.kind, TokenKind::String(_));
            let paren_follows = follow.is_special('(');
            if string_follows {
                self.stream.skip(idx)?;
                return self.generic_leading_typecast(identifiers);
            }
            if paren_follows {
                self.stream.skip(idx)?;
                if self.stream.peek(1).is_special(')') {
                    return self.function_expression(identifiers);
                }
                let beyond = self.skip_parentheses(self.stream.position(), false)?;
                return if matches!(self.stream.at(beyond).kind, TokenKind::String(_)) {
                    self.generic_leading_typecast(identifiers)
                } else {
                    self.function_expression(identifiers)
                };
            }
        }

        if category == Some(KeywordCategory::TypeFuncName) {
            return Err(self.stream.unexpected("identifier"));
        }

        self.stream.skip(idx)?;
        let mut fields = self.indirection(true)?;
        let split = fields
            .iter()
            .position(|item| matches!(item, IndirectionItem::Index(_)))
            .unwrap_or(fields.len());
        let indexes = fields.split_off(split);

        let mut parts: Vec<ColumnName> = identifiers.into_iter().map(ColumnName::Name).collect();
        parts.extend(fields.into_iter().map(|item| match item {
            IndirectionItem::Field(name) => ColumnName::Name(name),
            _ => ColumnName::Star,
        }));
        let Some(column) = parts.pop() else {
            return Err(self.stream.unexpected("identifier"));
        };
        let qualifiers: Vec<Identifier> = parts
            .into_iter()
            .filter_map(|part| match part {
                ColumnName::Name(name) => Some(name),
                ColumnName::Star => None,
            })
            .collect();
        let reference = ColumnReference::from_parts(qualifiers, column)
            .map_err(|err| self.node_error(&err, &first))?;
        Ok(with_indirection(Expr::ColumnRef(reference), indexes))
    }

    /// Field selections and subscripts: `.field`, `.*`, `[i]`, `[lo:hi]`.
    ///
    /// `.*` ends the chain; it is an error when `allow_star` is false.
    pub(super) fn indirection(
        &mut self,
        allow_star: bool,
    ) -> Result<Vec<IndirectionItem>, ParseError> {
        let mut items = Vec::new();
        while self.stream.matches_any_special(&['[', '.']) {
            if self.next()?.is_special('.') {
                if !self.at_special('*') {
                    items.push(IndirectionItem::Field(self.col_label()?));
                } else if allow_star {
                    self.next()?;
                    items.push(IndirectionItem::Star);
                    break;
                } else {
                    return Err(self.stream.unexpected("identifier"));
                }
                continue;
            }

            let lower = if self.at_special(':') {
                None
            } else {
                Some(self.expression()?)
            };
            let index = if self.eat_special(':')? {
                let upper = if self.at_special(']') {
                    None
                } else {
                    Some(self.expression()?)
                };
                ArrayIndexes {
                    lower,
                    upper,
                    is_slice: true,
                }
            } else {
                ArrayIndexes {
                    lower: None,
                    upper: lower,
                    is_slice: false,
                }
            };
            self.expect_special(']')?;
            items.push(IndirectionItem::Index(index));
        }
        Ok(items)
    }

    pub(super) fn row_list(&mut self) -> Result<NodeList<RowExpr>, ParseError> {
        self.comma_list(Self::row_constructor_no_keyword)
    }

    /// `ROW(...)`, `ROW()` or `(a, b)`.
    pub(super) fn row_constructor(&mut self) -> Result<RowExpr, ParseError> {
        if self.eat_keyword(Keyword::Row)?
            && self.at_special('(')
            && self.stream.peek(1).is_special(')')
        {
            self.stream.skip(2)?;
            return Ok(RowExpr::default());
        }
        self.row_constructor_no_keyword()
    }

    pub(super) fn row_constructor_no_keyword(&mut self) -> Result<RowExpr, ParseError> {
        self.expect_special('(')?;
        let items = self.comma_list(Self::expression_with_default)?;
        self.expect_special(')')?;
        Ok(RowExpr { items })
    }

    fn array_constructor(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Array)?;
        if self.at_special('(') {
            let query = self.select_with_parentheses()?;
            return Ok(subselect(query, Some(SubselectOp::Array)));
        }
        if !self.at_special('[') {
            return Err(self
                .stream
                .unexpected("special character '[' or '('"));
        }
        Ok(Expr::Array(self.array_expression()?))
    }

    fn array_expression(&mut self) -> Result<ArrayExpr, ParseError> {
        self.expect_special('[')?;
        if self.eat_special(']')? {
            return Ok(ArrayExpr::default());
        }
        let items = if self.at_special('[') {
            self.comma_list(|g| g.array_expression().map(Expr::Array))?
        } else {
            self.expression_list()?
        };
        self.expect_special(']')?;
        Ok(ArrayExpr { items })
    }

    fn case_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;
        let argument = if self.at_keyword(Keyword::When) {
            None
        } else {
            Some(self.expression()?)
        };

        let mut when = NodeList::new();
        loop {
            self.expect_keyword(Keyword::When)?;
            let condition = self.expression()?;
            self.expect_keyword(Keyword::Then)?;
            let then = self.expression()?;
            when.push(WhenExpr {
                when: condition,
                then,
            });
            if !self.at_keyword(Keyword::When) {
                break;
            }
        }

        let else_clause = if self.eat_keyword(Keyword::Else)? {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;
        Ok(Expr::Case(Box::new(CaseExpr {
            argument,
            when,
            else_clause,
        })))
    }

    fn grouping_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Grouping)?;
        self.expect_special('(')?;
        let arguments = self.expression_list()?;
        self.expect_special(')')?;
        Ok(Expr::Grouping(arguments))
    }
}

/// Joins terms with `AND`/`OR`; a single term is returned as is.
fn logical(operator: LogicalOp, items: Vec<Expr>) -> Expr {
    match <[Expr; 1]>::try_from(items) {
        Ok([item]) => item,
        Err(items) => Expr::Logical(LogicalExpr {
            operator,
            items: items.into(),
        }),
    }
}

fn is_expr(argument: Expr, predicate: IsPredicate, not: bool) -> Expr {
    Expr::Is(Box::new(IsExpr {
        argument,
        predicate,
        not,
    }))
}

pub(super) fn infix(operator: Operator, left: Expr, right: Expr) -> Expr {
    Expr::Operator(Box::new(OperatorExpr {
        operator,
        left: Some(left),
        right: Some(right),
    }))
}

/// Wraps `term` in prefix operators, the last collected one innermost.
pub(super) fn apply_prefixes(mut operators: Vec<Operator>, mut term: Expr) -> Expr {
    while let Some(operator) = operators.pop() {
        term = Expr::Operator(Box::new(OperatorExpr {
            operator,
            left: None,
            right: Some(term),
        }));
    }
    term
}

pub(super) fn subselect(query: SelectStatement, operator: Option<SubselectOp>) -> Expr {
    Expr::Subselect(Box::new(SubselectExpr { query, operator }))
}

pub(super) fn with_indirection(base: Expr, items: Vec<IndirectionItem>) -> Expr {
    if items.is_empty() {
        base
    } else {
        Expr::Indirection(Box::new(Indirection {
            base,
            items: items.into(),
        }))
    }
}

/// The symbol of an operator-like token.
pub(super) fn operator_symbol(token: &Token) -> String {
    match &token.kind {
        TokenKind::Special(c) => c.to_string(),
        _ => token.text().unwrap_or_default().to_string(),
    }
}

/// `<`, `>`, `=` and the two-character comparison operators.
fn comparison_operator(token: &Token) -> Option<String> {
    match &token.kind {
        TokenKind::Special(c @ ('<' | '>' | '=')) => Some(c.to_string()),
        TokenKind::Inequality(op) => Some(op.clone()),
        _ => None,
    }
}

pub(super) const fn keyword_constant(keyword: Keyword) -> Constant {
    match keyword {
        Keyword::True => Constant::True,
        Keyword::False => Constant::False,
        _ => Constant::Null,
    }
}

/// Builds a constant from a literal token.
pub(super) fn constant(token: &Token) -> Constant {
    match &token.kind {
        TokenKind::Integer(value) | TokenKind::Float(value) => Constant::Numeric(value.clone()),
        TokenKind::BinaryString(value) => Constant::BinaryString(value.clone()),
        TokenKind::HexString(value) => Constant::HexString(value.clone()),
        TokenKind::String(value) | TokenKind::NationalString(value) => {
            Constant::String(value.clone())
        }
        _ => Constant::Null,
    }
}

fn parameter(token: &Token) -> Expr {
    match &token.kind {
        TokenKind::PositionalParam(position) => Expr::Parameter(Parameter::Positional(*position)),
        TokenKind::NamedParam(name) => Expr::Parameter(Parameter::Named(name.clone())),
        _ => Expr::Constant(Constant::Null),
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::Parser;

    fn parse(sql: &str) -> Expr {
        Parser::new().parse_expression(sql).unwrap()
    }

    fn operator_parts(expr: &Expr) -> (&str, Option<&Expr>, Option<&Expr>) {
        let Expr::Operator(op) = expr else {
            panic!("expected operator expression, got {expr:?}");
        };
        (
            op.operator.as_symbol().unwrap(),
            op.left.as_ref(),
            op.right.as_ref(),
        )
    }

    #[test]
    fn test_arithmetic_precedence() {
        let expr = parse("1 + 2 * 3");
        let (op, left, right) = operator_parts(&expr);
        assert_eq!(op, "+");
        assert_eq!(left, Some(&Expr::numeric("1")));
        assert_eq!(operator_parts(right.unwrap()).0, "*");

        let expr = parse("2 ^ 3 ^ 4");
        let (_, left, _) = operator_parts(&expr);
        assert_eq!(operator_parts(left.unwrap()).0, "^");
    }

    #[test]
    fn test_negative_numbers_are_folded() {
        assert_eq!(parse("-1"), Expr::numeric("-1"));
        assert_eq!(parse("- -1"), Expr::numeric("1"));
        assert!(matches!(parse("-a"), Expr::Operator(_)));
    }

    #[test]
    fn test_comparison_is_non_associative() {
        let expr = parse("a < b");
        assert_eq!(operator_parts(&expr).0, "<");
        assert!(Parser::new().parse_expression("a < b < c").is_err());
        assert!(Parser::new().parse_expression("a = b = c").is_err());
    }

    #[test]
    fn test_is_binds_looser_than_comparison() {
        let Expr::Is(is) = parse("a = b is not null") else {
            panic!("expected IS");
        };
        assert!(is.not);
        assert_eq!(is.predicate, IsPredicate::Null);
        assert!(matches!(is.argument, Expr::Operator(_)));

        let Expr::Is(is) = parse("a notnull") else {
            panic!("expected IS");
        };
        assert!(is.not);
    }

    #[test]
    fn test_is_variants() {
        assert!(matches!(parse("a is nfkc normalized"), Expr::Is(is) if is.predicate == IsPredicate::NfkcNormalized));
        let Expr::IsJson(json) = parse("a is not json object with unique keys") else {
            panic!("expected IS JSON");
        };
        assert!(json.not);
        assert_eq!(json.json_type, Some(IsJsonType::Object));
        assert_eq!(json.unique_keys, Some(true));
        assert!(matches!(parse("a is distinct from b"), Expr::IsDistinctFrom(d) if !d.not));
        assert!(matches!(parse("a is of (int, text)"), Expr::IsOf(of) if of.right.len() == 2));
        let err = Parser::new().parse_expression("a is foo").unwrap_err();
        assert!(err.message.starts_with("Unexpected"));
    }

    #[test]
    fn test_logical_expressions() {
        let Expr::Logical(or) = parse("a or b and c or not d") else {
            panic!("expected OR");
        };
        assert_eq!(or.operator, LogicalOp::Or);
        assert_eq!(or.items.len(), 3);
        assert!(matches!(&or.items[1], Expr::Logical(and) if and.operator == LogicalOp::And));
        assert!(matches!(&or.items[2], Expr::Not(_)));
    }

    #[test]
    fn test_parenthesized_logical_is_kept() {
        let Expr::Logical(and) = parse("(a and b) and c") else {
            panic!("expected AND");
        };
        assert_eq!(and.items.len(), 2);
    }

    #[test]
    fn test_pattern_matching() {
        let Expr::Pattern(pattern) = parse("a not similar to 'x%' escape '!'") else {
            panic!("expected pattern");
        };
        assert!(pattern.not);
        assert_eq!(pattern.operator, PatternOp::SimilarTo);
        assert!(pattern.escape.is_some());

        let Expr::Pattern(pattern) = parse("a like any(array['x', 'y'])") else {
            panic!("expected pattern");
        };
        assert!(matches!(pattern.pattern, Expr::ArrayComparison(_)));
    }

    #[test]
    fn test_between_and_in() {
        let Expr::Between(between) = parse("a not between symmetric 1 and 2 + 3") else {
            panic!("expected BETWEEN");
        };
        assert!(between.not);
        assert_eq!(between.predicate, BetweenPredicate::Symmetric);
        assert!(matches!(between.right, Expr::Operator(_)));

        let Expr::In(inexpr) = parse("a not in (select b from c)") else {
            panic!("expected IN");
        };
        assert!(inexpr.not);
        assert!(matches!(inexpr.right, InList::Subselect(_)));
        assert!(matches!(parse("a in (1, 2)"), Expr::In(i) if matches!(&i.right, InList::Values(v) if v.len() == 2)));
    }

    #[test]
    fn test_subquery_operators() {
        let expr = parse("a = any(select b from c)");
        let (op, _, right) = operator_parts(&expr);
        assert_eq!(op, "=");
        assert!(matches!(right, Some(Expr::Subselect(s)) if s.operator == Some(SubselectOp::Any)));

        let expr = parse("a @> all(b)");
        let (_, _, right) = operator_parts(&expr);
        assert!(matches!(right, Some(Expr::ArrayComparison(c)) if c.kind == ArrayComparisonKind::All));
    }

    #[test]
    fn test_qualified_operator() {
        let Expr::Operator(op) = parse("a operator(pg_catalog.+) b") else {
            panic!("expected operator");
        };
        assert_eq!(
            op.operator,
            Operator::Qualified(QualifiedOperator::new(Some("pg_catalog".into()), "+"))
        );
    }

    #[test]
    fn test_prefix_operators_nest() {
        let expr = parse("@ ~ a");
        let (op, left, right) = operator_parts(&expr);
        assert_eq!(op, "@");
        assert!(left.is_none());
        assert_eq!(operator_parts(right.unwrap()).0, "~");
    }

    #[test]
    fn test_at_time_zone_and_collate() {
        assert!(matches!(parse("a at time zone 'UTC'"), Expr::AtTimeZone(_)));
        assert!(matches!(parse("a at local"), Expr::AtLocal(_)));
        let Expr::Collate(collate) = parse("a collate \"C\"") else {
            panic!("expected COLLATE");
        };
        assert_eq!(collate.collation, QualifiedName::new("C"));
    }

    #[test]
    fn test_collate_and_time_zone_chain_to_the_left() {
        let Expr::Collate(outer) = parse("a collate \"C\" collate \"POSIX\"") else {
            panic!("expected COLLATE");
        };
        assert_eq!(outer.collation, QualifiedName::new("POSIX"));
        assert!(matches!(outer.argument, Expr::Collate(_)));

        let Expr::AtTimeZone(at) = parse("a at local at time zone 'x'") else {
            panic!("expected AT TIME ZONE");
        };
        assert!(matches!(at.argument, Expr::AtLocal(_)));
        assert!(matches!(
            parse("a at time zone 'x' at local"),
            Expr::AtLocal(argument) if matches!(*argument, Expr::AtTimeZone(_))
        ));
    }

    #[test]
    fn test_typecasts() {
        let Expr::Typecast(cast) = parse("a::int4[]") else {
            panic!("expected typecast");
        };
        assert_eq!(cast.type_name.bounds, vec![-1]);
        let Expr::Typecast(cast) = parse("foo.bar '42'") else {
            panic!("expected typecast");
        };
        assert_eq!(cast.argument, Expr::string("42"));
        assert!(matches!(parse("varchar(3) 'abc'"), Expr::Typecast(_)));
        assert!(matches!(parse("numeric(10, 2) '1.5'"), Expr::Typecast(_)));
    }

    #[test]
    fn test_column_references() {
        let Expr::ColumnRef(reference) = parse("s.t.c") else {
            panic!("expected column reference");
        };
        assert_eq!(reference.qualifiers.len(), 2);
        assert_eq!(reference.column, ColumnName::Name("c".into()));

        let Expr::ColumnRef(star) = parse("t.*") else {
            panic!("expected column reference");
        };
        assert_eq!(star.column, ColumnName::Star);

        let Expr::Indirection(indirection) = parse("t.arr[1][2:]") else {
            panic!("expected indirection");
        };
        assert_eq!(indirection.items.len(), 2);
        assert!(matches!(
            &indirection.items[0],
            IndirectionItem::Index(ArrayIndexes { lower: None, upper: Some(_), is_slice: false })
        ));

        let err = Parser::new().parse_expression("a.b.c.d.e").unwrap_err();
        assert!(err.message.starts_with("Too many dots"));
    }

    #[test]
    fn test_parenthesized_atoms() {
        assert!(matches!(parse("(1, 2)"), Expr::Row(row) if row.items.len() == 2));
        assert!(matches!(parse("(select 1)"), Expr::Subselect(s) if s.operator.is_none()));
        assert!(matches!(parse("(1 + 2)"), Expr::Operator(_)));
        let Expr::Indirection(indirection) = parse("(foo).bar") else {
            panic!("expected indirection");
        };
        assert!(matches!(&indirection.items[0], IndirectionItem::Field(f) if f.as_str() == "bar"));
        assert!(matches!(parse("row()"), Expr::Row(row) if row.items.is_empty()));
    }

    #[test]
    fn test_overlaps() {
        assert!(matches!(parse("(a, b) overlaps (c, d)"), Expr::Overlaps(_)));
        let err = Parser::new()
            .parse_expression("(a, b) overlaps (c, d, e)")
            .unwrap_err();
        assert!(err.message.contains("OVERLAPS"));
    }

    #[test]
    fn test_array_constructors() {
        let Expr::Array(array) = parse("array[[1, 2], [3, 4]]") else {
            panic!("expected array");
        };
        assert_eq!(array.items.len(), 2);
        assert!(matches!(&array.items[0], Expr::Array(inner) if inner.items.len() == 2));
        assert!(matches!(parse("array[]"), Expr::Array(a) if a.items.is_empty()));
        assert!(matches!(parse("array(select 1)"), Expr::Subselect(s) if s.operator == Some(SubselectOp::Array)));
        assert!(matches!(parse("exists(select 1)"), Expr::Subselect(s) if s.operator == Some(SubselectOp::Exists)));
    }

    #[test]
    fn test_case_expression() {
        let Expr::Case(case) = parse("case a when 1 then 'one' when 2 then 'two' else 'many' end") else {
            panic!("expected CASE");
        };
        assert!(case.argument.is_some());
        assert_eq!(case.when.len(), 2);
        assert!(case.else_clause.is_some());
        assert!(Parser::new().parse_expression("case end").is_err());
    }

    #[test]
    fn test_parameters_and_constants() {
        assert_eq!(parse(":foo"), Expr::named_param("foo"));
        assert_eq!(parse("$2"), Expr::positional_param(2));
        assert_eq!(parse("null"), Expr::Constant(Constant::Null));
        assert_eq!(parse("b'101'"), Expr::Constant(Constant::BinaryString("101".into())));
        assert!(matches!(parse(":foo[1]"), Expr::Indirection(_)));
    }
}
