//! Function calls: keyword-named functions with their own argument syntax,
//! generic calls with aggregate and window decorations, XML functions.

use super::classify::{sql_value_function, Parenthesized};
use super::{is_type_function_name, token_identifier, Grammar, ParseError};
use crate::ast::{
    Expr, ExtractExpr, FrameDirection, FrameExclusion, FrameMode, FunctionArguments,
    FunctionCall, Identifier, JsonExpr, NodeError, NodeList, NormalizeExpr, NormalizeForm, NullIfExpr,
    OverlayExpr, PositionExpr, QualifiedName, SqlValueFunction, SubstringFromExpr,
    SubstringSimilarExpr, SystemFunctionCall, SystemFunctionName, TargetElement, TrimExpr,
    TrimSide, WindowDefinition, WindowFrameBound, WindowFrameClause, XmlElement, XmlExists,
    XmlExpr, XmlOption, XmlParse, XmlPi, XmlRoot, XmlSerialize, XmlStandalone,
};
use crate::lexer::{Keyword, KeywordCategory, TokenKind};

const FRAME_MODES: &[Keyword] = &[Keyword::Range, Keyword::Rows, Keyword::Groups];

/// A parsed function argument: value, optional name, `VARIADIC` flag.
type Argument = (Expr, Option<Identifier>, bool);

/// Returns true for expressions that may appear as a function in `FROM`.
pub(super) fn is_function_like(expr: &Expr) -> bool {
    match expr {
        Expr::Function(_)
        | Expr::SqlValueFunction(_)
        | Expr::SystemFunction(_)
        | Expr::Typecast(_)
        | Expr::CollationFor(_)
        | Expr::Extract(_)
        | Expr::Normalize(_)
        | Expr::NullIf(_)
        | Expr::Overlay(_)
        | Expr::Position(_)
        | Expr::SubstringFrom(_)
        | Expr::SubstringSimilar(_)
        | Expr::Trim(_)
        | Expr::MergeAction
        | Expr::Xml(_) => true,
        Expr::Json(json) => !matches!(**json, JsonExpr::ArrayAgg(_) | JsonExpr::ObjectAgg(_)),
        _ => false,
    }
}

impl Grammar<'_> {
    /// A value function, a system function or `COLLATION FOR (...)`;
    /// `None` if the current token starts none of them.
    pub(super) fn special_function_call(&mut self) -> Result<Option<Expr>, ParseError> {
        if let Some(function) = self.sql_value_function()? {
            return Ok(Some(function));
        }
        if let Some(function) = self.system_function_call()? {
            return Ok(Some(function));
        }
        if self.eat_keywords(&[Keyword::Collation, Keyword::For])? {
            self.expect_special('(')?;
            let argument = self.expression()?;
            self.expect_special(')')?;
            return Ok(Some(Expr::CollationFor(Box::new(argument))));
        }
        Ok(None)
    }

    fn sql_value_function(&mut self) -> Result<Option<Expr>, ParseError> {
        let Some(name) = self.keyword().and_then(sql_value_function) else {
            return Ok(None);
        };
        self.next()?;
        let mut precision: Option<u32> = None;
        if name.allows_precision() && self.eat_special('(')? {
            let token = self.stream.expect(
                |kind| matches!(kind, TokenKind::Integer(_)),
                "integer literal",
            )?;
            let text = token.text().unwrap_or_default();
            precision = Some(
                text.parse()
                    .map_err(|_| self.error_at(format!("Invalid precision {text}"), &token))?,
            );
            self.expect_special(')')?;
        }
        Ok(Some(Expr::SqlValueFunction(SqlValueFunction {
            name,
            precision,
        })))
    }

    fn system_function_call(&mut self) -> Result<Option<Expr>, ParseError> {
        let Some(keyword) = self.keyword() else {
            return Ok(None);
        };
        if !self.stream.peek(1).is_special('(') {
            return Ok(None);
        }
        let function = match keyword {
            Keyword::Treat => {
                return Err(self
                    .stream
                    .error_here("TREAT() function support is not implemented"));
            }
            Keyword::Cast
            | Keyword::Extract
            | Keyword::Overlay
            | Keyword::Position
            | Keyword::Substring
            | Keyword::Trim
            | Keyword::Nullif
            | Keyword::Normalize
            | Keyword::Coalesce
            | Keyword::Greatest
            | Keyword::Least
            | Keyword::Xmlconcat
            | Keyword::Xmlelement
            | Keyword::Xmlexists
            | Keyword::Xmlforest
            | Keyword::Xmlparse
            | Keyword::Xmlpi
            | Keyword::Xmlroot
            | Keyword::Xmlserialize
            | Keyword::JsonObject
            | Keyword::JsonArray
            | Keyword::Json
            | Keyword::JsonScalar
            | Keyword::JsonSerialize
            | Keyword::JsonExists
            | Keyword::JsonValue
            | Keyword::JsonQuery
            | Keyword::MergeAction => keyword,
            _ => return Ok(None),
        };
        self.stream.skip(2)?;

        let node = match function {
            Keyword::Cast => {
                let argument = self.expression()?;
                self.expect_keyword(Keyword::As)?;
                argument.typecast(self.type_name()?)
            }
            Keyword::Extract => self.extract_arguments()?,
            Keyword::Overlay => self.overlay_arguments()?,
            Keyword::Position => {
                let substring = self.restricted_expression()?;
                self.expect_keyword(Keyword::In)?;
                let string = self.restricted_expression()?;
                Expr::Position(Box::new(PositionExpr { substring, string }))
            }
            Keyword::Substring => self.substring_arguments()?,
            Keyword::Trim => self.trim_arguments()?,
            Keyword::Nullif => {
                let first = self.expression()?;
                self.expect_special(',')?;
                let second = self.expression()?;
                Expr::NullIf(Box::new(NullIfExpr { first, second }))
            }
            Keyword::Normalize => {
                let argument = self.expression()?;
                let form = if self.eat_special(',')? {
                    Some(
                        match self.stream.expect_keyword(&[
                            Keyword::Nfc,
                            Keyword::Nfd,
                            Keyword::Nfkc,
                            Keyword::Nfkd,
                        ])? {
                            Keyword::Nfc => NormalizeForm::Nfc,
                            Keyword::Nfd => NormalizeForm::Nfd,
                            Keyword::Nfkc => NormalizeForm::Nfkc,
                            _ => NormalizeForm::Nfkd,
                        },
                    )
                } else {
                    None
                };
                Expr::Normalize(Box::new(NormalizeExpr { argument, form }))
            }
            Keyword::Xmlelement => xml(XmlExpr::Element(self.xml_element()?)),
            Keyword::Xmlexists => {
                let xpath = self.expression_atom()?;
                self.expect_keyword(Keyword::Passing)?;
                self.xml_passing_mechanism()?;
                let document = self.expression_atom()?;
                self.xml_passing_mechanism()?;
                xml(XmlExpr::Exists(XmlExists {
                    xpath,
                    xml: document,
                }))
            }
            Keyword::Xmlforest => xml(XmlExpr::Forest(self.xml_attribute_list()?)),
            Keyword::Xmlparse => {
                let option = self.xml_option()?;
                let argument = self.expression()?;
                let preserve_whitespace =
                    if self.eat_keywords(&[Keyword::Preserve, Keyword::Whitespace])? {
                        true
                    } else {
                        self.eat_keywords(&[Keyword::Strip, Keyword::Whitespace])?;
                        false
                    };
                xml(XmlExpr::Parse(XmlParse {
                    option,
                    argument,
                    preserve_whitespace,
                }))
            }
            Keyword::Xmlpi => {
                self.expect_keyword(Keyword::Name)?;
                let name = self.col_label()?;
                let content = if self.eat_special(',')? {
                    Some(self.expression()?)
                } else {
                    None
                };
                xml(XmlExpr::Pi(XmlPi { name, content }))
            }
            Keyword::Xmlroot => xml(XmlExpr::Root(self.xml_root()?)),
            Keyword::Xmlserialize => {
                let option = self.xml_option()?;
                let argument = self.expression()?;
                self.expect_keyword(Keyword::As)?;
                let type_name = self.simple_type_name()?;
                let indent = if self.eat_keyword(Keyword::Indent)? {
                    Some(true)
                } else if self.eat_keyword(Keyword::No)? {
                    self.expect_keyword(Keyword::Indent)?;
                    Some(false)
                } else {
                    None
                };
                xml(XmlExpr::Serialize(XmlSerialize {
                    option,
                    argument,
                    type_name,
                    indent,
                }))
            }
            Keyword::JsonObject => self.json_object_constructor()?,
            Keyword::JsonArray => self.json_array_constructor()?,
            Keyword::Json => self.json_constructor()?,
            Keyword::JsonScalar => self.json_scalar()?,
            Keyword::JsonSerialize => self.json_serialize()?,
            Keyword::JsonExists | Keyword::JsonValue | Keyword::JsonQuery => {
                self.json_query_function(function)?
            }
            Keyword::MergeAction => Expr::MergeAction,
            _ => {
                let name = match function {
                    Keyword::Coalesce => SystemFunctionName::Coalesce,
                    Keyword::Greatest => SystemFunctionName::Greatest,
                    Keyword::Least => SystemFunctionName::Least,
                    _ => SystemFunctionName::Xmlconcat,
                };
                Expr::SystemFunction(SystemFunctionCall {
                    name,
                    arguments: self.expression_list()?,
                })
            }
        };
        self.expect_special(')')?;
        Ok(Some(node))
    }

    fn extract_arguments(&mut self) -> Result<Expr, ParseError> {
        let token = self.stream.current();
        let field = match &token.kind {
            TokenKind::Keyword(
                kw @ (Keyword::Year
                | Keyword::Month
                | Keyword::Day
                | Keyword::Hour
                | Keyword::Minute
                | Keyword::Second),
            ) => kw.as_str().to_string(),
            TokenKind::String(value) | TokenKind::Identifier(value) => value.clone(),
            _ => return Err(self.stream.unexpected("identifier")),
        };
        self.next()?;
        self.expect_keyword(Keyword::From)?;
        let source = self.expression()?;
        Ok(Expr::Extract(Box::new(ExtractExpr { field, source })))
    }

    /// `OVERLAY(...)` is a user-defined function unless it uses `PLACING`.
    fn overlay_arguments(&mut self) -> Result<Expr, ParseError> {
        if let Some(generic) = self.generic_special_arguments("overlay")? {
            return Ok(generic);
        }
        let string = self.expression()?;
        if self.at_special(')') {
            return Ok(named_function("overlay", FunctionArguments::positional(vec![string])));
        }
        self.expect_keyword(Keyword::Placing)?;
        let new_substring = self.expression()?;
        self.expect_keyword(Keyword::From)?;
        let start = self.expression()?;
        let count = if self.eat_keyword(Keyword::For)? {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(Expr::Overlay(Box::new(OverlayExpr {
            string,
            new_substring,
            start,
            count,
        })))
    }

    /// `SUBSTRING(...)` is a user-defined function unless it uses
    /// `FROM`, `FOR` or `SIMILAR`.
    fn substring_arguments(&mut self) -> Result<Expr, ParseError> {
        if let Some(generic) = self.generic_special_arguments("substring")? {
            return Ok(generic);
        }
        let string = self.expression()?;
        if self.at_special(')') {
            return Ok(named_function(
                "substring",
                FunctionArguments::positional(vec![string]),
            ));
        }
        let keyword = self
            .stream
            .expect_keyword(&[Keyword::From, Keyword::For, Keyword::Similar])?;
        if keyword == Keyword::Similar {
            let pattern = self.expression()?;
            self.expect_keyword(Keyword::Escape)?;
            let escape = self.expression()?;
            return Ok(Expr::SubstringSimilar(Box::new(SubstringSimilarExpr {
                string,
                pattern,
                escape,
            })));
        }

        let (mut from, mut count) = (None, None);
        if keyword == Keyword::From {
            from = Some(self.expression()?);
            if self.eat_keyword(Keyword::For)? {
                count = Some(self.expression()?);
            }
        } else {
            count = Some(self.expression()?);
            if self.eat_keyword(Keyword::From)? {
                from = Some(self.expression()?);
            }
        }
        Ok(Expr::SubstringFrom(Box::new(SubstringFromExpr {
            string,
            from,
            count,
        })))
    }

    /// Handles `name()` and `name(a, b => c)` for functions that also have
    /// a standard syntax; the opening parenthesis is already consumed.
    fn generic_special_arguments(&mut self, name: &str) -> Result<Option<Expr>, ParseError> {
        if self.at_special(')') {
            return Ok(Some(named_function(name, FunctionArguments::new())));
        }
        match self.parenthesized(-1)? {
            Some(Parenthesized::Args | Parenthesized::Row) => {
                let arguments = self.function_argument_list()?;
                Ok(Some(named_function(name, arguments)))
            }
            _ => Ok(None),
        }
    }

    fn trim_arguments(&mut self) -> Result<Expr, ParseError> {
        let side = match self.keyword() {
            Some(Keyword::Leading) => TrimSide::Leading,
            Some(Keyword::Trailing) => TrimSide::Trailing,
            Some(Keyword::Both) => TrimSide::Both,
            _ => TrimSide::default(),
        };
        if self
            .stream
            .matches_any_keyword(&[Keyword::Leading, Keyword::Trailing, Keyword::Both])
            .is_some()
        {
            self.next()?;
        }

        let arguments = if self.eat_keyword(Keyword::From)? {
            self.expression_list()?
        } else {
            let first = self.expression()?;
            if self.eat_keyword(Keyword::From)? {
                let mut arguments = self.expression_list()?;
                arguments.push(first);
                arguments
            } else {
                let mut arguments = NodeList::from(vec![first]);
                if self.eat_special(',')? {
                    arguments.extend(self.expression_list()?);
                }
                arguments
            }
        };
        Ok(Expr::Trim(Box::new(TrimExpr { arguments, side })))
    }

    fn xml_option(&mut self) -> Result<XmlOption, ParseError> {
        Ok(
            match self
                .stream
                .expect_keyword(&[Keyword::Document, Keyword::Content])?
            {
                Keyword::Document => XmlOption::Document,
                _ => XmlOption::Content,
            },
        )
    }

    /// `BY REF` and `BY VALUE` are noise.
    fn xml_passing_mechanism(&mut self) -> Result<(), ParseError> {
        if self.eat_keyword(Keyword::By)? {
            self.stream.expect_keyword(&[Keyword::Ref, Keyword::Value])?;
        }
        Ok(())
    }

    fn xml_element(&mut self) -> Result<XmlElement, ParseError> {
        self.expect_keyword(Keyword::Name)?;
        let name = self.col_label()?;
        let mut attributes = NodeList::new();
        let mut content = NodeList::new();
        if self.eat_special(',')? {
            if self.eat_keyword(Keyword::Xmlattributes)? {
                self.expect_special('(')?;
                attributes = self.xml_attribute_list()?;
                self.expect_special(')')?;
                if self.eat_special(',')? {
                    content = self.expression_list()?;
                }
            } else {
                content = self.expression_list()?;
            }
        }
        Ok(XmlElement {
            name,
            attributes,
            content,
        })
    }

    fn xml_root(&mut self) -> Result<XmlRoot, ParseError> {
        let document = self.expression()?;
        self.expect_special(',')?;
        self.expect_keyword(Keyword::Version)?;
        let version = if self.eat_keywords(&[Keyword::No, Keyword::Value])? {
            None
        } else {
            Some(self.expression()?)
        };
        let standalone = if self.eat_special(',')? {
            self.expect_keyword(Keyword::Standalone)?;
            if self.eat_keywords(&[Keyword::No, Keyword::Value])? {
                Some(XmlStandalone::NoValue)
            } else if self.stream.expect_keyword(&[Keyword::No, Keyword::Yes])? == Keyword::Yes {
                Some(XmlStandalone::Yes)
            } else {
                Some(XmlStandalone::No)
            }
        } else {
            None
        };
        Ok(XmlRoot {
            xml: document,
            version,
            standalone,
        })
    }

    fn xml_attribute_list(&mut self) -> Result<NodeList<TargetElement>, ParseError> {
        self.comma_list(|g| {
            let expression = g.expression()?;
            let alias = if g.eat_keyword(Keyword::As)? {
                Some(g.col_label()?)
            } else {
                None
            };
            Ok(TargetElement { expression, alias })
        })
    }

    /// A generic call followed by `WITHIN GROUP`, `FILTER` and `OVER`.
    pub(super) fn function_expression(
        &mut self,
        identifiers: Vec<Identifier>,
    ) -> Result<Expr, ParseError> {
        let mut function = self.generic_function_call(Some(identifiers))?;

        if self.stream.matches_keyword_sequence(&[Keyword::Within, Keyword::Group]) {
            let message = if !function.order_by.is_empty() {
                Some("Cannot use multiple ORDER BY clauses with WITHIN GROUP")
            } else if function.distinct {
                Some("Cannot use DISTINCT with WITHIN GROUP")
            } else if function.variadic {
                Some("Cannot use VARIADIC with WITHIN GROUP")
            } else {
                None
            };
            if let Some(message) = message {
                return Err(self.stream.error_here(message));
            }
            self.stream.skip(2)?;
            self.expect_special('(')?;
            self.expect_keyword(Keyword::Order)?;
            self.expect_keyword(Keyword::By)?;
            function.order_by = self.order_by_list()?;
            function.within_group = true;
            self.expect_special(')')?;
        }

        function.filter = self.filter_clause()?;
        function.over = self.over_clause()?;
        Ok(Expr::Function(Box::new(function)))
    }

    pub(super) fn filter_clause(&mut self) -> Result<Option<Expr>, ParseError> {
        if !self.eat_keyword(Keyword::Filter)? {
            return Ok(None);
        }
        self.expect_special('(')?;
        self.expect_keyword(Keyword::Where)?;
        let filter = self.expression()?;
        self.expect_special(')')?;
        Ok(Some(filter))
    }

    /// `OVER name` or `OVER (specification)`.
    pub(super) fn over_clause(&mut self) -> Result<Option<WindowDefinition>, ParseError> {
        if !self.eat_keyword(Keyword::Over)? {
            return Ok(None);
        }
        if self.at_special('(') {
            return self.window_specification().map(Some);
        }
        Ok(Some(WindowDefinition {
            ref_name: Some(self.col_id()?),
            ..WindowDefinition::default()
        }))
    }

    /// `name(args)`; with `identifiers` the name was already consumed.
    pub(super) fn generic_function_call(
        &mut self,
        identifiers: Option<Vec<Identifier>>,
    ) -> Result<FunctionCall, ParseError> {
        let name = match identifiers {
            Some(parts) => {
                let token = self.stream.current().clone();
                QualifiedName::from_parts(parts).map_err(|err| self.node_error(&err, &token))?
            }
            None => self.generic_function_name()?,
        };
        let mut function = FunctionCall::new(name, FunctionArguments::new());

        self.expect_special('(')?;
        if self.eat_special('*')? {
            function.arguments = FunctionArguments::star();
        } else if !self.at_special(')') {
            if let Some(keyword) = self
                .stream
                .matches_any_keyword(&[Keyword::Distinct, Keyword::All])
            {
                self.next()?;
                function.distinct = keyword == Keyword::Distinct;
            }
            let (value, name, variadic) = self.function_argument(true)?;
            let token = self.stream.current().clone();
            push_argument(&mut function.arguments, value, name)
                .map_err(|err| self.node_error(&err, &token))?;
            function.variadic = variadic;

            while !function.variadic && self.eat_special(',')? {
                let token = self.stream.current().clone();
                let (value, name, variadic) = self.function_argument(true)?;
                push_argument(&mut function.arguments, value, name)
                    .map_err(|err| self.node_error(&err, &token))?;
                function.variadic = variadic;
            }
            if self.eat_keywords(&[Keyword::Order, Keyword::By])? {
                function.order_by = self.order_by_list()?;
            }
        }
        self.expect_special(')')?;
        Ok(function)
    }

    pub(super) fn generic_function_name(&mut self) -> Result<QualifiedName, ParseError> {
        let first = self.stream.current().clone();
        let is_atom_identifier = match &first.kind {
            TokenKind::Identifier(_) => true,
            TokenKind::Keyword(kw) => kw.category() != KeywordCategory::Reserved,
            _ => false,
        };
        if !is_atom_identifier {
            return Err(self.stream.unexpected("identifier"));
        }
        self.next()?;
        let mut parts = vec![token_identifier(&first)];
        while self.eat_special('.')? {
            parts.push(self.col_label()?);
        }

        let category = first.keyword_category();
        if (category == Some(KeywordCategory::TypeFuncName) && parts.len() > 1)
            || (category == Some(KeywordCategory::ColumnName) && parts.len() == 1)
        {
            let joined: Vec<&str> = parts.iter().map(Identifier::as_str).collect();
            return Err(self.error_at(
                format!("{} is not a valid function name", joined.join(".")),
                &first,
            ));
        }
        QualifiedName::from_parts(parts).map_err(|err| self.node_error(&err, &first))
    }

    /// Arguments of `overlay()`, `substring()` and `json_object()` called
    /// as ordinary functions; `VARIADIC` is not accepted there.
    pub(super) fn function_argument_list(&mut self) -> Result<FunctionArguments, ParseError> {
        let mut arguments = FunctionArguments::new();
        loop {
            let token = self.stream.current().clone();
            let (value, name, _) = self.function_argument(false)?;
            push_argument(&mut arguments, value, name)
                .map_err(|err| self.node_error(&err, &token))?;
            if !self.eat_special(',')? {
                break;
            }
        }
        Ok(arguments)
    }

    fn function_argument(&mut self, allow_variadic: bool) -> Result<Argument, ParseError> {
        let variadic = allow_variadic && self.eat_keyword(Keyword::Variadic)?;
        let mut name = None;
        if matches!(
            self.stream.peek(1).kind,
            TokenKind::ColonEquals | TokenKind::EqualsGreater
        ) {
            if !is_type_function_name(self.stream.current()) {
                return Err(self.stream.unexpected("identifier"));
            }
            name = Some(token_identifier(&self.next()?));
            self.next()?;
        }
        Ok((self.expression()?, name, variadic))
    }

    pub(super) fn window_list(&mut self) -> Result<NodeList<WindowDefinition>, ParseError> {
        self.comma_list(|g| {
            let name = g.col_id()?;
            g.expect_keyword(Keyword::As)?;
            let mut window = g.window_specification()?;
            window.name = Some(name);
            Ok(window)
        })
    }

    pub(super) fn window_specification(&mut self) -> Result<WindowDefinition, ParseError> {
        self.expect_special('(')?;
        let mut window = WindowDefinition::default();

        let current = self.stream.current();
        let has_ref_name = match &current.kind {
            TokenKind::Identifier(_) => true,
            TokenKind::Keyword(kw) => match kw.category() {
                KeywordCategory::ColumnName => true,
                // these start the rest of the specification instead
                KeywordCategory::Unreserved => !matches!(
                    kw,
                    Keyword::Partition | Keyword::Range | Keyword::Rows | Keyword::Groups
                ),
                _ => false,
            },
            _ => false,
        };
        if has_ref_name {
            window.ref_name = Some(self.col_id()?);
        }
        if self.eat_keywords(&[Keyword::Partition, Keyword::By])? {
            window.partition = self.expression_list()?;
        }
        if self.eat_keywords(&[Keyword::Order, Keyword::By])? {
            window.order_by = self.order_by_list()?;
        }
        if self.stream.matches_any_keyword(FRAME_MODES).is_some() {
            window.frame = Some(self.window_frame_clause()?);
        }
        self.expect_special(')')?;
        Ok(window)
    }

    fn window_frame_clause(&mut self) -> Result<WindowFrameClause, ParseError> {
        let mode = match self.stream.expect_keyword(FRAME_MODES)? {
            Keyword::Range => FrameMode::Range,
            Keyword::Rows => FrameMode::Rows,
            _ => FrameMode::Groups,
        };
        let start_token = self.stream.current().clone();
        let (start, end) = if self.eat_keyword(Keyword::Between)? {
            let start = self.window_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            (start, Some(self.window_frame_bound()?))
        } else {
            (self.window_frame_bound()?, None)
        };

        let mut exclusion = None;
        if self.eat_keyword(Keyword::Exclude)? {
            match self.stream.expect_keyword(&[
                Keyword::Current,
                Keyword::Group,
                Keyword::Ties,
                Keyword::No,
            ])? {
                Keyword::Current => {
                    self.expect_keyword(Keyword::Row)?;
                    exclusion = Some(FrameExclusion::CurrentRow);
                }
                Keyword::Group => exclusion = Some(FrameExclusion::Group),
                Keyword::Ties => exclusion = Some(FrameExclusion::Ties),
                // EXCLUDE NO OTHERS is the default
                _ => {
                    self.expect_keyword(Keyword::Others)?;
                }
            }
        }

        WindowFrameClause::new(mode, start, end, exclusion)
            .map_err(|err: NodeError| self.node_error(&err, &start_token))
    }

    fn window_frame_bound(&mut self) -> Result<WindowFrameBound, ParseError> {
        if self.eat_keywords(&[Keyword::Unbounded, Keyword::Preceding])? {
            return Ok(WindowFrameBound::unbounded(FrameDirection::Preceding));
        }
        if self.eat_keywords(&[Keyword::Unbounded, Keyword::Following])? {
            return Ok(WindowFrameBound::unbounded(FrameDirection::Following));
        }
        if self.eat_keywords(&[Keyword::Current, Keyword::Row])? {
            return Ok(WindowFrameBound::current_row());
        }
        let value = self.expression()?;
        let direction = match self
            .stream
            .expect_keyword(&[Keyword::Preceding, Keyword::Following])?
        {
            Keyword::Preceding => FrameDirection::Preceding,
            _ => FrameDirection::Following,
        };
        Ok(WindowFrameBound::offset(direction, value))
    }
}

fn push_argument(
    arguments: &mut FunctionArguments,
    value: Expr,
    name: Option<Identifier>,
) -> Result<(), NodeError> {
    match name {
        Some(name) => arguments.push_named(name, value),
        None => arguments.push_positional(value),
    }
}

pub(super) fn named_function(name: &str, arguments: FunctionArguments) -> Expr {
    Expr::Function(Box::new(FunctionCall::new(
        QualifiedName::new(name),
        arguments,
    )))
}

fn xml(expr: XmlExpr) -> Expr {
    Expr::Xml(Box::new(expr))
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::Parser;

    fn parse(sql: &str) -> Expr {
        Parser::new().parse_expression(sql).unwrap()
    }

    fn function(sql: &str) -> FunctionCall {
        match parse(sql) {
            Expr::Function(function) => *function,
            other => panic!("expected function call, got {other:?}"),
        }
    }

    #[test]
    fn test_generic_function_calls() {
        let call = function("count(*)");
        assert!(call.arguments.is_star());

        let call = function("pg_catalog.concat_ws(',', a, b)");
        assert_eq!(call.name, QualifiedName::with_schema("pg_catalog", "concat_ws"));
        assert_eq!(call.arguments.len(), 3);

        let call = function("string_agg(distinct a, ',' order by a desc)");
        assert!(call.distinct);
        assert_eq!(call.order_by.len(), 1);

        let call = function("foo(a, variadic b)");
        assert!(call.variadic);
    }

    #[test]
    fn test_named_arguments() {
        let call = function("make_interval(days => 1, hours := 2)");
        assert!(call.arguments.get_named("days").is_some());
        assert!(call.arguments.get_named("hours").is_some());

        let err = Parser::new()
            .parse_expression("foo(a => 1, 2)")
            .unwrap_err();
        assert_eq!(err.message, "Positional argument cannot follow named argument");
        let err = Parser::new()
            .parse_expression("foo(a => 1, a => 2)")
            .unwrap_err();
        assert_eq!(err.message, "Argument name a used more than once");
    }

    #[test]
    fn test_aggregate_decorations() {
        let call = function(
            "percentile_cont(0.5) within group (order by a) filter (where b > 0) over w",
        );
        assert!(call.within_group);
        assert_eq!(call.order_by.len(), 1);
        assert!(call.filter.is_some());
        assert_eq!(
            call.over.and_then(|w| w.ref_name),
            Some(Identifier::new("w"))
        );

        let err = Parser::new()
            .parse_expression("foo(distinct a) within group (order by a)")
            .unwrap_err();
        assert_eq!(err.message, "Cannot use DISTINCT with WITHIN GROUP");
    }

    #[test]
    fn test_window_specification() {
        let call = function(
            "sum(a) over (w partition by b order by c rows between unbounded preceding and current row exclude ties)",
        );
        let window = call.over.unwrap();
        assert_eq!(window.ref_name, Some(Identifier::new("w")));
        assert_eq!(window.partition.len(), 1);
        let frame = window.frame.unwrap();
        assert_eq!(frame.mode(), FrameMode::Rows);
        assert_eq!(frame.exclusion(), Some(FrameExclusion::Ties));

        let err = Parser::new()
            .parse_expression("sum(a) over (rows unbounded following)")
            .unwrap_err();
        assert_eq!(err.message, "Frame start cannot be UNBOUNDED FOLLOWING");
    }

    #[test]
    fn test_invalid_function_names() {
        let err = Parser::new().parse_expression("left.foo(1)").unwrap_err();
        assert!(err.message.starts_with("Unexpected"));
        assert!(Parser::new().parse_expression("left(a, 2)").is_ok());
    }

    #[test]
    fn test_sql_value_functions() {
        assert_eq!(
            parse("current_timestamp(3)"),
            Expr::SqlValueFunction(SqlValueFunction {
                name: SqlValueFunctionName::CurrentTimestamp,
                precision: Some(3),
            })
        );
        assert!(matches!(parse("current_user"), Expr::SqlValueFunction(_)));
    }

    #[test]
    fn test_system_functions() {
        assert!(matches!(parse("cast(a as int)"), Expr::Typecast(_)));
        assert!(matches!(parse("coalesce(a, b, c)"), Expr::SystemFunction(f) if f.arguments.len() == 3));
        assert!(matches!(parse("extract(epoch from a)"), Expr::Extract(e) if e.field == "epoch"));
        assert!(matches!(parse("position('a' in b)"), Expr::Position(_)));
        assert!(matches!(parse("nullif(a, b)"), Expr::NullIf(_)));
        assert!(matches!(parse("normalize(a, nfkd)"), Expr::Normalize(n) if n.form == Some(NormalizeForm::Nfkd)));
        assert!(matches!(parse("collation for (a)"), Expr::CollationFor(_)));
        let err = Parser::new().parse_expression("treat(a as b)").unwrap_err();
        assert_eq!(err.message, "TREAT() function support is not implemented");
    }

    #[test]
    fn test_substring_and_overlay_forms() {
        assert!(matches!(
            parse("substring(a from 2 for 3)"),
            Expr::SubstringFrom(s) if s.from.is_some() && s.count.is_some()
        ));
        assert!(matches!(parse("substring(a for 3)"), Expr::SubstringFrom(s) if s.from.is_none()));
        assert!(matches!(parse("substring(a similar 'x' escape '#')"), Expr::SubstringSimilar(_)));
        assert!(matches!(parse("substring(a, 2)"), Expr::Function(_)));
        assert!(matches!(parse("substring()"), Expr::Function(_)));
        assert!(matches!(parse("overlay(a placing 'x' from 2)"), Expr::Overlay(_)));
        assert!(matches!(parse("overlay(a)"), Expr::Function(_)));
    }

    #[test]
    fn test_trim_forms() {
        let Expr::Trim(trim) = parse("trim(leading 'x' from a)") else {
            panic!("expected TRIM");
        };
        assert_eq!(trim.side, TrimSide::Leading);
        assert_eq!(trim.arguments[0], Expr::column("a"));
        assert_eq!(trim.arguments[1], Expr::string("x"));

        let Expr::Trim(trim) = parse("trim(a, 'x')") else {
            panic!("expected TRIM");
        };
        assert_eq!(trim.side, TrimSide::Both);
        assert_eq!(trim.arguments.len(), 2);
    }

    #[test]
    fn test_xml_functions() {
        let Expr::Xml(xml) = parse("xmlelement(name foo, xmlattributes(a as bar), b, c)") else {
            panic!("expected XML");
        };
        assert!(matches!(*xml, XmlExpr::Element(ref e) if e.attributes.len() == 1 && e.content.len() == 2));
        assert!(matches!(parse("xmlexists('//x' passing by ref doc)"), Expr::Xml(_)));
        assert!(matches!(
            parse("xmlparse(document a preserve whitespace)"),
            Expr::Xml(x) if matches!(*x, XmlExpr::Parse(ref p) if p.preserve_whitespace)
        ));
        assert!(matches!(
            parse("xmlroot(a, version no value, standalone yes)"),
            Expr::Xml(x) if matches!(*x, XmlExpr::Root(ref r) if r.version.is_none() && r.standalone == Some(XmlStandalone::Yes))
        ));
        assert!(matches!(
            parse("xmlserialize(content a as text no indent)"),
            Expr::Xml(x) if matches!(*x, XmlExpr::Serialize(ref s) if s.indent == Some(false))
        ));
        assert!(matches!(parse("xmlpi(name php, 'echo')"), Expr::Xml(_)));
    }
}
