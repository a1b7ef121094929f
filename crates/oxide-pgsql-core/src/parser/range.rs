//! Names, target lists and `FROM` items.

use super::classify::Parenthesized;
use super::functions::is_function_like;
use super::{is_col_id, token_identifier, Grammar, ParseError};
use crate::ast::{
    Alias, AliasColumns, ColumnDefinition, ColumnReference, Expr, FromElement, Identifier,
    InsertTarget, JoinCondition, JoinExpression, JoinType, NodeList, QualifiedName,
    RangeFunction, RangeSubselect, RelationReference, RowsFrom, RowsFromElement, TableSample,
    TargetElement, UpdateOrDeleteTarget, UsingClause,
};
use crate::lexer::{Keyword, KeywordCategory, TokenKind};

const JOIN_KEYWORDS: &[Keyword] = &[
    Keyword::Cross,
    Keyword::Natural,
    Keyword::Left,
    Keyword::Right,
    Keyword::Full,
    Keyword::Inner,
    Keyword::Join,
];

impl Grammar<'_> {
    /// An identifier, unreserved or column name keyword.
    pub(super) fn col_id(&mut self) -> Result<Identifier, ParseError> {
        if !is_col_id(self.stream.current()) {
            return Err(self.stream.unexpected("identifier"));
        }
        Ok(token_identifier(&self.next()?))
    }

    /// An identifier or any keyword.
    pub(super) fn col_label(&mut self) -> Result<Identifier, ParseError> {
        if !matches!(
            self.stream.current().kind,
            TokenKind::Identifier(_) | TokenKind::Keyword(_)
        ) {
            return Err(self.stream.unexpected("identifier"));
        }
        Ok(token_identifier(&self.next()?))
    }

    pub(super) fn col_id_list(&mut self) -> Result<NodeList<Identifier>, ParseError> {
        self.comma_list(Self::col_id)
    }

    pub(super) fn qualified_name(&mut self) -> Result<QualifiedName, ParseError> {
        let first = self.stream.current().clone();
        let mut parts = vec![self.col_id()?];
        while self.eat_special('.')? {
            parts.push(self.col_label()?);
        }
        QualifiedName::from_parts(parts).map_err(|err| self.node_error(&err, &first))
    }

    pub(super) fn target_list(&mut self) -> Result<NodeList<TargetElement>, ParseError> {
        self.comma_list(Self::target_element)
    }

    /// `*`, `expr`, `expr AS label` or `expr bare_label`.
    fn target_element(&mut self) -> Result<TargetElement, ParseError> {
        if self.eat_special('*')? {
            return Ok(TargetElement::new(Expr::ColumnRef(ColumnReference::star())));
        }
        let expression = self.target_expression()?;
        let current = self.stream.current();
        let bare_label = match &current.kind {
            TokenKind::Identifier(_) => true,
            TokenKind::Keyword(kw) => kw.is_bare_label(),
            _ => false,
        };
        let alias = if bare_label {
            Some(token_identifier(&self.next()?))
        } else if self.eat_keyword(Keyword::As)? {
            Some(self.col_label()?)
        } else {
            None
        };
        Ok(TargetElement { expression, alias })
    }

    pub(super) fn from_list(&mut self) -> Result<NodeList<FromElement>, ParseError> {
        self.comma_list(Self::from_element)
    }

    /// A table reference followed by any number of joins.
    pub(super) fn from_element(&mut self) -> Result<FromElement, ParseError> {
        let mut left = self.table_reference()?;

        while let Some(keyword) = self.stream.matches_any_keyword(JOIN_KEYWORDS) {
            if keyword == Keyword::Cross {
                self.next()?;
                self.expect_keyword(Keyword::Join)?;
                let right = self.table_reference()?;
                left = join(left, right, JoinType::Cross, false, None);
                continue;
            }

            let natural = self.eat_keyword(Keyword::Natural)?;
            let join_type = if self.eat_keyword(Keyword::Join)? {
                JoinType::Inner
            } else {
                let join_type = match self.stream.expect_keyword(&[
                    Keyword::Left,
                    Keyword::Right,
                    Keyword::Full,
                    Keyword::Inner,
                ])? {
                    Keyword::Left => JoinType::Left,
                    Keyword::Right => JoinType::Right,
                    Keyword::Full => JoinType::Full,
                    _ => JoinType::Inner,
                };
                self.eat_keyword(Keyword::Outer)?;
                self.expect_keyword(Keyword::Join)?;
                join_type
            };
            let right = self.table_reference()?;

            let condition = if natural {
                None
            } else if self.stream.expect_keyword(&[Keyword::On, Keyword::Using])? == Keyword::On {
                Some(JoinCondition::On(self.expression()?))
            } else {
                Some(JoinCondition::Using(self.using_clause()?))
            };
            left = join(left, right, join_type, natural, condition);
        }
        Ok(left)
    }

    /// `(a, b) [AS alias]` following `USING`.
    fn using_clause(&mut self) -> Result<UsingClause, ParseError> {
        self.expect_special('(')?;
        let columns = self.col_id_list()?;
        self.expect_special(')')?;
        let alias = if self.eat_keyword(Keyword::As)? {
            Some(self.col_id()?)
        } else {
            None
        };
        Ok(UsingClause { columns, alias })
    }

    fn table_reference(&mut self) -> Result<FromElement, ParseError> {
        if self.eat_keyword(Keyword::Lateral)? {
            self.reject_table_functions()?;
            let mut reference = if self.at_special('(') {
                self.range_subselect()?
            } else {
                self.range_function_call()?
            };
            match &mut reference {
                FromElement::Subselect(subselect) => subselect.lateral = true,
                FromElement::Function(function) => function.lateral = true,
                FromElement::RowsFrom(rows_from) => rows_from.lateral = true,
                _ => {}
            }
            return Ok(reference);
        }

        if self.at_special('(') {
            if self.parenthesized(0)? == Some(Parenthesized::Select) {
                return self.range_subselect();
            }
            self.next()?;
            let mut reference = self.from_element()?;
            self.expect_special(')')?;
            if let Some(alias) = self.optional_alias(false)? {
                *reference.alias_mut() = Some(alias);
            }
            return Ok(reference);
        }

        self.reject_table_functions()?;
        if self.stream.matches_keyword_sequence(&[Keyword::Rows, Keyword::From])
            || self.matches_function_call()
        {
            return self.range_function_call();
        }
        self.relation_expression()
    }

    fn reject_table_functions(&self) -> Result<(), ParseError> {
        match self.keyword() {
            Some(Keyword::Xmltable) => Err(self.stream.error_here("XMLTABLE is not supported")),
            Some(Keyword::JsonTable) => Err(self.stream.error_here("JSON_TABLE is not supported")),
            _ => Ok(()),
        }
    }

    fn range_subselect(&mut self) -> Result<FromElement, ParseError> {
        let query = self.select_with_parentheses()?;
        Ok(FromElement::Subselect(Box::new(RangeSubselect {
            query,
            lateral: false,
            alias: self.optional_alias(false)?,
        })))
    }

    /// `function(...)` or `ROWS FROM (...)`, `[WITH ORDINALITY]` and an
    /// alias that may define column types.
    fn range_function_call(&mut self) -> Result<FromElement, ParseError> {
        let mut reference = if self.eat_keywords(&[Keyword::Rows, Keyword::From])? {
            self.expect_special('(')?;
            let functions = self.comma_list(Self::rows_from_element)?;
            self.expect_special(')')?;
            FromElement::RowsFrom(Box::new(RowsFrom {
                functions,
                lateral: false,
                with_ordinality: false,
                alias: None,
            }))
        } else {
            FromElement::Function(Box::new(RangeFunction {
                function: self.from_function()?,
                lateral: false,
                with_ordinality: false,
                alias: None,
            }))
        };

        let with_ordinality = self.eat_keywords(&[Keyword::With, Keyword::Ordinality])?;
        let alias = self.optional_alias(true)?;
        match &mut reference {
            FromElement::RowsFrom(rows_from) => {
                rows_from.with_ordinality = with_ordinality;
                rows_from.alias = alias;
            }
            FromElement::Function(function) => {
                function.with_ordinality = with_ordinality;
                function.alias = alias;
            }
            _ => {}
        }
        Ok(reference)
    }

    fn rows_from_element(&mut self) -> Result<RowsFromElement, ParseError> {
        let function = self.from_function()?;
        let column_definitions = if self.eat_keyword(Keyword::As)? {
            self.expect_special('(')?;
            let definitions = self.comma_list(Self::column_definition)?;
            self.expect_special(')')?;
            definitions
        } else {
            NodeList::new()
        };
        Ok(RowsFromElement {
            function,
            column_definitions,
        })
    }

    /// A function call without `FILTER` and `OVER` that may produce rows.
    fn from_function(&mut self) -> Result<Expr, ParseError> {
        let token = self.stream.current().clone();
        let function = self.windowless_function_call()?;
        if !is_function_like(&function) {
            return Err(self.error_at("Expression cannot be used in FROM clause", &token));
        }
        Ok(function)
    }

    /// A special, JSON aggregate or generic function call, without the
    /// window decorations of a function in an expression.
    pub(super) fn windowless_function_call(&mut self) -> Result<Expr, ParseError> {
        if let Some(function) = self.special_function_call()? {
            return Ok(function);
        }
        if let Some(aggregate) = self.windowless_json_aggregate()? {
            return Ok(aggregate);
        }
        Ok(Expr::Function(Box::new(self.generic_function_call(None)?)))
    }

    /// `[ONLY] name [*] [alias] [TABLESAMPLE method (args) [REPEATABLE (seed)]]`.
    fn relation_expression(&mut self) -> Result<FromElement, ParseError> {
        let (name, inherit) = self.qualified_name_with_inherit()?;
        let relation = RelationReference {
            name,
            inherit,
            alias: self.optional_alias(false)?,
        };
        if !self.eat_keyword(Keyword::Tablesample)? {
            return Ok(FromElement::Relation(relation));
        }

        let method = self.generic_function_name()?;
        self.expect_special('(')?;
        let arguments = self.expression_list()?;
        self.expect_special(')')?;
        let repeatable = if self.eat_keyword(Keyword::Repeatable)? {
            self.expect_special('(')?;
            let seed = self.expression()?;
            self.expect_special(')')?;
            Some(seed)
        } else {
            None
        };
        Ok(FromElement::TableSample(Box::new(TableSample {
            relation,
            method,
            arguments,
            repeatable,
        })))
    }

    /// `name [AS alias]`; `AS` is required for the `INSERT` target alias.
    pub(super) fn insert_target(&mut self) -> Result<InsertTarget, ParseError> {
        let relation = self.qualified_name()?;
        let alias = if self.eat_keyword(Keyword::As)? {
            Some(self.col_id()?)
        } else {
            None
        };
        Ok(InsertTarget { relation, alias })
    }

    /// Target of `UPDATE`, `DELETE` and `MERGE`.
    ///
    /// Without `AS`, the alias of an `UPDATE` target cannot be `set`.
    pub(super) fn update_or_delete_target(
        &mut self,
        update: bool,
    ) -> Result<UpdateOrDeleteTarget, ParseError> {
        let (relation, inherit) = self.qualified_name_with_inherit()?;
        let current = self.stream.current();
        let has_alias = match &current.kind {
            TokenKind::Identifier(_) => true,
            TokenKind::Keyword(Keyword::As) => true,
            TokenKind::Keyword(kw) => match kw.category() {
                KeywordCategory::ColumnName => true,
                KeywordCategory::Unreserved => !update || *kw != Keyword::Set,
                _ => false,
            },
            _ => false,
        };
        let alias = if has_alias {
            self.eat_keyword(Keyword::As)?;
            Some(self.col_id()?)
        } else {
            None
        };
        Ok(UpdateOrDeleteTarget {
            relation,
            inherit,
            alias,
        })
    }

    /// `ONLY name`, `ONLY (name)`, `name *` or just `name`.
    fn qualified_name_with_inherit(&mut self) -> Result<(QualifiedName, Option<bool>), ParseError> {
        if self.eat_keyword(Keyword::Only)? {
            let parenthesized = self.eat_special('(')?;
            let name = self.qualified_name()?;
            if parenthesized {
                self.expect_special(')')?;
            }
            return Ok((name, Some(false)));
        }
        let name = self.qualified_name()?;
        let inherit = if self.eat_special('*')? { Some(true) } else { None };
        Ok((name, inherit))
    }

    /// `[AS] alias [(columns)]`, or just `[AS] (columns)` for functions.
    ///
    /// With `function_alias`, the column list may hold definitions with
    /// types, as needed for functions returning `record`.
    fn optional_alias(&mut self, function_alias: bool) -> Result<Option<Alias>, ParseError> {
        let current = self.stream.current();
        let starts_alias = current.is_keyword(Keyword::As) || is_col_id(current);
        if !starts_alias {
            return Ok(None);
        }
        self.eat_keyword(Keyword::As)?;

        let name = if function_alias && self.at_special('(') {
            None
        } else {
            Some(self.col_id()?)
        };
        let mut columns = None;
        if name.is_none() || self.at_special('(') {
            self.expect_special('(')?;
            let definitions = function_alias
                && (name.is_none() || !self.stream.peek(2).is_any_special(&[')', ',']));
            columns = Some(if definitions {
                AliasColumns::Definitions(self.comma_list(Self::column_definition)?)
            } else {
                AliasColumns::Names(self.col_id_list()?)
            });
            self.expect_special(')')?;
        }
        Ok(Some(Alias { name, columns }))
    }

    /// `name type [COLLATE collation]`.
    fn column_definition(&mut self) -> Result<ColumnDefinition, ParseError> {
        let name = self.col_id()?;
        let type_name = self.type_name()?;
        let collation = if self.eat_keyword(Keyword::Collate)? {
            Some(self.qualified_name()?)
        } else {
            None
        };
        Ok(ColumnDefinition {
            name,
            type_name,
            collation,
        })
    }
}

fn join(
    left: FromElement,
    right: FromElement,
    join_type: JoinType,
    natural: bool,
    condition: Option<JoinCondition>,
) -> FromElement {
    FromElement::Join(Box::new(JoinExpression {
        left,
        right,
        join_type,
        natural,
        condition,
        alias: None,
    }))
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::Parser;

    fn from(sql: &str) -> FromElement {
        let mut list = Parser::new().parse_from_list(sql).unwrap();
        assert_eq!(list.len(), 1);
        list.unset(0).unwrap()
    }

    fn from_err(sql: &str) -> String {
        Parser::new().parse_from_list(sql).unwrap_err().message
    }

    #[test]
    fn test_target_list_aliases() {
        let targets = Parser::new()
            .parse_target_list("*, a b, c as from, d + 1 abort")
            .unwrap();
        assert_eq!(
            targets[0].expression,
            Expr::ColumnRef(ColumnReference::star())
        );
        assert_eq!(targets[1].alias, Some(Identifier::new("b")));
        assert_eq!(targets[2].alias, Some(Identifier::new("from")));
        assert_eq!(targets[3].alias, Some(Identifier::new("abort")));
    }

    #[test]
    fn test_relation_references() {
        let FromElement::Relation(relation) = from("only s.t as x (a, b)") else {
            panic!("expected relation");
        };
        assert_eq!(relation.name, QualifiedName::with_schema("s", "t"));
        assert_eq!(relation.inherit, Some(false));
        let alias = relation.alias.unwrap();
        assert_eq!(alias.name, Some(Identifier::new("x")));
        assert!(matches!(alias.columns, Some(AliasColumns::Names(ref n)) if n.len() == 2));

        let FromElement::Relation(relation) = from("t *") else {
            panic!("expected relation");
        };
        assert_eq!(relation.inherit, Some(true));
    }

    #[test]
    fn test_joins() {
        let FromElement::Join(join) = from("a natural left join b cross join c") else {
            panic!("expected join");
        };
        assert_eq!(join.join_type, JoinType::Cross);
        let FromElement::Join(inner) = &join.left else {
            panic!("expected nested join");
        };
        assert!(inner.natural);
        assert_eq!(inner.join_type, JoinType::Left);

        let FromElement::Join(join) = from("a full outer join b using (id) as j") else {
            panic!("expected join");
        };
        assert!(matches!(
            join.condition,
            Some(JoinCondition::Using(ref using)) if using.alias == Some(Identifier::new("j"))
        ));

        assert!(from_err("a join b").contains("keyword 'on' or 'using'"));
    }

    #[test]
    fn test_parenthesized_join_with_alias() {
        let FromElement::Join(join) = from("(a join b on true) as j") else {
            panic!("expected join");
        };
        assert_eq!(join.alias, Some(Alias::new("j")));
    }

    #[test]
    fn test_functions_in_from() {
        let FromElement::Function(function) =
            from("lateral generate_series(1, 10) with ordinality as g (n, i)")
        else {
            panic!("expected function");
        };
        assert!(function.lateral);
        assert!(function.with_ordinality);

        let FromElement::Function(function) = from("json_to_record(x) as (a int, b text)") else {
            panic!("expected function");
        };
        assert!(matches!(
            function.alias.and_then(|a| a.columns),
            Some(AliasColumns::Definitions(ref d)) if d.len() == 2
        ));

        let FromElement::RowsFrom(rows) = from("rows from (f(1) as (a int), g(2))") else {
            panic!("expected rows from");
        };
        assert_eq!(rows.functions.len(), 2);
        assert_eq!(rows.functions[0].column_definitions.len(), 1);
    }

    #[test]
    fn test_aggregates_rejected_in_from() {
        assert_eq!(
            from_err("json_arrayagg(a)"),
            "Expression cannot be used in FROM clause"
        );
        assert_eq!(
            from_err("xmltable('/r' passing doc columns a int)"),
            "XMLTABLE is not supported"
        );
    }

    #[test]
    fn test_subselect_and_tablesample() {
        let FromElement::Subselect(sub) = from("lateral (select 1) as s") else {
            panic!("expected subselect");
        };
        assert!(sub.lateral);

        let FromElement::TableSample(sample) =
            from("t as x tablesample bernoulli (50) repeatable (1)")
        else {
            panic!("expected tablesample");
        };
        assert_eq!(sample.method, QualifiedName::new("bernoulli"));
        assert!(sample.repeatable.is_some());
    }
}
