//! SQL Parser
//!
//! A hand-written recursive descent parser for the PostgreSQL dialect.
//!
//! Expressions are parsed by a cascade of rules, one per precedence level.
//! Two cascades exist, selected by [`Precedence`]: the current one, where all
//! comparison operators share a single level, and the legacy one reproducing
//! the rules of server versions before 9.5. Parenthesized input is classified
//! by a bounded forward scan before committing to a rule, so the parser never
//! backtracks.

mod classify;
mod config;
mod error;
mod expressions;
mod functions;
mod json;
mod legacy;
mod range;
mod statements;
mod types;

use tracing::debug;

pub use config::{ParserConfig, Precedence};
pub use error::ParseError;

use crate::ast::{
    Expr, FromElement, GroupByClause, Identifier, LockingElement, NodeError, NodeList,
    OnConflictClause, OrderByElement, QualifiedName, RowExpr, SelectStatement, SetClause,
    Statement, TargetElement, TypeName, WindowDefinition, WithClause,
};
use crate::lexer::{Keyword, KeywordCategory, Lexer, Token, TokenKind, TokenStream};

/// SQL Parser.
///
/// Holds only configuration, so one instance can be reused for any number
/// of inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a complete statement: `SELECT`, `VALUES`, `INSERT`, `UPDATE`,
    /// `DELETE` or `MERGE`, optionally preceded by `WITH`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a single valid statement.
    pub fn parse_statement(&self, sql: &str) -> Result<Statement, ParseError> {
        self.run(sql, "statement", Grammar::statement)
    }

    /// Parses a `SELECT` or `VALUES` query, possibly combined with set operators.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid query.
    pub fn parse_select_statement(&self, sql: &str) -> Result<SelectStatement, ParseError> {
        self.run(sql, "select statement", Grammar::select_statement)
    }

    /// Parses a scalar expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid expression.
    pub fn parse_expression(&self, sql: &str) -> Result<Expr, ParseError> {
        self.run(sql, "expression", Grammar::expression)
    }

    /// Parses a comma-separated list of expressions.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid expression list.
    pub fn parse_expression_list(&self, sql: &str) -> Result<NodeList<Expr>, ParseError> {
        self.run(sql, "expression list", Grammar::expression_list)
    }

    /// Parses the target list of `SELECT` or `RETURNING`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid target list.
    pub fn parse_target_list(&self, sql: &str) -> Result<NodeList<TargetElement>, ParseError> {
        self.run(sql, "target list", Grammar::target_list)
    }

    /// Parses the contents of a `FROM` clause.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid `FROM` list.
    pub fn parse_from_list(&self, sql: &str) -> Result<NodeList<FromElement>, ParseError> {
        self.run(sql, "from list", Grammar::from_list)
    }

    /// Parses the contents of an `ORDER BY` clause.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid `ORDER BY` list.
    pub fn parse_order_by_list(
        &self,
        sql: &str,
    ) -> Result<NodeList<OrderByElement>, ParseError> {
        self.run(sql, "order by list", Grammar::order_by_list)
    }

    /// Parses a type name, e.g. `character varying(10)[]`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid type name.
    pub fn parse_type_name(&self, sql: &str) -> Result<TypeName, ParseError> {
        self.run(sql, "type name", Grammar::type_name)
    }

    /// Parses a possibly schema-qualified name.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid name.
    pub fn parse_qualified_name(&self, sql: &str) -> Result<QualifiedName, ParseError> {
        self.run(sql, "qualified name", Grammar::qualified_name)
    }

    /// Parses a `WITH` clause including the keyword.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid `WITH` clause.
    pub fn parse_with_clause(&self, sql: &str) -> Result<WithClause, ParseError> {
        self.run(sql, "with clause", Grammar::with_clause)
    }

    /// Parses the `SET` list of `UPDATE`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid `SET` list.
    pub fn parse_set_clause_list(&self, sql: &str) -> Result<NodeList<SetClause>, ParseError> {
        self.run(sql, "set clause list", Grammar::set_clause_list)
    }

    /// Parses the contents of a `GROUP BY` clause.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid `GROUP BY` list.
    pub fn parse_group_by_clause(&self, sql: &str) -> Result<GroupByClause, ParseError> {
        self.run(sql, "group by clause", Grammar::group_by_clause)
    }

    /// Parses the contents of a `WINDOW` clause.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid window list.
    pub fn parse_window_list(
        &self,
        sql: &str,
    ) -> Result<NodeList<WindowDefinition>, ParseError> {
        self.run(sql, "window list", Grammar::window_list)
    }

    /// Parses one or more `FOR UPDATE`-style locking clauses.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid locking list.
    pub fn parse_locking_list(
        &self,
        sql: &str,
    ) -> Result<NodeList<LockingElement>, ParseError> {
        self.run(sql, "locking list", Grammar::locking_list)
    }

    /// Parses the part of `ON CONFLICT` following these keywords.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid `ON CONFLICT` clause.
    pub fn parse_on_conflict(&self, sql: &str) -> Result<OnConflictClause, ParseError> {
        self.run(sql, "on conflict clause", Grammar::on_conflict)
    }

    /// Parses the rows of a `VALUES` list: `(1, 2), (3, 4)`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid row list.
    pub fn parse_row_list(&self, sql: &str) -> Result<NodeList<RowExpr>, ParseError> {
        self.run(sql, "row list", Grammar::row_list)
    }

    /// Tokenizes `sql`, applies `rule` and checks that all input was consumed.
    fn run<'s, T>(
        &self,
        sql: &'s str,
        entry: &'static str,
        rule: impl FnOnce(&mut Grammar<'s>) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let stream = Lexer::with_options(sql, self.config.lexer).tokenize()?;
        let mut grammar = Grammar {
            stream,
            precedence: self.config.precedence,
        };
        let result = rule(&mut grammar)?;
        if !grammar.stream.is_eof() {
            return Err(grammar.stream.unexpected("end of input"));
        }
        debug!(
            entry,
            precedence = self.config.precedence.as_str(),
            tokens = grammar.stream.position(),
            "parsed"
        );
        Ok(result)
    }
}

/// Parsing state for a single input: the token stream and the active
/// precedence rules. Grammar rules are split across the submodules.
struct Grammar<'a> {
    stream: TokenStream<'a>,
    precedence: Precedence,
}

impl Grammar<'_> {
    fn keyword(&self) -> Option<Keyword> {
        self.stream.keyword()
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        self.stream.advance()
    }

    fn at_special(&self, c: char) -> bool {
        self.stream.matches_special(c)
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.stream.matches_keyword(keyword)
    }

    fn expect_special(&mut self, c: char) -> Result<Token, ParseError> {
        self.stream.expect_special(c)
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Keyword, ParseError> {
        self.stream.expect_keyword(&[keyword])
    }

    /// Consumes `keyword` if it is the current token.
    fn eat_keyword(&mut self, keyword: Keyword) -> Result<bool, ParseError> {
        if self.at_keyword(keyword) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the keyword sequence if it starts at the current token.
    fn eat_keywords(&mut self, keywords: &[Keyword]) -> Result<bool, ParseError> {
        if self.stream.matches_keyword_sequence(keywords) {
            self.stream.skip(keywords.len())?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes `c` if it is the current token.
    fn eat_special(&mut self, c: char) -> Result<bool, ParseError> {
        if self.at_special(c) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// An error with a custom message pointing at `token`.
    fn error_at(&self, message: impl Into<String>, token: &Token) -> ParseError {
        ParseError::at_position(message, self.stream.source(), token.span.start)
    }

    /// "Unexpected ..." for the current token, without a list of expectations.
    fn unexpected_here(&self) -> ParseError {
        self.stream
            .error_here(format!("Unexpected {}", self.stream.current().kind))
    }

    /// Reports a rejected node construction at `token`.
    fn node_error(&self, error: &NodeError, token: &Token) -> ParseError {
        self.error_at(error.to_string(), token)
    }

    /// Parses `item` one or more times, separated by commas.
    fn comma_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<NodeList<T>, ParseError> {
        let mut list = NodeList::new();
        list.push(item(self)?);
        while self.eat_special(',')? {
            list.push(item(self)?);
        }
        Ok(list)
    }
}

/// The name carried by an identifier or keyword token.
fn token_identifier(token: &Token) -> Identifier {
    Identifier::new(token.text().unwrap_or_default())
}

/// Returns true for tokens that may start a column reference or function name.
fn is_name_start(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Identifier(_) => true,
        TokenKind::Keyword(kw) => kw.category() != KeywordCategory::Reserved,
        _ => false,
    }
}

/// Returns true for tokens accepted as `ColId`: identifiers, unreserved and
/// column name keywords.
fn is_col_id(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Identifier(_) => true,
        TokenKind::Keyword(kw) => matches!(
            kw.category(),
            KeywordCategory::Unreserved | KeywordCategory::ColumnName
        ),
        _ => false,
    }
}

/// Returns true for tokens that may start a type or function name:
/// identifiers, unreserved and type/function name keywords.
fn is_type_function_name(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Identifier(_) => true,
        TokenKind::Keyword(kw) => matches!(
            kw.category(),
            KeywordCategory::Unreserved | KeywordCategory::TypeFuncName
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_full_input() {
        let parser = Parser::new();
        let err = parser.parse_expression("a + b c").unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("end of input"));
        assert!(parser.parse_expression("a + b").is_ok());
    }

    #[test]
    fn test_parser_is_reusable() {
        let parser = Parser::with_config(ParserConfig::legacy());
        assert_eq!(parser.config().precedence, Precedence::Legacy);
        for sql in ["select 1", "select 2", "values (3)"] {
            assert!(parser.parse_statement(sql).is_ok());
        }
    }
}
