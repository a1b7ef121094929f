#![allow(dead_code)]

use oxide_pgsql_core::ast::{SelectStatement, Statement};
use oxide_pgsql_core::{
    BuilderOptions, Expr, Parentheses, ParseError, Parser, ParserConfig, SqlBuilder,
};

pub fn parse(sql: &str) -> Statement {
    Parser::new()
        .parse_statement(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new()
        .parse_statement(sql)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_expr(sql: &str) -> Expr {
    Parser::new()
        .parse_expression(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_legacy_expr(sql: &str) -> Expr {
    Parser::with_config(ParserConfig::legacy())
        .parse_expression(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

/// Renders on a single line with the given parenthesization.
pub fn render(statement: &Statement, parentheses: Parentheses) -> String {
    let options = BuilderOptions {
        parentheses,
        ..BuilderOptions::compact()
    };
    SqlBuilder::with_options(options).build(statement)
}

pub fn render_expr(expr: &Expr, parentheses: Parentheses) -> String {
    let options = BuilderOptions {
        parentheses,
        ..BuilderOptions::compact()
    };
    SqlBuilder::with_options(options).build_expression(expr)
}

/// Checks that rendering and parsing again yields the same tree, both with
/// the default multi-line layout and on a single line.
pub fn round_trip(sql: &str) {
    let ast = parse(sql);
    for (name, options) in [
        ("default", BuilderOptions::default()),
        ("compact", BuilderOptions::compact()),
        (
            "narrow",
            BuilderOptions {
                wrap: Some(10),
                ..BuilderOptions::default()
            },
        ),
    ] {
        let rendered = SqlBuilder::with_options(options).build(&ast);
        let reparsed = Parser::new().parse_statement(&rendered).unwrap_or_else(|e| {
            panic!("Rendered SQL does not parse ({name}).\n  Input: {sql}\n  Output: {rendered}\n  Error: {e}")
        });
        assert_eq!(
            ast, reparsed,
            "Round-trip changed the tree ({name}).\n  Input:  {sql}\n  Output: {rendered}"
        );
    }
}

/// Checks that compat output parses to the same tree under both precedence
/// rules.
pub fn compat_round_trip(sql: &str) {
    let ast = parse(sql);
    let rendered = render(&ast, Parentheses::Compat);
    let legacy = Parser::with_config(ParserConfig::legacy())
        .parse_statement(&rendered)
        .unwrap_or_else(|e| panic!("Compat SQL does not parse with legacy rules: {rendered}\n{e}"));
    assert_eq!(ast, legacy, "Legacy parse differs for: {rendered}");
    assert_eq!(ast, parse(&rendered), "Current parse differs for: {rendered}");
}
