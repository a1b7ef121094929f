//! Rejected input and the context reported with it.

mod common;

use common::*;
use oxide_pgsql_core::{Parser, ParserConfig, TokenKind};

// ============================================================================
// Error context
// ============================================================================

#[test]
fn test_trailing_tokens() {
    let err = parse_err("select 1 2");
    assert_eq!(err.expected.as_deref(), Some("end of input"));
    assert_eq!(err.found, Some(TokenKind::Integer("2".into())));
    assert_eq!(err.span.start, 9);
    assert_eq!(err.fragment, "2");
    assert_eq!(
        err.to_string(),
        "Unexpected integer literal '2', expecting end of input at position 9 (line 1): 2"
    );
}

#[test]
fn test_unexpected_end_of_input() {
    for sql in ["select a from t where", "select (1", "insert into t", "update t set"] {
        let err = parse_err(sql);
        assert_eq!(err.found, Some(TokenKind::Eof), "{sql}: {err}");
        assert_eq!(err.fragment, "", "{sql}");
    }
}

#[test]
fn test_line_and_fragment() {
    let err = parse_err("select a,\n       b\nfrom t\nwhere 'abc");
    assert_eq!(err.message, "Unterminated string literal");
    assert_eq!(err.line, 4);
    assert_eq!(err.fragment, "'abc");
    assert_eq!(
        err.to_string(),
        format!("Unterminated string literal at position {} (line 4): 'abc", err.span.start)
    );
}

#[test]
fn test_lexer_errors_surface_from_parser() {
    assert_eq!(parse_err("select $1a").message, "Trailing junk after positional parameter");
    assert_eq!(parse_err("select /* x").message, "Unterminated /* comment");
    assert_eq!(parse_err("select \"\"").message, "Zero-length quoted identifier");
}

// ============================================================================
// Unsupported constructs
// ============================================================================

#[test]
fn test_unsupported_constructs() {
    for (sql, message) in [
        ("select a into b from t", "SELECT INTO clauses are not supported"),
        ("delete from t where current of c", "WHERE CURRENT OF clause is not supported"),
        ("update t set a = 1 where current of c", "WHERE CURRENT OF clause is not supported"),
        ("select treat(a as b)", "TREAT() function support is not implemented"),
    ] {
        let err = parse_err(sql);
        assert!(
            err.message.starts_with(message),
            "{sql}: expected '{message}', got '{}'",
            err.message
        );
    }
    assert!(parse_err("select * from xmltable('/x' passing a columns b int)")
        .message
        .starts_with("XMLTABLE is not supported"));
}

// ============================================================================
// Semantic checks done while parsing
// ============================================================================

#[test]
fn test_locking_values() {
    assert!(parse_err("values (1) for update")
        .message
        .starts_with("SELECT FOR UPDATE/SHARE cannot be applied to VALUES"));
}

#[test]
fn test_invalid_frames() {
    for (frame, message) in [
        ("rows unbounded following", "Frame start cannot be UNBOUNDED FOLLOWING"),
        (
            "rows between current row and unbounded preceding",
            "Frame end cannot be UNBOUNDED PRECEDING",
        ),
        (
            "rows between current row and 1 preceding",
            "Frame starting from current row cannot have preceding rows",
        ),
        (
            "rows 1 following",
            "Frame starting from following row cannot end with current row",
        ),
        (
            "rows between 1 following and current row",
            "Frame starting from following row cannot have preceding rows",
        ),
        (
            "rows between 1 following and 1 preceding",
            "Frame starting from following row cannot have preceding rows",
        ),
    ] {
        let sql = format!("select sum(a) over (order by b {frame}) from t");
        let err = parse_err(&sql);
        assert!(err.message.starts_with(message), "{sql}: {}", err.message);
    }
}

#[test]
fn test_function_argument_rules() {
    assert!(parse_err("select f(a => 1, 2)")
        .message
        .starts_with("Positional argument cannot follow named argument"));
    assert!(parse_err("select f(a => 1, a => 2)")
        .message
        .starts_with("Argument name a used more than once"));
    assert!(parse_err("select percentile_cont(distinct 0.5) within group (order by a) from t")
        .message
        .starts_with("Cannot use DISTINCT with WITHIN GROUP"));
}

#[test]
fn test_float_precision_bounds() {
    assert!(parse_err("select a::float(0)")
        .message
        .starts_with("Precision for type float must be at least"));
    assert!(parse_err("select a::float(54)")
        .message
        .starts_with("Precision for type float must be less than"));
}

#[test]
fn test_comparisons_do_not_associate() {
    assert!(Parser::new().parse_expression("a = b = c").is_err());
    assert!(Parser::new().parse_expression("a < b > c").is_err());
    // before 9.5 `=` was right-associative, `<` and `>` did not associate
    assert_eq!(parse_legacy_expr("a = b = c"), parse_expr("a = (b = c)"));
    assert!(Parser::with_config(ParserConfig::legacy())
        .parse_expression("a < b > c")
        .is_err());
}
