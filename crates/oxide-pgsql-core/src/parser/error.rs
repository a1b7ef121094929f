//! Parser error types.

use std::fmt;

use crate::lexer::{Span, Token, TokenKind};

/// A lexical or syntax error.
///
/// Carries the byte position of the offending input, the 1-based line
/// it is on and the remaining source text starting at that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// The line number of the error.
    pub line: usize,
    /// Source text from the error position to the end of input.
    pub fragment: String,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error without source context.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            line: 1,
            fragment: String::new(),
            expected: None,
            found: None,
        }
    }

    /// Creates an error pointing at `position` inside `source`.
    #[must_use]
    pub fn at_position(message: impl Into<String>, source: &str, position: usize) -> Self {
        Self::new(message, Span::at(position)).with_source(source)
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token, source: &str) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected {}, expecting {expected}", found.kind),
            span: found.span,
            line: 1,
            fragment: String::new(),
            expected: Some(expected),
            found: Some(found.kind.clone()),
        }
        .with_source(source)
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(source: &str) -> Self {
        Self {
            message: String::from("Unexpected end of input"),
            span: Span::at(source.len()),
            line: 1,
            fragment: String::new(),
            expected: None,
            found: Some(TokenKind::Eof),
        }
        .with_source(source)
    }

    /// Fills in line number and fragment from the source text.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        self.line = self.span.line(source);
        self.fragment = self.span.fragment(source).to_string();
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {} (line {}): {}",
            self.message, self.span.start, self.line, self.fragment
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = ParseError::at_position("Unexpected '$'", "select\n$ foo", 7);
        assert_eq!(err.line, 2);
        assert_eq!(err.fragment, "$ foo");
        assert_eq!(
            err.to_string(),
            "Unexpected '$' at position 7 (line 2): $ foo"
        );
    }

    #[test]
    fn test_unexpected_token() {
        let token = Token::new(TokenKind::Special(')'), Span::new(9, 10));
        let err = ParseError::unexpected("identifier", &token, "select 1 ) x");
        assert_eq!(err.expected.as_deref(), Some("identifier"));
        assert_eq!(err.found, Some(TokenKind::Special(')')));
        assert_eq!(
            err.message,
            "Unexpected special character ')', expecting identifier"
        );
        assert_eq!(
            err.to_string(),
            "Unexpected special character ')', expecting identifier at position 9 (line 1): ) x"
        );
    }
}
