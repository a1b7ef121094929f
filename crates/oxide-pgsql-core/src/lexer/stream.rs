//! A cursor over the tokens produced by the lexer.

use std::fmt;

use super::{Keyword, Token, TokenKind};
use crate::parser::ParseError;

/// An immutable token sequence with a single read cursor.
///
/// The last token is always [`TokenKind::Eof`].
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    current: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over `tokens`, which must end with an EOF token.
    #[must_use]
    pub fn new(tokens: Vec<Token>, source: &'a str) -> Self {
        Self {
            tokens,
            source,
            current: 0,
        }
    }

    /// Returns the source the tokens were produced from.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Consumes the stream, returning the tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Moves the cursor back to the first token.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Returns the current token.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Returns the keyword of the current token, if any.
    #[must_use]
    pub fn keyword(&self) -> Option<Keyword> {
        self.current().as_keyword()
    }

    /// Returns true if the cursor is at end of input.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Looks at the token `n` positions after the current one.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` when looking past the end of input.
    pub fn look(&self, n: usize) -> Result<&Token, ParseError> {
        self.tokens
            .get(self.current + n)
            .ok_or_else(|| ParseError::unexpected_eof(self.source))
    }

    /// Like [`look`](Self::look), but returns the EOF token when past the end.
    #[must_use]
    pub fn peek(&self, n: usize) -> &Token {
        self.tokens
            .get(self.current + n)
            .unwrap_or_else(|| &self.tokens[self.tokens.len() - 1])
    }

    /// Returns the token at an absolute index, EOF when out of range.
    pub(crate) fn at(&self, index: usize) -> &Token {
        self.tokens
            .get(index)
            .unwrap_or_else(|| &self.tokens[self.tokens.len() - 1])
    }

    /// Returns the absolute index of the current token.
    pub(crate) const fn position(&self) -> usize {
        self.current
    }

    /// Advances the cursor and returns the token that was current.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` when advancing past end of input.
    pub fn advance(&mut self) -> Result<Token, ParseError> {
        if self.current + 1 >= self.tokens.len() {
            return Err(ParseError::unexpected_eof(self.source));
        }
        self.current += 1;
        Ok(self.tokens[self.current - 1].clone())
    }

    /// Moves the cursor `n` positions forward.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` when skipping past end of input.
    pub fn skip(&mut self, n: usize) -> Result<(), ParseError> {
        if self.current + n >= self.tokens.len() {
            return Err(ParseError::unexpected_eof(self.source));
        }
        self.current += n;
        Ok(())
    }

    /// Checks whether the current token is the given special character.
    #[must_use]
    pub fn matches_special(&self, c: char) -> bool {
        self.current().is_special(c)
    }

    /// Checks whether the current token is any of the given special characters.
    #[must_use]
    pub fn matches_any_special(&self, chars: &[char]) -> bool {
        self.current().is_any_special(chars)
    }

    /// Checks whether the current token is the given keyword.
    #[must_use]
    pub fn matches_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    /// Returns the current keyword if it is one of `keywords`.
    #[must_use]
    pub fn matches_any_keyword(&self, keywords: &[Keyword]) -> Option<Keyword> {
        self.keyword().filter(|kw| keywords.contains(kw))
    }

    /// Checks whether tokens starting from the current one are exactly `keywords`.
    #[must_use]
    pub fn matches_keyword_sequence(&self, keywords: &[Keyword]) -> bool {
        if self.current + keywords.len() >= self.tokens.len() {
            return false;
        }
        keywords
            .iter()
            .enumerate()
            .all(|(i, kw)| self.tokens[self.current + i].is_keyword(*kw))
    }

    /// Checks a sequence where each position accepts any of several keywords.
    #[must_use]
    pub fn matches_keyword_alternatives(&self, alternatives: &[&[Keyword]]) -> bool {
        if self.current + alternatives.len() >= self.tokens.len() {
            return false;
        }
        alternatives
            .iter()
            .enumerate()
            .all(|(i, set)| self.tokens[self.current + i].is_any_keyword(set))
    }

    /// Checks whether the current token satisfies `pred`.
    #[must_use]
    pub fn matches(&self, pred: impl FnOnce(&TokenKind) -> bool) -> bool {
        pred(&self.current().kind)
    }

    /// Consumes the given special character or fails.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the current token is something else.
    pub fn expect_special(&mut self, c: char) -> Result<Token, ParseError> {
        if self.matches_special(c) {
            self.advance()
        } else {
            Err(self.unexpected(format!("special character '{c}'")))
        }
    }

    /// Consumes one of the given keywords or fails, returning the keyword found.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the current token is not one of `keywords`.
    pub fn expect_keyword(&mut self, keywords: &[Keyword]) -> Result<Keyword, ParseError> {
        match self.matches_any_keyword(keywords) {
            Some(keyword) => {
                self.advance()?;
                Ok(keyword)
            }
            None => {
                let names: Vec<String> = keywords.iter().map(|kw| format!("'{kw}'")).collect();
                Err(self.unexpected(format!("keyword {}", names.join(" or "))))
            }
        }
    }

    /// Consumes a token satisfying `pred` or fails with `expected` in the message.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the current token does not satisfy `pred`.
    pub fn expect(
        &mut self,
        pred: impl FnOnce(&TokenKind) -> bool,
        expected: &str,
    ) -> Result<Token, ParseError> {
        if pred(&self.current().kind) {
            self.advance()
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Builds an "unexpected token" error at the current position.
    #[must_use]
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected(expected, self.current(), self.source)
    }

    /// Builds an error with a custom message at the current position.
    #[must_use]
    pub fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::at_position(message, self.source, self.current().span.start)
    }
}

impl fmt::Display for TokenStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn stream(sql: &str) -> TokenStream<'_> {
        Lexer::new(sql).tokenize().unwrap()
    }

    #[test]
    fn test_cursor_movement() {
        let mut s = stream("select a, b");
        assert!(s.matches_keyword(Keyword::Select));
        let previous = s.advance().unwrap();
        assert!(previous.is_keyword(Keyword::Select));
        assert!(s.matches(|k| matches!(k, TokenKind::Identifier(_))));
        assert!(s.look(1).unwrap().is_special(','));
        s.skip(3).unwrap();
        assert!(s.is_eof());
        assert!(s.advance().is_err());
        assert!(s.look(1).is_err());
        s.reset();
        assert_eq!(s.keyword(), Some(Keyword::Select));
    }

    #[test]
    fn test_keyword_sequences() {
        let s = stream("order by x");
        assert!(s.matches_keyword_sequence(&[Keyword::Order, Keyword::By]));
        assert!(!s.matches_keyword_sequence(&[Keyword::Order, Keyword::Select]));
        assert!(s.matches_keyword_alternatives(&[
            &[Keyword::Group, Keyword::Order],
            &[Keyword::By],
        ]));
        assert_eq!(
            s.matches_any_keyword(&[Keyword::Group, Keyword::Order]),
            Some(Keyword::Order)
        );
    }

    #[test]
    fn test_expect() {
        let mut s = stream("( foo");
        s.expect_special('(').unwrap();
        let err = s.expect_keyword(&[Keyword::Select, Keyword::Values]).unwrap_err();
        assert_eq!(
            err.expected.as_deref(),
            Some("keyword 'select' or 'values'")
        );
        assert_eq!(err.line, 1);
        assert_eq!(err.fragment, "foo");
        let token = s
            .expect(|k| matches!(k, TokenKind::Identifier(_)), "identifier")
            .unwrap();
        assert_eq!(token.text(), Some("foo"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            stream("a").to_string(),
            "identifier 'a' at position 0\nend of input at position 1"
        );
    }
}
