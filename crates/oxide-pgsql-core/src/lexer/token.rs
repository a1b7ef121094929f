//! Token types.

use std::fmt;

use super::{Keyword, KeywordCategory, Span};

/// The kind of a lexeme, along with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Character string: `'foo'`, `e'foo'`, `$$foo$$`, `u&'foo'`.
    String(String),
    /// Binary string: `b'0101'`.
    BinaryString(String),
    /// Hexadecimal string: `x'ff'`.
    HexString(String),
    /// National character string: `n'foo'`.
    NationalString(String),
    /// Integer literal, kept as written.
    Integer(String),
    /// Any other numeric literal, kept as written.
    Float(String),

    // Parameters
    /// Positional parameter: `$1`.
    PositionalParam(u32),
    /// Named parameter: `:name`.
    NamedParam(String),

    // Names
    /// Identifier, either folded to lowercase or taken from double quotes.
    Identifier(String),
    /// A keyword from the keyword table.
    Keyword(Keyword),

    // Operators and punctuation
    /// One of `, ( ) [ ] . ; : + - * / % ^ < > =`.
    Special(char),
    /// `::`
    Typecast,
    /// `:=`
    ColonEquals,
    /// `=>`
    EqualsGreater,
    /// `<=`, `>=`, `!=` or `<>`.
    Inequality(String),
    /// Any other operator built from operator characters.
    Operator(String),

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true for string and numeric literals.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::String(_)
                | Self::BinaryString(_)
                | Self::HexString(_)
                | Self::NationalString(_)
                | Self::Integer(_)
                | Self::Float(_)
        )
    }

    /// Returns true for any of the string literal kinds.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(
            self,
            Self::String(_) | Self::BinaryString(_) | Self::HexString(_) | Self::NationalString(_)
        )
    }

    /// Returns true for positional and named parameters.
    #[must_use]
    pub const fn is_parameter(&self) -> bool {
        matches!(self, Self::PositionalParam(_) | Self::NamedParam(_))
    }

    /// Returns true for operator-like tokens other than special characters.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_) | Self::Inequality(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(v) => write!(f, "string literal '{v}'"),
            Self::BinaryString(v) => write!(f, "binary string literal '{v}'"),
            Self::HexString(v) => write!(f, "hex string literal '{v}'"),
            Self::NationalString(v) => write!(f, "national string literal '{v}'"),
            Self::Integer(v) => write!(f, "integer literal '{v}'"),
            Self::Float(v) => write!(f, "numeric literal '{v}'"),
            Self::PositionalParam(n) => write!(f, "positional parameter '${n}'"),
            Self::NamedParam(name) => write!(f, "named parameter ':{name}'"),
            Self::Identifier(v) => write!(f, "identifier '{v}'"),
            Self::Keyword(kw) => write!(f, "keyword '{kw}'"),
            Self::Special(c) => write!(f, "special character '{c}'"),
            Self::Typecast => f.write_str("typecast operator '::'"),
            Self::ColonEquals => f.write_str("':='"),
            Self::EqualsGreater => f.write_str("'=>'"),
            Self::Inequality(op) => write!(f, "comparison operator '{op}'"),
            Self::Operator(op) => write!(f, "operator '{op}'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the keyword category, `None` for non-keywords.
    #[must_use]
    pub const fn keyword_category(&self) -> Option<KeywordCategory> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(kw.category()),
            _ => None,
        }
    }

    /// Returns true if this is the given special character.
    #[must_use]
    pub fn is_special(&self, c: char) -> bool {
        self.kind == TokenKind::Special(c)
    }

    /// Returns true if this is one of the given special characters.
    #[must_use]
    pub fn is_any_special(&self, chars: &[char]) -> bool {
        matches!(self.kind, TokenKind::Special(c) if chars.contains(&c))
    }

    /// Returns true if this is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.as_keyword() == Some(keyword)
    }

    /// Returns true if this is any of the given keywords.
    #[must_use]
    pub fn is_any_keyword(&self, keywords: &[Keyword]) -> bool {
        self.as_keyword().is_some_and(|kw| keywords.contains(&kw))
    }

    /// Returns the textual value of identifier, string and operator tokens.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::String(v)
            | TokenKind::BinaryString(v)
            | TokenKind::HexString(v)
            | TokenKind::NationalString(v)
            | TokenKind::Integer(v)
            | TokenKind::Float(v)
            | TokenKind::NamedParam(v)
            | TokenKind::Identifier(v)
            | TokenKind::Inequality(v)
            | TokenKind::Operator(v) => Some(v),
            TokenKind::Keyword(kw) => Some(kw.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.kind, self.span.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_predicates() {
        let token = Token::new(TokenKind::Keyword(Keyword::Select), Span::new(0, 6));
        assert!(token.is_keyword(Keyword::Select));
        assert!(token.is_any_keyword(&[Keyword::Values, Keyword::Select]));
        assert_eq!(token.keyword_category(), Some(KeywordCategory::Reserved));
        assert!(!token.is_special('('));

        let paren = Token::new(TokenKind::Special('('), Span::new(7, 8));
        assert!(paren.is_special('('));
        assert!(paren.is_any_special(&[')', '(']));
        assert_eq!(paren.as_keyword(), None);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(3, 6));
        assert_eq!(token.to_string(), "identifier 'foo' at position 3");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }

    #[test]
    fn test_token_kind_classes() {
        assert!(TokenKind::Integer("1".into()).is_literal());
        assert!(TokenKind::HexString("ff".into()).is_string());
        assert!(TokenKind::PositionalParam(1).is_parameter());
        assert!(TokenKind::Inequality("<>".into()).is_operator());
        assert!(!TokenKind::Special('+').is_operator());
    }
}
