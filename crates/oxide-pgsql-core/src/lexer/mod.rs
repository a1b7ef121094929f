//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for the PostgreSQL dialect that
//! produces a [`TokenStream`].

mod keyword;
mod span;
mod stream;
mod token;
mod tokenizer;

pub use keyword::{Keyword, KeywordCategory};
pub use span::Span;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
pub use tokenizer::{Lexer, LexerOptions};
