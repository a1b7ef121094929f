//! # oxide-pgsql-core
//!
//! A parser and builder for the PostgreSQL dialect of SQL.
//!
//! This crate provides:
//! - A lexer following the server's tokenization rules, including dollar
//!   quoting, Unicode escapes and `standard_conforming_strings`
//! - A hand-written recursive descent parser for `SELECT`, `VALUES`,
//!   `INSERT`, `UPDATE`, `DELETE` and `MERGE`, with either the current or the
//!   pre-9.5 operator precedence
//! - An owned AST with read-only and mutating visitors
//! - A SQL builder that turns the AST back into text, adding only the
//!   parentheses precedence requires
//! - A parameter pass that rewrites `:name` placeholders to `$n`
//!
//! ## Parse, modify, build
//!
//! ```rust
//! use oxide_pgsql_core::ast::Expr;
//! use oxide_pgsql_core::{Parser, SqlBuilder, Statement};
//!
//! let mut statement = Parser::new()
//!     .parse_statement("select id from users where active")
//!     .unwrap();
//! if let Statement::Select(select) = &mut statement {
//!     let oxide_pgsql_core::ast::SelectBody::Select(simple) = &mut select.body else {
//!         unreachable!()
//!     };
//!     simple.where_clause.and(Expr::binary(
//!         Expr::column("email"),
//!         "=",
//!         Expr::named_param("email"),
//!     ));
//! }
//!
//! let sql = SqlBuilder::new().build(&statement);
//! assert_eq!(sql, "select id\nfrom users\nwhere active\n    and email = :email");
//! ```
//!
//! ## Parameters
//!
//! Named placeholders are numbered in order of appearance:
//!
//! ```rust
//! use oxide_pgsql_core::params::ParameterWalker;
//! use oxide_pgsql_core::Parser;
//!
//! let mut statement = Parser::new().parse_statement("select :a, :b, :a").unwrap();
//! let map = ParameterWalker::new().run(&mut statement).unwrap();
//!
//! assert_eq!(statement.to_string(), "select $1, $2, $1");
//! assert_eq!(map.names.len(), 2);
//! ```

pub mod ast;
pub mod builder;
pub mod lexer;
pub mod params;
pub mod parser;
pub mod visit;

use thiserror::Error;

pub use ast::{Expr, NodeError, SelectStatement, Statement};
pub use builder::{BuilderOptions, Parentheses, SqlBuilder};
pub use lexer::{Lexer, LexerOptions, Token, TokenKind};
pub use params::{ParameterError, ParameterMap, ParameterWalker};
pub use parser::{ParseError, Parser, ParserConfig, Precedence};

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

pub type Result<T> = std::result::Result<T, Error>;
