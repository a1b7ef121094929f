//! SQL Builder
//!
//! Generates SQL text from an AST. Output is lowercase, indented and wrapped
//! according to [`BuilderOptions`]; parentheses appear only where operator
//! precedence requires them.
//!
//! # Example
//!
//! ```rust
//! use oxide_pgsql_core::builder::{BuilderOptions, SqlBuilder};
//! use oxide_pgsql_core::Parser;
//!
//! let statement = Parser::new()
//!     .parse_statement("SELECT a FROM t WHERE (b = 1) AND c")
//!     .unwrap();
//! let sql = SqlBuilder::with_options(BuilderOptions::compact()).build(&statement);
//!
//! assert_eq!(sql, "select a from t where b = 1 and c");
//! ```

mod options;
pub mod precedence;
mod sql;

use std::fmt;

pub use options::{BuilderOptions, Parentheses};
pub use sql::SqlBuilder;

use crate::ast::{Expr, SelectStatement, Statement, TypeName};

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlBuilder::new().build(self))
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlBuilder::new().build_select(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlBuilder::new().build_expression(self))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SqlBuilder::new().build_type_name(self))
    }
}
