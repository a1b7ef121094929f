//! Parameter normalization.
//!
//! Statements may use either `$n` or `:name` placeholders, never both.
//! [`ParameterWalker`] numbers every placeholder, rewrites named ones to
//! positional ones, and records the type of each parameter that appears as
//! the direct argument of a typecast, so values can later be bound by
//! position whatever style the SQL was written in.
//!
//! ```rust
//! use oxide_pgsql_core::params::ParameterWalker;
//! use oxide_pgsql_core::Parser;
//!
//! let mut statement = Parser::new()
//!     .parse_statement("select * from t where a = :a and b = :b::int and c = :a")
//!     .unwrap();
//! let map = ParameterWalker::new().run(&mut statement).unwrap();
//!
//! assert_eq!(map.names["a"], 0);
//! assert_eq!(map.names["b"], 1);
//! assert!(map.types[&1].is_some());
//! ```

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use thiserror::Error;
use tracing::debug;

use crate::ast::{Expr, Parameter, Statement, TypeName, Typecast};
use crate::visit::{walk_expr_mut, VisitorMut};

/// A statement mixes both placeholder styles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error(
        "Mixing named and positional parameters is not allowed; \
         found named parameter :{0} after positional ones"
    )]
    NamedAfterPositional(String),
    #[error(
        "Mixing named and positional parameters is not allowed; \
         found positional parameter ${0} after named ones"
    )]
    PositionalAfterNamed(u32),
}

/// What the parameter pass found out about a statement's placeholders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterMap {
    /// Zero-based parameter index to the type it was cast to, if any.
    pub types: BTreeMap<usize, Option<TypeName>>,
    /// Name of each named parameter to its zero-based index.
    pub names: BTreeMap<String, usize>,
}

impl ParameterMap {
    /// Number of distinct parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Numbers placeholders and replaces `:name` with `$n`.
#[derive(Debug, Default)]
pub struct ParameterWalker {
    keep_named: bool,
    map: ParameterMap,
}

impl ParameterWalker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaves named placeholders in the tree; they are still numbered.
    #[must_use]
    pub const fn keep_named(mut self, keep_named: bool) -> Self {
        self.keep_named = keep_named;
        self
    }

    /// Runs the pass over `statement`.
    ///
    /// # Errors
    ///
    /// Returns a `ParameterError` on the first placeholder whose style
    /// differs from the ones before it; the tree may be partially rewritten
    /// by then.
    pub fn run(mut self, statement: &mut Statement) -> Result<ParameterMap, ParameterError> {
        if let ControlFlow::Break(error) = self.visit_statement(statement) {
            return Err(error);
        }
        debug!(
            parameters = self.map.types.len(),
            named = self.map.names.len(),
            "normalized parameters"
        );
        Ok(self.map)
    }

    fn parameter(
        &mut self,
        expr: &mut Expr,
        type_name: Option<&TypeName>,
    ) -> ControlFlow<ParameterError> {
        let Expr::Parameter(parameter) = expr else {
            return ControlFlow::Continue(());
        };
        let (index, named) = match parameter {
            Parameter::Named(name) => {
                if self.map.names.is_empty() && !self.map.types.is_empty() {
                    return ControlFlow::Break(ParameterError::NamedAfterPositional(name.clone()));
                }
                let next = self.map.names.len();
                (*self.map.names.entry(name.clone()).or_insert(next), true)
            }
            Parameter::Positional(position) => {
                if !self.map.names.is_empty() {
                    return ControlFlow::Break(ParameterError::PositionalAfterNamed(*position));
                }
                let position = usize::try_from(*position).unwrap_or(usize::MAX);
                (position.saturating_sub(1), false)
            }
        };

        // the first cast seen for a parameter wins
        let slot = self.map.types.entry(index).or_insert(None);
        if slot.is_none() {
            *slot = type_name.cloned();
        }

        if named && !self.keep_named {
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
            *expr = Expr::positional_param(position);
        }
        ControlFlow::Continue(())
    }
}

impl VisitorMut for ParameterWalker {
    type Break = ParameterError;

    fn visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<ParameterError> {
        match expr {
            Expr::Typecast(typecast) if typecast.argument.is_parameter() => {
                let Typecast {
                    argument,
                    type_name,
                } = &mut **typecast;
                self.parameter(argument, Some(type_name))
            }
            Expr::Parameter(_) => self.parameter(expr, None),
            _ => walk_expr_mut(self, expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuilderOptions, SqlBuilder};
    use crate::Parser;

    fn normalize(sql: &str, keep_named: bool) -> (String, ParameterMap) {
        let mut statement = Parser::new().parse_statement(sql).unwrap();
        let map = ParameterWalker::new()
            .keep_named(keep_named)
            .run(&mut statement)
            .unwrap();
        let sql = SqlBuilder::with_options(BuilderOptions::compact()).build(&statement);
        (sql, map)
    }

    fn error(sql: &str) -> ParameterError {
        let mut statement = Parser::new().parse_statement(sql).unwrap();
        ParameterWalker::new().run(&mut statement).unwrap_err()
    }

    #[test]
    fn test_named_parameters_are_numbered_in_order() {
        let (sql, map) = normalize("select :a, :b, :a", false);
        assert_eq!(sql, "select $1, $2, $1");
        assert_eq!(map.names, BTreeMap::from([("a".to_string(), 0), ("b".to_string(), 1)]));
        assert_eq!(map.types, BTreeMap::from([(0, None), (1, None)]));
    }

    #[test]
    fn test_keep_named_leaves_tree_alone() {
        let (sql, map) = normalize("select :a, :b, :a", true);
        assert_eq!(sql, "select :a, :b, :a");
        assert_eq!(map.names.len(), 2);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_first_typecast_wins() {
        let (sql, map) = normalize("select :a, :a::int, :a::text", false);
        assert_eq!(sql, "select $1, $1::pg_catalog.int4, $1::\"text\"");
        assert_eq!(map.types[&0], Some(TypeName::catalog("int4")));
    }

    #[test]
    fn test_positional_parameters() {
        let (sql, map) = normalize("select $2::int, $1 from t where a = $2", false);
        assert_eq!(sql, "select $2::pg_catalog.int4, $1 from t where a = $2");
        assert!(map.names.is_empty());
        assert_eq!(map.types[&1], Some(TypeName::catalog("int4")));
        assert_eq!(map.types[&0], None);
    }

    #[test]
    fn test_only_direct_typecast_arguments_are_typed() {
        let (_, map) = normalize("select (:a + 1)::int", false);
        assert_eq!(map.types[&0], None);
    }

    #[test]
    fn test_parameters_in_nested_queries() {
        let (sql, map) = normalize(
            "with x as (select :id as id) update t set v = :v from x where t.id = x.id and t.k = :id",
            false,
        );
        assert_eq!(
            sql,
            "with x as (select $1 as id) update t set v = $2 from x where t.id = x.id and t.k = $1"
        );
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_mixed_styles_are_rejected() {
        assert_eq!(
            error("select $1, :a"),
            ParameterError::NamedAfterPositional("a".into())
        );
        let err = error("select :a, $1");
        assert_eq!(err, ParameterError::PositionalAfterNamed(1));
        assert_eq!(
            err.to_string(),
            "Mixing named and positional parameters is not allowed; \
             found positional parameter $1 after named ones"
        );
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let mut statement = Parser::new()
            .parse_statement("select :a::int, :b")
            .unwrap();
        let first = ParameterWalker::new().run(&mut statement).unwrap();
        let rewritten = statement.clone();
        let second = ParameterWalker::new().run(&mut statement).unwrap();

        assert_eq!(statement, rewritten);
        assert_eq!(first.types, second.types);
        assert!(second.names.is_empty());
    }
}
