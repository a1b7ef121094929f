//! Parsing statement fragments, splicing them into a tree and building the
//! result.

mod common;

use std::ops::ControlFlow;

use common::*;
use oxide_pgsql_core::ast::{
    FromElement, QualifiedName, SelectBody, SimpleSelect, Statement, TypeName,
};
use oxide_pgsql_core::visit::{walk_from_element_mut, Visitor, VisitorMut};
use oxide_pgsql_core::{BuilderOptions, Expr, Parentheses, Parser, SqlBuilder};

fn simple_select(statement: &mut Statement) -> &mut SimpleSelect {
    let Statement::Select(select) = statement else {
        panic!("Expected SELECT, got {statement:?}");
    };
    let SelectBody::Select(simple) = &mut select.body else {
        panic!("Expected a simple SELECT");
    };
    simple
}

fn compact(statement: &Statement) -> String {
    SqlBuilder::with_options(BuilderOptions::compact()).build(statement)
}

// ============================================================================
// Fragment entry points
// ============================================================================

#[test]
fn test_splice_fragments_into_select() {
    let parser = Parser::new();
    let mut statement = parse("select id from users where active");
    {
        let select = simple_select(&mut statement);
        select
            .targets
            .extend(parser.parse_target_list("email as e, count(*)").unwrap());
        select
            .where_clause
            .and(parser.parse_expression("a = 1 or b").unwrap());
        select.from.push(FromElement::relation(
            parser.parse_qualified_name("app.teams").unwrap(),
        ));
    }
    if let Statement::Select(select) = &mut statement {
        select.order_by = parser.parse_order_by_list("id desc, e").unwrap();
        select.limit = Some(parser.parse_expression("10").unwrap());
    }

    assert_eq!(
        compact(&statement),
        "select id, email as e, count(*) from users, app.teams \
         where active and (a = 1 or b) order by id desc, e limit 10"
    );
}

#[test]
fn test_fragment_lists() {
    let parser = Parser::new();
    assert_eq!(parser.parse_expression_list("1, a + 2, f(x)").unwrap().len(), 3);
    assert_eq!(parser.parse_from_list("a, b join c using (x)").unwrap().len(), 2);
    assert_eq!(parser.parse_row_list("(1, 2), (3, 4)").unwrap().len(), 2);
    assert_eq!(parser.parse_set_clause_list("a = 1, (b, c) = (2, 3)").unwrap().len(), 2);
    assert_eq!(parser.parse_window_list("w as (), v as (w order by a)").unwrap().len(), 2);
    assert_eq!(parser.parse_locking_list("for update of a for share").unwrap().len(), 2);
    assert!(!parser.parse_group_by_clause("rollup (a), b").unwrap().is_empty());
    assert_eq!(
        parser
            .parse_with_clause("with a as (select 1), b as (select 2)")
            .unwrap()
            .ctes
            .len(),
        2
    );
    assert!(parser.parse_on_conflict("on conflict (id) do nothing").is_ok());
}

#[test]
fn test_fragments_must_consume_all_input() {
    let parser = Parser::new();
    assert!(parser.parse_expression("a b c").is_err());
    assert!(parser.parse_target_list("a, b from t").is_err());
    assert!(parser.parse_type_name("int int").is_err());
    assert!(parser.parse_qualified_name("a.b.c.d").is_err());
}

#[test]
fn test_type_names() {
    let parser = Parser::new();
    let varchar = parser.parse_type_name("varchar(10)[]").unwrap();
    assert_eq!(varchar.to_string(), "pg_catalog.varchar(10)[]");
    assert_eq!(parser.parse_type_name("integer").unwrap(), TypeName::catalog("int4"));
    // only the standard spellings map to catalog types
    assert_eq!(parser.parse_type_name("int4").unwrap().to_string(), "int4");
    assert_eq!(
        parser.parse_type_name("public.custom").unwrap().to_string(),
        "public.custom"
    );
}

#[test]
fn test_select_statement_entry_point() {
    let parser = Parser::new();
    let query = parser.parse_select_statement("values (1) union select 2").unwrap();
    assert!(matches!(query.body, SelectBody::SetOp(_)));
    assert!(parser.parse_select_statement("delete from t").is_err());
}

// ============================================================================
// Building trees by hand
// ============================================================================

#[test]
fn test_built_expression_gets_parentheses() {
    let sum = Expr::binary(Expr::column("a"), "+", Expr::column("b"));
    let product = Expr::binary(sum, "*", Expr::numeric("2"));
    assert_eq!(render_expr(&product, Parentheses::Current), "(a + b) * 2");

    let negated = Expr::prefix("-", Expr::numeric("1"));
    let cast = negated.typecast(TypeName::catalog("int4"));
    assert_eq!(cast.to_string(), "(-1)::pg_catalog.int4");
}

#[test]
fn test_parameters_render_as_written() {
    let comparison = Expr::binary(Expr::column("id"), "=", Expr::named_param("id"));
    assert_eq!(comparison.to_string(), "id = :id");
    let positional = Expr::binary(Expr::column("id"), "=", Expr::positional_param(3));
    assert_eq!(positional.to_string(), "id = $3");
}

// ============================================================================
// Visitors
// ============================================================================

struct RelationNames(Vec<String>);

impl Visitor for RelationNames {
    type Break = ();

    fn visit_qualified_name(&mut self, name: &QualifiedName) -> ControlFlow<()> {
        self.0.push(name.to_string());
        ControlFlow::Continue(())
    }
}

#[test]
fn test_visitor_reaches_nested_queries() {
    let statement = parse(
        "with x as (select * from a) \
         select * from x join (select * from b) s on true \
         where exists (select 1 from c where c.id in (select id from d))",
    );
    let mut names = RelationNames(Vec::new());
    let _ = names.visit_statement(&statement);
    assert_eq!(names.0, ["a", "x", "b", "c", "d"]);
}

struct SetSchema(&'static str);

impl VisitorMut for SetSchema {
    type Break = ();

    fn visit_from_element(&mut self, element: &mut FromElement) -> ControlFlow<()> {
        if let FromElement::Relation(relation) = element {
            if relation.name.schema.is_none() {
                relation.name.schema = Some(self.0.into());
            }
        }
        walk_from_element_mut(self, element)
    }
}

#[test]
fn test_mutating_visitor() {
    let mut statement = parse("select * from a join public.b on a.id = b.id, (select * from c) s");
    let _ = SetSchema("app").visit_statement(&mut statement);
    assert_eq!(
        compact(&statement),
        "select * from app.a join public.b on a.id = b.id, (select * from app.c) as s"
    );
}

struct FindParameter;

impl Visitor for FindParameter {
    type Break = String;

    fn visit_expr(&mut self, expr: &Expr) -> ControlFlow<String> {
        if expr.is_parameter() {
            return ControlFlow::Break(expr.to_string());
        }
        oxide_pgsql_core::visit::walk_expr(self, expr)
    }
}

#[test]
fn test_visitor_stops_on_break() {
    let statement = parse("select a from t where b = (select c from u where d = :first) and e = :second");
    assert_eq!(
        FindParameter.visit_statement(&statement),
        ControlFlow::Break(":first".to_string())
    );
    assert_eq!(
        FindParameter.visit_statement(&parse("select 1")),
        ControlFlow::Continue(())
    );
}
