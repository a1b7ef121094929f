mod common;

use common::*;
use oxide_pgsql_core::ast::TypeName;
use oxide_pgsql_core::{Error, ParameterWalker, Parentheses, Parser, SqlBuilder};

fn normalize(sql: &str) -> Result<(String, Vec<Option<String>>), Error> {
    let mut statement = Parser::new().parse_statement(sql)?;
    let map = ParameterWalker::new().run(&mut statement)?;
    let builder = SqlBuilder::new();
    let types = map
        .types
        .values()
        .map(|type_name| type_name.as_ref().map(|t| builder.build_type_name(t)))
        .collect();
    Ok((render(&statement, Parentheses::Current), types))
}

// ============================================================================
// Data modification
// ============================================================================

#[test]
fn test_insert_with_named_parameters() {
    let (sql, types) = normalize(
        "insert into users (email, created) values (:email, :created::timestamp with time zone) \
         on conflict (email) do update set created = :created returning id",
    )
    .unwrap();
    assert_eq!(
        sql,
        "insert into users (email, created) values ($1, $2::pg_catalog.timestamptz) \
         on conflict (email) do update set created = $2 returning id"
    );
    assert_eq!(types, [None, Some("pg_catalog.timestamptz".to_string())]);
}

#[test]
fn test_merge_with_named_parameters() {
    let (sql, types) = normalize(
        "merge into stock s using (values (:item::int, :qty::int)) as v (item, qty) on s.item = v.item \
         when matched then update set qty = s.qty + v.qty \
         when not matched then insert values (v.item, v.qty)",
    )
    .unwrap();
    assert!(sql.contains("(values ($1::pg_catalog.int4, $2::pg_catalog.int4)) as v (item, qty)"));
    assert_eq!(types.len(), 2);
}

#[test]
fn test_parameters_inside_functions_and_json() {
    let (sql, types) =
        normalize("select json_build_object('a', :a), coalesce(:b::text, 'x'), array[:a]").unwrap();
    assert_eq!(
        sql,
        "select json_build_object('a', $1), coalesce($2::\"text\", 'x'), array[$1]"
    );
    assert_eq!(types, [None, Some("\"text\"".to_string())]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_errors_convert_into_crate_error() {
    assert!(matches!(normalize("select :a, $2"), Err(Error::Parameter(_))));
    assert!(matches!(normalize("select from where"), Err(Error::Parse(_))));
}

#[test]
fn test_positional_types_are_kept() {
    let mut statement = parse("select $1::int, $3::bool");
    let map = ParameterWalker::new().run(&mut statement).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.types[&0], Some(TypeName::catalog("int4")));
    assert_eq!(map.types[&2], Some(TypeName::catalog("bool")));
    assert!(!map.types.contains_key(&1));
}
