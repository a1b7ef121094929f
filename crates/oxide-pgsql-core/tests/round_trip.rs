//! Building SQL from a parsed tree and parsing it again must give back the
//! same tree, whatever the layout options.

mod common;

use common::*;
use oxide_pgsql_core::{BuilderOptions, Parentheses, Parser, ParserConfig, SqlBuilder};

// ============================================================================
// SELECT
// ============================================================================

#[test]
fn test_simple_selects() {
    for sql in [
        "select 1",
        "select * from t",
        "select t.*, a as b, c d from s.t",
        "select distinct a, b from t",
        "select distinct on (a, b) a, b, c from t order by a, b, c desc",
        "select a from t where b > 1 and c < 2 or d is null",
        "select count(*), b from t group by b having count(*) > 1",
        "select a from t order by a desc nulls last, b using <",
        "select a from t limit 10 offset 20",
        "select a from t offset 5 rows fetch first 3 rows only",
        "select a from t order by a fetch first 3 rows with ties",
        "select a from t limit all",
        "select",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_set_operations() {
    for sql in [
        "select 1 union select 2",
        "select 1 union all select 2 intersect select 3",
        "(select 1 union select 2) intersect select 3",
        "select 1 except (select 2 except select 3)",
        "(select a from t order by a limit 1) union all (select b from u order by b limit 1)",
        "values (1, 'a'), (2, 'b') order by 1",
        "select 1 union values (2)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_common_table_expressions() {
    for sql in [
        "with a as (select 1) select * from a",
        "with recursive r (n) as (select 1 union all select n + 1 from r where n < 10) select n from r",
        "with a as materialized (select 1), b as not materialized (select 2) select * from a, b",
        "with recursive t (id, parent) as (select id, parent from nodes) \
         search depth first by id set ord \
         cycle id set is_cycle using path \
         select * from t",
        "with d as (delete from t where a returning *) insert into log select * from d",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_from_clause() {
    for sql in [
        "select * from a, b, c",
        "select * from a join b on a.id = b.a_id left join c using (id)",
        "select * from a natural full join b cross join c",
        "select * from a join b using (id) as j",
        "select * from a join (b join c on b.x = c.x) on a.y = b.y",
        "select * from (select 1) as s (x), lateral (select x) l",
        "select * from only parent as p (a, b)",
        "select * from child *",
        "select * from generate_series(1, 10) with ordinality as g (n, i)",
        "select * from rows from (generate_series(1, 2), unnest(array[1, 2]) as (x int)) as r",
        "select * from f() as x (a int, b text)",
        "select * from t tablesample bernoulli (10) repeatable (42)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_window_functions() {
    for sql in [
        "select row_number() over () from t",
        "select sum(a) over (partition by b order by c) from t",
        "select sum(a) over w, avg(a) over (w rows between unbounded preceding and current row) \
         from t window w as (partition by b)",
        "select sum(a) over (order by b range between 1 preceding and 1 following exclude ties) from t",
        "select sum(a) over (order by b groups 2 preceding exclude current row) from t",
        "select count(*) filter (where a > 0) over (partition by b) from t",
        "select percentile_cont(0.5) within group (order by a) from t",
        "select string_agg(distinct a, ',' order by a) from t",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_grouping() {
    for sql in [
        "select a, b, sum(c) from t group by rollup (a, b)",
        "select a, b from t group by cube (a, b), grouping sets ((a), (b), ())",
        "select a from t group by distinct a, ()",
        "select grouping(a, b) from t group by a, b",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_locking() {
    for sql in [
        "select * from t for update",
        "select * from t for no key update of t nowait",
        "select * from t, u for share of t skip locked for key share of u",
    ] {
        round_trip(sql);
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_operators() {
    for sql in [
        "select a + b * c, (a + b) * c, -a ^ 2, (-a) ^ 2",
        "select a - (b - c), a - b - c, a / (b * c)",
        "select not a = b, not (a and b), a or not b",
        "select a is null, a is not true, a isnull, a notnull, a is not distinct from b",
        "select a between 1 and 2, a not between symmetric b and c",
        "select a in (1, 2), a not in (select b from u)",
        "select a like 'x%' escape '!', a not ilike b, a similar to 'x'",
        "select a operator(pg_catalog.+) b, @ a, a <-> b",
        "select (a = b) = c, a = (b = c), (a < b) is true",
        "select a is document, a is normalized, a is not nfkd normalized",
        "select a is json, a is json object with unique keys, a is not json array",
        "select (a, b) overlaps (c, d)",
        "select a at time zone 'utc', a at local, a collate \"C\"",
        "select 1 < all (array[1, 2]), a = any (select b from u), a > some (b)",
        "select exists (select 1), array(select 1), (select 1)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_constants_and_casts() {
    for sql in [
        "select 'it''s', e'a\\nb', b'101', x'ff', 1.5e10, -1, $1, :name",
        "select '1'::int, cast(a as numeric(10, 2)), int '1', interval '1' day to second",
        "select a::varchar(10)[], b::double precision, c::timestamp(3) with time zone",
        "select 'x'::bit varying(5), 'y'::character varying, 'z'::char(3)",
        "select (-1)::int, (a + 1)::text, a::text::int",
        "select true, false, null",
        "select u&'d\\0061ta', $$dollar 'quoted'$$",
        "select interval '1 day', interval(3) '1 second', time '12:00'",
        "select a::setof int, b::public.my_type, c::interval minute",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_indirection() {
    for sql in [
        "select a[1], a[1:2], a[:2], a[1:], (a).b, (a).*, (f(x)).y[1]",
        "select (array[1, 2])[1], ('{1}'::int[])[1], row(1, 2), (1, 2)",
        "select array[[1, 2], [3, 4]], array[]::int[]",
        "select t.a.b, s.t.*",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_special_functions() {
    for sql in [
        "select case when a then 1 when b then 2 else 3 end, case a when 1 then 'x' end",
        "select coalesce(a, b), greatest(a, 1), least(b, 2), nullif(a, b)",
        "select extract(year from a), extract('epoch' from b)",
        "select position('a' in b), overlay(a placing 'x' from 2 for 3)",
        "select substring(a from 2 for 3), substring(a similar 'x' escape '#'), substring(a, 1)",
        "select trim(both 'x' from a), trim(leading from a), trim(a)",
        "select normalize(a), normalize(a, nfkc), collation for (a)",
        "select current_date, current_timestamp(3), localtime, current_user, session_user",
        "select current_catalog, current_schema, user, system_user",
        "select merge_action()",
        "select f(a => 1, b := 2), f(variadic array[1, 2]), f(all a)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_xml_functions() {
    for sql in [
        "select xmlelement(name foo, xmlattributes(a as bar, b), 'content')",
        "select xmlforest(a, b as c), xmlconcat(a, b), xmlpi(name php, 'echo')",
        "select xmlparse(document a preserve whitespace), xmlserialize(content a as text indent)",
        "select xmlroot(a, version '1.0', standalone yes), xmlexists('//x' passing by ref a)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_json_functions() {
    for sql in [
        "select json_object('a' : 1, 'b' value 2 absent on null with unique keys returning jsonb)",
        "select json_array(1, 2 null on null), json_array(select a from t), json_array()",
        "select json_object(), json('{}' with unique keys), json_scalar(1), json_serialize(a returning text)",
        "select json_arrayagg(a order by b absent on null), json_objectagg(k : v) filter (where v) from t",
        "select json_exists(a, '$.x' passing 1 as y error on error)",
        "select json_value(a, '$.x' returning int default 0 on empty null on error)",
        "select json_query(a, '$.x' with conditional wrapper keep quotes empty array on empty)",
        "select a ->> 'x', a -> 0, a #> '{x}', a @> b",
    ] {
        round_trip(sql);
    }
}

// ============================================================================
// Data modification
// ============================================================================

#[test]
fn test_insert() {
    for sql in [
        "insert into t values (1, default), (2, 3)",
        "insert into t (a, b) select a, b from u",
        "insert into s.t as x (a) overriding system value values (1) returning *",
        "insert into t default values",
        "insert into t (a) values (1) on conflict do nothing",
        "insert into t (a, b) values (1, 2) on conflict (a) where a > 0 \
         do update set b = excluded.b where t.b <> excluded.b returning a, b as c",
        "insert into t values (1) on conflict on constraint t_pkey do nothing",
        "insert into t (a[1], b.c) values (1, 2)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_update() {
    for sql in [
        "update t set a = 1",
        "update only t as x set a = default, b = b + 1 where c returning *",
        "update t set (a, b) = (1, 2), (c) = row(3), (d, e) = (select 1, 2)",
        "update t set a = u.a from u where t.id = u.id",
        "update t set a[1] = 2, b.c = 3",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_delete() {
    for sql in [
        "delete from t",
        "delete from only t as x using u, v where x.id = u.id returning x.id",
        "with old as (select id from t) delete from t where id in (select id from old)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_merge() {
    for sql in [
        "merge into t using s on t.id = s.id \
         when matched and s.deleted then delete \
         when matched then update set v = s.v \
         when not matched then insert (id, v) values (s.id, s.v)",
        "merge into t as x using (select 1 as id) s on x.id = s.id \
         when not matched by source then do nothing \
         when not matched by target then insert default values",
        "merge into t using s on true when not matched then insert values (s.a) returning merge_action(), t.*",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_quantified_comparison_operands() {
    for sql in [
        "select 1 where (a like b) = all (array['x'])",
        "select (a in (1)) = any (array[1])",
        "select (a between 1 and 2) < some (select b from t)",
        "select (a is null) = any (b), (a = b) <> all (c)",
        "select a || b = any (c), a = any (b) = c, a like any (b) = c",
    ] {
        round_trip(sql);
        compat_round_trip(sql);
    }
}

#[test]
fn test_chained_collate_and_time_zone() {
    for sql in [
        "select (a collate \"C\") collate \"POSIX\", a collate \"C\" collate \"POSIX\"",
        "select (a at time zone 'utc') at time zone 'x', a at time zone 'utc' at time zone 'x'",
        "select (a at local) at local, a at local at time zone 'x'",
        "select a collate \"C\" at time zone b collate \"C\" at local",
    ] {
        round_trip(sql);
    }
}

#[test]
fn test_logical_operand_starting_with_keyword() {
    for sql in [
        "select a and array[1]",
        "select (a and array[1])",
        "select a or array[b] as z, c between array[1] and array[2]",
        "select a like array['x'] from t",
    ] {
        round_trip(sql);
    }
}

// ============================================================================
// Nesting every operator inside every other
// ============================================================================

/// Operands placed into the `X`/`Y` slots of [`OUTER`].
const INNER: &[&str] = &[
    "a or b",
    "a and b",
    "not a",
    "a is null",
    "a is json",
    "a is distinct from b",
    "a = b",
    "a < b",
    "a <= b",
    "a like b",
    "a like any (b)",
    "a between b and e",
    "a in (b)",
    "a || b",
    "a + b",
    "a * b",
    "a ^ b",
    "a at time zone b",
    "a at local",
    "a collate \"C\"",
    "- a",
    "a::int",
    "a = any (b)",
    "a < all (array[b])",
    "a <> some (select b)",
];

/// Expressions with one or two operand slots.
const OUTER: &[&str] = &[
    "X or Y",
    "X and Y",
    "not X",
    "X is null",
    "X is json",
    "X is distinct from Y",
    "X = Y",
    "X < Y",
    "X <= Y",
    "X like Y",
    "X like any (c)",
    "X between c and d",
    "c between X and d",
    "c between d and X",
    "X in (c)",
    "X || Y",
    "X + Y",
    "X - Y",
    "X * Y",
    "X ^ Y",
    "X at time zone Y",
    "X at local",
    "X collate \"C\"",
    "- X",
    "X::int",
    "X = any (c)",
    "X < all (array[c])",
];

/// Every `OUTER` form with each slot filled by each parenthesized `INNER`
/// operand, the other slot holding a plain column.
fn nested_expressions() -> Vec<String> {
    let mut expressions = Vec::new();
    for outer in OUTER {
        for (slot, other, leaf) in [("X", "Y", "d"), ("Y", "X", "c")] {
            if !outer.contains(slot) {
                continue;
            }
            for inner in INNER {
                expressions.push(
                    outer
                        .replace(other, leaf)
                        .replace(slot, &format!("({inner})")),
                );
            }
        }
    }
    expressions
}

fn builder(parentheses: Parentheses) -> SqlBuilder {
    SqlBuilder::with_options(BuilderOptions {
        parentheses,
        ..BuilderOptions::compact()
    })
}

#[test]
fn test_nested_operators_keep_their_meaning() {
    let current = Parser::new();
    let legacy = Parser::with_config(ParserConfig::legacy());

    for sql in nested_expressions() {
        let ast = current
            .parse_expression(&sql)
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"));
        let rendered = builder(Parentheses::Current).build_expression(&ast);
        assert_eq!(
            current.parse_expression(&rendered).ok().as_ref(),
            Some(&ast),
            "{sql} => {rendered}"
        );

        // the same inside a target list, where keywords may be aliases
        round_trip(&format!("select {sql}"));

        for (name, parser) in [("current", &current), ("legacy", &legacy)] {
            let ast = parser
                .parse_expression(&sql)
                .unwrap_or_else(|e| panic!("Failed to parse ({name}): {sql}\nError: {e}"));
            let rendered = builder(Parentheses::Compat).build_expression(&ast);
            for reparser in [&current, &legacy] {
                assert_eq!(
                    reparser.parse_expression(&rendered).ok().as_ref(),
                    Some(&ast),
                    "{sql} ({name}) => compat {rendered}"
                );
            }
        }
    }
}

// ============================================================================
// Compat parentheses
// ============================================================================

#[test]
fn test_compat_output_is_stable_under_both_precedences() {
    for sql in [
        "select (a = b) = c",
        "select a < b is null",
        "select false = true is null",
        "select (a like b) = c",
        "select j ->> 'space' <= (j ->> 'node')",
        "select not a = b",
    ] {
        compat_round_trip(sql);
    }
}

// ============================================================================
// Parenthesized input
// ============================================================================

#[test]
fn test_parenthesis_classification() {
    use oxide_pgsql_core::ast::SelectBody;
    use oxide_pgsql_core::Expr;

    assert!(matches!(parse_expr("(1, 2)"), Expr::Row(_)));
    assert!(matches!(parse_expr("(select 1)"), Expr::Subselect(_)));
    assert!(matches!(parse_expr("(1 + 2)"), Expr::Operator(_)));

    // the ORDER BY belongs to the outer parenthesized query
    let Expr::Subselect(subselect) = parse_expr("((select 1) order by 1)") else {
        panic!("expected a subquery");
    };
    assert_eq!(subselect.query.order_by.len(), 1);
    assert!(matches!(subselect.query.body, SelectBody::Select(_)));

    assert!(matches!(parse_expr("((select 1), 2)"), Expr::Row(_)));
    assert!(matches!(parse_expr("((1 + 2) * 3)"), Expr::Operator(_)));
    round_trip("select ((select 1) order by 1), ((select 1), 2), ((1 + 2) * 3)");
}

#[test]
fn test_frame_end_may_be_unbounded_following() {
    round_trip("select sum(a) over (order by b rows between current row and unbounded following) from t");
}

#[test]
fn test_dollar_quoted_content_survives() {
    let select = parse_select("select $tag$it's $$ here$tag$");
    let rendered = render(&oxide_pgsql_core::Statement::Select(select), Parentheses::Current);
    assert_eq!(rendered, "select $_1$it's $$ here$_1$");
    round_trip("select $tag$it's $$ here$tag$, $$back\\slash$$, 'plain'");
}
