//! Tree traversal.
//!
//! [`Visitor`] walks a tree by shared reference, [`VisitorMut`] by mutable
//! reference. Every trait method defaults to the matching `walk_*` function,
//! which visits the children of the node in the order they appear in SQL
//! text. An implementation overrides the methods for the nodes it cares
//! about and calls the `walk_*` function from the override to keep
//! descending.
//!
//! A method returning [`ControlFlow::Break`] stops the whole traversal; the
//! value is handed back to the caller of the outermost `visit_*` call.
//!
//! ```
//! use std::ops::ControlFlow;
//! use oxide_pgsql_core::ast::QualifiedName;
//! use oxide_pgsql_core::visit::Visitor;
//! use oxide_pgsql_core::Parser;
//!
//! struct Names(Vec<String>);
//!
//! impl Visitor for Names {
//!     type Break = ();
//!
//!     fn visit_qualified_name(&mut self, name: &QualifiedName) -> ControlFlow<()> {
//!         self.0.push(name.to_string());
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let statement = Parser::new().parse_statement("select * from a, b.c").unwrap();
//! let mut names = Names(Vec::new());
//! let _ = names.visit_statement(&statement);
//! assert_eq!(names.0, ["a", "b.c"]);
//! ```

mod visit_mut;

use std::ops::ControlFlow;

pub use visit_mut::*;

use crate::ast::{
    Alias, AliasColumns, CommonTableExpression, ConflictAction, ConflictTarget, DeleteStatement,
    Distinct, Expr, FromElement, FunctionCall, GroupingElement, InList, IndexTarget,
    IndirectionItem, InsertStatement, JoinCondition, JsonBehaviour, JsonExpr, JsonFormattedValue,
    JsonQueryCommon, JsonReturning, LockingElement, MergeStatement, MergeWhenAction,
    MergeWhenClause, OnConflictClause, OrderByElement, QualifiedName, RowExpr, SelectBody,
    SelectStatement, SetClause, SetTargetElement, SimpleSelect, Statement, TargetElement,
    TypeName, TypeNameKind, UpdateStatement, WindowDefinition, WithClause, XmlExpr,
};

/// Read-only traversal of a statement tree.
pub trait Visitor {
    /// Value carried out of the traversal when it stops early.
    type Break;

    fn visit_statement(&mut self, statement: &Statement) -> ControlFlow<Self::Break> {
        walk_statement(self, statement)
    }

    /// Visits `SELECT`, `VALUES` and set operations, including nested ones.
    fn visit_select(&mut self, select: &SelectStatement) -> ControlFlow<Self::Break> {
        walk_select(self, select)
    }

    fn visit_simple_select(&mut self, select: &SimpleSelect) -> ControlFlow<Self::Break> {
        walk_simple_select(self, select)
    }

    fn visit_insert(&mut self, insert: &InsertStatement) -> ControlFlow<Self::Break> {
        walk_insert(self, insert)
    }

    fn visit_update(&mut self, update: &UpdateStatement) -> ControlFlow<Self::Break> {
        walk_update(self, update)
    }

    fn visit_delete(&mut self, delete: &DeleteStatement) -> ControlFlow<Self::Break> {
        walk_delete(self, delete)
    }

    fn visit_merge(&mut self, merge: &MergeStatement) -> ControlFlow<Self::Break> {
        walk_merge(self, merge)
    }

    fn visit_merge_when_clause(&mut self, clause: &MergeWhenClause) -> ControlFlow<Self::Break> {
        walk_merge_when_clause(self, clause)
    }

    fn visit_with_clause(&mut self, with: &WithClause) -> ControlFlow<Self::Break> {
        walk_with_clause(self, with)
    }

    fn visit_common_table_expression(
        &mut self,
        cte: &CommonTableExpression,
    ) -> ControlFlow<Self::Break> {
        walk_common_table_expression(self, cte)
    }

    fn visit_target_element(&mut self, target: &TargetElement) -> ControlFlow<Self::Break> {
        walk_target_element(self, target)
    }

    fn visit_from_element(&mut self, element: &FromElement) -> ControlFlow<Self::Break> {
        walk_from_element(self, element)
    }

    fn visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        walk_expr(self, expr)
    }

    /// Visits row constructors, both in expressions and as `VALUES` rows.
    fn visit_row(&mut self, row: &RowExpr) -> ControlFlow<Self::Break> {
        walk_row(self, row)
    }

    fn visit_function_call(&mut self, function: &FunctionCall) -> ControlFlow<Self::Break> {
        walk_function_call(self, function)
    }

    fn visit_window_definition(&mut self, window: &WindowDefinition) -> ControlFlow<Self::Break> {
        walk_window_definition(self, window)
    }

    fn visit_order_by_element(&mut self, element: &OrderByElement) -> ControlFlow<Self::Break> {
        walk_order_by_element(self, element)
    }

    fn visit_set_clause(&mut self, clause: &SetClause) -> ControlFlow<Self::Break> {
        walk_set_clause(self, clause)
    }

    fn visit_set_target_element(&mut self, target: &SetTargetElement) -> ControlFlow<Self::Break> {
        walk_set_target_element(self, target)
    }

    fn visit_grouping_element(&mut self, element: &GroupingElement) -> ControlFlow<Self::Break> {
        walk_grouping_element(self, element)
    }

    fn visit_locking_element(&mut self, element: &LockingElement) -> ControlFlow<Self::Break> {
        walk_locking_element(self, element)
    }

    fn visit_on_conflict(&mut self, clause: &OnConflictClause) -> ControlFlow<Self::Break> {
        walk_on_conflict(self, clause)
    }

    fn visit_json(&mut self, json: &JsonExpr) -> ControlFlow<Self::Break> {
        walk_json(self, json)
    }

    fn visit_xml(&mut self, xml: &XmlExpr) -> ControlFlow<Self::Break> {
        walk_xml(self, xml)
    }

    fn visit_type_name(&mut self, type_name: &TypeName) -> ControlFlow<Self::Break> {
        walk_type_name(self, type_name)
    }

    /// Visits names of relations, functions, types, collations and
    /// operator classes. Leaf.
    fn visit_qualified_name(&mut self, _name: &QualifiedName) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(
    visitor: &mut V,
    statement: &Statement,
) -> ControlFlow<V::Break> {
    match statement {
        Statement::Select(select) => visitor.visit_select(select),
        Statement::Insert(insert) => visitor.visit_insert(insert),
        Statement::Update(update) => visitor.visit_update(update),
        Statement::Delete(delete) => visitor.visit_delete(delete),
        Statement::Merge(merge) => visitor.visit_merge(merge),
    }
}

pub fn walk_select<V: Visitor + ?Sized>(
    visitor: &mut V,
    select: &SelectStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &select.with {
        visitor.visit_with_clause(with)?;
    }
    match &select.body {
        SelectBody::Select(simple) => visitor.visit_simple_select(simple)?,
        SelectBody::SetOp(set_op) => {
            visitor.visit_select(&set_op.left)?;
            visitor.visit_select(&set_op.right)?;
        }
        SelectBody::Values(rows) => {
            for row in rows.iter() {
                visitor.visit_row(row)?;
            }
        }
    }
    for element in select.order_by.iter() {
        visitor.visit_order_by_element(element)?;
    }
    if let Some(limit) = &select.limit {
        visitor.visit_expr(limit)?;
    }
    if let Some(offset) = &select.offset {
        visitor.visit_expr(offset)?;
    }
    for element in select.locking.iter() {
        visitor.visit_locking_element(element)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_simple_select<V: Visitor + ?Sized>(
    visitor: &mut V,
    select: &SimpleSelect,
) -> ControlFlow<V::Break> {
    if let Some(Distinct::On(expressions)) = &select.distinct {
        walk_expressions(visitor, expressions.iter())?;
    }
    for target in select.targets.iter() {
        visitor.visit_target_element(target)?;
    }
    for element in select.from.iter() {
        visitor.visit_from_element(element)?;
    }
    if let Some(condition) = &select.where_clause.condition {
        visitor.visit_expr(condition)?;
    }
    for element in select.group_by.items.iter() {
        visitor.visit_grouping_element(element)?;
    }
    if let Some(condition) = &select.having.condition {
        visitor.visit_expr(condition)?;
    }
    for window in select.window.iter() {
        visitor.visit_window_definition(window)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_insert<V: Visitor + ?Sized>(
    visitor: &mut V,
    insert: &InsertStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &insert.with {
        visitor.visit_with_clause(with)?;
    }
    visitor.visit_qualified_name(&insert.target.relation)?;
    for column in insert.columns.iter() {
        visitor.visit_set_target_element(column)?;
    }
    if let Some(values) = &insert.values {
        visitor.visit_select(values)?;
    }
    if let Some(on_conflict) = &insert.on_conflict {
        visitor.visit_on_conflict(on_conflict)?;
    }
    walk_targets(visitor, insert.returning.iter())
}

pub fn walk_update<V: Visitor + ?Sized>(
    visitor: &mut V,
    update: &UpdateStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &update.with {
        visitor.visit_with_clause(with)?;
    }
    visitor.visit_qualified_name(&update.target.relation)?;
    for clause in update.set.iter() {
        visitor.visit_set_clause(clause)?;
    }
    for element in update.from.iter() {
        visitor.visit_from_element(element)?;
    }
    if let Some(condition) = &update.where_clause.condition {
        visitor.visit_expr(condition)?;
    }
    walk_targets(visitor, update.returning.iter())
}

pub fn walk_delete<V: Visitor + ?Sized>(
    visitor: &mut V,
    delete: &DeleteStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &delete.with {
        visitor.visit_with_clause(with)?;
    }
    visitor.visit_qualified_name(&delete.target.relation)?;
    for element in delete.using.iter() {
        visitor.visit_from_element(element)?;
    }
    if let Some(condition) = &delete.where_clause.condition {
        visitor.visit_expr(condition)?;
    }
    walk_targets(visitor, delete.returning.iter())
}

pub fn walk_merge<V: Visitor + ?Sized>(
    visitor: &mut V,
    merge: &MergeStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &merge.with {
        visitor.visit_with_clause(with)?;
    }
    visitor.visit_qualified_name(&merge.target.relation)?;
    visitor.visit_from_element(&merge.using)?;
    visitor.visit_expr(&merge.on)?;
    for clause in merge.when.iter() {
        visitor.visit_merge_when_clause(clause)?;
    }
    walk_targets(visitor, merge.returning.iter())
}

pub fn walk_merge_when_clause<V: Visitor + ?Sized>(
    visitor: &mut V,
    clause: &MergeWhenClause,
) -> ControlFlow<V::Break> {
    if let Some(condition) = &clause.condition {
        visitor.visit_expr(condition)?;
    }
    match clause.action() {
        Some(MergeWhenAction::Update(set)) => {
            for clause in set.iter() {
                visitor.visit_set_clause(clause)?;
            }
        }
        Some(MergeWhenAction::Insert(insert)) => {
            for column in insert.columns.iter() {
                visitor.visit_set_target_element(column)?;
            }
            if let Some(values) = &insert.values {
                walk_expressions(visitor, values.iter())?;
            }
        }
        Some(MergeWhenAction::Delete) | None => {}
    }
    ControlFlow::Continue(())
}

pub fn walk_with_clause<V: Visitor + ?Sized>(
    visitor: &mut V,
    with: &WithClause,
) -> ControlFlow<V::Break> {
    for cte in with.ctes.iter() {
        visitor.visit_common_table_expression(cte)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_common_table_expression<V: Visitor + ?Sized>(
    visitor: &mut V,
    cte: &CommonTableExpression,
) -> ControlFlow<V::Break> {
    visitor.visit_statement(&cte.statement)?;
    if let Some(cycle) = &cte.cycle {
        walk_expressions(visitor, cycle.mark_value.iter().chain(cycle.mark_default.iter()))?;
    }
    ControlFlow::Continue(())
}

pub fn walk_target_element<V: Visitor + ?Sized>(
    visitor: &mut V,
    target: &TargetElement,
) -> ControlFlow<V::Break> {
    visitor.visit_expr(&target.expression)
}

pub fn walk_from_element<V: Visitor + ?Sized>(
    visitor: &mut V,
    element: &FromElement,
) -> ControlFlow<V::Break> {
    match element {
        FromElement::Relation(relation) => {
            visitor.visit_qualified_name(&relation.name)?;
            walk_alias(visitor, relation.alias.as_ref())?;
        }
        FromElement::Function(function) => {
            visitor.visit_expr(&function.function)?;
            walk_alias(visitor, function.alias.as_ref())?;
        }
        FromElement::RowsFrom(rows_from) => {
            for element in rows_from.functions.iter() {
                visitor.visit_expr(&element.function)?;
                for column in element.column_definitions.iter() {
                    visitor.visit_type_name(&column.type_name)?;
                }
            }
            walk_alias(visitor, rows_from.alias.as_ref())?;
        }
        FromElement::Subselect(subselect) => {
            visitor.visit_select(&subselect.query)?;
            walk_alias(visitor, subselect.alias.as_ref())?;
        }
        FromElement::Join(join) => {
            visitor.visit_from_element(&join.left)?;
            visitor.visit_from_element(&join.right)?;
            if let Some(JoinCondition::On(condition)) = &join.condition {
                visitor.visit_expr(condition)?;
            }
        }
        FromElement::TableSample(sample) => {
            visitor.visit_qualified_name(&sample.relation.name)?;
            walk_alias(visitor, sample.relation.alias.as_ref())?;
            visitor.visit_qualified_name(&sample.method)?;
            walk_expressions(visitor, sample.arguments.iter())?;
            if let Some(repeatable) = &sample.repeatable {
                visitor.visit_expr(repeatable)?;
            }
        }
    }
    ControlFlow::Continue(())
}

fn walk_alias<V: Visitor + ?Sized>(
    visitor: &mut V,
    alias: Option<&Alias>,
) -> ControlFlow<V::Break> {
    if let Some(Alias {
        columns: Some(AliasColumns::Definitions(definitions)),
        ..
    }) = alias
    {
        for column in definitions.iter() {
            visitor.visit_type_name(&column.type_name)?;
        }
    }
    ControlFlow::Continue(())
}

#[allow(clippy::too_many_lines)]
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) -> ControlFlow<V::Break> {
    match expr {
        Expr::Constant(_)
        | Expr::Parameter(_)
        | Expr::ColumnRef(_)
        | Expr::SqlValueFunction(_)
        | Expr::MergeAction
        | Expr::SetToDefault => {}
        Expr::Indirection(indirection) => {
            visitor.visit_expr(&indirection.base)?;
            walk_indirection(visitor, indirection.items.iter())?;
        }
        Expr::Row(row) => visitor.visit_row(row)?,
        Expr::Array(array) => walk_expressions(visitor, array.items.iter())?,
        Expr::Subselect(subselect) => visitor.visit_select(&subselect.query)?,
        Expr::ArrayComparison(comparison) => visitor.visit_expr(&comparison.array)?,
        Expr::Function(function) => visitor.visit_function_call(function)?,
        Expr::SystemFunction(function) => walk_expressions(visitor, function.arguments.iter())?,
        Expr::Typecast(typecast) => {
            visitor.visit_expr(&typecast.argument)?;
            visitor.visit_type_name(&typecast.type_name)?;
        }
        Expr::ConstantTypecast(typecast) => visitor.visit_type_name(&typecast.type_name)?,
        Expr::Operator(operator) => {
            walk_expressions(visitor, operator.left.iter().chain(operator.right.iter()))?;
        }
        Expr::Logical(logical) => walk_expressions(visitor, logical.items.iter())?,
        Expr::Not(argument) | Expr::CollationFor(argument) | Expr::AtLocal(argument) => {
            visitor.visit_expr(argument)?;
        }
        Expr::Between(between) => {
            visitor.visit_expr(&between.argument)?;
            visitor.visit_expr(&between.left)?;
            visitor.visit_expr(&between.right)?;
        }
        Expr::In(in_expr) => {
            visitor.visit_expr(&in_expr.left)?;
            match &in_expr.right {
                InList::Values(values) => walk_expressions(visitor, values.iter())?,
                InList::Subselect(select) => visitor.visit_select(select)?,
            }
        }
        Expr::Pattern(pattern) => {
            visitor.visit_expr(&pattern.argument)?;
            visitor.visit_expr(&pattern.pattern)?;
            if let Some(escape) = &pattern.escape {
                visitor.visit_expr(escape)?;
            }
        }
        Expr::Is(is) => visitor.visit_expr(&is.argument)?,
        Expr::IsDistinctFrom(is) => {
            visitor.visit_expr(&is.left)?;
            visitor.visit_expr(&is.right)?;
        }
        Expr::IsOf(is) => {
            visitor.visit_expr(&is.left)?;
            for type_name in is.right.iter() {
                visitor.visit_type_name(type_name)?;
            }
        }
        Expr::IsJson(is) => visitor.visit_expr(&is.argument)?,
        Expr::Overlaps(overlaps) => {
            visitor.visit_row(&overlaps.left)?;
            visitor.visit_row(&overlaps.right)?;
        }
        Expr::Case(case) => {
            if let Some(argument) = &case.argument {
                visitor.visit_expr(argument)?;
            }
            for when in case.when.iter() {
                visitor.visit_expr(&when.when)?;
                visitor.visit_expr(&when.then)?;
            }
            if let Some(else_clause) = &case.else_clause {
                visitor.visit_expr(else_clause)?;
            }
        }
        Expr::Collate(collate) => {
            visitor.visit_expr(&collate.argument)?;
            visitor.visit_qualified_name(&collate.collation)?;
        }
        Expr::AtTimeZone(at) => {
            visitor.visit_expr(&at.argument)?;
            visitor.visit_expr(&at.zone)?;
        }
        Expr::Extract(extract) => visitor.visit_expr(&extract.source)?,
        Expr::Normalize(normalize) => visitor.visit_expr(&normalize.argument)?,
        Expr::NullIf(nullif) => {
            visitor.visit_expr(&nullif.first)?;
            visitor.visit_expr(&nullif.second)?;
        }
        Expr::Overlay(overlay) => {
            visitor.visit_expr(&overlay.string)?;
            visitor.visit_expr(&overlay.new_substring)?;
            visitor.visit_expr(&overlay.start)?;
            if let Some(count) = &overlay.count {
                visitor.visit_expr(count)?;
            }
        }
        Expr::Position(position) => {
            visitor.visit_expr(&position.substring)?;
            visitor.visit_expr(&position.string)?;
        }
        Expr::SubstringFrom(substring) => {
            visitor.visit_expr(&substring.string)?;
            walk_expressions(visitor, substring.from.iter().chain(substring.count.iter()))?;
        }
        Expr::SubstringSimilar(substring) => {
            visitor.visit_expr(&substring.string)?;
            visitor.visit_expr(&substring.pattern)?;
            visitor.visit_expr(&substring.escape)?;
        }
        Expr::Trim(trim) => walk_expressions(visitor, trim.arguments.iter())?,
        Expr::Grouping(arguments) => walk_expressions(visitor, arguments.iter())?,
        Expr::Xml(xml) => visitor.visit_xml(xml)?,
        Expr::Json(json) => visitor.visit_json(json)?,
    }
    ControlFlow::Continue(())
}

pub fn walk_row<V: Visitor + ?Sized>(visitor: &mut V, row: &RowExpr) -> ControlFlow<V::Break> {
    walk_expressions(visitor, row.items.iter())
}

pub fn walk_function_call<V: Visitor + ?Sized>(
    visitor: &mut V,
    function: &FunctionCall,
) -> ControlFlow<V::Break> {
    visitor.visit_qualified_name(&function.name)?;
    walk_expressions(visitor, function.arguments.values())?;
    for element in function.order_by.iter() {
        visitor.visit_order_by_element(element)?;
    }
    if let Some(filter) = &function.filter {
        visitor.visit_expr(filter)?;
    }
    if let Some(over) = &function.over {
        visitor.visit_window_definition(over)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_window_definition<V: Visitor + ?Sized>(
    visitor: &mut V,
    window: &WindowDefinition,
) -> ControlFlow<V::Break> {
    walk_expressions(visitor, window.partition.iter())?;
    for element in window.order_by.iter() {
        visitor.visit_order_by_element(element)?;
    }
    if let Some(frame) = &window.frame {
        walk_expressions(visitor, frame.bound_values())?;
    }
    ControlFlow::Continue(())
}

pub fn walk_order_by_element<V: Visitor + ?Sized>(
    visitor: &mut V,
    element: &OrderByElement,
) -> ControlFlow<V::Break> {
    visitor.visit_expr(&element.expression)
}

pub fn walk_set_clause<V: Visitor + ?Sized>(
    visitor: &mut V,
    clause: &SetClause,
) -> ControlFlow<V::Break> {
    match clause {
        SetClause::Single { column, value } => {
            visitor.visit_set_target_element(column)?;
            visitor.visit_expr(value)
        }
        SetClause::Multiple { columns, value } => {
            for column in columns.iter() {
                visitor.visit_set_target_element(column)?;
            }
            visitor.visit_expr(value)
        }
    }
}

pub fn walk_set_target_element<V: Visitor + ?Sized>(
    visitor: &mut V,
    target: &SetTargetElement,
) -> ControlFlow<V::Break> {
    walk_indirection(visitor, target.indirection.iter())
}

pub fn walk_grouping_element<V: Visitor + ?Sized>(
    visitor: &mut V,
    element: &GroupingElement,
) -> ControlFlow<V::Break> {
    match element {
        GroupingElement::Expression(expr) => visitor.visit_expr(expr),
        GroupingElement::Empty => ControlFlow::Continue(()),
        GroupingElement::Cube(expressions) | GroupingElement::Rollup(expressions) => {
            walk_expressions(visitor, expressions.iter())
        }
        GroupingElement::Sets(elements) => {
            for element in elements.iter() {
                visitor.visit_grouping_element(element)?;
            }
            ControlFlow::Continue(())
        }
    }
}

pub fn walk_locking_element<V: Visitor + ?Sized>(
    visitor: &mut V,
    element: &LockingElement,
) -> ControlFlow<V::Break> {
    for relation in element.relations.iter() {
        visitor.visit_qualified_name(relation)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_on_conflict<V: Visitor + ?Sized>(
    visitor: &mut V,
    clause: &OnConflictClause,
) -> ControlFlow<V::Break> {
    if let Some(ConflictTarget::Index(parameters)) = &clause.target {
        for element in parameters.elements.iter() {
            if let IndexTarget::Expression(expr) = &element.target {
                visitor.visit_expr(expr)?;
            }
            for name in element.collation.iter().chain(element.opclass.iter()) {
                visitor.visit_qualified_name(name)?;
            }
        }
        if let Some(condition) = &parameters.where_clause.condition {
            visitor.visit_expr(condition)?;
        }
    }
    if let ConflictAction::Update { set, where_clause } = &clause.action {
        for clause in set.iter() {
            visitor.visit_set_clause(clause)?;
        }
        if let Some(condition) = &where_clause.condition {
            visitor.visit_expr(condition)?;
        }
    }
    ControlFlow::Continue(())
}

pub fn walk_json<V: Visitor + ?Sized>(visitor: &mut V, json: &JsonExpr) -> ControlFlow<V::Break> {
    match json {
        JsonExpr::ArrayAgg(agg) => {
            walk_json_value(visitor, &agg.value)?;
            for element in agg.order_by.iter() {
                visitor.visit_order_by_element(element)?;
            }
            walk_json_returning(visitor, agg.returning.as_ref())?;
            if let Some(filter) = &agg.filter {
                visitor.visit_expr(filter)?;
            }
            if let Some(over) = &agg.over {
                visitor.visit_window_definition(over)?;
            }
        }
        JsonExpr::ObjectAgg(agg) => {
            visitor.visit_expr(&agg.key_value.key)?;
            walk_json_value(visitor, &agg.key_value.value)?;
            walk_json_returning(visitor, agg.returning.as_ref())?;
            if let Some(filter) = &agg.filter {
                visitor.visit_expr(filter)?;
            }
            if let Some(over) = &agg.over {
                visitor.visit_window_definition(over)?;
            }
        }
        JsonExpr::Array(array) => {
            for value in array.values.iter() {
                walk_json_value(visitor, value)?;
            }
            walk_json_returning(visitor, array.returning.as_ref())?;
        }
        JsonExpr::ArraySubselect(array) => {
            visitor.visit_select(&array.query)?;
            walk_json_returning(visitor, array.returning.as_ref())?;
        }
        JsonExpr::Object(object) => {
            for argument in object.arguments.iter() {
                visitor.visit_expr(&argument.key)?;
                walk_json_value(visitor, &argument.value)?;
            }
            walk_json_returning(visitor, object.returning.as_ref())?;
        }
        JsonExpr::Constructor(constructor) => walk_json_value(visitor, &constructor.value)?,
        JsonExpr::Scalar(expr) => visitor.visit_expr(expr)?,
        JsonExpr::Serialize(serialize) => {
            walk_json_value(visitor, &serialize.value)?;
            walk_json_returning(visitor, serialize.returning.as_ref())?;
        }
        JsonExpr::Exists(exists) => {
            walk_json_common(visitor, &exists.common)?;
            walk_json_behaviour(visitor, exists.on_error.as_ref())?;
        }
        JsonExpr::Value(value) => {
            walk_json_common(visitor, &value.common)?;
            walk_json_returning(visitor, value.returning.as_ref())?;
            walk_json_behaviour(visitor, value.on_empty.as_ref())?;
            walk_json_behaviour(visitor, value.on_error.as_ref())?;
        }
        JsonExpr::Query(query) => {
            walk_json_common(visitor, &query.common)?;
            walk_json_returning(visitor, query.returning.as_ref())?;
            walk_json_behaviour(visitor, query.on_empty.as_ref())?;
            walk_json_behaviour(visitor, query.on_error.as_ref())?;
        }
    }
    ControlFlow::Continue(())
}

fn walk_json_value<V: Visitor + ?Sized>(
    visitor: &mut V,
    value: &JsonFormattedValue,
) -> ControlFlow<V::Break> {
    visitor.visit_expr(&value.expression)
}

fn walk_json_returning<V: Visitor + ?Sized>(
    visitor: &mut V,
    returning: Option<&JsonReturning>,
) -> ControlFlow<V::Break> {
    match returning {
        Some(returning) => visitor.visit_type_name(&returning.type_name),
        None => ControlFlow::Continue(()),
    }
}

fn walk_json_behaviour<V: Visitor + ?Sized>(
    visitor: &mut V,
    behaviour: Option<&JsonBehaviour>,
) -> ControlFlow<V::Break> {
    match behaviour {
        Some(JsonBehaviour::Default(expr)) => visitor.visit_expr(expr),
        _ => ControlFlow::Continue(()),
    }
}

fn walk_json_common<V: Visitor + ?Sized>(
    visitor: &mut V,
    common: &JsonQueryCommon,
) -> ControlFlow<V::Break> {
    walk_json_value(visitor, &common.context)?;
    visitor.visit_expr(&common.path)?;
    for argument in common.passing.iter() {
        walk_json_value(visitor, &argument.value)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_xml<V: Visitor + ?Sized>(visitor: &mut V, xml: &XmlExpr) -> ControlFlow<V::Break> {
    match xml {
        XmlExpr::Element(element) => {
            walk_targets(visitor, element.attributes.iter())?;
            walk_expressions(visitor, element.content.iter())
        }
        XmlExpr::Exists(exists) => {
            visitor.visit_expr(&exists.xpath)?;
            visitor.visit_expr(&exists.xml)
        }
        XmlExpr::Forest(targets) => walk_targets(visitor, targets.iter()),
        XmlExpr::Parse(parse) => visitor.visit_expr(&parse.argument),
        XmlExpr::Pi(pi) => walk_expressions(visitor, pi.content.iter()),
        XmlExpr::Root(root) => {
            visitor.visit_expr(&root.xml)?;
            walk_expressions(visitor, root.version.iter())
        }
        XmlExpr::Serialize(serialize) => {
            visitor.visit_expr(&serialize.argument)?;
            visitor.visit_type_name(&serialize.type_name)
        }
    }
}

pub fn walk_type_name<V: Visitor + ?Sized>(
    visitor: &mut V,
    type_name: &TypeName,
) -> ControlFlow<V::Break> {
    match &type_name.kind {
        TypeNameKind::Named(name) => visitor.visit_qualified_name(name),
        TypeNameKind::Interval(_) => ControlFlow::Continue(()),
    }
}

fn walk_expressions<'a, V: Visitor + ?Sized>(
    visitor: &mut V,
    expressions: impl Iterator<Item = &'a Expr>,
) -> ControlFlow<V::Break> {
    for expr in expressions {
        visitor.visit_expr(expr)?;
    }
    ControlFlow::Continue(())
}

fn walk_targets<'a, V: Visitor + ?Sized>(
    visitor: &mut V,
    targets: impl Iterator<Item = &'a TargetElement>,
) -> ControlFlow<V::Break> {
    for target in targets {
        visitor.visit_target_element(target)?;
    }
    ControlFlow::Continue(())
}

fn walk_indirection<'a, V: Visitor + ?Sized>(
    visitor: &mut V,
    items: impl Iterator<Item = &'a IndirectionItem>,
) -> ControlFlow<V::Break> {
    for item in items {
        if let IndirectionItem::Index(indexes) = item {
            walk_expressions(visitor, indexes.lower.iter().chain(indexes.upper.iter()))?;
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnName, Parameter};
    use crate::Parser;

    #[derive(Default)]
    struct Collector {
        columns: Vec<String>,
        names: Vec<String>,
        parameters: usize,
    }

    impl Visitor for Collector {
        type Break = ();

        fn visit_expr(&mut self, expr: &Expr) -> ControlFlow<()> {
            match expr {
                Expr::ColumnRef(column) => {
                    if let ColumnName::Name(name) = &column.column {
                        self.columns.push(name.to_string());
                    }
                }
                Expr::Parameter(_) => self.parameters += 1,
                _ => {}
            }
            walk_expr(self, expr)
        }

        fn visit_qualified_name(&mut self, name: &QualifiedName) -> ControlFlow<()> {
            self.names.push(name.to_string());
            ControlFlow::Continue(())
        }
    }

    fn collect(sql: &str) -> Collector {
        let statement = Parser::new().parse_statement(sql).unwrap();
        let mut collector = Collector::default();
        assert!(collector.visit_statement(&statement).is_continue());
        collector
    }

    #[test]
    fn test_walk_order_follows_text() {
        let collector = collect(
            "select a, b from t join u on t.c = u.d where e > $1 group by f having g < $2 order by h",
        );
        assert_eq!(collector.columns, ["a", "b", "c", "d", "e", "f", "g", "h"]);
        assert_eq!(collector.names, ["t", "u"]);
        assert_eq!(collector.parameters, 2);
    }

    #[test]
    fn test_walk_reaches_nested_queries() {
        let collector = collect(
            "with w as (select x from s) \
             update t set a = (select max(y) from u) from w where t.id in (select id from v) \
             returning z",
        );
        assert_eq!(collector.names, ["s", "t", "max", "u", "w", "v"]);
        assert_eq!(collector.columns, ["x", "y", "id", "id", "z"]);
    }

    #[test]
    fn test_walk_reaches_type_names() {
        let collector = collect("select a::int, b is of (text) from f(1) as x(c my.type)");
        assert_eq!(collector.names, ["pg_catalog.int4", "text", "f", "my.type"]);
    }

    #[test]
    fn test_break_stops_traversal() {
        struct FirstParameter;

        impl Visitor for FirstParameter {
            type Break = Parameter;

            fn visit_expr(&mut self, expr: &Expr) -> ControlFlow<Parameter> {
                if let Expr::Parameter(parameter) = expr {
                    return ControlFlow::Break(parameter.clone());
                }
                walk_expr(self, expr)
            }
        }

        let statement = Parser::new()
            .parse_statement("select * from t where a = :first or b = :second")
            .unwrap();
        assert_eq!(
            FirstParameter.visit_statement(&statement),
            ControlFlow::Break(Parameter::Named("first".into()))
        );
    }
}
