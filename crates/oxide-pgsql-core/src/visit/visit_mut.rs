//! Mutable counterpart of [`Visitor`](super::Visitor).

use std::ops::ControlFlow;

use crate::ast::{
    Alias, AliasColumns, CommonTableExpression, ConflictAction, ConflictTarget, DeleteStatement,
    Distinct, Expr, FromElement, FunctionCall, GroupingElement, InList, IndexTarget,
    IndirectionItem, InsertStatement, JoinCondition, JsonBehaviour, JsonExpr, JsonFormattedValue,
    JsonQueryCommon, JsonReturning, LockingElement, MergeStatement, MergeWhenAction,
    MergeWhenClause, OnConflictClause, OrderByElement, QualifiedName, RowExpr, SelectBody,
    SelectStatement, SetClause, SetTargetElement, SimpleSelect, Statement, TargetElement,
    TypeName, TypeNameKind, UpdateStatement, WindowDefinition, WithClause, XmlExpr,
};

/// Traversal of a statement tree that may change nodes in place.
pub trait VisitorMut {
    /// Value carried out of the traversal when it stops early.
    type Break;

    fn visit_statement(&mut self, statement: &mut Statement) -> ControlFlow<Self::Break> {
        walk_statement_mut(self, statement)
    }

    /// Visits `SELECT`, `VALUES` and set operations, including nested ones.
    fn visit_select(&mut self, select: &mut SelectStatement) -> ControlFlow<Self::Break> {
        walk_select_mut(self, select)
    }

    fn visit_simple_select(&mut self, select: &mut SimpleSelect) -> ControlFlow<Self::Break> {
        walk_simple_select_mut(self, select)
    }

    fn visit_insert(&mut self, insert: &mut InsertStatement) -> ControlFlow<Self::Break> {
        walk_insert_mut(self, insert)
    }

    fn visit_update(&mut self, update: &mut UpdateStatement) -> ControlFlow<Self::Break> {
        walk_update_mut(self, update)
    }

    fn visit_delete(&mut self, delete: &mut DeleteStatement) -> ControlFlow<Self::Break> {
        walk_delete_mut(self, delete)
    }

    fn visit_merge(&mut self, merge: &mut MergeStatement) -> ControlFlow<Self::Break> {
        walk_merge_mut(self, merge)
    }

    fn visit_merge_when_clause(
        &mut self,
        clause: &mut MergeWhenClause,
    ) -> ControlFlow<Self::Break> {
        walk_merge_when_clause_mut(self, clause)
    }

    fn visit_with_clause(&mut self, with: &mut WithClause) -> ControlFlow<Self::Break> {
        walk_with_clause_mut(self, with)
    }

    fn visit_common_table_expression(
        &mut self,
        cte: &mut CommonTableExpression,
    ) -> ControlFlow<Self::Break> {
        walk_common_table_expression_mut(self, cte)
    }

    fn visit_target_element(&mut self, target: &mut TargetElement) -> ControlFlow<Self::Break> {
        walk_target_element_mut(self, target)
    }

    fn visit_from_element(&mut self, element: &mut FromElement) -> ControlFlow<Self::Break> {
        walk_from_element_mut(self, element)
    }

    fn visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<Self::Break> {
        walk_expr_mut(self, expr)
    }

    /// Visits row constructors, both in expressions and as `VALUES` rows.
    fn visit_row(&mut self, row: &mut RowExpr) -> ControlFlow<Self::Break> {
        walk_row_mut(self, row)
    }

    fn visit_function_call(&mut self, function: &mut FunctionCall) -> ControlFlow<Self::Break> {
        walk_function_call_mut(self, function)
    }

    fn visit_window_definition(
        &mut self,
        window: &mut WindowDefinition,
    ) -> ControlFlow<Self::Break> {
        walk_window_definition_mut(self, window)
    }

    fn visit_order_by_element(&mut self, element: &mut OrderByElement) -> ControlFlow<Self::Break> {
        walk_order_by_element_mut(self, element)
    }

    fn visit_set_clause(&mut self, clause: &mut SetClause) -> ControlFlow<Self::Break> {
        walk_set_clause_mut(self, clause)
    }

    fn visit_set_target_element(
        &mut self,
        target: &mut SetTargetElement,
    ) -> ControlFlow<Self::Break> {
        walk_set_target_element_mut(self, target)
    }

    fn visit_grouping_element(
        &mut self,
        element: &mut GroupingElement,
    ) -> ControlFlow<Self::Break> {
        walk_grouping_element_mut(self, element)
    }

    fn visit_locking_element(&mut self, element: &mut LockingElement) -> ControlFlow<Self::Break> {
        walk_locking_element_mut(self, element)
    }

    fn visit_on_conflict(&mut self, clause: &mut OnConflictClause) -> ControlFlow<Self::Break> {
        walk_on_conflict_mut(self, clause)
    }

    fn visit_json(&mut self, json: &mut JsonExpr) -> ControlFlow<Self::Break> {
        walk_json_mut(self, json)
    }

    fn visit_xml(&mut self, xml: &mut XmlExpr) -> ControlFlow<Self::Break> {
        walk_xml_mut(self, xml)
    }

    fn visit_type_name(&mut self, type_name: &mut TypeName) -> ControlFlow<Self::Break> {
        walk_type_name_mut(self, type_name)
    }

    /// Visits names of relations, functions, types, collations and
    /// operator classes. Leaf.
    fn visit_qualified_name(&mut self, _name: &mut QualifiedName) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }
}

pub fn walk_statement_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    statement: &mut Statement,
) -> ControlFlow<V::Break> {
    match statement {
        Statement::Select(select) => visitor.visit_select(select),
        Statement::Insert(insert) => visitor.visit_insert(insert),
        Statement::Update(update) => visitor.visit_update(update),
        Statement::Delete(delete) => visitor.visit_delete(delete),
        Statement::Merge(merge) => visitor.visit_merge(merge),
    }
}

pub fn walk_select_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    select: &mut SelectStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &mut select.with {
        visitor.visit_with_clause(with)?;
    }
    match &mut select.body {
        SelectBody::Select(simple) => visitor.visit_simple_select(simple)?,
        SelectBody::SetOp(set_op) => {
            visitor.visit_select(&mut set_op.left)?;
            visitor.visit_select(&mut set_op.right)?;
        }
        SelectBody::Values(rows) => {
            for row in rows.iter_mut() {
                visitor.visit_row(row)?;
            }
        }
    }
    for element in select.order_by.iter_mut() {
        visitor.visit_order_by_element(element)?;
    }
    if let Some(limit) = &mut select.limit {
        visitor.visit_expr(limit)?;
    }
    if let Some(offset) = &mut select.offset {
        visitor.visit_expr(offset)?;
    }
    for element in select.locking.iter_mut() {
        visitor.visit_locking_element(element)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_simple_select_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    select: &mut SimpleSelect,
) -> ControlFlow<V::Break> {
    if let Some(Distinct::On(expressions)) = &mut select.distinct {
        walk_expressions_mut(visitor, expressions.iter_mut())?;
    }
    for target in select.targets.iter_mut() {
        visitor.visit_target_element(target)?;
    }
    for element in select.from.iter_mut() {
        visitor.visit_from_element(element)?;
    }
    if let Some(condition) = &mut select.where_clause.condition {
        visitor.visit_expr(condition)?;
    }
    for element in select.group_by.items.iter_mut() {
        visitor.visit_grouping_element(element)?;
    }
    if let Some(condition) = &mut select.having.condition {
        visitor.visit_expr(condition)?;
    }
    for window in select.window.iter_mut() {
        visitor.visit_window_definition(window)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_insert_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    insert: &mut InsertStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &mut insert.with {
        visitor.visit_with_clause(with)?;
    }
    visitor.visit_qualified_name(&mut insert.target.relation)?;
    for column in insert.columns.iter_mut() {
        visitor.visit_set_target_element(column)?;
    }
    if let Some(values) = &mut insert.values {
        visitor.visit_select(values)?;
    }
    if let Some(on_conflict) = &mut insert.on_conflict {
        visitor.visit_on_conflict(on_conflict)?;
    }
    walk_targets_mut(visitor, insert.returning.iter_mut())
}

pub fn walk_update_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    update: &mut UpdateStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &mut update.with {
        visitor.visit_with_clause(with)?;
    }
    visitor.visit_qualified_name(&mut update.target.relation)?;
    for clause in update.set.iter_mut() {
        visitor.visit_set_clause(clause)?;
    }
    for element in update.from.iter_mut() {
        visitor.visit_from_element(element)?;
    }
    if let Some(condition) = &mut update.where_clause.condition {
        visitor.visit_expr(condition)?;
    }
    walk_targets_mut(visitor, update.returning.iter_mut())
}

pub fn walk_delete_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    delete: &mut DeleteStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &mut delete.with {
        visitor.visit_with_clause(with)?;
    }
    visitor.visit_qualified_name(&mut delete.target.relation)?;
    for element in delete.using.iter_mut() {
        visitor.visit_from_element(element)?;
    }
    if let Some(condition) = &mut delete.where_clause.condition {
        visitor.visit_expr(condition)?;
    }
    walk_targets_mut(visitor, delete.returning.iter_mut())
}

pub fn walk_merge_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    merge: &mut MergeStatement,
) -> ControlFlow<V::Break> {
    if let Some(with) = &mut merge.with {
        visitor.visit_with_clause(with)?;
    }
    visitor.visit_qualified_name(&mut merge.target.relation)?;
    visitor.visit_from_element(&mut merge.using)?;
    visitor.visit_expr(&mut merge.on)?;
    for clause in merge.when.iter_mut() {
        visitor.visit_merge_when_clause(clause)?;
    }
    walk_targets_mut(visitor, merge.returning.iter_mut())
}

pub fn walk_merge_when_clause_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    clause: &mut MergeWhenClause,
) -> ControlFlow<V::Break> {
    if let Some(condition) = &mut clause.condition {
        visitor.visit_expr(condition)?;
    }
    match clause.action_mut() {
        Some(MergeWhenAction::Update(set)) => {
            for clause in set.iter_mut() {
                visitor.visit_set_clause(clause)?;
            }
        }
        Some(MergeWhenAction::Insert(insert)) => {
            for column in insert.columns.iter_mut() {
                visitor.visit_set_target_element(column)?;
            }
            if let Some(values) = &mut insert.values {
                walk_expressions_mut(visitor, values.iter_mut())?;
            }
        }
        Some(MergeWhenAction::Delete) | None => {}
    }
    ControlFlow::Continue(())
}

pub fn walk_with_clause_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    with: &mut WithClause,
) -> ControlFlow<V::Break> {
    for cte in with.ctes.iter_mut() {
        visitor.visit_common_table_expression(cte)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_common_table_expression_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    cte: &mut CommonTableExpression,
) -> ControlFlow<V::Break> {
    visitor.visit_statement(&mut cte.statement)?;
    if let Some(cycle) = &mut cte.cycle {
        let marks = cycle.mark_value.iter_mut().chain(cycle.mark_default.iter_mut());
        walk_expressions_mut(visitor, marks)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_target_element_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    target: &mut TargetElement,
) -> ControlFlow<V::Break> {
    visitor.visit_expr(&mut target.expression)
}

pub fn walk_from_element_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    element: &mut FromElement,
) -> ControlFlow<V::Break> {
    match element {
        FromElement::Relation(relation) => {
            visitor.visit_qualified_name(&mut relation.name)?;
            walk_alias_mut(visitor, relation.alias.as_mut())?;
        }
        FromElement::Function(function) => {
            visitor.visit_expr(&mut function.function)?;
            walk_alias_mut(visitor, function.alias.as_mut())?;
        }
        FromElement::RowsFrom(rows_from) => {
            for element in rows_from.functions.iter_mut() {
                visitor.visit_expr(&mut element.function)?;
                for column in element.column_definitions.iter_mut() {
                    visitor.visit_type_name(&mut column.type_name)?;
                }
            }
            walk_alias_mut(visitor, rows_from.alias.as_mut())?;
        }
        FromElement::Subselect(subselect) => {
            visitor.visit_select(&mut subselect.query)?;
            walk_alias_mut(visitor, subselect.alias.as_mut())?;
        }
        FromElement::Join(join) => {
            visitor.visit_from_element(&mut join.left)?;
            visitor.visit_from_element(&mut join.right)?;
            if let Some(JoinCondition::On(condition)) = &mut join.condition {
                visitor.visit_expr(condition)?;
            }
        }
        FromElement::TableSample(sample) => {
            visitor.visit_qualified_name(&mut sample.relation.name)?;
            walk_alias_mut(visitor, sample.relation.alias.as_mut())?;
            visitor.visit_qualified_name(&mut sample.method)?;
            walk_expressions_mut(visitor, sample.arguments.iter_mut())?;
            if let Some(repeatable) = &mut sample.repeatable {
                visitor.visit_expr(repeatable)?;
            }
        }
    }
    ControlFlow::Continue(())
}

fn walk_alias_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    alias: Option<&mut Alias>,
) -> ControlFlow<V::Break> {
    if let Some(Alias {
        columns: Some(AliasColumns::Definitions(definitions)),
        ..
    }) = alias
    {
        for column in definitions.iter_mut() {
            visitor.visit_type_name(&mut column.type_name)?;
        }
    }
    ControlFlow::Continue(())
}

#[allow(clippy::too_many_lines)]
pub fn walk_expr_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    expr: &mut Expr,
) -> ControlFlow<V::Break> {
    match expr {
        Expr::Constant(_)
        | Expr::Parameter(_)
        | Expr::ColumnRef(_)
        | Expr::SqlValueFunction(_)
        | Expr::MergeAction
        | Expr::SetToDefault => {}
        Expr::Indirection(indirection) => {
            visitor.visit_expr(&mut indirection.base)?;
            walk_indirection_mut(visitor, indirection.items.iter_mut())?;
        }
        Expr::Row(row) => visitor.visit_row(row)?,
        Expr::Array(array) => walk_expressions_mut(visitor, array.items.iter_mut())?,
        Expr::Subselect(subselect) => visitor.visit_select(&mut subselect.query)?,
        Expr::ArrayComparison(comparison) => visitor.visit_expr(&mut comparison.array)?,
        Expr::Function(function) => visitor.visit_function_call(function)?,
        Expr::SystemFunction(function) => {
            walk_expressions_mut(visitor, function.arguments.iter_mut())?;
        }
        Expr::Typecast(typecast) => {
            visitor.visit_expr(&mut typecast.argument)?;
            visitor.visit_type_name(&mut typecast.type_name)?;
        }
        Expr::ConstantTypecast(typecast) => visitor.visit_type_name(&mut typecast.type_name)?,
        Expr::Operator(operator) => {
            let operands = operator.left.iter_mut().chain(operator.right.iter_mut());
            walk_expressions_mut(visitor, operands)?;
        }
        Expr::Logical(logical) => walk_expressions_mut(visitor, logical.items.iter_mut())?,
        Expr::Not(argument) | Expr::CollationFor(argument) | Expr::AtLocal(argument) => {
            visitor.visit_expr(argument)?;
        }
        Expr::Between(between) => {
            visitor.visit_expr(&mut between.argument)?;
            visitor.visit_expr(&mut between.left)?;
            visitor.visit_expr(&mut between.right)?;
        }
        Expr::In(in_expr) => {
            visitor.visit_expr(&mut in_expr.left)?;
            match &mut in_expr.right {
                InList::Values(values) => walk_expressions_mut(visitor, values.iter_mut())?,
                InList::Subselect(select) => visitor.visit_select(select)?,
            }
        }
        Expr::Pattern(pattern) => {
            visitor.visit_expr(&mut pattern.argument)?;
            visitor.visit_expr(&mut pattern.pattern)?;
            if let Some(escape) = &mut pattern.escape {
                visitor.visit_expr(escape)?;
            }
        }
        Expr::Is(is) => visitor.visit_expr(&mut is.argument)?,
        Expr::IsDistinctFrom(is) => {
            visitor.visit_expr(&mut is.left)?;
            visitor.visit_expr(&mut is.right)?;
        }
        Expr::IsOf(is) => {
            visitor.visit_expr(&mut is.left)?;
            for type_name in is.right.iter_mut() {
                visitor.visit_type_name(type_name)?;
            }
        }
        Expr::IsJson(is) => visitor.visit_expr(&mut is.argument)?,
        Expr::Overlaps(overlaps) => {
            visitor.visit_row(&mut overlaps.left)?;
            visitor.visit_row(&mut overlaps.right)?;
        }
        Expr::Case(case) => {
            if let Some(argument) = &mut case.argument {
                visitor.visit_expr(argument)?;
            }
            for when in case.when.iter_mut() {
                visitor.visit_expr(&mut when.when)?;
                visitor.visit_expr(&mut when.then)?;
            }
            if let Some(else_clause) = &mut case.else_clause {
                visitor.visit_expr(else_clause)?;
            }
        }
        Expr::Collate(collate) => {
            visitor.visit_expr(&mut collate.argument)?;
            visitor.visit_qualified_name(&mut collate.collation)?;
        }
        Expr::AtTimeZone(at) => {
            visitor.visit_expr(&mut at.argument)?;
            visitor.visit_expr(&mut at.zone)?;
        }
        Expr::Extract(extract) => visitor.visit_expr(&mut extract.source)?,
        Expr::Normalize(normalize) => visitor.visit_expr(&mut normalize.argument)?,
        Expr::NullIf(nullif) => {
            visitor.visit_expr(&mut nullif.first)?;
            visitor.visit_expr(&mut nullif.second)?;
        }
        Expr::Overlay(overlay) => {
            visitor.visit_expr(&mut overlay.string)?;
            visitor.visit_expr(&mut overlay.new_substring)?;
            visitor.visit_expr(&mut overlay.start)?;
            if let Some(count) = &mut overlay.count {
                visitor.visit_expr(count)?;
            }
        }
        Expr::Position(position) => {
            visitor.visit_expr(&mut position.substring)?;
            visitor.visit_expr(&mut position.string)?;
        }
        Expr::SubstringFrom(substring) => {
            visitor.visit_expr(&mut substring.string)?;
            let bounds = substring.from.iter_mut().chain(substring.count.iter_mut());
            walk_expressions_mut(visitor, bounds)?;
        }
        Expr::SubstringSimilar(substring) => {
            visitor.visit_expr(&mut substring.string)?;
            visitor.visit_expr(&mut substring.pattern)?;
            visitor.visit_expr(&mut substring.escape)?;
        }
        Expr::Trim(trim) => walk_expressions_mut(visitor, trim.arguments.iter_mut())?,
        Expr::Grouping(arguments) => walk_expressions_mut(visitor, arguments.iter_mut())?,
        Expr::Xml(xml) => visitor.visit_xml(xml)?,
        Expr::Json(json) => visitor.visit_json(json)?,
    }
    ControlFlow::Continue(())
}

pub fn walk_row_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    row: &mut RowExpr,
) -> ControlFlow<V::Break> {
    walk_expressions_mut(visitor, row.items.iter_mut())
}

pub fn walk_function_call_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    function: &mut FunctionCall,
) -> ControlFlow<V::Break> {
    visitor.visit_qualified_name(&mut function.name)?;
    walk_expressions_mut(visitor, function.arguments.values_mut())?;
    for element in function.order_by.iter_mut() {
        visitor.visit_order_by_element(element)?;
    }
    if let Some(filter) = &mut function.filter {
        visitor.visit_expr(filter)?;
    }
    if let Some(over) = &mut function.over {
        visitor.visit_window_definition(over)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_window_definition_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    window: &mut WindowDefinition,
) -> ControlFlow<V::Break> {
    walk_expressions_mut(visitor, window.partition.iter_mut())?;
    for element in window.order_by.iter_mut() {
        visitor.visit_order_by_element(element)?;
    }
    if let Some(frame) = &mut window.frame {
        walk_expressions_mut(visitor, frame.bound_values_mut())?;
    }
    ControlFlow::Continue(())
}

pub fn walk_order_by_element_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    element: &mut OrderByElement,
) -> ControlFlow<V::Break> {
    visitor.visit_expr(&mut element.expression)
}

pub fn walk_set_clause_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    clause: &mut SetClause,
) -> ControlFlow<V::Break> {
    match clause {
        SetClause::Single { column, value } => {
            visitor.visit_set_target_element(column)?;
            visitor.visit_expr(value)
        }
        SetClause::Multiple { columns, value } => {
            for column in columns.iter_mut() {
                visitor.visit_set_target_element(column)?;
            }
            visitor.visit_expr(value)
        }
    }
}

pub fn walk_set_target_element_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    target: &mut SetTargetElement,
) -> ControlFlow<V::Break> {
    walk_indirection_mut(visitor, target.indirection.iter_mut())
}

pub fn walk_grouping_element_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    element: &mut GroupingElement,
) -> ControlFlow<V::Break> {
    match element {
        GroupingElement::Expression(expr) => visitor.visit_expr(expr),
        GroupingElement::Empty => ControlFlow::Continue(()),
        GroupingElement::Cube(expressions) | GroupingElement::Rollup(expressions) => {
            walk_expressions_mut(visitor, expressions.iter_mut())
        }
        GroupingElement::Sets(elements) => {
            for element in elements.iter_mut() {
                visitor.visit_grouping_element(element)?;
            }
            ControlFlow::Continue(())
        }
    }
}

pub fn walk_locking_element_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    element: &mut LockingElement,
) -> ControlFlow<V::Break> {
    for relation in element.relations.iter_mut() {
        visitor.visit_qualified_name(relation)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_on_conflict_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    clause: &mut OnConflictClause,
) -> ControlFlow<V::Break> {
    if let Some(ConflictTarget::Index(parameters)) = &mut clause.target {
        for element in parameters.elements.iter_mut() {
            if let IndexTarget::Expression(expr) = &mut element.target {
                visitor.visit_expr(expr)?;
            }
            for name in element.collation.iter_mut().chain(element.opclass.iter_mut()) {
                visitor.visit_qualified_name(name)?;
            }
        }
        if let Some(condition) = &mut parameters.where_clause.condition {
            visitor.visit_expr(condition)?;
        }
    }
    if let ConflictAction::Update { set, where_clause } = &mut clause.action {
        for clause in set.iter_mut() {
            visitor.visit_set_clause(clause)?;
        }
        if let Some(condition) = &mut where_clause.condition {
            visitor.visit_expr(condition)?;
        }
    }
    ControlFlow::Continue(())
}

pub fn walk_json_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    json: &mut JsonExpr,
) -> ControlFlow<V::Break> {
    match json {
        JsonExpr::ArrayAgg(agg) => {
            walk_json_value_mut(visitor, &mut agg.value)?;
            for element in agg.order_by.iter_mut() {
                visitor.visit_order_by_element(element)?;
            }
            walk_json_returning_mut(visitor, agg.returning.as_mut())?;
            if let Some(filter) = &mut agg.filter {
                visitor.visit_expr(filter)?;
            }
            if let Some(over) = &mut agg.over {
                visitor.visit_window_definition(over)?;
            }
        }
        JsonExpr::ObjectAgg(agg) => {
            visitor.visit_expr(&mut agg.key_value.key)?;
            walk_json_value_mut(visitor, &mut agg.key_value.value)?;
            walk_json_returning_mut(visitor, agg.returning.as_mut())?;
            if let Some(filter) = &mut agg.filter {
                visitor.visit_expr(filter)?;
            }
            if let Some(over) = &mut agg.over {
                visitor.visit_window_definition(over)?;
            }
        }
        JsonExpr::Array(array) => {
            for value in array.values.iter_mut() {
                walk_json_value_mut(visitor, value)?;
            }
            walk_json_returning_mut(visitor, array.returning.as_mut())?;
        }
        JsonExpr::ArraySubselect(array) => {
            visitor.visit_select(&mut array.query)?;
            walk_json_returning_mut(visitor, array.returning.as_mut())?;
        }
        JsonExpr::Object(object) => {
            for argument in object.arguments.iter_mut() {
                visitor.visit_expr(&mut argument.key)?;
                walk_json_value_mut(visitor, &mut argument.value)?;
            }
            walk_json_returning_mut(visitor, object.returning.as_mut())?;
        }
        JsonExpr::Constructor(constructor) => walk_json_value_mut(visitor, &mut constructor.value)?,
        JsonExpr::Scalar(expr) => visitor.visit_expr(expr)?,
        JsonExpr::Serialize(serialize) => {
            walk_json_value_mut(visitor, &mut serialize.value)?;
            walk_json_returning_mut(visitor, serialize.returning.as_mut())?;
        }
        JsonExpr::Exists(exists) => {
            walk_json_common_mut(visitor, &mut exists.common)?;
            walk_json_behaviour_mut(visitor, exists.on_error.as_mut())?;
        }
        JsonExpr::Value(value) => {
            walk_json_common_mut(visitor, &mut value.common)?;
            walk_json_returning_mut(visitor, value.returning.as_mut())?;
            walk_json_behaviour_mut(visitor, value.on_empty.as_mut())?;
            walk_json_behaviour_mut(visitor, value.on_error.as_mut())?;
        }
        JsonExpr::Query(query) => {
            walk_json_common_mut(visitor, &mut query.common)?;
            walk_json_returning_mut(visitor, query.returning.as_mut())?;
            walk_json_behaviour_mut(visitor, query.on_empty.as_mut())?;
            walk_json_behaviour_mut(visitor, query.on_error.as_mut())?;
        }
    }
    ControlFlow::Continue(())
}

fn walk_json_value_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    value: &mut JsonFormattedValue,
) -> ControlFlow<V::Break> {
    visitor.visit_expr(&mut value.expression)
}

fn walk_json_returning_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    returning: Option<&mut JsonReturning>,
) -> ControlFlow<V::Break> {
    match returning {
        Some(returning) => visitor.visit_type_name(&mut returning.type_name),
        None => ControlFlow::Continue(()),
    }
}

fn walk_json_behaviour_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    behaviour: Option<&mut JsonBehaviour>,
) -> ControlFlow<V::Break> {
    match behaviour {
        Some(JsonBehaviour::Default(expr)) => visitor.visit_expr(expr),
        _ => ControlFlow::Continue(()),
    }
}

fn walk_json_common_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    common: &mut JsonQueryCommon,
) -> ControlFlow<V::Break> {
    walk_json_value_mut(visitor, &mut common.context)?;
    visitor.visit_expr(&mut common.path)?;
    for argument in common.passing.iter_mut() {
        walk_json_value_mut(visitor, &mut argument.value)?;
    }
    ControlFlow::Continue(())
}

pub fn walk_xml_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    xml: &mut XmlExpr,
) -> ControlFlow<V::Break> {
    match xml {
        XmlExpr::Element(element) => {
            walk_targets_mut(visitor, element.attributes.iter_mut())?;
            walk_expressions_mut(visitor, element.content.iter_mut())
        }
        XmlExpr::Exists(exists) => {
            visitor.visit_expr(&mut exists.xpath)?;
            visitor.visit_expr(&mut exists.xml)
        }
        XmlExpr::Forest(targets) => walk_targets_mut(visitor, targets.iter_mut()),
        XmlExpr::Parse(parse) => visitor.visit_expr(&mut parse.argument),
        XmlExpr::Pi(pi) => walk_expressions_mut(visitor, pi.content.iter_mut()),
        XmlExpr::Root(root) => {
            visitor.visit_expr(&mut root.xml)?;
            walk_expressions_mut(visitor, root.version.iter_mut())
        }
        XmlExpr::Serialize(serialize) => {
            visitor.visit_expr(&mut serialize.argument)?;
            visitor.visit_type_name(&mut serialize.type_name)
        }
    }
}

pub fn walk_type_name_mut<V: VisitorMut + ?Sized>(
    visitor: &mut V,
    type_name: &mut TypeName,
) -> ControlFlow<V::Break> {
    match &mut type_name.kind {
        TypeNameKind::Named(name) => visitor.visit_qualified_name(name),
        TypeNameKind::Interval(_) => ControlFlow::Continue(()),
    }
}

fn walk_expressions_mut<'a, V: VisitorMut + ?Sized>(
    visitor: &mut V,
    expressions: impl Iterator<Item = &'a mut Expr>,
) -> ControlFlow<V::Break> {
    for expr in expressions {
        visitor.visit_expr(expr)?;
    }
    ControlFlow::Continue(())
}

fn walk_targets_mut<'a, V: VisitorMut + ?Sized>(
    visitor: &mut V,
    targets: impl Iterator<Item = &'a mut TargetElement>,
) -> ControlFlow<V::Break> {
    for target in targets {
        visitor.visit_target_element(target)?;
    }
    ControlFlow::Continue(())
}

fn walk_indirection_mut<'a, V: VisitorMut + ?Sized>(
    visitor: &mut V,
    items: impl Iterator<Item = &'a mut IndirectionItem>,
) -> ControlFlow<V::Break> {
    for item in items {
        if let IndirectionItem::Index(indexes) = item {
            let bounds = indexes.lower.iter_mut().chain(indexes.upper.iter_mut());
            walk_expressions_mut(visitor, bounds)?;
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Identifier, Parameter};
    use crate::Parser;

    struct QualifyRelations(&'static str);

    impl VisitorMut for QualifyRelations {
        type Break = ();

        fn visit_from_element(&mut self, element: &mut FromElement) -> ControlFlow<()> {
            if let FromElement::Relation(relation) = element {
                if relation.name.schema.is_none() {
                    relation.name.schema = Some(Identifier::new(self.0));
                }
            }
            walk_from_element_mut(self, element)
        }
    }

    fn parse(sql: &str) -> Statement {
        Parser::new().parse_statement(sql).unwrap()
    }

    #[test]
    fn test_rewrite_relations() {
        let mut statement = parse(
            "select * from users u join other.orders o using (id) \
             where exists (select 1 from items where items.order_id = o.id)",
        );
        let _ = QualifyRelations("app").visit_statement(&mut statement);
        assert_eq!(
            statement,
            parse(
                "select * from app.users u join other.orders o using (id) \
                 where exists (select 1 from app.items where items.order_id = o.id)"
            )
        );
    }

    #[test]
    fn test_rewrite_expressions_in_place() {
        struct Renumber;

        impl VisitorMut for Renumber {
            type Break = ();

            fn visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<()> {
                if let Expr::Parameter(Parameter::Positional(position)) = expr {
                    *position += 10;
                }
                walk_expr_mut(self, expr)
            }
        }

        let mut statement = parse(
            "update t set a = $1, (b, c) = ($2, $3) \
             where d = any($4) returning sum(e) filter (where f = $5) over (order by g rows $6 preceding)",
        );
        let _ = Renumber.visit_statement(&mut statement);
        assert_eq!(
            statement,
            parse(
                "update t set a = $11, (b, c) = ($12, $13) \
                 where d = any($14) returning sum(e) filter (where f = $15) over (order by g rows $16 preceding)"
            )
        );
    }

    #[test]
    fn test_break_from_mutable_walk() {
        struct FailOnDefault;

        impl VisitorMut for FailOnDefault {
            type Break = &'static str;

            fn visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<&'static str> {
                if matches!(expr, Expr::SetToDefault) {
                    return ControlFlow::Break("default");
                }
                walk_expr_mut(self, expr)
            }
        }

        let mut statement = parse("insert into t (a, b) values (1, default)");
        assert_eq!(
            FailOnDefault.visit_statement(&mut statement),
            ControlFlow::Break("default")
        );
    }
}
