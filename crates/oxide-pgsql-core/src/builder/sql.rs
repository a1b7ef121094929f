//! Renders AST nodes back to SQL text.

use std::fmt::Write as _;

use tracing::debug;

use super::precedence::{self, Enclosing, AND, ATOM, OR};
use super::{BuilderOptions, Parentheses};
use crate::ast::{
    Alias, AliasColumns, ArrayExpr, ArrayIndexes, ColumnDefinition, ColumnName,
    CommonTableExpression, ConflictAction, ConflictTarget, Constant, DeleteStatement, Distinct,
    Expr, FrameDirection, FromElement, FunctionCall, GroupingElement, Identifier, IndexElement,
    IndexParameters, IndexTarget, IndirectionItem, InList, InsertStatement, InsertTarget,
    JoinCondition, JoinExpression, JsonArgument, JsonBehaviour, JsonExpr, JsonFormat,
    JsonFormattedValue, JsonKeyValue, JsonQueryCommon, JsonReturning, LockWaitPolicy,
    LockingElement, LogicalExpr, LogicalOp, MergeInsert, MergeMatch, MergeStatement,
    MergeWhenAction, MergeWhenClause, OnConflictClause, Operator, OrderByElement, OrderDirection,
    Parameter, QualifiedName, QualifiedOperator, RelationReference, RowExpr, RowsFromElement,
    SelectBody, SelectStatement, SetClause, SetOpSelect, SetTargetElement, SimpleSelect,
    Statement, TargetElement, TypeModifier, TypeName, TypeNameKind, UpdateOrDeleteTarget,
    UpdateStatement, WindowDefinition, WindowFrameBound, WindowFrameClause, WithClause, XmlExpr,
};
use crate::lexer::Keyword;
use crate::parser::Precedence;

/// Turns AST nodes into SQL.
///
/// Parentheses are added only where the precedence rules selected by
/// [`Parentheses`] require them, so parsing the output yields a tree equal
/// to the one that was built.
///
/// ```rust
/// use oxide_pgsql_core::builder::{BuilderOptions, SqlBuilder};
/// use oxide_pgsql_core::Parser;
///
/// let expr = Parser::new().parse_expression("(a + b) * c").unwrap();
/// let builder = SqlBuilder::with_options(BuilderOptions::compact());
/// assert_eq!(builder.build_expression(&expr), "(a + b) * c");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SqlBuilder {
    options: BuilderOptions,
}

impl SqlBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_options(options: BuilderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Renders a complete statement.
    #[must_use]
    pub fn build(&self, statement: &Statement) -> String {
        let sql = Renderer::new(&self.options).statement(statement);
        debug!(length = sql.len(), "built statement");
        sql
    }

    #[must_use]
    pub fn build_select(&self, select: &SelectStatement) -> String {
        Renderer::new(&self.options).select(select)
    }

    #[must_use]
    pub fn build_expression(&self, expr: &Expr) -> String {
        Renderer::new(&self.options).expr(expr)
    }

    #[must_use]
    pub fn build_type_name(&self, type_name: &TypeName) -> String {
        Renderer::new(&self.options).type_name(type_name)
    }

    #[must_use]
    pub fn build_from_element(&self, element: &FromElement) -> String {
        Renderer::new(&self.options).from_element(element)
    }
}

/// Returns true if `value` can be written without double quotes.
fn is_bare_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some('a'..='z' | '_'))
        && chars.all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '$'))
        && Keyword::from_str(value).is_none()
}

fn unicode_identifier(value: &str) -> String {
    let mut sql = String::from("u&\"");
    for c in value.chars() {
        match c {
            '\\' => sql.push_str("\\\\"),
            '"' => sql.push_str("\"\""),
            c if c.is_ascii() => sql.push(c),
            c if u32::from(c) < 0xFFFF => {
                let _ = write!(sql, "\\{:04x}", u32::from(c));
            }
            c => {
                let _ = write!(sql, "\\+{:06x}", u32::from(c));
            }
        }
    }
    sql.push('"');
    sql
}

fn escaped_string(value: &str) -> String {
    let mut sql = String::from("e'");
    for c in value.chars() {
        match c {
            '\'' => sql.push_str("\\'"),
            '\\' => sql.push_str("\\\\"),
            c if c.is_ascii() => sql.push(c),
            c if u32::from(c) < 0xFFFF => {
                let _ = write!(sql, "\\u{:04x}", u32::from(c));
            }
            c => {
                let _ = write!(sql, "\\U{:08x}", u32::from(c));
            }
        }
    }
    sql.push('\'');
    sql
}

/// Quotes a string constant, preferring dollar quoting over escaping.
fn plain_string(value: &str) -> String {
    if !value.contains(['\'', '\\']) {
        return format!("'{value}'");
    }
    // a trailing `$` would merge with the closing delimiter
    let probe = format!("{value}$");
    if !probe.contains("$$") {
        return format!("$${value}$$");
    }
    let mut n = 1_usize;
    loop {
        let tag = format!("$_{n}$");
        if !probe.contains(&tag) {
            return format!("{tag}{value}{tag}");
        }
        n += 1;
    }
}

const fn on_null(absent: Option<bool>) -> Option<&'static str> {
    match absent {
        Some(true) => Some("absent on null"),
        Some(false) => Some("null on null"),
        None => None,
    }
}

const fn unique_keys(unique: Option<bool>) -> Option<&'static str> {
    match unique {
        Some(true) => Some("with unique keys"),
        Some(false) => Some("without unique keys"),
        None => None,
    }
}

fn join_pieces(pieces: Vec<Option<String>>) -> String {
    pieces.into_iter().flatten().collect::<Vec<_>>().join(" ")
}

struct Renderer<'a> {
    options: &'a BuilderOptions,
    level: usize,
}

impl<'a> Renderer<'a> {
    const fn new(options: &'a BuilderOptions) -> Self {
        Self { options, level: 0 }
    }

    // ====================================================================
    // Layout
    // ====================================================================

    fn indent(&self) -> String {
        self.options.indent.repeat(self.level)
    }

    fn linebreak(&self) -> &'a str {
        &self.options.linebreak
    }

    /// The line break, or a space when output goes on a single line.
    fn line_or_space(&self) -> &'a str {
        if self.options.linebreak.is_empty() {
            " "
        } else {
            &self.options.linebreak
        }
    }

    fn join_clauses(&self, clauses: &[String]) -> String {
        clauses.join(self.line_or_space())
    }

    /// Joins `parts` after `lead`, starting a new line whenever the
    /// current one would grow past the wrap width.
    fn implode(&self, lead: &str, parts: &[String], separator: &str) -> String {
        let Some((first, rest)) = parts.split_first() else {
            return lead.to_string();
        };
        let linebreak = self.linebreak();
        let wrap = match self.options.wrap {
            Some(wrap) if !linebreak.is_empty() => wrap,
            _ => return format!("{lead}{}", parts.join(&format!("{separator} "))),
        };

        let indent = self.indent();
        let line_separator = format!("{separator}{linebreak}{indent}");
        let mut sql = format!("{lead}{first}");
        let mut line_length = sql
            .rfind(linebreak)
            .map_or(sql.len(), |last| sql.len() - last);

        for part in rest {
            if let Some(first_break) = part.find(linebreak) {
                if line_length + first_break < wrap {
                    sql.push_str(separator);
                    sql.push(' ');
                } else {
                    sql.push_str(&line_separator);
                }
                sql.push_str(part);
                let last_break = part.rfind(linebreak).unwrap_or(first_break);
                line_length = part.len() - last_break;
            } else if line_length + part.len() < wrap {
                sql.push_str(separator);
                sql.push(' ');
                sql.push_str(part);
                line_length += part.len() + separator.len() + 1;
            } else {
                sql.push_str(&line_separator);
                sql.push_str(part);
                line_length = indent.len() + part.len();
            }
        }
        sql
    }

    /// `(query)` with the query on lines of its own.
    fn nested_query(&mut self, prefix: &str, query: &SelectStatement) -> String {
        let indent = self.indent();
        let linebreak = self.linebreak();
        self.level += 1;
        let sql = self.select(query);
        self.level -= 1;
        format!("{prefix}({linebreak}{sql}{linebreak}{indent})")
    }

    // ====================================================================
    // Statements
    // ====================================================================

    fn statement(&mut self, statement: &Statement) -> String {
        match statement {
            Statement::Select(select) => self.select(select),
            Statement::Insert(insert) => self.insert(insert),
            Statement::Update(update) => self.update(update),
            Statement::Delete(delete) => self.delete(delete),
            Statement::Merge(merge) => self.merge(merge),
        }
    }

    fn select(&mut self, select: &SelectStatement) -> String {
        let mut clauses = Vec::new();
        if let Some(with) = &select.with {
            clauses.push(self.with_clause(with));
        }
        match &select.body {
            SelectBody::Select(simple) => self.simple_select(simple, &mut clauses),
            SelectBody::SetOp(set_op) => self.set_operation(set_op, &mut clauses),
            SelectBody::Values(rows) => self.values(rows, &mut clauses),
        }
        self.common_clauses(select, &mut clauses);
        self.join_clauses(&clauses)
    }

    fn simple_select(&mut self, select: &SimpleSelect, clauses: &mut Vec<String>) {
        let indent = self.indent();
        self.level += 1;

        let mut lead = format!("{indent}select ");
        match &select.distinct {
            Some(Distinct::Rows) => lead.push_str("distinct "),
            Some(Distinct::On(expressions)) => {
                let parts = self.exprs(expressions);
                lead = format!("{}) ", self.implode(&format!("{lead}distinct on ("), &parts, ","));
            }
            None => {}
        }
        let targets = self.targets(&select.targets);
        clauses.push(self.implode(&lead, &targets, ","));

        if !select.from.is_empty() {
            let from = self.from_list(&select.from);
            clauses.push(self.implode(&format!("{indent}from "), &from, ","));
        }
        if let Some(condition) = &select.where_clause.condition {
            clauses.push(format!("{indent}where {}", self.condition(condition)));
        }
        if !select.group_by.is_empty() {
            let mut items: Vec<String> = select
                .group_by
                .items
                .iter()
                .map(|item| self.grouping_element(item))
                .collect();
            if select.group_by.distinct {
                if let Some(first) = items.first_mut() {
                    first.insert_str(0, "distinct ");
                }
            }
            clauses.push(self.implode(&format!("{indent}group by "), &items, ","));
        }
        if let Some(condition) = &select.having.condition {
            clauses.push(format!("{indent}having {}", self.condition(condition)));
        }
        if !select.window.is_empty() {
            let windows: Vec<String> = select
                .window
                .iter()
                .map(|window| self.window_definition(window))
                .collect();
            clauses.push(self.implode(&format!("{indent}window "), &windows, ","));
        }

        self.level -= 1;
    }

    fn set_operation(&mut self, set_op: &SetOpSelect, clauses: &mut Vec<String>) {
        let precedence = set_op.operator.precedence();
        let wrap_left = set_op.left.has_common_clauses() || set_op.left.precedence() < precedence;
        let left = self.set_operand(&set_op.left, wrap_left);
        clauses.push(left);
        clauses.push(format!("{}{}", self.indent(), set_op.operator.as_str()));
        let wrap_right =
            set_op.right.has_common_clauses() || set_op.right.precedence() <= precedence;
        let right = self.set_operand(&set_op.right, wrap_right);
        clauses.push(right);
    }

    fn set_operand(&mut self, operand: &SelectStatement, wrap: bool) -> String {
        if wrap {
            let indent = self.indent();
            self.nested_query(&indent, operand)
        } else {
            self.select(operand)
        }
    }

    fn values(&mut self, rows: &[RowExpr], clauses: &mut Vec<String>) {
        let indent = self.indent();
        let separator = self.line_or_space();
        self.level += 1;
        let rows: Vec<String> = rows.iter().map(|row| self.values_row(row)).collect();
        self.level -= 1;
        clauses.push(format!(
            "{indent}values{separator}{}",
            rows.join(&format!(",{separator}"))
        ));
    }

    fn values_row(&mut self, row: &RowExpr) -> String {
        let items = self.exprs(&row.items);
        format!("{})", self.implode(&format!("{}(", self.indent()), &items, ","))
    }

    /// `ORDER BY`, `LIMIT`, `OFFSET` and locking.
    fn common_clauses(&mut self, select: &SelectStatement, clauses: &mut Vec<String>) {
        let indent = self.indent();
        self.level += 1;

        if !select.order_by.is_empty() {
            let items = self.order_by_items(&select.order_by);
            clauses.push(self.implode(&format!("{indent}order by "), &items, ","));
        }
        if let Some(limit) = &select.limit {
            let sql = self.expr(limit);
            if select.limit_with_ties {
                let sql = if self.binds_looser(limit, ATOM) {
                    format!("({sql})")
                } else {
                    sql
                };
                clauses.push(format!("{indent}fetch first {sql} rows with ties"));
            } else {
                clauses.push(format!("{indent}limit {sql}"));
            }
        }
        if let Some(offset) = &select.offset {
            clauses.push(format!("{indent}offset {}", self.expr(offset)));
        }
        if !select.locking.is_empty() {
            let items: Vec<String> = select
                .locking
                .iter()
                .map(|element| self.locking_element(element))
                .collect();
            clauses.push(self.implode(&indent, &items, ""));
        }

        self.level -= 1;
    }

    fn insert(&mut self, insert: &InsertStatement) -> String {
        let mut clauses = Vec::new();
        if let Some(with) = &insert.with {
            clauses.push(self.with_clause(with));
        }
        let indent = self.indent();
        self.level += 1;

        clauses.push(format!("{indent}insert into {}", self.insert_target(&insert.target)));
        if !insert.columns.is_empty() {
            let columns = self.set_targets(&insert.columns);
            let lead = format!("{}(", self.indent());
            clauses.push(format!("{})", self.implode(&lead, &columns, ",")));
        }
        match &insert.values {
            None => clauses.push(format!("{indent}default values")),
            Some(values) => {
                if let Some(overriding) = &insert.overriding {
                    clauses.push(format!("{indent}overriding {} value", overriding.as_str()));
                }
                self.level -= 1;
                clauses.push(self.select(values));
                self.level += 1;
            }
        }
        if let Some(on_conflict) = &insert.on_conflict {
            clauses.push(format!("{indent}on conflict {}", self.on_conflict(on_conflict)));
        }
        if !insert.returning.is_empty() {
            let targets = self.targets(&insert.returning);
            clauses.push(self.implode(&format!("{indent}returning "), &targets, ","));
        }

        self.level -= 1;
        self.join_clauses(&clauses)
    }

    fn update(&mut self, update: &UpdateStatement) -> String {
        let mut clauses = Vec::new();
        if let Some(with) = &update.with {
            clauses.push(self.with_clause(with));
        }
        let indent = self.indent();
        self.level += 1;

        clauses.push(format!("{indent}update {}", self.update_target(&update.target)));
        let set = self.set_clauses(&update.set);
        clauses.push(self.implode(&format!("{indent}set "), &set, ","));
        if !update.from.is_empty() {
            let from = self.from_list(&update.from);
            clauses.push(self.implode(&format!("{indent}from "), &from, ","));
        }
        if let Some(condition) = &update.where_clause.condition {
            clauses.push(format!("{indent}where {}", self.condition(condition)));
        }
        if !update.returning.is_empty() {
            let targets = self.targets(&update.returning);
            clauses.push(self.implode(&format!("{indent}returning "), &targets, ","));
        }

        self.level -= 1;
        self.join_clauses(&clauses)
    }

    fn delete(&mut self, delete: &DeleteStatement) -> String {
        let mut clauses = Vec::new();
        if let Some(with) = &delete.with {
            clauses.push(self.with_clause(with));
        }
        let indent = self.indent();
        self.level += 1;

        clauses.push(format!("{indent}delete from {}", self.update_target(&delete.target)));
        if !delete.using.is_empty() {
            let using = self.from_list(&delete.using);
            clauses.push(self.implode(&format!("{indent}using "), &using, ","));
        }
        if let Some(condition) = &delete.where_clause.condition {
            clauses.push(format!("{indent}where {}", self.condition(condition)));
        }
        if !delete.returning.is_empty() {
            let targets = self.targets(&delete.returning);
            clauses.push(self.implode(&format!("{indent}returning "), &targets, ","));
        }

        self.level -= 1;
        self.join_clauses(&clauses)
    }

    fn merge(&mut self, merge: &MergeStatement) -> String {
        let mut clauses = Vec::new();
        if let Some(with) = &merge.with {
            clauses.push(self.with_clause(with));
        }
        let indent = self.indent();
        self.level += 1;

        clauses.push(format!("{indent}merge into {}", self.update_target(&merge.target)));
        clauses.push(format!("{indent}using {}", self.from_element(&merge.using)));
        clauses.push(format!("{indent}on {}", self.expr(&merge.on)));
        for when in merge.when.iter() {
            clauses.push(format!("{indent}{}", self.merge_when(when)));
        }
        if !merge.returning.is_empty() {
            let targets = self.targets(&merge.returning);
            clauses.push(self.implode(&format!("{indent}returning "), &targets, ","));
        }

        self.level -= 1;
        self.join_clauses(&clauses)
    }

    fn merge_when(&mut self, clause: &MergeWhenClause) -> String {
        let mut sql = match clause.matched() {
            MergeMatch::Matched => "when matched",
            MergeMatch::NotMatchedBySource => "when not matched by source",
            MergeMatch::NotMatched => "when not matched",
        }
        .to_string();
        if let Some(condition) = &clause.condition {
            sql.push_str(" and ");
            sql.push_str(&self.expr(condition));
        }
        sql.push_str(" then");

        self.level += 1;
        let indent = self.indent();
        let action = match clause.action() {
            None => format!("{indent}do nothing"),
            Some(MergeWhenAction::Delete) => format!("{indent}delete"),
            Some(MergeWhenAction::Update(set)) => {
                let set = self.set_clauses(set);
                self.implode(&format!("{indent}update set "), &set, ",")
            }
            Some(MergeWhenAction::Insert(insert)) => self.merge_insert(insert, &indent),
        };
        self.level -= 1;

        format!("{sql}{}{action}", self.line_or_space())
    }

    fn merge_insert(&mut self, insert: &MergeInsert, indent: &str) -> String {
        let Some(values) = &insert.values else {
            return format!("{indent}insert default values");
        };
        let mut sql = if insert.columns.is_empty() {
            format!("{indent}insert")
        } else {
            let columns = self.set_targets(&insert.columns);
            format!("{})", self.implode(&format!("{indent}insert ("), &columns, ","))
        };
        if let Some(overriding) = &insert.overriding {
            let _ = write!(sql, " overriding {} value", overriding.as_str());
        }
        let values = self.exprs(values);
        format!(
            "{sql}{}{})",
            self.line_or_space(),
            self.implode(&format!("{indent}values ("), &values, ",")
        )
    }

    fn on_conflict(&mut self, clause: &OnConflictClause) -> String {
        let mut sql = match &clause.target {
            None => String::new(),
            Some(ConflictTarget::Constraint(name)) => {
                format!("on constraint {} ", self.identifier(name))
            }
            Some(ConflictTarget::Index(parameters)) => {
                format!("{} ", self.index_parameters(parameters))
            }
        };
        match &clause.action {
            ConflictAction::Nothing => {
                sql.push_str("do nothing");
                sql
            }
            ConflictAction::Update { set, where_clause } => {
                sql.push_str("do update");
                self.level += 1;
                let indent = self.indent();
                let set = self.set_clauses(set);
                let mut lines = vec![sql, self.implode(&format!("{indent}set "), &set, ",")];
                if let Some(condition) = &where_clause.condition {
                    lines.push(format!("{indent}where {}", self.condition(condition)));
                }
                self.level -= 1;
                self.join_clauses(&lines)
            }
        }
    }

    fn index_parameters(&mut self, parameters: &IndexParameters) -> String {
        let elements: Vec<String> = parameters
            .elements
            .iter()
            .map(|element| self.index_element(element))
            .collect();
        let mut sql = format!("({})", elements.join(", "));
        if let Some(condition) = &parameters.where_clause.condition {
            sql.push_str(" where ");
            sql.push_str(&self.condition(condition));
        }
        sql
    }

    fn index_element(&mut self, element: &IndexElement) -> String {
        let mut sql = match &element.target {
            IndexTarget::Column(name) => self.identifier(name),
            IndexTarget::Expression(expr) => format!("({})", self.expr(expr)),
        };
        if let Some(collation) = &element.collation {
            sql.push_str(" collate ");
            sql.push_str(&self.qualified_name(collation));
        }
        if let Some(opclass) = &element.opclass {
            sql.push(' ');
            sql.push_str(&self.qualified_name(opclass));
        }
        if let Some(direction) = &element.direction {
            sql.push(' ');
            sql.push_str(direction.as_str());
        }
        if let Some(nulls) = &element.nulls {
            sql.push_str(" nulls ");
            sql.push_str(nulls.as_str());
        }
        sql
    }

    fn with_clause(&mut self, with: &WithClause) -> String {
        let lead = format!(
            "{}with {}",
            self.indent(),
            if with.recursive { "recursive " } else { "" }
        );
        let ctes: Vec<String> = with
            .ctes
            .iter()
            .map(|cte| self.common_table_expression(cte))
            .collect();
        self.implode(&lead, &ctes, ",")
    }

    fn common_table_expression(&mut self, cte: &CommonTableExpression) -> String {
        let indent = self.indent();
        let linebreak = self.linebreak();

        let mut sql = self.identifier(&cte.name);
        if !cte.columns.is_empty() {
            let _ = write!(sql, " ({})", self.identifiers(&cte.columns));
        }
        sql.push_str(match cte.materialized {
            Some(true) => " as materialized (",
            Some(false) => " as not materialized (",
            None => " as (",
        });
        self.level += 1;
        let statement = self.statement(&cte.statement);
        self.level -= 1;
        let _ = write!(sql, "{linebreak}{statement}{linebreak}{indent})");

        let mut trailing = Vec::new();
        if let Some(search) = &cte.search {
            trailing.push(format!(
                "search {} first by {} set {}",
                if search.breadth_first { "breadth" } else { "depth" },
                self.identifiers(&search.columns),
                self.identifier(&search.sequence_column)
            ));
        }
        if let Some(cycle) = &cte.cycle {
            let mut clause = format!(
                "cycle {} set {}",
                self.identifiers(&cycle.columns),
                self.identifier(&cycle.mark_column)
            );
            if let (Some(value), Some(default)) = (&cycle.mark_value, &cycle.mark_default) {
                let _ = write!(clause, " to {} default {}", self.expr(value), self.expr(default));
            }
            let _ = write!(clause, " using {}", self.identifier(&cycle.path_column));
            trailing.push(clause);
        }
        if !trailing.is_empty() {
            sql.push(' ');
            sql.push_str(&trailing.join(&format!("{linebreak}{indent}")));
        }
        sql
    }

    // ====================================================================
    // FROM items and targets
    // ====================================================================

    fn from_list(&mut self, list: &[FromElement]) -> Vec<String> {
        list.iter().map(|element| self.from_element(element)).collect()
    }

    fn from_element(&mut self, element: &FromElement) -> String {
        match element {
            FromElement::Relation(relation) => self.relation_reference(relation),
            FromElement::Function(range) => format!(
                "{}{}{}{}",
                if range.lateral { "lateral " } else { "" },
                self.function_in_from(&range.function),
                if range.with_ordinality { " with ordinality" } else { "" },
                self.alias(range.alias.as_ref())
            ),
            FromElement::RowsFrom(rows_from) => {
                let functions: Vec<String> = rows_from
                    .functions
                    .iter()
                    .map(|element| self.rows_from_element(element))
                    .collect();
                format!(
                    "{}rows from({}){}{}",
                    if rows_from.lateral { "lateral " } else { "" },
                    functions.join(", "),
                    if rows_from.with_ordinality { " with ordinality" } else { "" },
                    self.alias(rows_from.alias.as_ref())
                )
            }
            FromElement::Subselect(subselect) => {
                let prefix = if subselect.lateral { "lateral " } else { "" };
                let sql = self.nested_query(prefix, &subselect.query);
                format!("{sql}{}", self.alias(subselect.alias.as_ref()))
            }
            FromElement::Join(join) => self.join(join),
            FromElement::TableSample(sample) => {
                let mut sql = format!(
                    "{} tablesample {} ({})",
                    self.relation_reference(&sample.relation),
                    self.qualified_name(&sample.method),
                    self.expr_list(&sample.arguments)
                );
                if let Some(repeatable) = &sample.repeatable {
                    let _ = write!(sql, " repeatable ({})", self.expr(repeatable));
                }
                sql
            }
        }
    }

    fn join(&mut self, join: &JoinExpression) -> String {
        let mut sql = self.from_element(&join.left);
        if join.natural {
            sql.push_str(" natural");
        }
        let _ = write!(sql, " {} join ", join.join_type.as_str());
        let right = self.from_element(&join.right);
        match &join.right {
            FromElement::Join(inner) if inner.alias.is_none() => {
                let _ = write!(sql, "({right})");
            }
            _ => sql.push_str(&right),
        }
        match &join.condition {
            Some(JoinCondition::On(condition)) => {
                sql.push_str(" on ");
                sql.push_str(&self.expr(condition));
            }
            Some(JoinCondition::Using(using)) => {
                let _ = write!(sql, " using ({})", self.identifiers(&using.columns));
                if let Some(alias) = &using.alias {
                    let _ = write!(sql, " as {}", self.identifier(alias));
                }
            }
            None => {}
        }
        match &join.alias {
            Some(alias) => format!("({sql}){}", self.alias(Some(alias))),
            None => sql,
        }
    }

    fn relation_reference(&self, relation: &RelationReference) -> String {
        format!(
            "{}{}{}{}",
            if relation.inherit == Some(false) { "only " } else { "" },
            self.qualified_name(&relation.name),
            if relation.inherit == Some(true) { " *" } else { "" },
            self.alias(relation.alias.as_ref())
        )
    }

    /// Function calls in `FROM` take `CAST(...)` rather than `::`.
    fn function_in_from(&mut self, function: &Expr) -> String {
        match function {
            Expr::Typecast(typecast) => format!(
                "cast({} as {})",
                self.expr(&typecast.argument),
                self.type_name(&typecast.type_name)
            ),
            other => self.expr(other),
        }
    }

    fn rows_from_element(&mut self, element: &RowsFromElement) -> String {
        let mut sql = self.function_in_from(&element.function);
        if !element.column_definitions.is_empty() {
            let _ = write!(
                sql,
                " as ({})",
                self.column_definitions(&element.column_definitions)
            );
        }
        sql
    }

    fn alias(&self, alias: Option<&Alias>) -> String {
        let Some(alias) = alias else {
            return String::new();
        };
        let mut sql = String::from(" as");
        if let Some(name) = &alias.name {
            sql.push(' ');
            sql.push_str(&self.identifier(name));
        }
        match &alias.columns {
            Some(AliasColumns::Names(names)) => {
                let _ = write!(sql, " ({})", self.identifiers(names));
            }
            Some(AliasColumns::Definitions(definitions)) => {
                let _ = write!(sql, " ({})", self.column_definitions(definitions));
            }
            None => {}
        }
        sql
    }

    fn column_definitions(&self, definitions: &[ColumnDefinition]) -> String {
        definitions
            .iter()
            .map(|definition| {
                let mut sql = format!(
                    "{} {}",
                    self.identifier(&definition.name),
                    self.type_name(&definition.type_name)
                );
                if let Some(collation) = &definition.collation {
                    let _ = write!(sql, " collate {}", self.qualified_name(collation));
                }
                sql
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn insert_target(&self, target: &InsertTarget) -> String {
        let mut sql = self.qualified_name(&target.relation);
        if let Some(alias) = &target.alias {
            let _ = write!(sql, " as {}", self.identifier(alias));
        }
        sql
    }

    fn update_target(&self, target: &UpdateOrDeleteTarget) -> String {
        let mut sql = format!(
            "{}{}{}",
            if target.inherit == Some(false) { "only " } else { "" },
            self.qualified_name(&target.relation),
            if target.inherit == Some(true) { " *" } else { "" }
        );
        if let Some(alias) = &target.alias {
            let _ = write!(sql, " as {}", self.identifier(alias));
        }
        sql
    }

    fn targets(&mut self, targets: &[TargetElement]) -> Vec<String> {
        targets
            .iter()
            .map(|target| self.target_element(target))
            .collect()
    }

    fn target_element(&mut self, target: &TargetElement) -> String {
        let sql = self.expr(&target.expression);
        match &target.alias {
            Some(alias) => format!("{sql} as {}", self.identifier(alias)),
            None => sql,
        }
    }

    // ====================================================================
    // Clauses
    // ====================================================================

    fn order_by_items(&mut self, items: &[OrderByElement]) -> Vec<String> {
        items
            .iter()
            .map(|item| self.order_by_element(item))
            .collect()
    }

    fn order_by_element(&mut self, element: &OrderByElement) -> String {
        let mut sql = self.expr(&element.expression);
        match &element.direction {
            Some(OrderDirection::Asc) => sql.push_str(" asc"),
            Some(OrderDirection::Desc) => sql.push_str(" desc"),
            Some(OrderDirection::Using(operator)) => {
                let _ = write!(sql, " using {}", self.operator(operator));
            }
            None => {}
        }
        if let Some(nulls) = &element.nulls {
            let _ = write!(sql, " nulls {}", nulls.as_str());
        }
        sql
    }

    fn set_clauses(&mut self, clauses: &[SetClause]) -> Vec<String> {
        clauses
            .iter()
            .map(|clause| match clause {
                SetClause::Single { column, value } => {
                    format!("{} = {}", self.set_target(column), self.expr(value))
                }
                SetClause::Multiple { columns, value } => format!(
                    "({}) = {}",
                    self.set_targets(columns).join(", "),
                    self.expr(value)
                ),
            })
            .collect()
    }

    fn set_targets(&mut self, targets: &[SetTargetElement]) -> Vec<String> {
        targets
            .iter()
            .map(|target| self.set_target(target))
            .collect()
    }

    fn set_target(&mut self, target: &SetTargetElement) -> String {
        let mut sql = self.identifier(&target.name);
        for item in target.indirection.iter() {
            sql.push_str(&self.indirection_item(item));
        }
        sql
    }

    fn indirection_item(&mut self, item: &IndirectionItem) -> String {
        match item {
            IndirectionItem::Field(name) => format!(".{}", self.identifier(name)),
            IndirectionItem::Star => ".*".to_string(),
            IndirectionItem::Index(indexes) => self.array_indexes(indexes),
        }
    }

    fn array_indexes(&mut self, indexes: &ArrayIndexes) -> String {
        let mut sql = String::from("[");
        if let Some(lower) = &indexes.lower {
            sql.push_str(&self.expr(lower));
        }
        if indexes.is_slice {
            sql.push_str(" : ");
        }
        if let Some(upper) = &indexes.upper {
            sql.push_str(&self.expr(upper));
        }
        sql.push(']');
        sql
    }

    fn grouping_element(&mut self, element: &GroupingElement) -> String {
        match element {
            GroupingElement::Expression(expr) => self.expr(expr),
            GroupingElement::Empty => "()".to_string(),
            GroupingElement::Cube(items) => format!("cube({})", self.expr_list(items)),
            GroupingElement::Rollup(items) => format!("rollup({})", self.expr_list(items)),
            GroupingElement::Sets(items) => {
                let items: Vec<String> = items
                    .iter()
                    .map(|item| self.grouping_element(item))
                    .collect();
                format!("grouping sets({})", items.join(", "))
            }
        }
    }

    fn locking_element(&self, element: &LockingElement) -> String {
        let mut sql = format!("for {}", element.strength.as_str());
        if !element.relations.is_empty() {
            let relations: Vec<String> = element
                .relations
                .iter()
                .map(|name| self.qualified_name(name))
                .collect();
            let _ = write!(sql, " of {}", relations.join(", "));
        }
        match element.wait_policy {
            Some(LockWaitPolicy::Nowait) => sql.push_str(" nowait"),
            Some(LockWaitPolicy::SkipLocked) => sql.push_str(" skip locked"),
            None => {}
        }
        sql
    }

    fn window_definition(&mut self, window: &WindowDefinition) -> String {
        let mut parts = Vec::new();
        if let Some(ref_name) = &window.ref_name {
            parts.push(self.identifier(ref_name));
        }
        if !window.partition.is_empty() {
            parts.push(format!("partition by {}", self.expr_list(&window.partition)));
        }
        if !window.order_by.is_empty() {
            parts.push(format!(
                "order by {}",
                self.order_by_items(&window.order_by).join(", ")
            ));
        }
        if let Some(frame) = &window.frame {
            parts.push(self.frame(frame));
        }
        let body = format!("({})", parts.join(" "));
        match &window.name {
            Some(name) => format!("{} as {body}", self.identifier(name)),
            None => body,
        }
    }

    /// `OVER w` for a bare reference, `OVER (...)` otherwise.
    fn over(&mut self, window: &WindowDefinition) -> String {
        match &window.ref_name {
            Some(ref_name)
                if window.name.is_none()
                    && window.partition.is_empty()
                    && window.order_by.is_empty()
                    && window.frame.is_none() =>
            {
                format!(" over {}", self.identifier(ref_name))
            }
            _ => format!(" over {}", self.window_definition(window)),
        }
    }

    fn frame(&mut self, frame: &WindowFrameClause) -> String {
        let mut sql = match frame.end() {
            Some(end) => format!(
                "{} between {} and {}",
                frame.mode().as_str(),
                self.frame_bound(frame.start()),
                self.frame_bound(end)
            ),
            None => format!("{} {}", frame.mode().as_str(), self.frame_bound(frame.start())),
        };
        if let Some(exclusion) = frame.exclusion() {
            let _ = write!(sql, " exclude {}", exclusion.as_str());
        }
        sql
    }

    fn frame_bound(&mut self, bound: &WindowFrameBound) -> String {
        match (&bound.value, bound.direction) {
            (Some(value), direction) => format!("{} {}", self.expr(value), direction.as_str()),
            (None, FrameDirection::CurrentRow) => "current row".to_string(),
            (None, direction) => format!("unbounded {}", direction.as_str()),
        }
    }

    // ====================================================================
    // Names, types and constants
    // ====================================================================

    fn name(&self, value: &str) -> String {
        if is_bare_identifier(value) {
            value.to_string()
        } else if self.options.escape_unicode && !value.is_ascii() {
            unicode_identifier(value)
        } else {
            format!("\"{}\"", value.replace('"', "\"\""))
        }
    }

    fn identifier(&self, identifier: &Identifier) -> String {
        self.name(identifier.as_str())
    }

    fn identifiers(&self, identifiers: &[Identifier]) -> String {
        identifiers
            .iter()
            .map(|identifier| self.identifier(identifier))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn qualified_name(&self, name: &QualifiedName) -> String {
        name.parts()
            .into_iter()
            .map(|part| self.identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn qualified_operator(&self, operator: &QualifiedOperator) -> String {
        let mut sql = String::from("operator(");
        for part in operator.catalog.iter().chain(operator.schema.iter()) {
            sql.push_str(&self.identifier(part));
            sql.push('.');
        }
        sql.push_str(&operator.operator);
        sql.push(')');
        sql
    }

    fn operator(&self, operator: &Operator) -> String {
        match operator {
            Operator::Symbol(symbol) => symbol.clone(),
            Operator::Qualified(qualified) => self.qualified_operator(qualified),
        }
    }

    fn type_modifiers(&self, modifiers: &[TypeModifier]) -> String {
        modifiers
            .iter()
            .map(|modifier| match modifier {
                TypeModifier::Constant(constant) => self.constant(constant),
                TypeModifier::Identifier(identifier) => self.identifier(identifier),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn type_name(&self, type_name: &TypeName) -> String {
        let mut sql = String::new();
        if type_name.setof {
            sql.push_str("setof ");
        }
        match &type_name.kind {
            TypeNameKind::Named(name) => sql.push_str(&self.qualified_name(name)),
            TypeNameKind::Interval(mask) => {
                sql.push_str("interval");
                if let Some(mask) = mask {
                    sql.push(' ');
                    sql.push_str(mask.as_str());
                }
            }
        }
        if !type_name.modifiers.is_empty() {
            let _ = write!(sql, "({})", self.type_modifiers(&type_name.modifiers));
        }
        for bound in &type_name.bounds {
            if *bound == -1 {
                sql.push_str("[]");
            } else {
                let _ = write!(sql, "[{bound}]");
            }
        }
        sql
    }

    fn string_constant(&self, value: &str) -> String {
        if self.options.escape_unicode && !value.is_ascii() {
            escaped_string(value)
        } else {
            plain_string(value)
        }
    }

    fn constant(&self, constant: &Constant) -> String {
        match constant {
            Constant::Null => "null".to_string(),
            Constant::True => "true".to_string(),
            Constant::False => "false".to_string(),
            Constant::Numeric(value) => value.clone(),
            Constant::String(value) => self.string_constant(value),
            Constant::BinaryString(value) => format!("b'{value}'"),
            Constant::HexString(value) => format!("x'{value}'"),
        }
    }

    // ====================================================================
    // Expressions
    // ====================================================================

    fn regimes(&self) -> &'static [Precedence] {
        match self.options.parentheses {
            Parentheses::Current => &[Precedence::Current],
            Parentheses::Compat => &[Precedence::Current, Precedence::Legacy],
        }
    }

    fn needs_parentheses(&self, argument: &Expr, enclosing: Enclosing<'_>, right: bool) -> bool {
        self.regimes()
            .iter()
            .any(|regime| precedence::needs_parentheses(argument, enclosing, right, *regime))
    }

    fn binds_looser(&self, expr: &Expr, level: u16) -> bool {
        self.regimes()
            .iter()
            .any(|regime| precedence::binding(expr, *regime).precedence < level)
    }

    /// Renders an argument of `parent`, parenthesized if needed.
    fn operand(&mut self, argument: &Expr, parent: &Expr, right: bool) -> String {
        let sql = self.expr(argument);
        if self.needs_parentheses(argument, Enclosing::Expr(parent), right) {
            format!("({sql})")
        } else {
            sql
        }
    }

    fn restricted_operand(&mut self, argument: &Expr, right: bool) -> String {
        let sql = self.expr(argument);
        if self.needs_parentheses(argument, Enclosing::Restricted, right) {
            format!("({sql})")
        } else {
            sql
        }
    }

    fn exprs(&mut self, list: &[Expr]) -> Vec<String> {
        list.iter().map(|expr| self.expr(expr)).collect()
    }

    fn expr_list(&mut self, list: &[Expr]) -> String {
        self.exprs(list).join(", ")
    }

    /// A `WHERE`/`HAVING` condition: `AND`/`OR` chains go one item per line.
    fn condition(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Logical(logical) => self.logical(logical, true),
            other => self.expr(other),
        }
    }

    fn logical(&mut self, logical: &LogicalExpr, verbose: bool) -> String {
        let own = match logical.operator {
            LogicalOp::And => AND,
            LogicalOp::Or => OR,
        };
        let operator = logical.operator.as_str();
        let delimiter = if verbose {
            format!("{}{}{operator} ", self.line_or_space(), self.indent())
        } else {
            format!(" {operator} ")
        };

        let mut items = Vec::with_capacity(logical.items.len());
        for item in logical.items.iter() {
            // nested chains of the same operator keep their parentheses
            let wrap = self.binds_looser(item, own + 1);
            let sql = match item {
                Expr::Logical(inner) if verbose && wrap => {
                    let indent = self.indent();
                    let linebreak = self.linebreak();
                    self.level += 1;
                    let inner_indent = self.indent();
                    let sql = self.logical(inner, true);
                    self.level -= 1;
                    format!("({linebreak}{inner_indent}{sql}{linebreak}{indent})")
                }
                Expr::Logical(inner) if verbose => self.logical(inner, true),
                other if wrap => format!("({})", self.expr(other)),
                other => self.expr(other),
            };
            items.push(sql);
        }
        items.join(&delimiter)
    }

    #[allow(clippy::too_many_lines)]
    fn expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Constant(constant) => self.constant(constant),
            Expr::Parameter(Parameter::Named(name)) => format!(":{name}"),
            Expr::Parameter(Parameter::Positional(position)) => format!("${position}"),
            Expr::ColumnRef(column) => {
                let mut parts: Vec<String> = column
                    .qualifiers
                    .iter()
                    .map(|part| self.identifier(part))
                    .collect();
                parts.push(match &column.column {
                    ColumnName::Name(name) => self.identifier(name),
                    ColumnName::Star => "*".to_string(),
                });
                parts.join(".")
            }
            Expr::Indirection(indirection) => {
                let mut sql = self.operand(&indirection.base, expr, false);
                for item in indirection.items.iter() {
                    sql.push_str(&self.indirection_item(item));
                }
                sql
            }
            Expr::Row(row) => self.row(row),
            Expr::Array(array) => format!("array{}", self.array_items(array)),
            Expr::Subselect(subselect) => {
                let prefix = subselect.operator.map_or("", |operator| operator.as_str());
                self.nested_query(prefix, &subselect.query)
            }
            Expr::ArrayComparison(comparison) => {
                format!("{}({})", comparison.kind.as_str(), self.expr(&comparison.array))
            }
            Expr::Function(function) => self.function_call(function),
            Expr::SqlValueFunction(function) => match function.precision {
                Some(precision) => format!("{}({precision})", function.name.as_str()),
                None => function.name.as_str().to_string(),
            },
            Expr::SystemFunction(function) => format!(
                "{}({})",
                function.name.as_str(),
                self.expr_list(&function.arguments)
            ),
            Expr::Typecast(typecast) => format!(
                "{}::{}",
                self.operand(&typecast.argument, expr, false),
                self.type_name(&typecast.type_name)
            ),
            Expr::ConstantTypecast(typecast) => {
                let value = self.constant(&typecast.argument);
                let type_name = &typecast.type_name;
                let modifiers = if type_name.modifiers.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", self.type_modifiers(&type_name.modifiers))
                };
                match &type_name.kind {
                    TypeNameKind::Named(name) => {
                        format!("{}{modifiers} {value}", self.qualified_name(name))
                    }
                    TypeNameKind::Interval(None) => format!("interval{modifiers} {value}"),
                    TypeNameKind::Interval(Some(mask)) => {
                        format!("interval {value} {}{modifiers}", mask.as_str())
                    }
                }
            }
            Expr::Operator(operator) => {
                let symbol = self.operator(&operator.operator);
                match (&operator.left, &operator.right) {
                    (Some(left), Some(right)) => format!(
                        "{} {symbol} {}",
                        self.operand(left, expr, false),
                        self.operand(right, expr, true)
                    ),
                    (None, Some(right)) => format!("{symbol} {}", self.operand(right, expr, true)),
                    (Some(left), None) => format!("{} {symbol}", self.operand(left, expr, false)),
                    (None, None) => symbol,
                }
            }
            Expr::Logical(logical) => self.logical(logical, false),
            Expr::Not(argument) => format!("not {}", self.operand(argument, expr, true)),
            Expr::Between(between) => format!(
                "{}{} {} {} and {}",
                self.operand(&between.argument, expr, false),
                if between.not { " not" } else { "" },
                between.predicate.as_str(),
                self.operand(&between.left, expr, true),
                self.operand(&between.right, expr, true)
            ),
            Expr::In(in_expr) => {
                let left = self.operand(&in_expr.left, expr, false);
                let keyword = if in_expr.not { "not in" } else { "in" };
                let right = match &in_expr.right {
                    InList::Values(values) => format!("({})", self.expr_list(values)),
                    InList::Subselect(query) => self.nested_query("", query),
                };
                format!("{left} {keyword} {right}")
            }
            Expr::Pattern(pattern) => {
                let mut sql = format!(
                    "{} {}{} {}",
                    self.operand(&pattern.argument, expr, false),
                    if pattern.not { "not " } else { "" },
                    pattern.operator.as_str(),
                    self.operand(&pattern.pattern, expr, true)
                );
                if let Some(escape) = &pattern.escape {
                    let _ = write!(sql, " escape {}", self.operand(escape, expr, true));
                }
                sql
            }
            Expr::Is(is) => format!(
                "{} is {}{}",
                self.operand(&is.argument, expr, false),
                if is.not { "not " } else { "" },
                is.predicate.as_str()
            ),
            Expr::IsDistinctFrom(is) => format!(
                "{} is {}distinct from {}",
                self.operand(&is.left, expr, false),
                if is.not { "not " } else { "" },
                self.operand(&is.right, expr, true)
            ),
            Expr::IsOf(is) => {
                let types: Vec<String> = is.right.iter().map(|t| self.type_name(t)).collect();
                format!(
                    "{} is {}of ({})",
                    self.operand(&is.left, expr, false),
                    if is.not { "not " } else { "" },
                    types.join(", ")
                )
            }
            Expr::IsJson(is) => {
                let mut sql = format!(
                    "{} is {}json",
                    self.operand(&is.argument, expr, false),
                    if is.not { "not " } else { "" }
                );
                if let Some(json_type) = &is.json_type {
                    sql.push(' ');
                    sql.push_str(json_type.as_str());
                }
                if let Some(unique) = unique_keys(is.unique_keys) {
                    sql.push(' ');
                    sql.push_str(unique);
                }
                sql
            }
            Expr::Overlaps(overlaps) => format!(
                "{} overlaps {}",
                self.row(&overlaps.left),
                self.row(&overlaps.right)
            ),
            Expr::Case(case) => {
                let mut sql = String::from("case");
                if let Some(argument) = &case.argument {
                    sql.push(' ');
                    sql.push_str(&self.expr(argument));
                }
                for when in case.when.iter() {
                    let _ = write!(
                        sql,
                        " when {} then {}",
                        self.expr(&when.when),
                        self.expr(&when.then)
                    );
                }
                if let Some(else_clause) = &case.else_clause {
                    let _ = write!(sql, " else {}", self.expr(else_clause));
                }
                sql.push_str(" end");
                sql
            }
            Expr::Collate(collate) => format!(
                "{} collate {}",
                self.operand(&collate.argument, expr, false),
                self.qualified_name(&collate.collation)
            ),
            Expr::CollationFor(argument) => format!("collation for({})", self.expr(argument)),
            Expr::AtTimeZone(at) => format!(
                "{} at time zone {}",
                self.operand(&at.argument, expr, false),
                self.operand(&at.zone, expr, true)
            ),
            Expr::AtLocal(argument) => {
                format!("{} at local", self.operand(argument, expr, false))
            }
            Expr::Extract(extract) => {
                let field = match extract.field.as_str() {
                    field @ ("year" | "month" | "day" | "hour" | "minute" | "second") => {
                        field.to_string()
                    }
                    field => self.name(field),
                };
                format!("extract({field} from {})", self.expr(&extract.source))
            }
            Expr::Normalize(normalize) => match &normalize.form {
                Some(form) => format!(
                    "normalize({}, {})",
                    self.expr(&normalize.argument),
                    form.as_str()
                ),
                None => format!("normalize({})", self.expr(&normalize.argument)),
            },
            Expr::NullIf(nullif) => format!(
                "nullif({}, {})",
                self.expr(&nullif.first),
                self.expr(&nullif.second)
            ),
            Expr::Overlay(overlay) => {
                let mut sql = format!(
                    "overlay({} placing {} from {}",
                    self.expr(&overlay.string),
                    self.expr(&overlay.new_substring),
                    self.expr(&overlay.start)
                );
                if let Some(count) = &overlay.count {
                    let _ = write!(sql, " for {}", self.expr(count));
                }
                sql.push(')');
                sql
            }
            Expr::Position(position) => format!(
                "position({} in {})",
                self.restricted_operand(&position.substring, false),
                self.restricted_operand(&position.string, true)
            ),
            Expr::SubstringFrom(substring) => {
                let mut sql = format!("substring({}", self.expr(&substring.string));
                if let Some(from) = &substring.from {
                    let _ = write!(sql, " from {}", self.expr(from));
                }
                if let Some(count) = &substring.count {
                    let _ = write!(sql, " for {}", self.expr(count));
                }
                sql.push(')');
                sql
            }
            Expr::SubstringSimilar(substring) => format!(
                "substring({} similar {} escape {})",
                self.expr(&substring.string),
                self.expr(&substring.pattern),
                self.expr(&substring.escape)
            ),
            Expr::Trim(trim) => {
                let side = trim.side.as_str();
                match &trim.arguments[..] {
                    [string, characters] => format!(
                        "trim({side} {} from {})",
                        self.expr(characters),
                        self.expr(string)
                    ),
                    arguments => format!("trim({side} {})", self.expr_list(arguments)),
                }
            }
            Expr::Grouping(arguments) => format!("grouping({})", self.expr_list(arguments)),
            Expr::MergeAction => "merge_action()".to_string(),
            Expr::SetToDefault => "default".to_string(),
            Expr::Xml(xml) => self.xml(xml),
            Expr::Json(json) => self.json(json),
        }
    }

    fn row(&mut self, row: &RowExpr) -> String {
        let items = self.expr_list(&row.items);
        if row.items.len() < 2 {
            format!("row({items})")
        } else {
            format!("({items})")
        }
    }

    fn array_items(&mut self, array: &ArrayExpr) -> String {
        let items: Vec<String> = array
            .items
            .iter()
            .map(|item| match item {
                Expr::Array(inner) => self.array_items(inner),
                other => self.expr(other),
            })
            .collect();
        format!("[{}]", items.join(", "))
    }

    fn function_call(&mut self, function: &FunctionCall) -> String {
        let name = self.qualified_name(&function.name);
        let mut arguments = if function.arguments.is_star() {
            vec!["*".to_string()]
        } else {
            self.exprs(function.arguments.positional_arguments())
        };
        for (argument_name, value) in function.arguments.named_arguments() {
            arguments.push(format!("{} := {}", self.identifier(argument_name), self.expr(value)));
        }
        if function.variadic {
            if let Some(last) = arguments.last_mut() {
                last.insert_str(0, "variadic ");
            }
        }
        let distinct = if function.distinct { "distinct " } else { "" };
        let order_by = self.order_by_items(&function.order_by).join(", ");

        let mut sql = if function.within_group {
            format!(
                "{name}({distinct}{}) within group (order by {order_by})",
                arguments.join(", ")
            )
        } else if order_by.is_empty() {
            format!("{name}({distinct}{})", arguments.join(", "))
        } else {
            format!("{name}({distinct}{} order by {order_by})", arguments.join(", "))
        };
        sql.push_str(&self.aggregate_suffix(function.filter.as_ref(), function.over.as_ref()));
        sql
    }

    fn aggregate_suffix(&mut self, filter: Option<&Expr>, over: Option<&WindowDefinition>) -> String {
        let mut sql = String::new();
        if let Some(filter) = filter {
            let _ = write!(sql, " filter (where {})", self.expr(filter));
        }
        if let Some(over) = over {
            sql.push_str(&self.over(over));
        }
        sql
    }

    // ====================================================================
    // XML
    // ====================================================================

    fn xml(&mut self, xml: &XmlExpr) -> String {
        match xml {
            XmlExpr::Element(element) => {
                let mut sql = format!("xmlelement(name {}", self.identifier(&element.name));
                if !element.attributes.is_empty() {
                    let attributes = self.targets(&element.attributes);
                    let _ = write!(sql, ", xmlattributes({})", attributes.join(", "));
                }
                if !element.content.is_empty() {
                    let _ = write!(sql, ", {}", self.expr_list(&element.content));
                }
                sql.push(')');
                sql
            }
            XmlExpr::Exists(exists) => format!(
                "xmlexists({} passing {})",
                self.restricted_operand(&exists.xpath, false),
                self.restricted_operand(&exists.xml, true)
            ),
            XmlExpr::Forest(targets) => {
                format!("xmlforest({})", self.targets(targets).join(", "))
            }
            XmlExpr::Parse(parse) => format!(
                "xmlparse({} {}{})",
                parse.option.as_str(),
                self.expr(&parse.argument),
                if parse.preserve_whitespace { " preserve whitespace" } else { "" }
            ),
            XmlExpr::Pi(pi) => {
                let mut sql = format!("xmlpi(name {}", self.identifier(&pi.name));
                if let Some(content) = &pi.content {
                    let _ = write!(sql, ", {}", self.expr(content));
                }
                sql.push(')');
                sql
            }
            XmlExpr::Root(root) => {
                let mut sql = format!("xmlroot({}, version ", self.expr(&root.xml));
                match &root.version {
                    Some(version) => sql.push_str(&self.expr(version)),
                    None => sql.push_str("no value"),
                }
                if let Some(standalone) = &root.standalone {
                    let _ = write!(sql, ", standalone {}", standalone.as_str());
                }
                sql.push(')');
                sql
            }
            XmlExpr::Serialize(serialize) => format!(
                "xmlserialize({} {} as {}{})",
                serialize.option.as_str(),
                self.expr(&serialize.argument),
                self.type_name(&serialize.type_name),
                match serialize.indent {
                    Some(true) => " indent",
                    Some(false) => " no indent",
                    None => "",
                }
            ),
        }
    }

    // ====================================================================
    // SQL/JSON
    // ====================================================================

    fn json_format(format: &JsonFormat) -> String {
        match &format.encoding {
            Some(encoding) => format!("format json encoding {}", encoding.as_str()),
            None => "format json".to_string(),
        }
    }

    fn json_returning(&self, returning: Option<&JsonReturning>) -> Option<String> {
        returning.map(|returning| {
            let mut sql = format!("returning {}", self.type_name(&returning.type_name));
            if let Some(format) = &returning.format {
                sql.push(' ');
                sql.push_str(&Self::json_format(format));
            }
            sql
        })
    }

    fn json_value(&mut self, value: &JsonFormattedValue) -> String {
        let mut sql = self.expr(&value.expression);
        if let Some(format) = &value.format {
            sql.push(' ');
            sql.push_str(&Self::json_format(format));
        }
        sql
    }

    fn json_key_value(&mut self, key_value: &JsonKeyValue) -> String {
        format!(
            "{} : {}",
            self.expr(&key_value.key),
            self.json_value(&key_value.value)
        )
    }

    fn json_behaviour(&mut self, behaviour: Option<&JsonBehaviour>, event: &str) -> String {
        match behaviour {
            None => String::new(),
            Some(JsonBehaviour::Default(expr)) => {
                format!(" default {} on {event}", self.expr(expr))
            }
            Some(other) => format!(" {} on {event}", other.keyword().unwrap_or_default()),
        }
    }

    fn json_query_common(&mut self, common: &JsonQueryCommon) -> String {
        let mut sql = format!(
            "{}, {}",
            self.json_value(&common.context),
            self.expr(&common.path)
        );
        if !common.passing.is_empty() {
            let arguments: Vec<String> = common
                .passing
                .iter()
                .map(|argument: &JsonArgument| {
                    format!(
                        "{} as {}",
                        self.json_value(&argument.value),
                        self.identifier(&argument.alias)
                    )
                })
                .collect();
            let _ = write!(sql, " passing {}", arguments.join(", "));
        }
        sql
    }

    #[allow(clippy::too_many_lines)]
    fn json(&mut self, json: &JsonExpr) -> String {
        match json {
            JsonExpr::ArrayAgg(agg) => {
                let value = self.json_value(&agg.value);
                let order_by = if agg.order_by.is_empty() {
                    None
                } else {
                    Some(format!(
                        "order by {}",
                        self.order_by_items(&agg.order_by).join(", ")
                    ))
                };
                let body = join_pieces(vec![
                    Some(value),
                    order_by,
                    on_null(agg.absent_on_null).map(str::to_string),
                    self.json_returning(agg.returning.as_ref()),
                ]);
                let suffix = self.aggregate_suffix(agg.filter.as_ref(), agg.over.as_ref());
                format!("json_arrayagg({body}){suffix}")
            }
            JsonExpr::ObjectAgg(agg) => {
                let key_value = self.json_key_value(&agg.key_value);
                let body = join_pieces(vec![
                    Some(key_value),
                    on_null(agg.absent_on_null).map(str::to_string),
                    unique_keys(agg.unique_keys).map(str::to_string),
                    self.json_returning(agg.returning.as_ref()),
                ]);
                let suffix = self.aggregate_suffix(agg.filter.as_ref(), agg.over.as_ref());
                format!("json_objectagg({body}){suffix}")
            }
            JsonExpr::Array(array) => {
                let values: Vec<String> = array
                    .values
                    .iter()
                    .map(|value| self.json_value(value))
                    .collect();
                let body = join_pieces(vec![
                    (!values.is_empty()).then(|| values.join(", ")),
                    on_null(array.absent_on_null).map(str::to_string),
                    self.json_returning(array.returning.as_ref()),
                ]);
                format!("json_array({body})")
            }
            JsonExpr::ArraySubselect(array) => {
                let format = array.format.as_ref().map(Self::json_format);
                let returning = self.json_returning(array.returning.as_ref());
                if format.is_none() && returning.is_none() {
                    return self.nested_query("json_array", &array.query);
                }
                // parenthesized so a trailing FORMAT is not taken for an alias
                let query = self.nested_query("", &array.query);
                format!(
                    "json_array({})",
                    join_pieces(vec![Some(query), format, returning])
                )
            }
            JsonExpr::Object(object) => {
                let arguments: Vec<String> = object
                    .arguments
                    .iter()
                    .map(|argument| self.json_key_value(argument))
                    .collect();
                let body = join_pieces(vec![
                    (!arguments.is_empty()).then(|| arguments.join(", ")),
                    on_null(object.absent_on_null).map(str::to_string),
                    unique_keys(object.unique_keys).map(str::to_string),
                    self.json_returning(object.returning.as_ref()),
                ]);
                format!("json_object({body})")
            }
            JsonExpr::Constructor(constructor) => {
                let body = join_pieces(vec![
                    Some(self.json_value(&constructor.value)),
                    unique_keys(constructor.unique_keys).map(str::to_string),
                ]);
                format!("json({body})")
            }
            JsonExpr::Scalar(expr) => format!("json_scalar({})", self.expr(expr)),
            JsonExpr::Serialize(serialize) => {
                let body = join_pieces(vec![
                    Some(self.json_value(&serialize.value)),
                    self.json_returning(serialize.returning.as_ref()),
                ]);
                format!("json_serialize({body})")
            }
            JsonExpr::Exists(exists) => {
                let common = self.json_query_common(&exists.common);
                let on_error = self.json_behaviour(exists.on_error.as_ref(), "error");
                format!("json_exists({common}{on_error})")
            }
            JsonExpr::Value(value) => {
                let mut sql = format!("json_value({}", self.json_query_common(&value.common));
                if let Some(returning) = self.json_returning(value.returning.as_ref()) {
                    sql.push(' ');
                    sql.push_str(&returning);
                }
                sql.push_str(&self.json_behaviour(value.on_empty.as_ref(), "empty"));
                sql.push_str(&self.json_behaviour(value.on_error.as_ref(), "error"));
                sql.push(')');
                sql
            }
            JsonExpr::Query(query) => {
                let mut sql = format!("json_query({}", self.json_query_common(&query.common));
                if let Some(returning) = self.json_returning(query.returning.as_ref()) {
                    sql.push(' ');
                    sql.push_str(&returning);
                }
                if let Some(wrapper) = &query.wrapper {
                    let _ = write!(sql, " {} wrapper", wrapper.as_str());
                }
                match query.keep_quotes {
                    Some(true) => sql.push_str(" keep quotes"),
                    Some(false) => sql.push_str(" omit quotes"),
                    None => {}
                }
                sql.push_str(&self.json_behaviour(query.on_empty.as_ref(), "empty"));
                sql.push_str(&self.json_behaviour(query.on_error.as_ref(), "error"));
                sql.push(')');
                sql
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Parser, ParserConfig};

    fn compact(sql: &str) -> String {
        let statement = Parser::new().parse_statement(sql).unwrap();
        SqlBuilder::with_options(BuilderOptions::compact()).build(&statement)
    }

    fn expression(sql: &str, parentheses: Parentheses) -> String {
        let expr = Parser::new().parse_expression(sql).unwrap();
        let options = BuilderOptions {
            parentheses,
            ..BuilderOptions::compact()
        };
        SqlBuilder::with_options(options).build_expression(&expr)
    }

    // ====================================================================
    // Parentheses
    // ====================================================================

    #[test]
    fn test_redundant_parentheses_are_dropped() {
        assert_eq!(expression("(a + b) * c", Parentheses::Current), "(a + b) * c");
        assert_eq!(expression("a + (b * c)", Parentheses::Current), "a + b * c");
        assert_eq!(expression("((a))", Parentheses::Current), "a");
        assert_eq!(expression("a - (b - c)", Parentheses::Current), "a - (b - c)");
    }

    #[test]
    fn test_comparison_parentheses_depend_on_mode() {
        assert_eq!(
            expression("false = true is null", Parentheses::Current),
            "false = true is null"
        );
        assert_eq!(
            expression("false = true is null", Parentheses::Compat),
            "(false = true) is null"
        );
        assert_eq!(
            expression("j ->> 'space' <= j ->> 'node'", Parentheses::Current),
            "j ->> 'space' <= j ->> 'node'"
        );
        assert_eq!(
            expression("j ->> 'space' <= j ->> 'node'", Parentheses::Compat),
            "j ->> 'space' <= (j ->> 'node')"
        );
    }

    #[test]
    fn test_non_associative_comparisons_keep_parentheses() {
        assert_eq!(expression("foo = (bar = baz)", Parentheses::Current), "foo = (bar = baz)");
        assert_eq!(expression("(a >= b) <= c", Parentheses::Current), "(a >= b) <= c");
        assert_eq!(expression("(2 < 3) = true", Parentheses::Compat), "(2 < 3) = true");
    }

    #[test]
    fn test_negative_literal_in_typecast() {
        assert_eq!(expression("(-1)::int", Parentheses::Current), "(-1)::pg_catalog.int4");
    }

    #[test]
    fn test_nested_logical_expressions() {
        assert_eq!(expression("(a and b) and c", Parentheses::Current), "(a and b) and c");
        assert_eq!(expression("a or b and c", Parentheses::Current), "a or b and c");
        assert_eq!(expression("(a or b) and not c", Parentheses::Current), "(a or b) and not c");
    }

    #[test]
    fn test_legacy_parse_keeps_meaning() {
        let config = ParserConfig::legacy();
        let expr = Parser::with_config(config).parse_expression("a = b = c").unwrap();
        let options = BuilderOptions {
            parentheses: Parentheses::Compat,
            ..BuilderOptions::compact()
        };
        assert_eq!(SqlBuilder::with_options(options).build_expression(&expr), "a = (b = c)");
    }

    #[test]
    fn test_set_operation_parentheses() {
        assert_eq!(
            compact("select 1 union (select 2 union select 3)"),
            "select 1 union (select 2 union select 3)"
        );
        assert_eq!(
            compact("(select 1 union select 2) union select 3"),
            "select 1 union select 2 union select 3"
        );
        assert_eq!(
            compact("(select 1 order by 1) union select 2"),
            "(select 1 order by 1) union select 2"
        );
        assert_eq!(
            compact("select 1 union select 2 intersect select 3"),
            "select 1 union select 2 intersect select 3"
        );
    }

    // ====================================================================
    // Constants and names
    // ====================================================================

    #[test]
    fn test_dollar_quoting() {
        assert_eq!(expression("'plain'", Parentheses::Current), "'plain'");
        assert_eq!(expression("'it''s'", Parentheses::Current), "$$it's$$");
        assert_eq!(expression("'a$$''b'", Parentheses::Current), "$_1$a$$'b$_1$");
        assert_eq!(plain_string("x'$"), "$_1$x'$$_1$");
        assert_eq!(plain_string("'$_1$"), "$_2$'$_1$$_2$");
    }

    #[test]
    fn test_identifier_quoting() {
        let builder = SqlBuilder::with_options(BuilderOptions::compact());
        assert_eq!(builder.build_expression(&Expr::column("foo_1$")), "foo_1$");
        assert_eq!(builder.build_expression(&Expr::column("Foo")), "\"Foo\"");
        assert_eq!(builder.build_expression(&Expr::column("select")), "\"select\"");
        assert_eq!(builder.build_expression(&Expr::column("a\"b")), "\"a\"\"b\"");
    }

    #[test]
    fn test_unicode_escapes() {
        let options = BuilderOptions {
            escape_unicode: true,
            ..BuilderOptions::compact()
        };
        let builder = SqlBuilder::with_options(options);
        assert_eq!(
            builder.build_expression(&Expr::column("żółw")),
            "u&\"\\017c\\00f3\\0142w\""
        );
        assert_eq!(
            builder.build_expression(&Expr::string("'ż\\😀")),
            "e'\\'\\u017c\\\\\\U0001f600'"
        );
        // ASCII stays as it is
        assert_eq!(builder.build_expression(&Expr::string("abc")), "'abc'");
    }

    // ====================================================================
    // Layout
    // ====================================================================

    #[test]
    fn test_lists_are_wrapped() {
        let statement = Parser::new()
            .parse_statement("select aaaa, bbbb, cccc, dddd from t")
            .unwrap();
        let options = BuilderOptions {
            wrap: Some(20),
            ..BuilderOptions::default()
        };
        assert_eq!(
            SqlBuilder::with_options(options).build(&statement),
            "select aaaa, bbbb,\n    cccc, dddd\nfrom t"
        );
    }

    #[test]
    fn test_conditions_go_one_per_line() {
        let statement = Parser::new()
            .parse_statement("select a from t where b and (c or d)")
            .unwrap();
        assert_eq!(
            SqlBuilder::new().build(&statement),
            "select a\nfrom t\nwhere b\n    and (\n        c\n        or d\n    )"
        );
    }

    #[test]
    fn test_statement_forms() {
        assert_eq!(
            compact("insert into t default values"),
            "insert into t default values"
        );
        assert_eq!(
            compact("insert into t (a) values (1) on conflict do nothing"),
            "insert into t (a) values (1) on conflict do nothing"
        );
        assert_eq!(
            compact("UPDATE t SET a = DEFAULT WHERE b RETURNING a AS x"),
            "update t set a = default where b returning a as x"
        );
        assert_eq!(
            compact("delete from only t as x where x.a = $1"),
            "delete from only t as x where x.a = $1"
        );
    }

    #[test]
    fn test_window_reference() {
        assert_eq!(
            compact("select sum(a) over w, sum(a) over (w order by b) from t window w as (partition by c)"),
            "select sum(a) over w, sum(a) over (w order by b) from t window w as (partition by c)"
        );
    }

    #[test]
    fn test_display_uses_defaults() {
        let expr = Parser::new().parse_expression("A+B").unwrap();
        assert_eq!(expr.to_string(), "a + b");
    }
}
