//! Statements and the clauses only statements use.

use super::classify::Parenthesized;
use super::{is_col_id, Grammar, ParseError};
use crate::ast::{
    CommonTableExpression, ConflictAction, ConflictTarget, Constant, CycleClause,
    DeleteStatement, Distinct, Expr, GroupByClause, GroupingElement, IndexDirection,
    IndexElement, IndexParameters, IndexTarget, InsertOverriding, InsertStatement,
    LockWaitPolicy, LockingElement, LockingStrength, MergeInsert, MergeMatch, MergeStatement,
    MergeWhenAction, MergeWhenClause, NodeList, NullsOrder, OnConflictClause, OrderByElement,
    OrderDirection, SearchClause, SelectBody, SelectStatement, SetClause, SetOperator,
    SetTargetElement, SimpleSelect, Statement, UpdateStatement, WhereClause, WithClause,
};
use crate::lexer::{Keyword, TokenKind};

/// Keywords that end a target list which may be empty: `SELECT FROM t`.
const TARGET_LIST_FOLLOWERS: &[Keyword] = &[
    Keyword::Into,
    Keyword::From,
    Keyword::Where,
    Keyword::Group,
    Keyword::Having,
    Keyword::Window,
    Keyword::Union,
    Keyword::Intersect,
    Keyword::Except,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Offset,
    Keyword::Fetch,
    Keyword::For,
];

impl Grammar<'_> {
    pub(super) fn statement(&mut self) -> Result<Statement, ParseError> {
        let with = if self.at_keyword(Keyword::With) {
            Some(self.with_clause()?)
        } else {
            None
        };

        let mut statement = match self.keyword() {
            Some(Keyword::Select | Keyword::Values) => Statement::Select(self.select_statement()?),
            _ if self.at_special('(') => Statement::Select(self.select_statement()?),
            Some(Keyword::Insert) => Statement::Insert(Box::new(self.insert_statement()?)),
            Some(Keyword::Update) => Statement::Update(Box::new(self.update_statement()?)),
            Some(Keyword::Delete) => Statement::Delete(Box::new(self.delete_statement()?)),
            Some(Keyword::Merge) => Statement::Merge(Box::new(self.merge_statement()?)),
            _ => {
                return Err(self.stream.error_here(format!(
                    "Unexpected {}, expecting SELECT / INSERT / UPDATE / DELETE / MERGE statement",
                    self.stream.current().kind
                )));
            }
        };

        if with.is_some() {
            let slot = statement.with_mut();
            if slot.is_some() {
                return Err(self.stream.error_here("Multiple WITH clauses are not allowed"));
            }
            *slot = with;
        }
        Ok(statement)
    }

    /// A query with set operators, `ORDER BY`, `LIMIT`/`OFFSET` and locking.
    pub(super) fn select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        let with = if self.at_keyword(Keyword::With) {
            Some(self.with_clause()?)
        } else {
            None
        };

        let mut statement = self.select_intersect()?;
        while let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::Union, Keyword::Except])
        {
            self.next()?;
            let all = self.set_quantifier()?;
            let operator = match (keyword, all) {
                (Keyword::Union, false) => SetOperator::Union,
                (Keyword::Union, true) => SetOperator::UnionAll,
                (_, false) => SetOperator::Except,
                (_, true) => SetOperator::ExceptAll,
            };
            let right = self.select_intersect()?;
            statement = SelectStatement::set_op(statement, operator, right);
        }

        if with.is_some() {
            if statement.with.is_some() {
                return Err(self.stream.error_here("Multiple WITH clauses are not allowed"));
            }
            statement.with = with;
        }

        if self.stream.matches_keyword_sequence(&[Keyword::Order, Keyword::By]) {
            if !statement.order_by.is_empty() {
                return Err(self
                    .stream
                    .error_here("Multiple ORDER BY clauses are not allowed"));
            }
            self.stream.skip(2)?;
            statement.order_by = self.order_by_list()?;
        }

        // locking and LIMIT / OFFSET may come in either order
        if self.at_keyword(Keyword::For) {
            self.for_locking_clause(&mut statement)?;
            if self.at_limit_or_offset() {
                self.limit_offset_clause(&mut statement)?;
            }
        } else if self.at_limit_or_offset() {
            self.limit_offset_clause(&mut statement)?;
            if self.at_keyword(Keyword::For) {
                self.for_locking_clause(&mut statement)?;
            }
        }
        Ok(statement)
    }

    /// `ALL` gives true, `DISTINCT` or nothing false.
    fn set_quantifier(&mut self) -> Result<bool, ParseError> {
        match self
            .stream
            .matches_any_keyword(&[Keyword::All, Keyword::Distinct])
        {
            Some(keyword) => {
                self.next()?;
                Ok(keyword == Keyword::All)
            }
            None => Ok(false),
        }
    }

    fn select_intersect(&mut self) -> Result<SelectStatement, ParseError> {
        let mut statement = self.simple_select()?;
        while self.eat_keyword(Keyword::Intersect)? {
            let operator = if self.set_quantifier()? {
                SetOperator::IntersectAll
            } else {
                SetOperator::Intersect
            };
            let right = self.simple_select()?;
            statement = SelectStatement::set_op(statement, operator, right);
        }
        Ok(statement)
    }

    pub(super) fn select_with_parentheses(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_special('(')?;
        let select = self.select_statement()?;
        self.expect_special(')')?;
        Ok(select)
    }

    fn simple_select(&mut self) -> Result<SelectStatement, ParseError> {
        if self.at_special('(') {
            return self.select_with_parentheses();
        }
        if self
            .stream
            .expect_keyword(&[Keyword::Select, Keyword::Values])?
            == Keyword::Values
        {
            return Ok(SelectStatement::new(SelectBody::Values(self.row_list()?)));
        }

        let mut select = SimpleSelect::default();
        if !self.eat_keyword(Keyword::All)? && self.eat_keyword(Keyword::Distinct)? {
            select.distinct = Some(if self.eat_keyword(Keyword::On)? {
                self.expect_special('(')?;
                let expressions = self.expression_list()?;
                self.expect_special(')')?;
                Distinct::On(expressions)
            } else {
                Distinct::Rows
            });
        }

        let empty_targets = select.distinct.is_none()
            && (self.stream.matches_any_keyword(TARGET_LIST_FOLLOWERS).is_some()
                || self.at_special(')')
                || self.stream.is_eof());
        if !empty_targets {
            select.targets = self.target_list()?;
        }

        if self.at_keyword(Keyword::Into) {
            return Err(self
                .stream
                .error_here("SELECT INTO clauses are not supported"));
        }
        if self.eat_keyword(Keyword::From)? {
            select.from = self.from_list()?;
        }
        if self.eat_keyword(Keyword::Where)? {
            select.where_clause.condition = Some(self.expression()?);
        }
        if self.eat_keywords(&[Keyword::Group, Keyword::By])? {
            select.group_by = self.group_by_clause()?;
        }
        if self.eat_keyword(Keyword::Having)? {
            select.having.condition = Some(self.expression()?);
        }
        if self.eat_keyword(Keyword::Window)? {
            select.window = self.window_list()?;
        }
        Ok(SelectStatement::select(select))
    }

    fn insert_statement(&mut self) -> Result<InsertStatement, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let mut statement = InsertStatement {
            with: None,
            target: self.insert_target()?,
            columns: NodeList::new(),
            overriding: None,
            values: None,
            on_conflict: None,
            returning: NodeList::new(),
        };

        if !self.eat_keywords(&[Keyword::Default, Keyword::Values])? {
            if self.at_special('(') && self.parenthesized(0)? != Some(Parenthesized::Select) {
                self.next()?;
                statement.columns = self.comma_list(Self::set_target_element)?;
                self.expect_special(')')?;
            }
            statement.overriding = self.overriding_clause()?;
            statement.values = Some(self.select_statement()?);
        }

        if self.eat_keywords(&[Keyword::On, Keyword::Conflict])? {
            statement.on_conflict = Some(self.on_conflict()?);
        }
        statement.returning = self.returning_clause()?;
        Ok(statement)
    }

    /// `OVERRIDING USER VALUE` or `OVERRIDING SYSTEM VALUE`.
    fn overriding_clause(&mut self) -> Result<Option<InsertOverriding>, ParseError> {
        if !self.eat_keyword(Keyword::Overriding)? {
            return Ok(None);
        }
        let overriding = match self
            .stream
            .expect_keyword(&[Keyword::User, Keyword::System])?
        {
            Keyword::User => InsertOverriding::User,
            _ => InsertOverriding::System,
        };
        self.expect_keyword(Keyword::Value)?;
        Ok(Some(overriding))
    }

    fn returning_clause(&mut self) -> Result<NodeList<crate::ast::TargetElement>, ParseError> {
        if self.eat_keyword(Keyword::Returning)? {
            self.target_list()
        } else {
            Ok(NodeList::new())
        }
    }

    fn where_clause(&mut self) -> Result<WhereClause, ParseError> {
        let mut clause = WhereClause::default();
        if self.eat_keyword(Keyword::Where)? {
            if self
                .stream
                .matches_keyword_sequence(&[Keyword::Current, Keyword::Of])
            {
                return Err(self
                    .stream
                    .error_here("WHERE CURRENT OF clause is not supported"));
            }
            clause.condition = Some(self.expression()?);
        }
        Ok(clause)
    }

    fn update_statement(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let target = self.update_or_delete_target(true)?;
        self.expect_keyword(Keyword::Set)?;
        let set = self.set_clause_list()?;
        let from = if self.eat_keyword(Keyword::From)? {
            self.from_list()?
        } else {
            NodeList::new()
        };
        Ok(UpdateStatement {
            with: None,
            target,
            set,
            from,
            where_clause: self.where_clause()?,
            returning: self.returning_clause()?,
        })
    }

    fn delete_statement(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let target = self.update_or_delete_target(false)?;
        let using = if self.eat_keyword(Keyword::Using)? {
            self.from_list()?
        } else {
            NodeList::new()
        };
        Ok(DeleteStatement {
            with: None,
            target,
            using,
            where_clause: self.where_clause()?,
            returning: self.returning_clause()?,
        })
    }

    fn merge_statement(&mut self) -> Result<MergeStatement, ParseError> {
        self.expect_keyword(Keyword::Merge)?;
        self.expect_keyword(Keyword::Into)?;
        let target = self.update_or_delete_target(false)?;
        self.expect_keyword(Keyword::Using)?;
        let using = self.from_element()?;
        self.expect_keyword(Keyword::On)?;
        let on = self.expression()?;

        let mut when = NodeList::new();
        when.push(self.merge_when_clause()?);
        while self.at_keyword(Keyword::When) {
            when.push(self.merge_when_clause()?);
        }
        Ok(MergeStatement {
            with: None,
            target,
            using,
            on,
            when,
            returning: self.returning_clause()?,
        })
    }

    fn merge_when_clause(&mut self) -> Result<MergeWhenClause, ParseError> {
        self.expect_keyword(Keyword::When)?;
        let not = self.eat_keyword(Keyword::Not)?;
        self.expect_keyword(Keyword::Matched)?;
        let mut matched = if not {
            MergeMatch::NotMatched
        } else {
            MergeMatch::Matched
        };
        // BY TARGET is noise
        if not && self.eat_keyword(Keyword::By)? {
            if self
                .stream
                .expect_keyword(&[Keyword::Source, Keyword::Target])?
                == Keyword::Source
            {
                matched = MergeMatch::NotMatchedBySource;
            }
        }
        let condition = if self.eat_keyword(Keyword::And)? {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::Then)?;

        let action_token = self.stream.current().clone();
        let action = if matched == MergeMatch::NotMatched {
            self.merge_not_matched_action()?
        } else {
            self.merge_matched_action()?
        };
        MergeWhenClause::new(matched, condition, action)
            .map_err(|err| self.node_error(&err, &action_token))
    }

    fn merge_matched_action(&mut self) -> Result<Option<MergeWhenAction>, ParseError> {
        match self
            .stream
            .expect_keyword(&[Keyword::Do, Keyword::Delete, Keyword::Update])?
        {
            Keyword::Do => {
                self.expect_keyword(Keyword::Nothing)?;
                Ok(None)
            }
            Keyword::Delete => Ok(Some(MergeWhenAction::Delete)),
            _ => {
                self.expect_keyword(Keyword::Set)?;
                Ok(Some(MergeWhenAction::Update(self.set_clause_list()?)))
            }
        }
    }

    fn merge_not_matched_action(&mut self) -> Result<Option<MergeWhenAction>, ParseError> {
        if self
            .stream
            .expect_keyword(&[Keyword::Do, Keyword::Insert])?
            == Keyword::Do
        {
            self.expect_keyword(Keyword::Nothing)?;
            return Ok(None);
        }

        let mut insert = MergeInsert {
            columns: NodeList::new(),
            overriding: None,
            values: None,
        };
        if self.eat_keywords(&[Keyword::Default, Keyword::Values])? {
            return Ok(Some(MergeWhenAction::Insert(insert)));
        }
        if self.eat_special('(')? {
            insert.columns = self.comma_list(Self::set_target_element)?;
            self.expect_special(')')?;
        }
        insert.overriding = self.overriding_clause()?;
        self.expect_keyword(Keyword::Values)?;
        self.expect_special('(')?;
        insert.values = Some(self.comma_list(Self::expression_with_default)?);
        self.expect_special(')')?;
        Ok(Some(MergeWhenAction::Insert(insert)))
    }

    pub(super) fn with_clause(&mut self) -> Result<WithClause, ParseError> {
        self.expect_keyword(Keyword::With)?;
        let recursive = self.eat_keyword(Keyword::Recursive)?;
        Ok(WithClause {
            recursive,
            ctes: self.comma_list(Self::common_table_expression)?,
        })
    }

    fn common_table_expression(&mut self) -> Result<CommonTableExpression, ParseError> {
        let name = self.col_id()?;
        let columns = if self.eat_special('(')? {
            let columns = self.col_id_list()?;
            self.expect_special(')')?;
            columns
        } else {
            NodeList::new()
        };
        self.expect_keyword(Keyword::As)?;

        let materialized = if self.eat_keyword(Keyword::Materialized)? {
            Some(true)
        } else if self.eat_keyword(Keyword::Not)? {
            self.expect_keyword(Keyword::Materialized)?;
            Some(false)
        } else {
            None
        };

        self.expect_special('(')?;
        let statement = Box::new(self.statement()?);
        self.expect_special(')')?;

        let search = if self.eat_keyword(Keyword::Search)? {
            let breadth_first = self
                .stream
                .expect_keyword(&[Keyword::Breadth, Keyword::Depth])?
                == Keyword::Breadth;
            self.expect_keyword(Keyword::First)?;
            self.expect_keyword(Keyword::By)?;
            let columns = self.col_id_list()?;
            self.expect_keyword(Keyword::Set)?;
            Some(SearchClause {
                breadth_first,
                columns,
                sequence_column: self.col_id()?,
            })
        } else {
            None
        };
        let cycle = if self.eat_keyword(Keyword::Cycle)? {
            Some(self.cycle_clause()?)
        } else {
            None
        };

        Ok(CommonTableExpression {
            name,
            columns,
            materialized,
            statement,
            search,
            cycle,
        })
    }

    fn cycle_clause(&mut self) -> Result<CycleClause, ParseError> {
        let columns = self.col_id_list()?;
        self.expect_keyword(Keyword::Set)?;
        let mark_column = self.col_id()?;
        let (mut mark_value, mut mark_default) = (None, None);
        if self.eat_keyword(Keyword::To)? {
            mark_value = Some(self.constant_expression()?);
            self.expect_keyword(Keyword::Default)?;
            mark_default = Some(self.constant_expression()?);
        }
        self.expect_keyword(Keyword::Using)?;
        Ok(CycleClause {
            columns,
            mark_column,
            path_column: self.col_id()?,
            mark_value,
            mark_default,
        })
    }

    fn at_limit_or_offset(&self) -> bool {
        self.stream
            .matches_any_keyword(&[Keyword::Limit, Keyword::Offset, Keyword::Fetch])
            .is_some()
    }

    /// `FOR READ ONLY` is accepted and means no locking.
    fn for_locking_clause(&mut self, statement: &mut SelectStatement) -> Result<(), ParseError> {
        if self.eat_keywords(&[Keyword::For, Keyword::Read, Keyword::Only])? {
            return Ok(());
        }
        if matches!(statement.body, SelectBody::Values(_)) {
            return Err(self
                .stream
                .error_here("SELECT FOR UPDATE/SHARE cannot be applied to VALUES"));
        }
        let locking = self.locking_list()?;
        statement.locking.extend(locking);
        Ok(())
    }

    pub(super) fn locking_list(&mut self) -> Result<NodeList<LockingElement>, ParseError> {
        let mut list = NodeList::new();
        list.push(self.locking_element()?);
        while self.at_keyword(Keyword::For) {
            list.push(self.locking_element()?);
        }
        Ok(list)
    }

    fn locking_element(&mut self) -> Result<LockingElement, ParseError> {
        self.expect_keyword(Keyword::For)?;
        let strength = match self.stream.expect_keyword(&[
            Keyword::Update,
            Keyword::No,
            Keyword::Share,
            Keyword::Key,
        ])? {
            Keyword::Update => LockingStrength::Update,
            Keyword::No => {
                self.expect_keyword(Keyword::Key)?;
                self.expect_keyword(Keyword::Update)?;
                LockingStrength::NoKeyUpdate
            }
            Keyword::Share => LockingStrength::Share,
            _ => {
                self.expect_keyword(Keyword::Share)?;
                LockingStrength::KeyShare
            }
        };

        let relations = if self.eat_keyword(Keyword::Of)? {
            self.comma_list(Self::qualified_name)?
        } else {
            NodeList::new()
        };
        let wait_policy = if self.eat_keyword(Keyword::Nowait)? {
            Some(LockWaitPolicy::Nowait)
        } else if self.eat_keywords(&[Keyword::Skip, Keyword::Locked])? {
            Some(LockWaitPolicy::SkipLocked)
        } else {
            None
        };
        Ok(LockingElement {
            strength,
            relations,
            wait_policy,
        })
    }

    /// `LIMIT`/`FETCH` and `OFFSET`, in either order.
    fn limit_offset_clause(&mut self, statement: &mut SelectStatement) -> Result<(), ParseError> {
        if self.at_keyword(Keyword::Offset) {
            self.offset_clause(statement)?;
            if self
                .stream
                .matches_any_keyword(&[Keyword::Limit, Keyword::Fetch])
                .is_some()
            {
                self.limit_clause(statement)?;
            }
        } else {
            self.limit_clause(statement)?;
            if self.at_keyword(Keyword::Offset) {
                self.offset_clause(statement)?;
            }
        }
        Ok(())
    }

    fn limit_clause(&mut self, statement: &mut SelectStatement) -> Result<(), ParseError> {
        if statement.limit.is_some() {
            return Err(self
                .stream
                .error_here("Multiple LIMIT clauses are not allowed"));
        }
        if self.eat_keyword(Keyword::Limit)? {
            statement.limit = Some(if self.eat_keyword(Keyword::All)? {
                Expr::Constant(Constant::Null)
            } else {
                self.expression()?
            });
            return Ok(());
        }

        let fetch_token = self.stream.current().clone();
        self.expect_keyword(Keyword::Fetch)?;
        self.stream
            .expect_keyword(&[Keyword::First, Keyword::Next])?;
        let limit = if self
            .stream
            .matches_any_keyword(&[Keyword::Row, Keyword::Rows])
            .is_some()
        {
            Expr::numeric("1")
        } else if self.stream.matches_any_special(&['+', '-']) {
            // a signed constant is not an expression atom
            let negative = self.next()?.is_special('-');
            let token = self.stream.expect(
                |kind| matches!(kind, TokenKind::Integer(_) | TokenKind::Float(_)),
                "integer literal",
            )?;
            let value = token.text().unwrap_or_default();
            Expr::numeric(if negative {
                format!("-{value}")
            } else {
                value.to_string()
            })
        } else {
            self.expression_atom()?
        };
        statement.limit = Some(limit);

        self.stream
            .expect_keyword(&[Keyword::Row, Keyword::Rows])?;
        if self.eat_keywords(&[Keyword::With, Keyword::Ties])? {
            if statement.order_by.is_empty() {
                return Err(self.error_at(
                    "WITH TIES cannot be specified without ORDER BY clause",
                    &fetch_token,
                ));
            }
            statement.limit_with_ties = true;
        } else {
            self.expect_keyword(Keyword::Only)?;
        }
        Ok(())
    }

    /// `OFFSET n [ROW|ROWS]`.
    fn offset_clause(&mut self, statement: &mut SelectStatement) -> Result<(), ParseError> {
        if statement.offset.is_some() {
            return Err(self
                .stream
                .error_here("Multiple OFFSET clauses are not allowed"));
        }
        self.expect_keyword(Keyword::Offset)?;
        statement.offset = Some(self.expression()?);
        if self
            .stream
            .matches_any_keyword(&[Keyword::Row, Keyword::Rows])
            .is_some()
        {
            self.next()?;
        }
        Ok(())
    }

    pub(super) fn set_clause_list(&mut self) -> Result<NodeList<SetClause>, ParseError> {
        self.comma_list(Self::set_clause)
    }

    /// `column = value` or `(a, b) = row_or_subquery`.
    fn set_clause(&mut self) -> Result<SetClause, ParseError> {
        if !self.eat_special('(')? {
            let column = self.set_target_element()?;
            self.expect_special('=')?;
            return Ok(SetClause::Single {
                column,
                value: self.expression_with_default()?,
            });
        }

        let columns = self.comma_list(Self::set_target_element)?;
        self.expect_special(')')?;
        self.expect_special('=')?;
        let token = self.stream.current().clone();
        let value = self.expression()?;
        let valid = match &value {
            Expr::Row(_) => true,
            Expr::Subselect(subselect) => subselect.operator.is_none(),
            _ => false,
        };
        if !valid {
            return Err(self.error_at(
                "source for a multiple-column UPDATE item must be a sub-SELECT or ROW() expression",
                &token,
            ));
        }
        SetClause::multiple(columns, value).map_err(|err| self.node_error(&err, &token))
    }

    /// A column name with optional field selections and subscripts.
    fn set_target_element(&mut self) -> Result<SetTargetElement, ParseError> {
        let name = self.col_id()?;
        let indirection = self.indirection(false)?;
        Ok(SetTargetElement {
            name,
            indirection: indirection.into(),
        })
    }

    pub(super) fn order_by_list(&mut self) -> Result<NodeList<OrderByElement>, ParseError> {
        self.comma_list(Self::order_by_element)
    }

    fn order_by_element(&mut self) -> Result<OrderByElement, ParseError> {
        let expression = self.expression()?;
        let direction = match self.stream.matches_any_keyword(&[
            Keyword::Asc,
            Keyword::Desc,
            Keyword::Using,
        ]) {
            Some(Keyword::Asc) => {
                self.next()?;
                Some(OrderDirection::Asc)
            }
            Some(Keyword::Desc) => {
                self.next()?;
                Some(OrderDirection::Desc)
            }
            Some(_) => {
                self.next()?;
                Some(OrderDirection::Using(self.operator(true)?))
            }
            None => None,
        };
        Ok(OrderByElement {
            expression,
            direction,
            nulls: self.nulls_order()?,
        })
    }

    fn nulls_order(&mut self) -> Result<Option<NullsOrder>, ParseError> {
        if !self.eat_keyword(Keyword::Nulls)? {
            return Ok(None);
        }
        Ok(Some(
            match self
                .stream
                .expect_keyword(&[Keyword::First, Keyword::Last])?
            {
                Keyword::First => NullsOrder::First,
                _ => NullsOrder::Last,
            },
        ))
    }

    /// The part of `ON CONFLICT` following these keywords.
    pub(super) fn on_conflict(&mut self) -> Result<OnConflictClause, ParseError> {
        let target = if self.eat_keywords(&[Keyword::On, Keyword::Constraint])? {
            Some(ConflictTarget::Constraint(self.col_id()?))
        } else if self.at_special('(') {
            Some(ConflictTarget::Index(self.index_parameters()?))
        } else {
            None
        };

        self.expect_keyword(Keyword::Do)?;
        let action = if self
            .stream
            .expect_keyword(&[Keyword::Update, Keyword::Nothing])?
            == Keyword::Update
        {
            self.expect_keyword(Keyword::Set)?;
            let set = self.set_clause_list()?;
            let mut where_clause = WhereClause::default();
            if self.eat_keyword(Keyword::Where)? {
                where_clause.condition = Some(self.expression()?);
            }
            ConflictAction::Update { set, where_clause }
        } else {
            ConflictAction::Nothing
        };
        Ok(OnConflictClause { target, action })
    }

    fn index_parameters(&mut self) -> Result<IndexParameters, ParseError> {
        self.expect_special('(')?;
        let elements = self.comma_list(Self::index_element)?;
        self.expect_special(')')?;
        let mut where_clause = WhereClause::default();
        if self.eat_keyword(Keyword::Where)? {
            where_clause.condition = Some(self.expression()?);
        }
        Ok(IndexParameters {
            elements,
            where_clause,
        })
    }

    fn index_element(&mut self) -> Result<IndexElement, ParseError> {
        let target = if self.eat_special('(')? {
            let expression = self.expression()?;
            self.expect_special(')')?;
            IndexTarget::Expression(expression)
        } else if self.matches_function_call() {
            IndexTarget::Expression(self.windowless_function_call()?)
        } else {
            IndexTarget::Column(self.col_id()?)
        };

        let collation = if self.eat_keyword(Keyword::Collate)? {
            Some(self.qualified_name()?)
        } else {
            None
        };
        let opclass = if is_col_id(self.stream.current()) {
            Some(self.qualified_name()?)
        } else {
            None
        };
        let direction = match self
            .stream
            .matches_any_keyword(&[Keyword::Asc, Keyword::Desc])
        {
            Some(keyword) => {
                self.next()?;
                Some(if keyword == Keyword::Asc {
                    IndexDirection::Asc
                } else {
                    IndexDirection::Desc
                })
            }
            None => None,
        };
        Ok(IndexElement {
            target,
            collation,
            opclass,
            direction,
            nulls: self.nulls_order()?,
        })
    }

    /// The part of `GROUP BY` following these keywords.
    pub(super) fn group_by_clause(&mut self) -> Result<GroupByClause, ParseError> {
        let distinct = match self
            .stream
            .matches_any_keyword(&[Keyword::All, Keyword::Distinct])
        {
            Some(keyword) => {
                self.next()?;
                keyword == Keyword::Distinct
            }
            None => false,
        };
        Ok(GroupByClause {
            distinct,
            items: self.comma_list(Self::grouping_element)?,
        })
    }

    fn grouping_element(&mut self) -> Result<GroupingElement, ParseError> {
        if self.at_special('(') && self.stream.peek(1).is_special(')') {
            self.stream.skip(2)?;
            return Ok(GroupingElement::Empty);
        }
        if let Some(keyword) = self
            .stream
            .matches_any_keyword(&[Keyword::Cube, Keyword::Rollup])
        {
            self.next()?;
            self.expect_special('(')?;
            let expressions = self.expression_list()?;
            self.expect_special(')')?;
            return Ok(if keyword == Keyword::Cube {
                GroupingElement::Cube(expressions)
            } else {
                GroupingElement::Rollup(expressions)
            });
        }
        if self.eat_keywords(&[Keyword::Grouping, Keyword::Sets])? {
            self.expect_special('(')?;
            let elements = self.comma_list(Self::grouping_element)?;
            self.expect_special(')')?;
            return Ok(GroupingElement::Sets(elements));
        }
        Ok(GroupingElement::Expression(self.expression()?))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::Parser;

    fn statement(sql: &str) -> Statement {
        Parser::new().parse_statement(sql).unwrap()
    }

    fn select(sql: &str) -> SelectStatement {
        Parser::new().parse_select_statement(sql).unwrap()
    }

    fn error(sql: &str) -> String {
        Parser::new().parse_statement(sql).unwrap_err().message
    }

    #[test]
    fn test_simple_select_clauses() {
        let query = select(
            "select distinct on (a) a, b from t where a > 1 group by a having count(*) > 1 \
             window w as (partition by b) order by a limit 10 offset 5",
        );
        let simple = query.as_simple_select().unwrap();
        assert!(matches!(simple.distinct, Some(Distinct::On(ref e)) if e.len() == 1));
        assert_eq!(simple.targets.len(), 2);
        assert!(simple.where_clause.condition.is_some());
        assert_eq!(simple.group_by.items.len(), 1);
        assert!(simple.having.condition.is_some());
        assert_eq!(simple.window.len(), 1);
        assert_eq!(query.order_by.len(), 1);
        assert_eq!(query.limit, Some(Expr::numeric("10")));
        assert_eq!(query.offset, Some(Expr::numeric("5")));
    }

    #[test]
    fn test_empty_target_list() {
        let query = select("select from t");
        assert!(query.as_simple_select().unwrap().targets.is_empty());
    }

    #[test]
    fn test_set_operations_precedence() {
        let query = select("select 1 union all select 2 intersect select 3");
        let SelectBody::SetOp(set_op) = &query.body else {
            panic!("expected set operation");
        };
        assert_eq!(set_op.operator, SetOperator::UnionAll);
        assert!(matches!(
            &set_op.right.body,
            SelectBody::SetOp(right) if right.operator == SetOperator::Intersect
        ));
    }

    #[test]
    fn test_duplicate_clauses_rejected() {
        assert_eq!(
            error("(select 1 order by 1) order by 1"),
            "Multiple ORDER BY clauses are not allowed"
        );
        assert_eq!(
            error("(select 1 limit 1) limit 2"),
            "Multiple LIMIT clauses are not allowed"
        );
        assert_eq!(
            error("with a as (select 1) (with b as (select 2) select 3)"),
            "Multiple WITH clauses are not allowed"
        );
    }

    #[test]
    fn test_fetch_first() {
        let query = select("select 1 order by 1 fetch first 5 rows with ties");
        assert!(query.limit_with_ties);
        let query = select("select 1 fetch next row only");
        assert_eq!(query.limit, Some(Expr::numeric("1")));
        let query = select("select 1 fetch first -3 rows only");
        assert_eq!(query.limit, Some(Expr::numeric("-3")));
        assert_eq!(
            error("select 1 fetch first 5 rows with ties"),
            "WITH TIES cannot be specified without ORDER BY clause"
        );
        let query = select("select 1 limit all");
        assert_eq!(query.limit, Some(Expr::Constant(Constant::Null)));
    }

    #[test]
    fn test_locking_clauses() {
        let query = select("select * from t for no key update of t nowait for share skip locked");
        assert_eq!(query.locking.len(), 2);
        assert_eq!(query.locking[0].strength, LockingStrength::NoKeyUpdate);
        assert_eq!(query.locking[1].wait_policy, Some(LockWaitPolicy::SkipLocked));
        assert_eq!(
            error("values (1) for update"),
            "SELECT FOR UPDATE/SHARE cannot be applied to VALUES"
        );
        assert!(select("select 1 for read only").locking.is_empty());
    }

    #[test]
    fn test_with_clause() {
        let Statement::Select(query) = statement(
            "with recursive t (n) as not materialized (select 1) \
             search depth first by n set ord cycle n set is_cycle using path select * from t",
        ) else {
            panic!("expected select");
        };
        let with = query.with.unwrap();
        assert!(with.recursive);
        let cte = &with.ctes[0];
        assert_eq!(cte.materialized, Some(false));
        assert!(matches!(cte.search, Some(ref s) if !s.breadth_first));
        assert!(cte.cycle.is_some());
    }

    #[test]
    fn test_insert_statement() {
        let Statement::Insert(insert) = statement(
            "insert into t as x (a, b[1]) overriding system value values (1, default) \
             on conflict (a, lower(b) desc) where a > 0 do update set b = excluded.b returning *",
        ) else {
            panic!("expected insert");
        };
        assert_eq!(insert.columns.len(), 2);
        assert_eq!(insert.overriding, Some(InsertOverriding::System));
        let Some(OnConflictClause {
            target: Some(ConflictTarget::Index(index)),
            ..
        }) = &insert.on_conflict
        else {
            panic!("expected index target");
        };
        assert_eq!(index.elements.len(), 2);
        assert_eq!(insert.returning.len(), 1);

        let Statement::Insert(insert) = statement("insert into t default values") else {
            panic!("expected insert");
        };
        assert!(insert.values.is_none());
    }

    #[test]
    fn test_update_and_delete() {
        let Statement::Update(update) =
            statement("update only t x set (a, b) = (1, 2), c = default from u where t.id = u.id")
        else {
            panic!("expected update");
        };
        assert_eq!(update.target.inherit, Some(false));
        assert_eq!(update.target.alias, Some(Identifier::new("x")));
        assert_eq!(update.set.len(), 2);

        assert_eq!(
            error("update t set (a, b) = 1"),
            "source for a multiple-column UPDATE item must be a sub-SELECT or ROW() expression"
        );
        assert_eq!(
            error("update t set (a, b) = (1, 2, 3)"),
            "Number of columns (2) does not match number of values (3)"
        );
        assert_eq!(
            error("delete from t where current of c"),
            "WHERE CURRENT OF clause is not supported"
        );
        let Statement::Delete(delete) = statement("delete from t using u where t.a = u.a") else {
            panic!("expected delete");
        };
        assert_eq!(delete.using.len(), 1);
    }

    #[test]
    fn test_merge_statement() {
        let Statement::Merge(merge) = statement(
            "merge into t using s on t.id = s.id \
             when matched and s.del then delete \
             when not matched by source then update set a = 1 \
             when not matched then insert (id) values (s.id) \
             returning merge_action(), t.*",
        ) else {
            panic!("expected merge");
        };
        assert_eq!(merge.when.len(), 3);
        assert_eq!(merge.when[1].matched(), MergeMatch::NotMatchedBySource);
        assert_eq!(merge.returning[0].expression, Expr::MergeAction);

        assert!(error("merge into t using s on true when matched then insert values (1)")
            .starts_with("Unexpected keyword 'insert'"));
    }

    #[test]
    fn test_group_by_elements() {
        let group = Parser::new()
            .parse_group_by_clause("distinct a, (), cube (a, b), grouping sets ((a), rollup (b))")
            .unwrap();
        assert!(group.distinct);
        assert_eq!(group.items.len(), 4);
        assert_eq!(group.items[1], GroupingElement::Empty);
        assert!(matches!(group.items[3], GroupingElement::Sets(ref s) if s.len() == 2));
    }

    #[test]
    fn test_order_by_using_operator() {
        let list = Parser::new()
            .parse_order_by_list("a using >, b desc nulls first")
            .unwrap();
        assert_eq!(
            list[0].direction,
            Some(OrderDirection::Using(Operator::symbol(">")))
        );
        assert_eq!(list[1].nulls, Some(NullsOrder::First));
    }

    #[test]
    fn test_unsupported_statements() {
        assert_eq!(error("select 1 into t"), "SELECT INTO clauses are not supported");
        assert!(error("create table t ()").ends_with("expecting SELECT / INSERT / UPDATE / DELETE / MERGE statement"));
    }
}
