use crate::ast::traits::{copy_source, render_statement};
use crate::ast::{
    BaseTable, Expression, FromTable, Node, NodeBase, NodeKind, ResultColumn, StatementLike,
    TraceLines,
};
use crate::semantic::visiters::NodeVisitor;
use crate::utils::config::trace::{indent, or_empty, EMPTY_MARKER};
use crate::utils::errors::{SqlResult, StructuralError};
use std::any::Any;
use std::iter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhereClause {
    Searched(Expression),
    CurrentOf(String),
}

impl WhereClause {
    pub fn cursor_name(&self) -> Option<&str> {
        match self {
            WhereClause::CurrentOf(cursor) => Some(cursor.as_str()),
            WhereClause::Searched(_) => None,
        }
    }

    pub fn predicate(&self) -> Option<&Expression> {
        match self {
            WhereClause::Searched(predicate) => Some(predicate),
            WhereClause::CurrentOf(_) => None,
        }
    }
}

fn where_line(where_clause: &Option<WhereClause>, depth: usize) -> String {
    let cursor = where_clause.as_ref().and_then(WhereClause::cursor_name);
    format!("{}whereCurrentOf: {}", indent(depth), or_empty(cursor))
}

/// Query body: select list, row sources and an optional predicate.
///
/// Not a statement on its own. It is the body of a [`SelectStatement`] and the
/// row source the binder attaches to UPDATE and DELETE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectNode {
    base: NodeBase,
    result_columns: Vec<ResultColumn>,
    from_list: Vec<FromTable>,
    where_clause: Option<Expression>,
}

impl SelectNode {
    pub fn new(
        result_columns: Vec<ResultColumn>,
        from_list: Vec<FromTable>,
        where_clause: Option<Expression>,
    ) -> Self {
        Self {
            base: NodeBase::new(),
            result_columns,
            from_list,
            where_clause,
        }
    }

    pub fn at(mut self, line: usize) -> Self {
        self.base = NodeBase::at(line);
        self
    }

    pub fn result_columns(&self) -> &[ResultColumn] {
        &self.result_columns
    }

    pub fn from_list(&self) -> &[FromTable] {
        &self.from_list
    }

    pub fn where_clause(&self) -> Option<&Expression> {
        self.where_clause.as_ref()
    }
}

impl Node for SelectNode {
    fn kind(&self) -> NodeKind {
        NodeKind::SelectNode
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        let other = copy_source::<SelectNode>(self.kind(), other)?;
        self.base.copy_structure_from(&other.base);
        self.result_columns = other.result_columns.clone();
        self.from_list = other.from_list.clone();
        self.where_clause = other.where_clause.clone();
        Ok(())
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        let pad = indent(depth);
        let own = [
            format!("{pad}resultColumns: {}", self.result_columns.len()),
            format!("{pad}fromList: {}", self.from_list.len()),
        ];
        let predicate = match self.where_clause {
            Some(_) => format!("{pad}where: present"),
            None => format!("{pad}where: {}", EMPTY_MARKER),
        };
        Box::new(
            self.base
                .describe(self.kind(), depth)
                .chain(own)
                .chain(iter::once(predicate)),
        )
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = Vec::new();
        children.extend(self.result_columns.iter().map(|c| c as &dyn Node));
        children.extend(self.from_list.iter().map(|t| t as &dyn Node));
        if let Some(predicate) = &self.where_clause {
            children.push(predicate);
        }
        children
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        visitor.visit_select_node(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    base: NodeBase,
    query: SelectNode,
}

impl SelectStatement {
    pub fn new(query: SelectNode) -> Self {
        Self {
            base: NodeBase::new(),
            query,
        }
    }

    pub fn at(mut self, line: usize) -> Self {
        self.base = NodeBase::at(line);
        self
    }

    pub fn query(&self) -> &SelectNode {
        &self.query
    }
}

impl Node for SelectStatement {
    fn kind(&self) -> NodeKind {
        NodeKind::SelectStatement
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        let other = copy_source::<SelectStatement>(self.kind(), other)?;
        self.base.copy_structure_from(&other.base);
        self.query = other.query.clone();
        Ok(())
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        self.base.describe(self.kind(), depth)
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.query as &dyn Node]
    }

    fn render_as_text(&self) -> String {
        render_statement(self)
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        visitor.visit_select(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl StatementLike for SelectStatement {
    fn statement_kind_label(&self) -> &'static str {
        "SELECT"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    base: NodeBase,
    target: BaseTable,
    set_clauses: Vec<ResultColumn>,
    where_clause: Option<WhereClause>,
    source: Option<SelectNode>,
}

impl UpdateStatement {
    pub fn new(
        target: BaseTable,
        set_clauses: Vec<ResultColumn>,
        where_clause: Option<WhereClause>,
    ) -> Self {
        Self {
            base: NodeBase::new(),
            target,
            set_clauses,
            where_clause,
            source: None,
        }
    }

    pub fn at(mut self, line: usize) -> Self {
        self.base = NodeBase::at(line);
        self
    }

    pub fn target(&self) -> &BaseTable {
        &self.target
    }

    pub fn set_clauses(&self) -> &[ResultColumn] {
        &self.set_clauses
    }

    pub fn where_clause(&self) -> Option<&WhereClause> {
        self.where_clause.as_ref()
    }

    /// Internal query producing the rows to change; present once bound.
    pub fn source(&self) -> Option<&SelectNode> {
        self.source.as_ref()
    }

    pub(crate) fn with_source(mut self, source: SelectNode) -> Self {
        self.source = Some(source);
        self
    }
}

impl Node for UpdateStatement {
    fn kind(&self) -> NodeKind {
        NodeKind::UpdateStatement
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        let other = copy_source::<UpdateStatement>(self.kind(), other)?;
        self.base.copy_structure_from(&other.base);
        self.target = other.target.clone();
        self.set_clauses = other.set_clauses.clone();
        self.where_clause = other.where_clause.clone();
        self.source = other.source.clone();
        Ok(())
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        let own = where_line(&self.where_clause, depth);
        Box::new(self.base.describe(self.kind(), depth).chain(iter::once(own)))
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = vec![&self.target];
        children.extend(self.set_clauses.iter().map(|c| c as &dyn Node));
        if let Some(predicate) = self.where_clause.as_ref().and_then(WhereClause::predicate) {
            children.push(predicate);
        }
        if let Some(source) = &self.source {
            children.push(source);
        }
        children
    }

    fn render_as_text(&self) -> String {
        render_statement(self)
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        visitor.visit_update(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl StatementLike for UpdateStatement {
    fn statement_kind_label(&self) -> &'static str {
        "UPDATE"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStatement {
    base: NodeBase,
    target: BaseTable,
    where_clause: Option<WhereClause>,
    source: Option<SelectNode>,
}

impl DeleteStatement {
    pub fn new(target: BaseTable, where_clause: Option<WhereClause>) -> Self {
        Self {
            base: NodeBase::new(),
            target,
            where_clause,
            source: None,
        }
    }

    pub fn at(mut self, line: usize) -> Self {
        self.base = NodeBase::at(line);
        self
    }

    pub fn target(&self) -> &BaseTable {
        &self.target
    }

    pub fn where_clause(&self) -> Option<&WhereClause> {
        self.where_clause.as_ref()
    }

    pub fn source(&self) -> Option<&SelectNode> {
        self.source.as_ref()
    }

    pub(crate) fn with_source(mut self, source: SelectNode) -> Self {
        self.source = Some(source);
        self
    }
}

impl Node for DeleteStatement {
    fn kind(&self) -> NodeKind {
        NodeKind::DeleteStatement
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        let other = copy_source::<DeleteStatement>(self.kind(), other)?;
        self.base.copy_structure_from(&other.base);
        self.target = other.target.clone();
        self.where_clause = other.where_clause.clone();
        self.source = other.source.clone();
        Ok(())
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        let own = where_line(&self.where_clause, depth);
        Box::new(self.base.describe(self.kind(), depth).chain(iter::once(own)))
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = vec![&self.target];
        if let Some(predicate) = self.where_clause.as_ref().and_then(WhereClause::predicate) {
            children.push(predicate);
        }
        if let Some(source) = &self.source {
            children.push(source);
        }
        children
    }

    fn render_as_text(&self) -> String {
        render_statement(self)
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        visitor.visit_delete(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl StatementLike for DeleteStatement {
    fn statement_kind_label(&self) -> &'static str {
        "DELETE"
    }
}

/// Root of every parsed unit. Transparent to copying, like [`FromTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Select(SelectStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

impl Statement {
    pub fn as_statement(&self) -> &dyn StatementLike {
        match self {
            Statement::Select(select) => select,
            Statement::Update(update) => update,
            Statement::Delete(delete) => delete,
        }
    }

    fn as_statement_mut(&mut self) -> &mut dyn StatementLike {
        match self {
            Statement::Select(select) => select,
            Statement::Update(update) => update,
            Statement::Delete(delete) => delete,
        }
    }

    /// Query producing this statement's rows: the body of a SELECT, or what
    /// the binder attached to an UPDATE or DELETE.
    pub fn source(&self) -> Option<&SelectNode> {
        match self {
            Statement::Select(select) => Some(select.query()),
            Statement::Update(update) => update.source(),
            Statement::Delete(delete) => delete.source(),
        }
    }
}

impl Node for Statement {
    fn kind(&self) -> NodeKind {
        self.as_statement().kind()
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        self.as_statement_mut().copy_structure_from(other)
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        self.as_statement().describe_for_trace(depth)
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.as_statement().children()
    }

    fn render_as_text(&self) -> String {
        self.as_statement().render_as_text()
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        self.as_statement().accept(visitor)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self.as_statement().as_any()
    }
}

impl StatementLike for Statement {
    fn statement_kind_label(&self) -> &'static str {
        self.as_statement().statement_kind_label()
    }
}

impl From<SelectStatement> for Statement {
    fn from(select: SelectStatement) -> Self {
        Statement::Select(select)
    }
}

impl From<UpdateStatement> for Statement {
    fn from(update: UpdateStatement) -> Self {
        Statement::Update(update)
    }
}

impl From<DeleteStatement> for Statement {
    fn from(delete: DeleteStatement) -> Self {
        Statement::Delete(delete)
    }
}
