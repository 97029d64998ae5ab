use crate::ast::{
    BaseTable, Expression, FromTable, PositionedCursorReference, ResultColumn, SelectNode,
    Statement, TableReferenceLike, WhereClause,
};
use crate::pipeline::{Phase, StatementTree};
use crate::utils::errors::SqlResult;
use log::{debug, info};

/// Attaches to each UPDATE and DELETE the query body that yields its target rows.
///
/// For `WHERE CURRENT OF <cursor>` that query reads from a
/// [`PositionedCursorReference`], so later phases see positioned DML as an
/// ordinary row source. The body is a [`SelectNode`], not a statement, so the
/// bound tree keeps a single statement at its root. Every generated query ends
/// with a row-location column.
#[derive(Debug, Default)]
pub struct Binder {
    rewritten: usize,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positioned statements rewritten so far.
    pub fn rewritten(&self) -> usize {
        self.rewritten
    }

    pub fn bind(&mut self, mut tree: StatementTree) -> SqlResult<StatementTree> {
        tree.advance(Phase::Bound)?;
        tree.map_root(|root| self.bind_statement(root))
    }

    fn bind_statement(&mut self, statement: Statement) -> SqlResult<Statement> {
        match statement {
            Statement::Select(select) => Ok(Statement::Select(select)),
            Statement::Update(update) => {
                let mut columns = update.set_clauses().to_vec();
                columns.push(ResultColumn::new(None, Expression::row_location()));
                let source = self.row_source(update.target(), update.where_clause(), columns)?;
                Ok(Statement::Update(update.with_source(source)))
            }
            Statement::Delete(delete) => {
                let columns = vec![ResultColumn::new(None, Expression::row_location())];
                let source = self.row_source(delete.target(), delete.where_clause(), columns)?;
                Ok(Statement::Delete(delete.with_source(source)))
            }
        }
    }

    fn row_source(
        &mut self,
        target: &BaseTable,
        where_clause: Option<&WhereClause>,
        columns: Vec<ResultColumn>,
    ) -> SqlResult<SelectNode> {
        let (from, predicate) = match where_clause {
            Some(WhereClause::CurrentOf(cursor)) => {
                let reference = PositionedCursorReference::build(
                    target.correlation_name().map(str::to_string),
                    cursor.as_str(),
                    Some(target.table_properties().clone()),
                )?;
                self.rewritten += 1;
                info!(
                    "bound positioned statement on {} to cursor {}",
                    target.table_name(),
                    cursor
                );
                (FromTable::CurrentOf(reference), None)
            }
            Some(WhereClause::Searched(predicate)) => {
                (FromTable::Base(target.clone()), Some(predicate.clone()))
            }
            None => (FromTable::Base(target.clone()), None),
        };
        debug!(
            "generated row source for {} with {} output columns",
            target.table_name(),
            columns.len()
        );
        Ok(SelectNode::new(columns, vec![from], predicate))
    }
}
