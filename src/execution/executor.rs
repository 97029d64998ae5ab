use crate::ast::{Node, StatementLike};
use crate::execution::cursor::{CursorRegistry, RowLocation};
use crate::pipeline::{Phase, StatementTree};
use crate::semantic::visiters::CursorReferenceCollector;
use crate::utils::errors::SqlResult;
use log::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub statement_type: &'static str,
    /// Rows addressed through cursors. Empty for statements without a positioned row source.
    pub row_locations: Vec<RowLocation>,
}

/// Drives a bound tree to completion against a session's cursors.
///
/// Only the positioned part of execution lives here: each cursor reference in
/// the tree is resolved to the row it currently points at.
pub struct Executor<'r> {
    registry: &'r dyn CursorRegistry,
}

impl<'r> Executor<'r> {
    pub fn new(registry: &'r dyn CursorRegistry) -> Self {
        Self { registry }
    }

    pub fn execute(&self, mut tree: StatementTree) -> SqlResult<ExecutionOutcome> {
        tree.advance(Phase::Executing)?;
        let statement_type = tree.root().statement_kind_label();
        let cursors = match tree.root().source() {
            Some(source) => CursorReferenceCollector::collect(source as &dyn Node)?,
            None => Vec::new(),
        };

        let mut row_locations = Vec::with_capacity(cursors.len());
        for cursor in &cursors {
            match self.registry.resolve(cursor) {
                Ok(location) => {
                    debug!("{} resolved cursor {} to {}", statement_type, cursor, location);
                    row_locations.push(location);
                }
                Err(err) => {
                    warn!("{} aborted: {}", statement_type, err);
                    return Err(err.into());
                }
            }
        }

        tree.advance(Phase::Done)?;
        Ok(ExecutionOutcome {
            statement_type,
            row_locations,
        })
    }
}
