//! Ownership of a statement tree as it moves between phases.
//!
//! A [`StatementTree`] is passed by value from parser to binder to optimizer to
//! executor. Phases only move forward; an optimizer that wants to keep the old
//! plan around forks a deep copy instead of rewriting in place.

use crate::ast::{Node, Statement, StatementLike};
use crate::utils::errors::{SqlError, SqlResult};
use log::debug;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Parsed,
    Bound,
    Optimized,
    Executing,
    Done,
}

impl Phase {
    fn can_advance_to(self, to: Phase) -> bool {
        matches!(
            (self, to),
            (Phase::Parsed, Phase::Bound)
                | (Phase::Bound, Phase::Optimized)
                | (Phase::Bound, Phase::Executing)
                | (Phase::Optimized, Phase::Executing)
                | (Phase::Executing, Phase::Done)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub struct StatementTree {
    root: Statement,
    phase: Phase,
}

impl StatementTree {
    pub fn new(root: Statement) -> Self {
        Self {
            root,
            phase: Phase::Parsed,
        }
    }

    pub fn root(&self) -> &Statement {
        &self.root
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn into_root(self) -> Statement {
        self.root
    }

    pub fn advance(&mut self, to: Phase) -> SqlResult<()> {
        if !self.phase.can_advance_to(to) {
            return Err(SqlError::IllegalTransition {
                from: self.phase,
                to,
            });
        }
        debug!(
            "{} statement: {} -> {}",
            self.root.statement_kind_label(),
            self.phase,
            to
        );
        self.phase = to;
        Ok(())
    }

    /// Replaces the root, keeping the phase.
    pub fn map_root<F>(self, f: F) -> SqlResult<Self>
    where
        F: FnOnce(Statement) -> SqlResult<Statement>,
    {
        Ok(Self {
            root: f(self.root)?,
            phase: self.phase,
        })
    }

    /// Independent deep copy at the same phase.
    pub fn fork(&self) -> Self {
        Self {
            root: self.root.clone(),
            phase: self.phase,
        }
    }

    /// Produces the optimized plan as a new tree; `self` stays bound for fallback.
    pub fn optimized(&self) -> SqlResult<Self> {
        let mut plan = self.fork();
        plan.advance(Phase::Optimized)?;
        Ok(plan)
    }

    pub fn render_as_text(&self) -> String {
        self.root.render_as_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BaseTable, DeleteStatement};

    fn tree() -> StatementTree {
        StatementTree::new(DeleteStatement::new(BaseTable::new("t"), None).into())
    }

    #[test]
    fn test_phases_only_move_forward() {
        let mut tree = tree();
        tree.advance(Phase::Bound).unwrap();
        tree.advance(Phase::Executing).unwrap();
        let err = tree.advance(Phase::Bound).unwrap_err();
        assert!(matches!(
            err,
            SqlError::IllegalTransition {
                from: Phase::Executing,
                to: Phase::Bound
            }
        ));
    }

    #[test]
    fn test_cannot_skip_binding() {
        let mut tree = tree();
        assert!(tree.advance(Phase::Executing).is_err());
        assert_eq!(tree.phase(), Phase::Parsed);
    }

    #[test]
    fn test_optimized_leaves_original_bound() {
        let mut tree = tree();
        tree.advance(Phase::Bound).unwrap();
        let plan = tree.optimized().unwrap();
        assert_eq!(plan.phase(), Phase::Optimized);
        assert_eq!(tree.phase(), Phase::Bound);
        assert_eq!(plan.render_as_text(), tree.render_as_text());
    }
}
