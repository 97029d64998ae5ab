/*
*                    sqlnode -- query tree node model.
*
* Node                      base contract: checked copy, trace lines, text rendering
*   TableReferenceLike      anything usable as a row source in a FROM list
*     BaseTable             named table
*     PositionedCursorReference
*                           row under an open cursor (WHERE CURRENT OF)
*   StatementLike           root of a parsed unit, never a child
*     SelectStatement | UpdateStatement | DeleteStatement
*   SelectNode              query body; row source of a bound UPDATE/DELETE
*/

use crate::ast::walk;
use crate::ast::PropertyBag;
use crate::ast::TableReference;
use crate::semantic::visiters::NodeVisitor;
use crate::utils::config::trace::STATEMENT_TYPE_PREFIX;
use crate::utils::errors::{SqlResult, StructuralError};
use std::any::Any;
use std::fmt;

/// Lines produced by [`Node::describe_for_trace`]. Each call returns a fresh iterator.
pub type TraceLines<'a> = Box<dyn Iterator<Item = String> + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    BaseTable,
    PositionedCursorReference,
    Expression,
    ResultColumn,
    SelectNode,
    SelectStatement,
    UpdateStatement,
    DeleteStatement,
}

impl NodeKind {
    /// Kinds that may only appear as the root of a tree.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::SelectStatement | NodeKind::UpdateStatement | NodeKind::DeleteStatement
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub trait Node {
    fn kind(&self) -> NodeKind;

    /// Copies `other`'s attributes into `self`, parent capability first.
    /// Owned children are cloned, so the two nodes share no mutable state.
    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError>;

    /// This node's own fields, indented for `depth`. Children are not included.
    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_>;

    /// Structurally held children in declaration order.
    fn children(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn render_as_text(&self) -> String {
        walk::render_tree(self)
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()>;

    fn clone_node(&self) -> Box<dyn Node>;

    fn as_any(&self) -> &dyn Any;
}

pub trait TableReferenceLike: Node {
    fn table_reference(&self) -> &TableReference;

    fn correlation_name(&self) -> Option<&str> {
        self.table_reference().correlation_name()
    }

    fn table_properties(&self) -> &PropertyBag {
        self.table_reference().table_properties()
    }

    /// Name other clauses use to refer to this row source.
    fn exposed_name(&self) -> Option<&str> {
        self.correlation_name()
    }
}

pub trait StatementLike: Node {
    fn statement_kind_label(&self) -> &'static str;
}

/// Checked replacement for a blind cast of a copy source.
pub fn copy_source<'a, T: 'static>(
    expected: NodeKind,
    other: &'a dyn Node,
) -> Result<&'a T, StructuralError> {
    other
        .as_any()
        .downcast_ref::<T>()
        .ok_or(StructuralError::TypeMismatch {
            expected,
            found: other.kind(),
        })
}

/// Statement rendering: summary line first, then the inherited tree dump.
pub fn render_statement<S: StatementLike + ?Sized>(statement: &S) -> String {
    format!(
        "{}{}\n{}",
        STATEMENT_TYPE_PREFIX,
        statement.statement_kind_label(),
        walk::render_tree(statement)
    )
}
