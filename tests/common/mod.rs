//! Helpers shared by the integration tests.

#![allow(dead_code)]

use sqlnode::ast::walk::pre_order;
use sqlnode::ast::{
    BaseTable, DeleteStatement, Expression, Literal, Node, NodeKind, PositionedCursorReference,
    ResultColumn, SelectNode, SelectStatement, UpdateStatement,
};
use sqlnode::errors::SqlResult;

/// A fresh node of `kind` with every attribute empty, to copy into.
pub fn blank(kind: NodeKind) -> Box<dyn Node> {
    match kind {
        NodeKind::BaseTable => Box::new(BaseTable::new("")),
        NodeKind::PositionedCursorReference => Box::new(PositionedCursorReference::new()),
        NodeKind::Expression => Box::new(Expression::constant(Literal::Null)),
        NodeKind::ResultColumn => Box::new(ResultColumn::new(
            None,
            Expression::constant(Literal::Null),
        )),
        NodeKind::SelectNode => Box::new(empty_query()),
        NodeKind::SelectStatement => Box::new(SelectStatement::new(empty_query())),
        NodeKind::UpdateStatement => {
            Box::new(UpdateStatement::new(BaseTable::new(""), Vec::new(), None))
        }
        NodeKind::DeleteStatement => Box::new(DeleteStatement::new(BaseTable::new(""), None)),
    }
}

fn empty_query() -> SelectNode {
    SelectNode::new(Vec::new(), Vec::new(), None)
}

/// Copies every node under `root` into a blank of the same kind and checks
/// that the copy renders exactly like its source. Returns the number of nodes checked.
pub fn assert_copies_render_identically(root: &dyn Node) -> SqlResult<usize> {
    let mut checked = 0;
    for (_, node) in pre_order(root) {
        let mut copy = blank(node.kind());
        copy.copy_structure_from(node)?;
        assert_eq!(
            copy.render_as_text(),
            node.render_as_text(),
            "copy of {} renders differently",
            node.kind()
        );
        checked += 1;
    }
    Ok(checked)
}
