use crate::ast::walk::pre_order;
use crate::ast::{
    BaseTable, DeleteStatement, Expression, Node, PositionedCursorReference, ResultColumn,
    SelectNode, SelectStatement, UpdateStatement,
};
use crate::utils::errors::SqlResult;

/// Per-kind callbacks. `accept` dispatches a single node; [`walk`] drives the traversal.
pub trait NodeVisitor {
    fn visit_base_table(&mut self, _table: &BaseTable) -> SqlResult<()> {
        Ok(())
    }
    fn visit_current_of(&mut self, _cursor: &PositionedCursorReference) -> SqlResult<()> {
        Ok(())
    }
    fn visit_expression(&mut self, _expr: &Expression) -> SqlResult<()> {
        Ok(())
    }
    fn visit_result_column(&mut self, _column: &ResultColumn) -> SqlResult<()> {
        Ok(())
    }
    fn visit_select_node(&mut self, _query: &SelectNode) -> SqlResult<()> {
        Ok(())
    }
    fn visit_select(&mut self, _select: &SelectStatement) -> SqlResult<()> {
        Ok(())
    }
    fn visit_update(&mut self, _update: &UpdateStatement) -> SqlResult<()> {
        Ok(())
    }
    fn visit_delete(&mut self, _delete: &DeleteStatement) -> SqlResult<()> {
        Ok(())
    }
}

/// Visits every node under `root` in pre-order, stopping at the first error.
pub fn walk(root: &dyn Node, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
    for (_, node) in pre_order(root) {
        node.accept(visitor)?;
    }
    Ok(())
}

/// Collects the cursor names of every positioned cursor reference in a tree.
#[derive(Debug, Default)]
pub struct CursorReferenceCollector {
    pub cursors: Vec<String>,
}

impl CursorReferenceCollector {
    pub fn collect(root: &dyn Node) -> SqlResult<Vec<String>> {
        let mut collector = Self::default();
        walk(root, &mut collector)?;
        Ok(collector.cursors)
    }
}

impl NodeVisitor for CursorReferenceCollector {
    fn visit_current_of(&mut self, cursor: &PositionedCursorReference) -> SqlResult<()> {
        self.cursors.push(cursor.cursor_name().to_string());
        Ok(())
    }
}
