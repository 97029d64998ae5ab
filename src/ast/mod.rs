// Query tree node model.
// This module contains all node types and the contracts they share.

mod traits;
pub use traits::{
    copy_source, render_statement, Node, NodeKind, StatementLike, TableReferenceLike, TraceLines,
};

mod base;
mod expressions;
mod properties;
mod statements;
mod table_reference;
pub mod walk;

pub use base::{NodeBase, SourcePos};
pub use expressions::{Expr, Expression, Literal, ResultColumn};
pub use properties::PropertyBag;
pub use statements::{
    DeleteStatement, SelectNode, SelectStatement, Statement, UpdateStatement, WhereClause,
};
pub use table_reference::{BaseTable, FromTable, PositionedCursorReference, TableReference};
