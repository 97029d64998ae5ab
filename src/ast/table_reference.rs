use crate::ast::traits::copy_source;
use crate::ast::{Node, NodeBase, NodeKind, PropertyBag, TableReferenceLike, TraceLines};
use crate::semantic::visiters::NodeVisitor;
use crate::utils::config::trace::{indent, or_empty, EMPTY_MARKER};
use crate::utils::errors::{SqlResult, StructuralError};
use std::any::Any;
use std::iter;

/// Attributes shared by every row source in a FROM list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReference {
    base: NodeBase,
    correlation_name: Option<String>,
    properties: PropertyBag,
    initialized: bool,
}

impl TableReference {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Completes construction. A second call is a programming error.
    pub fn initialize(
        &mut self,
        kind: NodeKind,
        correlation_name: Option<String>,
        table_properties: Option<PropertyBag>,
    ) -> Result<(), StructuralError> {
        if self.initialized {
            return Err(StructuralError::AlreadyInitialized { kind });
        }
        self.correlation_name = correlation_name;
        self.properties = table_properties.unwrap_or_default();
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn base(&self) -> &NodeBase {
        &self.base
    }

    pub fn correlation_name(&self) -> Option<&str> {
        self.correlation_name.as_deref()
    }

    pub fn table_properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn copy_structure_from(&mut self, other: &TableReference) {
        self.base.copy_structure_from(&other.base);
        self.correlation_name = other.correlation_name.clone();
        self.properties = other.properties.clone();
        self.initialized = other.initialized;
    }

    pub fn describe(&self, kind: NodeKind, depth: usize) -> TraceLines<'_> {
        let pad = indent(depth);
        let own = [
            format!("{pad}correlationName: {}", or_empty(self.correlation_name())),
            format!("{pad}tableProperties: {}", self.properties),
        ];
        Box::new(self.base.describe(kind, depth).chain(own))
    }
}

/// A table named directly in the statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTable {
    table: TableReference,
    table_name: String,
}

impl BaseTable {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self::with_base(table_name, NodeBase::new())
    }

    pub fn at(table_name: impl Into<String>, line: usize) -> Self {
        Self::with_base(table_name, NodeBase::at(line))
    }

    fn with_base(table_name: impl Into<String>, base: NodeBase) -> Self {
        Self {
            table: TableReference::new(base),
            table_name: table_name.into(),
        }
    }

    pub fn initialize(
        &mut self,
        correlation_name: Option<String>,
        table_properties: Option<PropertyBag>,
    ) -> Result<(), StructuralError> {
        self.table
            .initialize(NodeKind::BaseTable, correlation_name, table_properties)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl Node for BaseTable {
    fn kind(&self) -> NodeKind {
        NodeKind::BaseTable
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        let other = copy_source::<BaseTable>(NodeKind::BaseTable, other)?;
        self.table.copy_structure_from(&other.table);
        self.table_name = other.table_name.clone();
        Ok(())
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        let own = format!("{}tableName: {}", indent(depth), self.table_name);
        Box::new(self.table.describe(self.kind(), depth).chain(iter::once(own)))
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        visitor.visit_base_table(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TableReferenceLike for BaseTable {
    fn table_reference(&self) -> &TableReference {
        &self.table
    }

    fn exposed_name(&self) -> Option<&str> {
        self.correlation_name().or(Some(self.table_name.as_str()))
    }
}

/// Row source of a positioned UPDATE or DELETE: the row an open cursor is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionedCursorReference {
    table: TableReference,
    cursor_name: String,
}

impl PositionedCursorReference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(line: usize) -> Self {
        Self {
            table: TableReference::new(NodeBase::at(line)),
            cursor_name: String::new(),
        }
    }

    /// Builds and initializes in one step.
    pub fn build(
        correlation_name: Option<String>,
        cursor_name: impl Into<String>,
        table_properties: Option<PropertyBag>,
    ) -> Result<Self, StructuralError> {
        let mut node = Self::new();
        node.initialize(correlation_name, cursor_name, table_properties)?;
        Ok(node)
    }

    pub fn initialize(
        &mut self,
        correlation_name: Option<String>,
        cursor_name: impl Into<String>,
        table_properties: Option<PropertyBag>,
    ) -> Result<(), StructuralError> {
        let cursor_name = validate_cursor_name(cursor_name.into())?;
        self.table.initialize(
            NodeKind::PositionedCursorReference,
            correlation_name,
            table_properties,
        )?;
        self.cursor_name = cursor_name;
        Ok(())
    }

    pub fn cursor_name(&self) -> &str {
        &self.cursor_name
    }

    pub fn rename_cursor(&mut self, cursor_name: impl Into<String>) -> Result<(), StructuralError> {
        self.cursor_name = validate_cursor_name(cursor_name.into())?;
        Ok(())
    }
}

fn validate_cursor_name(name: String) -> Result<String, StructuralError> {
    if name.trim().is_empty() {
        return Err(StructuralError::InvalidCursorName);
    }
    Ok(name)
}

impl Node for PositionedCursorReference {
    fn kind(&self) -> NodeKind {
        NodeKind::PositionedCursorReference
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        let other = copy_source::<PositionedCursorReference>(self.kind(), other)?;
        self.table.copy_structure_from(&other.table);
        self.cursor_name = other.cursor_name.clone();
        Ok(())
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        let cursor = if self.cursor_name.is_empty() {
            EMPTY_MARKER
        } else {
            self.cursor_name.as_str()
        };
        let own = format!("{}cursor: {}", indent(depth), cursor);
        Box::new(self.table.describe(self.kind(), depth).chain(iter::once(own)))
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        visitor.visit_current_of(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TableReferenceLike for PositionedCursorReference {
    fn table_reference(&self) -> &TableReference {
        &self.table
    }
}

/// Closed set of row sources a FROM list can hold.
///
/// The enum is transparent to copying: `as_any` exposes the variant, so a
/// `FromTable` and the bare node it wraps are interchangeable copy sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FromTable {
    Base(BaseTable),
    CurrentOf(PositionedCursorReference),
}

impl FromTable {
    pub fn as_node(&self) -> &dyn Node {
        match self {
            FromTable::Base(table) => table,
            FromTable::CurrentOf(cursor) => cursor,
        }
    }

    fn as_node_mut(&mut self) -> &mut dyn Node {
        match self {
            FromTable::Base(table) => table,
            FromTable::CurrentOf(cursor) => cursor,
        }
    }

    pub fn as_table_reference(&self) -> &dyn TableReferenceLike {
        match self {
            FromTable::Base(table) => table,
            FromTable::CurrentOf(cursor) => cursor,
        }
    }

    pub fn cursor(&self) -> Option<&PositionedCursorReference> {
        match self {
            FromTable::CurrentOf(cursor) => Some(cursor),
            FromTable::Base(_) => None,
        }
    }
}

impl From<BaseTable> for FromTable {
    fn from(table: BaseTable) -> Self {
        FromTable::Base(table)
    }
}

impl From<PositionedCursorReference> for FromTable {
    fn from(cursor: PositionedCursorReference) -> Self {
        FromTable::CurrentOf(cursor)
    }
}

impl Node for FromTable {
    fn kind(&self) -> NodeKind {
        self.as_node().kind()
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        self.as_node_mut().copy_structure_from(other)
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        self.as_node().describe_for_trace(depth)
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.as_node().children()
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        self.as_node().accept(visitor)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self.as_node().as_any()
    }
}

impl TableReferenceLike for FromTable {
    fn table_reference(&self) -> &TableReference {
        self.as_table_reference().table_reference()
    }

    fn exposed_name(&self) -> Option<&str> {
        self.as_table_reference().exposed_name()
    }
}
