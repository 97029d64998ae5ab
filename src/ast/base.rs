use crate::ast::{NodeKind, TraceLines};
use crate::utils::config::trace::{indent, EMPTY_MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
}

/// Attributes every node carries regardless of kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeBase {
    pos: Option<SourcePos>,
}

impl NodeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(line: usize) -> Self {
        Self {
            pos: Some(SourcePos { line }),
        }
    }

    pub fn line(&self) -> Option<usize> {
        self.pos.map(|pos| pos.line)
    }

    pub fn copy_structure_from(&mut self, other: &NodeBase) {
        self.pos = other.pos;
    }

    pub fn describe(&self, kind: NodeKind, depth: usize) -> TraceLines<'static> {
        let pad = indent(depth);
        let line = match self.line() {
            Some(line) => line.to_string(),
            None => EMPTY_MARKER.to_string(),
        };
        Box::new([format!("{pad}{kind}"), format!("{pad}line: {line}")].into_iter())
    }
}
