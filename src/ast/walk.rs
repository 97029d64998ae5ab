use crate::ast::{Node, TraceLines};

/// Depth-first pre-order walk yielding `(depth, node)`.
///
/// Uses an explicit stack, so nesting depth is bounded by memory rather than
/// the call stack. Ownership rules out cycles, so the walk always ends.
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a dyn Node)>,
}

impl<'a> PreOrder<'a> {
    fn below(children: Vec<&'a dyn Node>, depth: usize) -> Self {
        let mut walk = Self { stack: Vec::new() };
        walk.push_children(children, depth);
        walk
    }

    fn push_children(&mut self, children: Vec<&'a dyn Node>, depth: usize) {
        // Reversed so the first declared child is popped first.
        self.stack
            .extend(children.into_iter().rev().map(|child| (depth, child)));
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a dyn Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.push_children(node.children(), depth + 1);
        Some((depth, node))
    }
}

pub fn pre_order(root: &dyn Node) -> PreOrder<'_> {
    PreOrder {
        stack: vec![(0, root)],
    }
}

pub fn node_count(root: &dyn Node) -> usize {
    pre_order(root).count()
}

/// Trace lines of `root` and everything below it, children indented one level deeper.
pub fn trace_lines<N: Node + ?Sized>(root: &N) -> TraceLines<'_> {
    let below = PreOrder::below(root.children(), 1)
        .flat_map(|(depth, node)| node.describe_for_trace(depth));
    Box::new(root.describe_for_trace(0).chain(below))
}

pub fn render_tree<N: Node + ?Sized>(root: &N) -> String {
    trace_lines(root).collect::<Vec<_>>().join("\n")
}
