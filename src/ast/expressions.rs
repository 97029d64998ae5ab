use crate::ast::traits::copy_source;
use crate::ast::{Node, NodeBase, NodeKind, TraceLines};
use crate::semantic::visiters::NodeVisitor;
use crate::utils::config::trace::{indent, or_empty};
use crate::utils::errors::{SqlResult, StructuralError};
use std::any::Any;
use std::fmt;
use std::iter;
use std::mem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer(i64),
    String(String),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Literal::Null => write!(f, "NULL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Constant(Literal),
    Column(String),
    /// Physical location of the current row, added by the binder for positioned DML.
    RowLocation,
    Equals(Box<Expression>, Box<Expression>),
}

/// Operands are boxed, so a long `Equals` chain nests arbitrarily deep. Clone
/// and drop walk it with an explicit stack instead of recursing.
#[derive(Debug, PartialEq, Eq)]
pub struct Expression {
    base: NodeBase,
    expr: Expr,
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        enum Step<'a> {
            Enter(&'a Expression),
            Build(&'a NodeBase),
        }

        let mut steps = vec![Step::Enter(self)];
        let mut built: Vec<Expression> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(node) => match &node.expr {
                    Expr::Equals(left, right) => {
                        steps.push(Step::Build(&node.base));
                        steps.push(Step::Enter(right.as_ref()));
                        steps.push(Step::Enter(left.as_ref()));
                    }
                    leaf => built.push(Expression {
                        base: node.base.clone(),
                        expr: leaf.clone(),
                    }),
                },
                Step::Build(base) => {
                    let right = built.pop().expect("right operand is built first");
                    let left = built.pop().expect("left operand is built first");
                    built.push(Expression {
                        base: base.clone(),
                        expr: Expr::Equals(Box::new(left), Box::new(right)),
                    });
                }
            }
        }
        built.pop().expect("clone yields exactly one root")
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_operands(&mut self.expr, &mut pending);
        while let Some(mut operand) = pending.pop() {
            detach_operands(&mut operand.expr, &mut pending);
        }
    }
}

fn detach_operands(expr: &mut Expr, pending: &mut Vec<Box<Expression>>) {
    if matches!(expr, Expr::Equals(..)) {
        if let Expr::Equals(left, right) = mem::replace(expr, Expr::Constant(Literal::Null)) {
            pending.push(left);
            pending.push(right);
        }
    }
}

impl Expression {
    pub fn new(expr: Expr) -> Self {
        Self {
            base: NodeBase::new(),
            expr,
        }
    }

    pub fn at(expr: Expr, line: usize) -> Self {
        Self {
            base: NodeBase::at(line),
            expr,
        }
    }

    pub fn constant(value: Literal) -> Self {
        Self::new(Expr::Constant(value))
    }

    pub fn column(name: impl Into<String>) -> Self {
        Self::new(Expr::Column(name.into()))
    }

    pub fn row_location() -> Self {
        Self::new(Expr::RowLocation)
    }

    pub fn equals(left: Expression, right: Expression) -> Self {
        Self::new(Expr::Equals(Box::new(left), Box::new(right)))
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn line(&self) -> Option<usize> {
        self.base.line()
    }
}

impl Node for Expression {
    fn kind(&self) -> NodeKind {
        NodeKind::Expression
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        let other = copy_source::<Expression>(self.kind(), other)?;
        self.base.copy_structure_from(&other.base);
        self.expr = other.expr.clone();
        Ok(())
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        let pad = indent(depth);
        let own = match &self.expr {
            Expr::Constant(value) => format!("{pad}value: {}", value),
            Expr::Column(name) => format!("{pad}column: {}", name),
            Expr::RowLocation => format!("{pad}rowLocation"),
            Expr::Equals(..) => format!("{pad}operator: ="),
        };
        Box::new(self.base.describe(self.kind(), depth).chain(iter::once(own)))
    }

    fn children(&self) -> Vec<&dyn Node> {
        match &self.expr {
            Expr::Equals(left, right) => vec![left.as_ref() as &dyn Node, right.as_ref()],
            _ => Vec::new(),
        }
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        visitor.visit_expression(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One entry of a select list or SET clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    base: NodeBase,
    name: Option<String>,
    expression: Expression,
}

impl ResultColumn {
    pub fn new(name: Option<String>, expression: Expression) -> Self {
        Self {
            base: NodeBase::new(),
            name,
            expression,
        }
    }

    pub fn at(name: Option<String>, expression: Expression, line: usize) -> Self {
        Self {
            base: NodeBase::at(line),
            name,
            expression,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

impl Node for ResultColumn {
    fn kind(&self) -> NodeKind {
        NodeKind::ResultColumn
    }

    fn copy_structure_from(&mut self, other: &dyn Node) -> Result<(), StructuralError> {
        let other = copy_source::<ResultColumn>(self.kind(), other)?;
        self.base.copy_structure_from(&other.base);
        self.name = other.name.clone();
        self.expression = other.expression.clone();
        Ok(())
    }

    fn describe_for_trace(&self, depth: usize) -> TraceLines<'_> {
        let own = format!("{}name: {}", indent(depth), or_empty(self.name()));
        Box::new(self.base.describe(self.kind(), depth).chain(iter::once(own)))
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.expression as &dyn Node]
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> SqlResult<()> {
        visitor.visit_result_column(self)
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
