// AST (Abstract Syntax Tree) definitions for the minicalc compiler

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// The operator as it is written in source and in three-address code.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(i64, SourceLocation),
    Variable(String, SourceLocation),
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Number of `BinaryOp` nodes in this expression tree.
    pub fn operator_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];

        while let Some(expr) = pending.pop() {
            if let Expr::BinaryOp { left, right, .. } = expr {
                count += 1;
                pending.push(&**left);
                pending.push(&**right);
            }
        }

        count
    }

    /// Move both children of a `BinaryOp` into `out`, leaving leaves behind.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        if let Expr::BinaryOp {
            left,
            right,
            location,
            ..
        } = self
        {
            let loc = *location;
            out.push(std::mem::replace(left.as_mut(), Expr::Number(0, loc)));
            out.push(std::mem::replace(right.as_mut(), Expr::Number(0, loc)));
        }
    }
}

// A flat chain like `1 + 1 + ... + 1` nests one level per operator, so the
// tree is torn down with a work list instead of recursive drops.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);

        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

/// Top-level statements.
///
/// `VarDecl` both declares `name` and assigns `init` to it; the grammar has no
/// declaration without an initializer, so the two effects share one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VarDecl {
        name: String,
        init: Expr,
        location: SourceLocation,
    },
    Assignment {
        target: String,
        expr: Expr,
        location: SourceLocation,
    },
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>, // In source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Total number of `BinaryOp` nodes across every statement.
    pub fn operator_count(&self) -> usize {
        self.statements
            .iter()
            .map(|stmt| match stmt {
                Statement::VarDecl { init, .. } => init.operator_count(),
                Statement::Assignment { expr, .. } => expr.operator_count(),
            })
            .sum()
    }
}
