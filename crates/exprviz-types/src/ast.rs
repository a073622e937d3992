//! AST node types for arithmetic expressions.
//!
//! Every node carries a [`Span`] for error reporting. Recursive variants are
//! boxed to keep the enum size reasonable. Numeric literals keep their source
//! lexeme so that tree leaves can be labeled with the literal's exact text.

use crate::Span;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `42`, `3.14` — carries the source lexeme.
    NumberLit(String),
    /// `a + b`, `a * b`, etc.
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// `(expr)`
    Paren(Box<Expr>),
}

/// The four supported binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Returns the operator symbol, used both for error messages and as
    /// the internal-node label in the expression tree.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}
