//! exprviz compiler: orchestrates the full compilation pipeline.
//!
//! ```text
//! Expression text → Lexer → Parser → tree building → ExprTree
//! ```
//!
//! The output tree is immutable and fully owned by the caller; each
//! operation in the expression becomes an internal node labeled with its
//! operator symbol, each numeric literal a leaf labeled with the literal's
//! source text. Compilation is pure — the same input always yields a
//! structurally equal tree.

use exprviz_lexer::Lexer;
use exprviz_parser::Parser;
use exprviz_types::ast::{Expr, ExprKind};
use exprviz_types::{CompileErrors, ExprTree, NodeId, SourceFile, TreeBuilder};

/// Compile an arithmetic expression into a binary expression tree.
///
/// Fails with the collected [`CompileErrors`] when the input is empty,
/// syntactically invalid, or uses an unsupported operator or literal.
/// No partial tree is returned on failure.
pub fn compile(source: &str) -> Result<ExprTree, CompileErrors> {
    compile_named("input", source)
}

/// Like [`compile`], with an input name used in diagnostics.
pub fn compile_named(name: &str, source: &str) -> Result<ExprTree, CompileErrors> {
    let source_file = SourceFile::new(name, source);

    let lexed = Lexer::new(&source_file).lex();
    if lexed.errors.has_errors() {
        return Err(lexed.errors);
    }

    let parsed = Parser::new(lexed.tokens, &source_file).parse();
    if parsed.errors.has_errors() {
        return Err(parsed.errors);
    }

    // Errors and expression are mutually exclusive past this point
    let expr = parsed
        .expr
        .expect("parser produced neither expression nor errors");
    Ok(build_tree(&expr))
}

/// Structural transform from the AST to the expression tree.
///
/// Children are pushed before their parent, so arena order is a valid
/// bottom-up order and identical inputs produce identical arenas.
pub fn build_tree(expr: &Expr) -> ExprTree {
    let mut builder = TreeBuilder::new();
    let root = lower(expr, &mut builder);
    builder.finish(root)
}

fn lower(expr: &Expr, builder: &mut TreeBuilder) -> NodeId {
    match &expr.kind {
        ExprKind::NumberLit(lexeme) => builder.leaf(lexeme.clone()),
        ExprKind::Binary { left, op, right } => {
            let left = lower(left, builder);
            let right = lower(right, builder);
            builder.internal(op.as_str(), left, right)
        }
        // Grouping has no node of its own
        ExprKind::Paren(inner) => lower(inner, builder),
    }
}
