//! Shared types for the exprviz expression compiler and evaluator.
//!
//! This crate defines the AST node types, source spans, structured compile
//! errors, the arena-backed expression tree, and the deterministic layout
//! helper used by renderers.

mod error;
mod span;
pub mod ast;
pub mod layout;
pub mod tree;

pub use error::{CompileError, CompileErrors, ErrorCode, MAX_ERRORS};
pub use span::{SourceFile, Span};
pub use tree::{ExprNode, ExprTree, NodeId, TreeBuilder};
