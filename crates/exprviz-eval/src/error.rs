//! Runtime error types for the exprviz evaluator.

use exprviz_types::NodeId;
use thiserror::Error;

/// Errors that can occur while evaluating an expression tree.
///
/// Every error aborts the whole run; no partial result is meaningful.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A `/` node whose right subtree evaluated to zero.
    #[error("division by zero at node {node}")]
    DivisionByZero { node: NodeId },

    /// A node label that is neither an operator nor a parseable numeral.
    /// Defensive — cannot occur for compiler-produced trees.
    #[error("unknown operator '{label}' at node {node}")]
    UnknownOperator { node: NodeId, label: String },

    /// Checked i64 arithmetic overflowed.
    #[error("integer overflow at node {node}")]
    IntegerOverflow { node: NodeId },

    /// The cancellation token was triggered between node visits.
    #[error("evaluation cancelled")]
    Cancelled,

    /// `evaluate` was called while another evaluation was in flight.
    #[error("an evaluation is already in progress")]
    AlreadyRunning,
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
