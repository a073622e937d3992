//! The depth-first evaluator.
//!
//! Traversal order (the contract renderers depend on):
//! - `Entered` for a node fires when the node is first reached, before
//!   either child is visited (pre-order);
//! - `Resolved` fires once the node's value is known — immediately after
//!   `Entered` for a leaf, after both children's full event sequences for
//!   an internal node (post-order).
//!
//! Per node the state machine is `Unvisited → Entered → Resolved`; resolved
//! values are kept in the [`EvaluationRecord`] until the next run starts.

use crate::error::{EvalError, EvalResult};
use crate::event::{EvalEvent, EventSink};
use crate::value::{ArithmeticError, Value};
use exprviz_types::{ExprTree, NodeId};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Per-run side table mapping each resolved node to its computed value.
pub type EvaluationRecord = BTreeMap<NodeId, Value>;

/// Visitation state of a single node during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unvisited,
    Entered,
    Resolved,
}

/// Cooperative cancellation token, honored at each `Entered` checkpoint.
///
/// Clones share the same flag, so a renderer thread can cancel a run it
/// does not otherwise own.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The evaluation fails with
    /// [`EvalError::Cancelled`] before the next node is entered.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// The DFS evaluator.
///
/// Holds only per-run bookkeeping; the tree itself is borrowed for the
/// duration of one [`evaluate`](Evaluator::evaluate) call. The record and
/// state table are rebuilt at the start of every run and stay readable
/// afterwards for inspection.
pub struct Evaluator {
    /// Resolved values of the current/last run.
    record: EvaluationRecord,
    /// Visitation states of the current/last run, indexed by node.
    states: Vec<NodeState>,
    /// Cancellation flag.
    cancel: CancelToken,
    /// At-most-one-active-evaluation guard.
    active: bool,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            record: EvaluationRecord::new(),
            states: Vec::new(),
            cancel: CancelToken::new(),
            active: false,
        }
    }

    /// Create an evaluator honoring the given cancellation token.
    pub fn with_cancel_token(cancel: CancelToken) -> Self {
        Self {
            cancel,
            ..Self::new()
        }
    }

    /// The evaluation record of the current or last run.
    pub fn record(&self) -> &EvaluationRecord {
        &self.record
    }

    /// The visitation state of a node in the current or last run.
    /// `Unvisited` for nodes of a tree that was never evaluated.
    pub fn state(&self, node: NodeId) -> NodeState {
        self.states
            .get(node.index())
            .copied()
            .unwrap_or(NodeState::Unvisited)
    }

    /// Returns `true` while an evaluation is in flight.
    pub fn is_running(&self) -> bool {
        self.active
    }

    /// Evaluate the whole tree, streaming events to `sink`.
    ///
    /// Returns the final value of the root, or the first error. Only one
    /// evaluation may be active at a time; a second call while one is in
    /// flight fails with [`EvalError::AlreadyRunning`].
    pub fn evaluate(&mut self, tree: &ExprTree, sink: &mut dyn EventSink) -> EvalResult<Value> {
        if self.active {
            return Err(EvalError::AlreadyRunning);
        }
        self.active = true;
        self.record.clear();
        self.states = vec![NodeState::Unvisited; tree.len()];

        let result = self.eval_node(tree, tree.root(), sink);

        // Clear the guard on success and failure alike
        self.active = false;
        result
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    fn eval_node(
        &mut self,
        tree: &ExprTree,
        node: NodeId,
        sink: &mut dyn EventSink,
    ) -> EvalResult<Value> {
        if self.cancel.is_cancelled() {
            return Err(EvalError::Cancelled);
        }

        self.states[node.index()] = NodeState::Entered;
        sink.emit(EvalEvent::Entered { node });

        let value = match tree.children(node) {
            None => self.leaf_value(tree, node)?,
            Some((left, right)) => {
                let lhs = self.eval_node(tree, left, sink)?;
                let rhs = self.eval_node(tree, right, sink)?;
                self.apply(tree, node, lhs, rhs)?
            }
        };

        self.states[node.index()] = NodeState::Resolved;
        self.record.insert(node, value);
        sink.emit(EvalEvent::Resolved { node, value });
        Ok(value)
    }

    /// Parse a leaf's label: integers as `Int`, everything else numeric
    /// as `Float`.
    fn leaf_value(&self, tree: &ExprTree, node: NodeId) -> EvalResult<Value> {
        let label = tree.label(node);
        if let Ok(n) = label.parse::<i64>() {
            return Ok(Value::Int(n));
        }
        if let Ok(x) = label.parse::<f64>() {
            return Ok(Value::Float(x));
        }
        Err(EvalError::UnknownOperator {
            node,
            label: label.to_string(),
        })
    }

    /// Apply an internal node's operator to its children's values.
    fn apply(
        &self,
        tree: &ExprTree,
        node: NodeId,
        lhs: Value,
        rhs: Value,
    ) -> EvalResult<Value> {
        let result = match tree.label(node) {
            "+" => lhs.add(rhs),
            "-" => lhs.sub(rhs),
            "*" => lhs.mul(rhs),
            "/" => lhs.div(rhs),
            label => {
                return Err(EvalError::UnknownOperator {
                    node,
                    label: label.to_string(),
                })
            }
        };
        result.map_err(|e| match e {
            ArithmeticError::DivisionByZero => EvalError::DivisionByZero { node },
            ArithmeticError::IntegerOverflow => EvalError::IntegerOverflow { node },
        })
    }
}
