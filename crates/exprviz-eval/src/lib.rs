//! exprviz evaluator: walks an expression tree depth-first, computing each
//! node's value in post-order while streaming visitation events to a sink.
//!
//! The event interleave is the defining property of the traversal: a node's
//! `Entered` event is emitted pre-order (when the node is first reached,
//! before either child), its `Resolved` event post-order (after both
//! children have resolved). A renderer drives its animation purely from
//! this stream.

mod error;
mod evaluator;
pub mod event;
pub mod value;

pub use error::{EvalError, EvalResult};
pub use evaluator::{CancelToken, EvaluationRecord, Evaluator, NodeState};
pub use event::{DelaySink, EvalEvent, EventSink, NullSink, RecordingSink};
pub use value::Value;
