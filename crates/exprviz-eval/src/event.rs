//! Evaluation events and the sink collaborator contract.
//!
//! The evaluator pushes every event through [`EventSink::emit`] and waits
//! for it to return before proceeding, so a rendering sink can flush each
//! frame inline. Pacing is the sink's concern, not the evaluator's: a
//! headless sink runs at full speed, a [`DelaySink`] animates.

use crate::value::Value;
use exprviz_types::NodeId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One step of the traversal, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EvalEvent {
    /// Visitation of `node` has begun (pre-order).
    Entered { node: NodeId },
    /// `node`'s value has been computed (post-order).
    Resolved { node: NodeId, value: Value },
}

impl EvalEvent {
    /// The node this event concerns.
    pub fn node(&self) -> NodeId {
        match self {
            Self::Entered { node } => *node,
            Self::Resolved { node, .. } => *node,
        }
    }
}

/// External collaborator consuming the ordered event stream.
pub trait EventSink {
    /// Handle one event. The evaluator blocks until this returns.
    fn emit(&mut self, event: EvalEvent);
}

/// Sink that records every event — the headless/test sink.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<EvalEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the `Entered` event for `node`, if emitted.
    pub fn entered_index(&self, node: NodeId) -> Option<usize> {
        self.events
            .iter()
            .position(|e| matches!(e, EvalEvent::Entered { node: n } if *n == node))
    }

    /// Index of the `Resolved` event for `node`, if emitted.
    pub fn resolved_index(&self, node: NodeId) -> Option<usize> {
        self.events
            .iter()
            .position(|e| matches!(e, EvalEvent::Resolved { node: n, .. } if *n == node))
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: EvalEvent) {
        self.events.push(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: EvalEvent) {}
}

/// Sink wrapper that sleeps after forwarding each event, giving the
/// human-observable pacing of the animated visualization.
#[derive(Debug)]
pub struct DelaySink<S> {
    inner: S,
    delay: Duration,
}

impl<S: EventSink> DelaySink<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Unwrap the inner sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for DelaySink<S> {
    fn emit(&mut self, event: EvalEvent) {
        self.inner.emit(event);
        std::thread::sleep(self.delay);
    }
}
