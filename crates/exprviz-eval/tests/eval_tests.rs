//! Integration tests for the DFS evaluator.
//!
//! Covers:
//! - final results against hand-computed arithmetic
//! - the exact event sequence of the `3+4*2` scenario
//! - general event-ordering invariants (pre-order entered, post-order
//!   resolved) over a range of expressions
//! - division by zero, unknown operators, overflow
//! - the evaluation record and per-node states
//! - cancellation and the single-active-run guard

use exprviz_compiler::compile;
use exprviz_eval::{
    CancelToken, EvalError, EvalEvent, EventSink, Evaluator, NodeState, NullSink, RecordingSink,
    Value,
};
use exprviz_types::ExprTree;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn tree(source: &str) -> ExprTree {
    compile(source).unwrap_or_else(|errs| panic!("compile failed:\n{errs}"))
}

/// Evaluate and return (result, recorded events).
fn run(source: &str) -> (Result<Value, EvalError>, RecordingSink, ExprTree) {
    let tree = tree(source);
    let mut eval = Evaluator::new();
    let mut sink = RecordingSink::new();
    let result = eval.evaluate(&tree, &mut sink);
    (result, sink, tree)
}

fn result_of(source: &str) -> Value {
    let (result, _, _) = run(source);
    result.expect("evaluation failed")
}

/// Render the event stream as human-readable steps, using node labels.
fn trace(source: &str) -> Vec<String> {
    let (result, sink, tree) = run(source);
    result.expect("evaluation failed");
    sink.events
        .iter()
        .map(|event| match event {
            EvalEvent::Entered { node } => format!("enter {}", tree.label(*node)),
            EvalEvent::Resolved { node, value } => {
                format!("resolve {} = {}", tree.label(*node), value)
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_leaf() {
    assert_eq!(result_of("42"), Value::Int(42));
}

#[test]
fn test_scenario_result() {
    assert_eq!(result_of("3+4*2"), Value::Int(11));
}

#[test]
fn test_arithmetic_against_oracle() {
    // (source, expected) — expected computed by standard infix arithmetic
    let cases = [
        ("1+2", Value::Int(3)),
        ("10-4-3", Value::Int(3)),
        ("2*3*4", Value::Int(24)),
        ("(3+4)*2", Value::Int(14)),
        ("2+3*4-5", Value::Int(9)),
        ("1.5+1.5", Value::Float(3.0)),
        ("2.5*4", Value::Float(10.0)),
    ];
    for (source, expected) in cases {
        assert_eq!(result_of(source), expected, "evaluating {source}");
    }
}

#[test]
fn test_division_always_promotes_to_float() {
    assert_eq!(result_of("7/2"), Value::Float(3.5));
    // Even when dividing evenly
    assert_eq!(result_of("4/2"), Value::Float(2.0));
}

#[test]
fn test_integer_ops_stay_integer() {
    assert_eq!(result_of("1000000*1000000"), Value::Int(1_000_000_000_000));
}

// ─────────────────────────────────────────────────────────────────────
// The golden scenario
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_scenario_event_sequence() {
    assert_eq!(
        trace("3+4*2"),
        vec![
            "enter +",
            "enter 3",
            "resolve 3 = 3",
            "enter *",
            "enter 4",
            "resolve 4 = 4",
            "enter 2",
            "resolve 2 = 2",
            "resolve * = 8",
            "resolve + = 11",
        ]
    );
}

#[test]
fn test_leaf_events_back_to_back() {
    assert_eq!(trace("5"), vec!["enter 5", "resolve 5 = 5"]);
}

// ─────────────────────────────────────────────────────────────────────
// Ordering invariants
// ─────────────────────────────────────────────────────────────────────

/// For every node: entered strictly before resolved; for every internal
/// node: entered before either child's entered, resolved after both
/// children's resolved.
fn assert_ordering_invariants(source: &str) {
    let (result, sink, tree) = run(source);
    result.expect("evaluation failed");

    assert_eq!(sink.events.len(), 2 * tree.len(), "two events per node");

    for node in tree.node_ids() {
        let entered = sink.entered_index(node).expect("node never entered");
        let resolved = sink.resolved_index(node).expect("node never resolved");
        assert!(entered < resolved, "{node}: entered must precede resolved");

        if let Some((left, right)) = tree.children(node) {
            for child in [left, right] {
                let child_entered = sink.entered_index(child).unwrap();
                let child_resolved = sink.resolved_index(child).unwrap();
                assert!(
                    entered < child_entered,
                    "{node}: parent entered after child {child}"
                );
                assert!(
                    child_resolved < resolved,
                    "{node}: resolved before child {child}"
                );
            }
        }
    }
}

#[test]
fn test_ordering_invariants_hold() {
    for source in [
        "1",
        "1+2",
        "3+4*2",
        "1-2-3-4",
        "(1+2)*(3+4)",
        "((1+2)*3-4)/(5+6)",
        "1+2*3-4/5+6*7",
    ] {
        assert_ordering_invariants(source);
    }
}

#[test]
fn test_event_streams_identical_across_runs() {
    let tree = tree("(1+2)*(3+4)");
    let mut first = RecordingSink::new();
    Evaluator::new().evaluate(&tree, &mut first).unwrap();
    let mut second = RecordingSink::new();
    Evaluator::new().evaluate(&tree, &mut second).unwrap();
    assert_eq!(first.events, second.events);
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_division_by_zero() {
    let (result, _, tree) = run("4/0");
    assert_eq!(
        result,
        Err(EvalError::DivisionByZero { node: tree.root() })
    );
}

#[test]
fn test_division_by_zero_deep_in_tree() {
    let (result, sink, _) = run("1+4/(2-2)");
    assert!(matches!(result, Err(EvalError::DivisionByZero { .. })));
    // The failing node never resolves
    assert!(!sink
        .events
        .iter()
        .any(|e| matches!(e, EvalEvent::Resolved { value, .. } if value.as_f64().is_infinite())));
}

#[test]
fn test_unknown_operator_from_malformed_tree() {
    // Hand-built tree the compiler would never produce
    let mut b = exprviz_types::TreeBuilder::new();
    let one = b.leaf("1");
    let two = b.leaf("2");
    let root = b.internal("&", one, two);
    let tree = b.finish(root);

    let mut eval = Evaluator::new();
    let result = eval.evaluate(&tree, &mut NullSink);
    assert_eq!(
        result,
        Err(EvalError::UnknownOperator {
            node: root,
            label: "&".to_string()
        })
    );
}

#[test]
fn test_unparseable_leaf_label() {
    let mut b = exprviz_types::TreeBuilder::new();
    let root = b.leaf("abc");
    let tree = b.finish(root);

    let mut eval = Evaluator::new();
    let result = eval.evaluate(&tree, &mut NullSink);
    assert!(matches!(result, Err(EvalError::UnknownOperator { .. })));
}

#[test]
fn test_integer_overflow_surfaces() {
    let source = format!("{}+1", i64::MAX);
    let (result, _, _) = run(&source);
    assert!(matches!(result, Err(EvalError::IntegerOverflow { .. })));
}

// ─────────────────────────────────────────────────────────────────────
// Record & states
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_record_holds_every_node_value() {
    let tree = tree("3+4*2");
    let mut eval = Evaluator::new();
    eval.evaluate(&tree, &mut NullSink).unwrap();

    assert_eq!(eval.record().len(), tree.len());
    assert_eq!(eval.record()[&tree.root()], Value::Int(11));
    for node in tree.node_ids() {
        assert_eq!(eval.state(node), NodeState::Resolved);
    }
}

#[test]
fn test_record_rebuilt_each_run() {
    let big = tree("1+2+3");
    let small = tree("7");
    let mut eval = Evaluator::new();

    eval.evaluate(&big, &mut NullSink).unwrap();
    assert_eq!(eval.record().len(), 5);

    eval.evaluate(&small, &mut NullSink).unwrap();
    assert_eq!(eval.record().len(), 1);
}

#[test]
fn test_partial_states_after_failure() {
    let tree = tree("4/0");
    let mut eval = Evaluator::new();
    let mut sink = RecordingSink::new();
    eval.evaluate(&tree, &mut sink).unwrap_err();

    // Root was entered but never resolved; both leaves resolved
    assert_eq!(eval.state(tree.root()), NodeState::Entered);
    assert!(!eval.record().contains_key(&tree.root()));
    let (left, right) = tree.children(tree.root()).unwrap();
    assert_eq!(eval.state(left), NodeState::Resolved);
    assert_eq!(eval.state(right), NodeState::Resolved);
}

// ─────────────────────────────────────────────────────────────────────
// Cancellation & the single-run guard
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_pre_cancelled_run_emits_nothing() {
    let tree = tree("3+4*2");
    let token = CancelToken::new();
    token.cancel();

    let mut eval = Evaluator::with_cancel_token(token);
    let mut sink = RecordingSink::new();
    assert_eq!(eval.evaluate(&tree, &mut sink), Err(EvalError::Cancelled));
    assert!(sink.events.is_empty());
}

/// Sink that cancels the run after a fixed number of events.
struct CancellingSink {
    token: CancelToken,
    after: usize,
    events: Vec<EvalEvent>,
}

impl EventSink for CancellingSink {
    fn emit(&mut self, event: EvalEvent) {
        self.events.push(event);
        if self.events.len() == self.after {
            self.token.cancel();
        }
    }
}

#[test]
fn test_cancellation_stops_between_node_visits() {
    let tree = tree("3+4*2");
    let token = CancelToken::new();
    let mut sink = CancellingSink {
        token: token.clone(),
        after: 3, // cancel right after `resolve 3`
        events: Vec::new(),
    };

    let mut eval = Evaluator::with_cancel_token(token);
    assert_eq!(eval.evaluate(&tree, &mut sink), Err(EvalError::Cancelled));
    // No further node was entered after the cancellation point
    assert_eq!(sink.events.len(), 3);
}

#[test]
fn test_evaluator_reusable_after_failure() {
    let bad = tree("4/0");
    let good = tree("1+2");
    let mut eval = Evaluator::new();

    eval.evaluate(&bad, &mut NullSink).unwrap_err();
    assert!(!eval.is_running());
    assert_eq!(eval.evaluate(&good, &mut NullSink), Ok(Value::Int(3)));
}

#[test]
fn test_not_running_outside_evaluate() {
    let mut eval = Evaluator::new();
    assert!(!eval.is_running());
    eval.evaluate(&tree("1+1"), &mut NullSink).unwrap();
    assert!(!eval.is_running());
}
