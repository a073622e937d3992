//! Deterministic 2-D layout for rendering an expression tree.
//!
//! Positions are derived purely from tree shape in a pre-order walk: each
//! node sits midway above its subtrees, children one level down with the
//! horizontal spread halved at every level. Renderers compute this once per
//! tree, before evaluation begins, and the map stays stable for the whole
//! run.

use crate::tree::{ExprTree, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A 2-D canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Root position.
    pub root_x: f64,
    pub root_y: f64,
    /// Initial horizontal offset between a node and its children.
    pub initial_dx: f64,
    /// Vertical distance between levels.
    pub level_dy: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        // Sized for a 700x500 canvas
        Self {
            root_x: 350.0,
            root_y: 50.0,
            initial_dx: 150.0,
            level_dy: 100.0,
        }
    }
}

/// Compute positions for every node of `tree` using the default config.
pub fn layout(tree: &ExprTree) -> BTreeMap<NodeId, Point> {
    layout_with(tree, LayoutConfig::default())
}

/// Compute positions for every node of `tree`.
pub fn layout_with(tree: &ExprTree, config: LayoutConfig) -> BTreeMap<NodeId, Point> {
    let mut positions = BTreeMap::new();
    assign(
        tree,
        tree.root(),
        config.root_x,
        config.root_y,
        config.initial_dx,
        config.level_dy,
        &mut positions,
    );
    positions
}

fn assign(
    tree: &ExprTree,
    id: NodeId,
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    positions: &mut BTreeMap<NodeId, Point>,
) {
    positions.insert(id, Point { x, y });
    if let Some((left, right)) = tree.children(id) {
        assign(tree, left, x - dx, y + dy, dx / 2.0, dy, positions);
        assign(tree, right, x + dx, y + dy, dx / 2.0, dy, positions);
    }
}
