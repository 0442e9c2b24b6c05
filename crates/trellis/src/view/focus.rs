//! Focus-mode relatedness and dimming.
//!
//! Focus mode emphasizes a node's hierarchical neighborhood and dims the
//! rest of the canvas. The neighborhood is a bounded-radius expansion:
//! parent, children, and siblings of the frontier, repeated once per focus
//! level.

use crate::domain::{EdgeId, NodeId};
use crate::hierarchy::{direct_children, parent_of, siblings};
use crate::snapshot::GraphSnapshot;
use std::collections::HashSet;

/// Focus expansion radius. The 1-3 bound is part of the type, not a
/// runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FocusLevel {
    /// Parent, children, and siblings of the focus node
    One,

    /// One further ring of hierarchical neighbors
    Two,

    /// Two further rings
    Three,
}

impl FocusLevel {
    /// Number of BFS expansion rounds for this level.
    #[must_use]
    pub fn rounds(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Compute the related-node set for a focus node.
///
/// Breadth-first expansion: round 0 is the focus node itself; each round
/// adds the parent, direct children, and siblings of every frontier node.
/// Higher levels strictly include all nodes from lower levels. Pure and
/// deterministic for a given `(snapshot, node, level)` triple, so callers
/// may cache the result while the snapshot reference is unchanged.
#[must_use]
pub fn related_set(
    snapshot: &dyn GraphSnapshot,
    node_id: &NodeId,
    level: FocusLevel,
) -> HashSet<NodeId> {
    let mut related: HashSet<NodeId> = HashSet::from([node_id.clone()]);
    let mut frontier: Vec<NodeId> = vec![node_id.clone()];

    for _ in 0..level.rounds() {
        let mut next_frontier: Vec<NodeId> = Vec::new();

        for current in &frontier {
            let mut neighbors: Vec<NodeId> = Vec::new();
            if let Some(parent) = parent_of(snapshot, current) {
                neighbors.push(parent);
            }
            neighbors.extend(direct_children(snapshot, current));
            neighbors.extend(siblings(snapshot, current));

            for neighbor in neighbors {
                if related.insert(neighbor.clone()) {
                    next_frontier.push(neighbor);
                }
            }
        }

        frontier = next_frontier;
    }

    related
}

/// Opacity pair applied to focused and dimmed elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusOpacity {
    /// Opacity for members of the related set
    pub focused: f32,

    /// Opacity for everything else
    pub dimmed: f32,
}

impl Default for FocusOpacity {
    fn default() -> Self {
        Self {
            focused: 1.0,
            dimmed: 0.2,
        }
    }
}

/// Per-element opacity assignments for the rendering collaborator.
///
/// An edge is focused iff both its endpoints are in the related set.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityPlan {
    /// Node opacity assignments, one per snapshot node
    pub nodes: Vec<(NodeId, f32)>,

    /// Edge opacity assignments, one per snapshot edge
    pub edges: Vec<(EdgeId, f32)>,
}

/// Derive the full dimming plan for a related set.
#[must_use]
pub fn opacity_plan(
    snapshot: &dyn GraphSnapshot,
    related: &HashSet<NodeId>,
    opacity: FocusOpacity,
) -> OpacityPlan {
    let nodes = snapshot
        .nodes()
        .iter()
        .map(|node| {
            let value = if related.contains(&node.id) {
                opacity.focused
            } else {
                opacity.dimmed
            };
            (node.id.clone(), value)
        })
        .collect();

    let edges = snapshot
        .edges()
        .iter()
        .map(|edge| {
            let focused =
                related.contains(&edge.source_id) && related.contains(&edge.target_id);
            let value = if focused {
                opacity.focused
            } else {
                opacity.dimmed
            };
            (edge.id.clone(), value)
        })
        .collect();

    OpacityPlan { nodes, edges }
}
