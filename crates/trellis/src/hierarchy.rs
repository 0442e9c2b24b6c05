//! Pure traversal queries over the hierarchy overlay.
//!
//! These functions consult hierarchical edges only. Dependency edges between
//! the same endpoints are never followed; that exclusion is what keeps the
//! outline tree acyclic-by-construction and independent of the dependency
//! overlay's cycle concerns.
//!
//! Edge direction convention: hierarchical edges point parent -> child. The
//! single-parent invariant is enforced upstream by the store; if it is ever
//! violated, these functions return the first match in snapshot order.

use crate::classify::is_hierarchical;
use crate::domain::NodeId;
use crate::snapshot::GraphSnapshot;
use std::collections::HashSet;

/// The parent of a node: the source of its incoming hierarchical edge.
///
/// Returns `None` when the node does not exist, has no incoming hierarchical
/// edge, or its recorded parent does not resolve.
#[must_use]
pub fn parent_of(snapshot: &dyn GraphSnapshot, id: &NodeId) -> Option<NodeId> {
    snapshot.node_by_id(id)?;

    snapshot
        .edges()
        .iter()
        .filter(|edge| is_hierarchical(edge))
        .find(|edge| {
            edge.target_id == *id && snapshot.node_by_id(&edge.source_id).is_some()
        })
        .map(|edge| edge.source_id.clone())
}

/// The direct children of a node, in snapshot edge order.
///
/// Targets of outgoing hierarchical edges, deduplicated, skipping targets
/// that do not resolve to an existing node. Returns empty when the node
/// does not exist.
#[must_use]
pub fn direct_children(snapshot: &dyn GraphSnapshot, id: &NodeId) -> Vec<NodeId> {
    if snapshot.node_by_id(id).is_none() {
        return Vec::new();
    }

    let mut children = Vec::new();
    let mut seen = HashSet::new();

    for edge in snapshot.edges() {
        if edge.source_id != *id || !is_hierarchical(edge) {
            continue;
        }
        if snapshot.node_by_id(&edge.target_id).is_none() {
            continue;
        }
        if seen.insert(edge.target_id.clone()) {
            children.push(edge.target_id.clone());
        }
    }

    children
}

/// The siblings of a node: its parent's children, minus the node itself.
///
/// Returns empty when the node has no parent.
#[must_use]
pub fn siblings(snapshot: &dyn GraphSnapshot, id: &NodeId) -> Vec<NodeId> {
    let Some(parent) = parent_of(snapshot, id) else {
        return Vec::new();
    };

    direct_children(snapshot, &parent)
        .into_iter()
        .filter(|child| child != id)
        .collect()
}
