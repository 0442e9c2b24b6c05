//! Drill-down subgraph visibility.
//!
//! Drilling into a node restricts the visible canvas to that node and its
//! hierarchical descendants. Visibility is a view-layer projection: nodes
//! and edges are hidden, never removed.
//!
//! Collapse interacts with both views: in the whole-graph view the
//! descendants of a collapsed node are hidden (the collapsed node itself
//! stays visible), and drill-mode traversal stops descending at collapsed
//! nodes.

use crate::classify::is_hierarchical;
use crate::domain::{EdgeId, NodeId};
use crate::snapshot::GraphSnapshot;
use std::collections::{HashMap, HashSet};

/// Compute the set of visible node IDs for the given subgraph root.
///
/// With no root, the whole-graph view applies. A root that no longer
/// resolves (stale drill path, e.g. the node was deleted mid-session) falls
/// back to the whole-graph view with a warning rather than stranding the
/// caller on an empty canvas.
#[must_use]
pub fn visible_set(snapshot: &dyn GraphSnapshot, root: Option<&NodeId>) -> HashSet<NodeId> {
    let children = hierarchy_children_map(snapshot);

    match root {
        None => whole_graph_view(snapshot, &children),
        Some(root_id) => {
            if snapshot.node_by_id(root_id).is_none() {
                tracing::warn!(root = %root_id, "drill root not found, falling back to whole-graph view");
                return whole_graph_view(snapshot, &children);
            }
            subgraph_view(snapshot, root_id, &children)
        }
    }
}

/// The edges visible under a node visibility set: an edge is visible iff
/// both its endpoints are.
#[must_use]
pub fn visible_edges(snapshot: &dyn GraphSnapshot, visible: &HashSet<NodeId>) -> Vec<EdgeId> {
    snapshot
        .edges()
        .iter()
        .filter(|edge| visible.contains(&edge.source_id) && visible.contains(&edge.target_id))
        .map(|edge| edge.id.clone())
        .collect()
}

/// Whether a node can be drilled into: it exists and has at least one
/// hierarchical child.
#[must_use]
pub fn can_drill_into(snapshot: &dyn GraphSnapshot, id: &NodeId) -> bool {
    !crate::hierarchy::direct_children(snapshot, id).is_empty()
}

/// Map of hierarchical children keyed by parent, in snapshot edge order.
fn hierarchy_children_map(snapshot: &dyn GraphSnapshot) -> HashMap<NodeId, Vec<NodeId>> {
    let mut map: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for edge in snapshot.edges() {
        if !is_hierarchical(edge) {
            continue;
        }
        map.entry(edge.source_id.clone())
            .or_default()
            .push(edge.target_id.clone());
    }
    map
}

/// Whole-graph view: all nodes except hierarchical descendants of collapsed
/// nodes.
fn whole_graph_view(
    snapshot: &dyn GraphSnapshot,
    children: &HashMap<NodeId, Vec<NodeId>>,
) -> HashSet<NodeId> {
    let mut hidden_by_collapse: HashSet<NodeId> = HashSet::new();

    for node in snapshot.nodes() {
        if !node.collapsed {
            continue;
        }
        let mut stack: Vec<NodeId> = children.get(&node.id).cloned().unwrap_or_default();
        while let Some(id) = stack.pop() {
            if !hidden_by_collapse.insert(id.clone()) {
                continue;
            }
            if let Some(grandchildren) = children.get(&id) {
                stack.extend(grandchildren.iter().cloned());
            }
        }
    }

    snapshot
        .nodes()
        .iter()
        .map(|node| node.id.clone())
        .filter(|id| !hidden_by_collapse.contains(id))
        .collect()
}

/// Drill view: root plus hierarchical descendants, stopping descent at
/// collapsed nodes. Work-queue traversal with an explicit visited set; the
/// hierarchy is assumed acyclic, but the bound is kept explicit.
fn subgraph_view(
    snapshot: &dyn GraphSnapshot,
    root: &NodeId,
    children: &HashMap<NodeId, Vec<NodeId>>,
) -> HashSet<NodeId> {
    let mut visible: HashSet<NodeId> = HashSet::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: Vec<NodeId> = vec![root.clone()];

    while let Some(current) = queue.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }

        let Some(node) = snapshot.node_by_id(&current) else {
            continue;
        };

        visible.insert(current.clone());
        if node.collapsed {
            continue;
        }

        if let Some(child_ids) = children.get(&current) {
            for child in child_ids {
                if !visited.contains(child) {
                    queue.push(child.clone());
                }
            }
        }
    }

    visible
}
