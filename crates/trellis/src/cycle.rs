//! Cycle detection over the dependency overlay.
//!
//! The dependency overlay is the subgraph induced by edges whose classified
//! kind is dependency. Hierarchical and ambiguous edges never enter it, so
//! the outline tree can share endpoints with dependency edges without ever
//! influencing cycle semantics.
//!
//! Adding edge `source -> target` creates a cycle iff `target` can already
//! reach `source` through existing dependency edges; the new edge would
//! close the loop.

use crate::classify::classify;
use crate::domain::{DependencyKind, EdgeKind, NodeId};
use crate::snapshot::GraphSnapshot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// Result of a cycle check for a candidate dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleCheck {
    /// Whether adding the candidate edge would create a cycle
    pub has_cycle: bool,

    /// The offending cycle, as node IDs read start-to-end; the first and
    /// last entries are the candidate source, closing the loop
    pub cycle_path: Option<Vec<NodeId>>,
}

impl CycleCheck {
    fn acyclic() -> Self {
        Self {
            has_cycle: false,
            cycle_path: None,
        }
    }
}

/// The dependency overlay of a snapshot.
///
/// Built from edges whose classified kind is dependency and whose endpoints
/// both resolve. Uses petgraph's `DiGraph` with an ID-to-index map for O(1)
/// node location, mirroring the snapshot's edge order for deterministic
/// traversal.
pub struct DependencyOverlay {
    graph: DiGraph<NodeId, DependencyKind>,
    node_map: HashMap<NodeId, NodeIndex>,
}

impl DependencyOverlay {
    /// Build the overlay from a snapshot.
    pub fn from_snapshot(snapshot: &dyn GraphSnapshot) -> Self {
        let mut overlay = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        };

        for edge in snapshot.edges() {
            let meta = classify(edge);
            if meta.kind != EdgeKind::Dependency {
                continue;
            }
            // Edges with unresolved endpoints carry no dependency semantics.
            if snapshot.node_by_id(&edge.source_id).is_none()
                || snapshot.node_by_id(&edge.target_id).is_none()
            {
                continue;
            }

            let source = overlay.intern(&edge.source_id);
            let target = overlay.intern(&edge.target_id);
            overlay
                .graph
                .add_edge(source, target, meta.dependency_kind.unwrap_or_default());
        }

        overlay
    }

    fn intern(&mut self, id: &NodeId) -> NodeIndex {
        if let Some(&index) = self.node_map.get(id) {
            return index;
        }
        let index = self.graph.add_node(id.clone());
        self.node_map.insert(id.clone(), index);
        index
    }

    /// Number of dependency edges in the overlay.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the overlay currently contains no directed cycle.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.graph)
    }

    /// Check whether adding `source -> target` would create a cycle.
    ///
    /// Runs an iterative DFS from `target` looking for `source`. Each node
    /// is visited at most once; without the visited set, diamond-shaped
    /// dependency graphs would blow up exponentially.
    #[must_use]
    pub fn would_create_cycle(&self, source: &NodeId, target: &NodeId) -> CycleCheck {
        if source == target {
            return CycleCheck {
                has_cycle: true,
                cycle_path: Some(vec![source.clone(), target.clone()]),
            };
        }

        let (Some(&start), Some(&goal)) = (self.node_map.get(target), self.node_map.get(source))
        else {
            // An endpoint untouched by dependency edges cannot be on a loop.
            return CycleCheck::acyclic();
        };

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut stack = vec![start];
        visited.insert(start);

        while let Some(current) = stack.pop() {
            if current == goal {
                return CycleCheck {
                    has_cycle: true,
                    cycle_path: Some(self.reconstruct_path(source, start, goal, &came_from)),
                };
            }

            for edge in self.graph.edges(current) {
                let next = edge.target();
                if visited.insert(next) {
                    came_from.insert(next, current);
                    stack.push(next);
                }
            }
        }

        CycleCheck::acyclic()
    }

    /// Rebuild the cycle path from DFS back-pointers.
    ///
    /// The reachability chain runs `target -> ... -> source`; prefixing the
    /// candidate source yields the full loop `source -> target -> ... ->
    /// source`, reading start-to-end.
    fn reconstruct_path(
        &self,
        source: &NodeId,
        start: NodeIndex,
        goal: NodeIndex,
        came_from: &HashMap<NodeIndex, NodeIndex>,
    ) -> Vec<NodeId> {
        let mut chain = vec![self.graph[goal].clone()];
        let mut current = goal;
        while current != start {
            current = came_from[&current];
            chain.push(self.graph[current].clone());
        }
        chain.push(source.clone());
        chain.reverse();
        chain
    }
}

/// Check whether adding dependency edge `source -> target` to the snapshot's
/// dependency overlay would create a cycle.
///
/// A self-loop always reports a cycle with path `[source, target]`. The
/// result is deterministic for a deterministic snapshot edge order; when
/// several cycle paths exist, whichever the traversal finds first is
/// returned.
#[must_use]
pub fn would_create_cycle(
    snapshot: &dyn GraphSnapshot,
    source: &NodeId,
    target: &NodeId,
) -> CycleCheck {
    if source == target {
        return CycleCheck {
            has_cycle: true,
            cycle_path: Some(vec![source.clone(), target.clone()]),
        };
    }
    DependencyOverlay::from_snapshot(snapshot).would_create_cycle(source, target)
}
