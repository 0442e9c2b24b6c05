//! Dependency edge validation.
//!
//! The validator orchestrates the self-loop rule, endpoint eligibility, and
//! cycle detection into a single accept/reject decision with a
//! human-readable reason. Invalid edits are values, never errors: the
//! caller decides how to surface the reason.
//!
//! The same function serves the optimistic pre-flight check and the
//! authoritative commit-time check. There is exactly one implementation, so
//! both sides produce identical verdicts for identical snapshots.

use crate::cycle::would_create_cycle;
use crate::domain::{Edge, EdgeKind, EdgeMetadata, NewEdge, Node, NodeId, NodeType};
use crate::snapshot::GraphSnapshot;

/// Separator used when rendering a cycle path for display.
const CYCLE_PATH_SEPARATOR: &str = " → ";

/// Accept/reject decision for an edge edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the edit is allowed
    pub is_valid: bool,

    /// Human-readable rejection reason, present iff `is_valid` is false;
    /// suitable for direct display to the user
    pub error_reason: Option<String>,
}

impl Verdict {
    /// An accepting verdict.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_reason: None,
        }
    }

    /// A rejecting verdict with the given reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_reason: Some(reason.into()),
        }
    }
}

/// Whether a node may participate as an endpoint of a dependency edge.
///
/// Only task nodes are eligible. The rule is intentionally asymmetric:
/// hierarchical edges have no type restriction.
#[must_use]
pub fn is_dependency_eligible(node: &Node) -> bool {
    node.node_type == NodeType::Task
}

/// Validate a candidate dependency edge `source -> target`.
///
/// Rules, in order, short-circuiting on first failure:
/// 1. no self-loops (checked before node lookup; a self-loop is invalid
///    regardless of node existence);
/// 2. both endpoints must exist in the snapshot;
/// 3. both endpoints must be task nodes;
/// 4. the edge must not close a cycle in the dependency overlay.
#[must_use]
pub fn validate_dependency_edge(
    snapshot: &dyn GraphSnapshot,
    source_id: &NodeId,
    target_id: &NodeId,
) -> Verdict {
    if source_id == target_id {
        return Verdict::invalid("self-loop not allowed");
    }

    let (Some(source), Some(target)) = (
        snapshot.node_by_id(source_id),
        snapshot.node_by_id(target_id),
    ) else {
        return Verdict::invalid("endpoint node not found");
    };

    if !is_dependency_eligible(source) || !is_dependency_eligible(target) {
        return Verdict::invalid("dependency edges require both endpoints to be task nodes");
    }

    let check = would_create_cycle(snapshot, source_id, target_id);
    if check.has_cycle {
        let path = check.cycle_path.unwrap_or_default();
        return Verdict::invalid(format!(
            "cycle detected: {}",
            render_path(snapshot, &path)
        ));
    }

    Verdict::valid()
}

/// Validate a new-edge request.
///
/// Hierarchical requests are always valid. Dependency requests run the full
/// dependency rules and additionally require a dependency sub-type;
/// sub-type absence is rejected here, at validation time, consistent with
/// the other eligibility checks.
#[must_use]
pub fn validate_new_edge(snapshot: &dyn GraphSnapshot, edge: &NewEdge) -> Verdict {
    match edge.kind {
        EdgeKind::Hierarchical => Verdict::valid(),
        EdgeKind::Dependency => {
            let verdict = validate_dependency_edge(snapshot, &edge.source_id, &edge.target_id);
            if !verdict.is_valid {
                return verdict;
            }
            if edge.dependency_kind.is_none() {
                return Verdict::invalid("dependency kind is required for dependency edges");
            }
            Verdict::valid()
        }
    }
}

/// Validate re-typing an existing edge.
///
/// Changing to hierarchical is always valid. Changing to dependency re-runs
/// endpoint eligibility and the sub-type rule; the cycle check is skipped
/// when the edge already classifies as a dependency, since it is already
/// part of the overlay and cannot newly close a loop.
#[must_use]
pub fn validate_kind_change(
    snapshot: &dyn GraphSnapshot,
    edge: &Edge,
    new_metadata: &EdgeMetadata,
) -> Verdict {
    match new_metadata.kind {
        EdgeKind::Hierarchical => Verdict::valid(),
        EdgeKind::Dependency => {
            if new_metadata.dependency_kind.is_none() {
                return Verdict::invalid("dependency kind is required for dependency edges");
            }

            if crate::classify::is_dependency(edge) {
                return Verdict::valid();
            }

            validate_dependency_edge(snapshot, &edge.source_id, &edge.target_id)
        }
    }
}

/// Render a cycle path with node labels joined by an arrow separator.
///
/// Falls back to the raw ID when a path node is missing from the snapshot
/// or carries an empty label.
fn render_path(snapshot: &dyn GraphSnapshot, path: &[NodeId]) -> String {
    path.iter()
        .map(|id| match snapshot.node_by_id(id) {
            Some(node) if !node.label.is_empty() => node.label.clone(),
            _ => id.as_str().to_string(),
        })
        .collect::<Vec<_>>()
        .join(CYCLE_PATH_SEPARATOR)
}
