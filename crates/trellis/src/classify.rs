//! Edge classification: hierarchical vs dependency.
//!
//! An edge's kind can be carried directly on the edge or inside its nested
//! metadata object, depending on how it was created. Classification is a
//! pure function of the edge's own data and never consults the graph.
//!
//! Edges with no readable kind default to hierarchical. This is the
//! fail-safe direction: ambiguous edges are excluded from cycle detection
//! and from every other dependency semantic.

use crate::domain::{Edge, EdgeKind, EdgeMetadata};

/// Derive an edge's kind and, for dependency edges, its sub-type.
///
/// Resolution order:
/// 1. the explicit `kind` field on the edge;
/// 2. the nested `metadata.kind`;
/// 3. default: hierarchical with no sub-type.
///
/// The sub-type accompanies whichever carrier supplied the kind; a
/// top-level kind with no top-level sub-type still picks up the sub-type
/// from the metadata object when one is present.
#[must_use]
pub fn classify(edge: &Edge) -> EdgeMetadata {
    if let Some(kind) = edge.kind {
        let dependency_kind = edge
            .dependency_kind
            .or_else(|| edge.metadata.as_ref().and_then(|m| m.dependency_kind));
        return EdgeMetadata {
            kind,
            dependency_kind,
        };
    }

    if let Some(metadata) = &edge.metadata {
        return *metadata;
    }

    EdgeMetadata::hierarchical()
}

/// Whether the edge classifies as hierarchical (structural parent-child).
#[must_use]
pub fn is_hierarchical(edge: &Edge) -> bool {
    classify(edge).kind == EdgeKind::Hierarchical
}

/// Whether the edge classifies as a dependency edge.
#[must_use]
pub fn is_dependency(edge: &Edge) -> bool {
    classify(edge).kind == EdgeKind::Dependency
}

/// Iterate the hierarchical edges of a slice, preserving order.
pub fn hierarchical_edges(edges: &[Edge]) -> impl Iterator<Item = &Edge> {
    edges.iter().filter(|e| is_hierarchical(e))
}

/// Iterate the dependency edges of a slice, preserving order.
pub fn dependency_edges(edges: &[Edge]) -> impl Iterator<Item = &Edge> {
    edges.iter().filter(|e| is_dependency(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyKind;

    fn bare_edge() -> Edge {
        Edge::untyped("e1", "a", "b")
    }

    #[test]
    fn explicit_kind_field_wins() {
        let mut edge = bare_edge();
        edge.kind = Some(EdgeKind::Dependency);
        edge.dependency_kind = Some(DependencyKind::StartToStart);
        edge.metadata = Some(EdgeMetadata::hierarchical());

        let meta = classify(&edge);
        assert_eq!(meta.kind, EdgeKind::Dependency);
        assert_eq!(meta.dependency_kind, Some(DependencyKind::StartToStart));
    }

    #[test]
    fn explicit_kind_picks_up_subtype_from_metadata() {
        let mut edge = bare_edge();
        edge.kind = Some(EdgeKind::Dependency);
        edge.metadata = Some(EdgeMetadata::dependency(DependencyKind::FinishToFinish));

        let meta = classify(&edge);
        assert_eq!(meta.kind, EdgeKind::Dependency);
        assert_eq!(meta.dependency_kind, Some(DependencyKind::FinishToFinish));
    }

    #[test]
    fn nested_metadata_used_when_no_explicit_kind() {
        let mut edge = bare_edge();
        edge.metadata = Some(EdgeMetadata::dependency(DependencyKind::FinishToStart));

        let meta = classify(&edge);
        assert_eq!(meta.kind, EdgeKind::Dependency);
        assert_eq!(meta.dependency_kind, Some(DependencyKind::FinishToStart));
    }

    #[test]
    fn missing_kind_defaults_to_hierarchical() {
        let meta = classify(&bare_edge());
        assert_eq!(meta.kind, EdgeKind::Hierarchical);
        assert_eq!(meta.dependency_kind, None);
    }

    #[test]
    fn classification_is_total_over_all_carrier_shapes() {
        // Every combination of present/absent carriers yields exactly one kind.
        let shapes = [
            (None, None),
            (Some(EdgeKind::Hierarchical), None),
            (Some(EdgeKind::Dependency), None),
            (None, Some(EdgeMetadata::hierarchical())),
            (None, Some(EdgeMetadata::dependency(DependencyKind::StartToFinish))),
            (
                Some(EdgeKind::Hierarchical),
                Some(EdgeMetadata::dependency(DependencyKind::FinishToStart)),
            ),
        ];

        for (kind, metadata) in shapes {
            let mut edge = bare_edge();
            edge.kind = kind;
            edge.metadata = metadata;
            let first = classify(&edge);
            let second = classify(&edge);
            assert_eq!(first, second, "classification must be deterministic");
        }
    }

    #[test]
    fn filters_split_by_classified_kind() {
        let edges = vec![
            Edge::hierarchical("h1", "a", "b"),
            Edge::dependency("d1", "a", "b", DependencyKind::FinishToStart),
            Edge::untyped("u1", "b", "c"),
        ];

        let hier: Vec<&str> = hierarchical_edges(&edges).map(|e| e.id.as_str()).collect();
        let deps: Vec<&str> = dependency_edges(&edges).map(|e| e.id.as_str()).collect();
        assert_eq!(hier, vec!["h1", "u1"]);
        assert_eq!(deps, vec!["d1"]);
    }
}
