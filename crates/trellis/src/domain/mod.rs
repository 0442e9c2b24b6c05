//! Domain types for the project graph.
//!
//! This module contains the core types shared by every part of the engine:
//! node and edge identities, the node type enum that gates dependency
//! eligibility, and the edge kind/metadata shapes the classifier consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Create a new edge ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Semantic type of a node.
///
/// Only [`NodeType::Task`] nodes may participate as endpoints of dependency
/// edges. Hierarchical edges carry no type restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Plain outline node with no extra semantics
    Ordinary,

    /// Work item; the only type eligible for dependency edges
    Task,

    /// Requirement captured in the project breakdown
    Requirement,

    /// Product breakdown structure element
    Pbs,

    /// Data artifact (document, model, drawing)
    Data,
}

/// A node in the project graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Display label, used when rendering cycle paths for users
    pub label: String,

    /// Semantic node type
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Outline-collapse flag; a collapsed node hides its hierarchical
    /// descendants in view derivation
    #[serde(default)]
    pub collapsed: bool,
}

impl Node {
    /// Create a node with the given ID, label and type.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            collapsed: false,
        }
    }

    /// Mark the node as collapsed.
    #[must_use]
    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }
}

/// Kind of an edge: structural containment or precedence constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Parent -> child containment edge; forms the outline tree
    Hierarchical,

    /// Directed precedence edge between task nodes; must stay acyclic
    Dependency,
}

/// Sub-type of a dependency edge, expressing the execution-order relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Finish-to-start: target starts after source finishes (the default)
    #[serde(rename = "FS")]
    FinishToStart,

    /// Start-to-start: target starts after source starts
    #[serde(rename = "SS")]
    StartToStart,

    /// Finish-to-finish: target finishes after source finishes
    #[serde(rename = "FF")]
    FinishToFinish,

    /// Start-to-finish: target finishes after source starts
    #[serde(rename = "SF")]
    StartToFinish,
}

impl Default for DependencyKind {
    fn default() -> Self {
        Self::FinishToStart
    }
}

/// Classified edge metadata: the kind plus, for dependency edges, the
/// sub-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMetadata {
    /// Edge kind
    pub kind: EdgeKind,

    /// Dependency sub-type; only meaningful when `kind` is
    /// [`EdgeKind::Dependency`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_kind: Option<DependencyKind>,
}

impl EdgeMetadata {
    /// Metadata for a plain hierarchical edge.
    #[must_use]
    pub fn hierarchical() -> Self {
        Self {
            kind: EdgeKind::Hierarchical,
            dependency_kind: None,
        }
    }

    /// Metadata for a dependency edge with the given sub-type.
    #[must_use]
    pub fn dependency(dependency_kind: DependencyKind) -> Self {
        Self {
            kind: EdgeKind::Dependency,
            dependency_kind: Some(dependency_kind),
        }
    }
}

/// An edge as stored by the external graph store.
///
/// The kind can live either directly on the edge or inside the nested
/// metadata object, depending on how the edge was created. Both carriers are
/// optional; edges with neither are classified as hierarchical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,

    /// Source node ID (parent for hierarchical, predecessor for dependency)
    pub source_id: NodeId,

    /// Target node ID (child for hierarchical, successor for dependency)
    pub target_id: NodeId,

    /// Kind carried directly on the edge, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EdgeKind>,

    /// Dependency sub-type carried directly on the edge, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_kind: Option<DependencyKind>,

    /// Nested metadata object, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EdgeMetadata>,
}

impl Edge {
    /// Create a hierarchical edge (parent -> child).
    pub fn hierarchical(
        id: impl Into<EdgeId>,
        source_id: impl Into<NodeId>,
        target_id: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: Some(EdgeKind::Hierarchical),
            dependency_kind: None,
            metadata: None,
        }
    }

    /// Create a dependency edge with the given sub-type.
    pub fn dependency(
        id: impl Into<EdgeId>,
        source_id: impl Into<NodeId>,
        target_id: impl Into<NodeId>,
        dependency_kind: DependencyKind,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: Some(EdgeKind::Dependency),
            dependency_kind: Some(dependency_kind),
            metadata: None,
        }
    }

    /// Create an edge that carries no kind at all (legacy shape); the
    /// classifier treats it as hierarchical.
    pub fn untyped(
        id: impl Into<EdgeId>,
        source_id: impl Into<NodeId>,
        target_id: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind: None,
            dependency_kind: None,
            metadata: None,
        }
    }
}

/// Data for requesting a new edge.
#[derive(Debug, Clone)]
pub struct NewEdge {
    /// Source node ID
    pub source_id: NodeId,

    /// Target node ID
    pub target_id: NodeId,

    /// Requested kind
    pub kind: EdgeKind,

    /// Requested dependency sub-type; mandatory when `kind` is
    /// [`EdgeKind::Dependency`]
    pub dependency_kind: Option<DependencyKind>,
}
