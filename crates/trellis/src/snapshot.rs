//! Read-only snapshot of the project graph.
//!
//! The engine never mutates graph data; every operation takes an immutable,
//! point-in-time view supplied by the external store. [`GraphSnapshot`] is
//! the minimal read contract, and [`InMemorySnapshot`] is the bundled
//! implementation used for embedding, tests, and snapshot documents
//! exchanged with other tooling.

use crate::domain::{Edge, Node, NodeId};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Read-only view over the current set of nodes and edges.
///
/// Implementations must be cheap to query: `node_by_id` is called on hot
/// paths (cycle detection, traversal) and should be O(1).
pub trait GraphSnapshot {
    /// Resolve a node by ID. Returns `None` if the node does not exist.
    fn node_by_id(&self, id: &NodeId) -> Option<&Node>;

    /// All nodes in the snapshot. Order is unspecified.
    fn nodes(&self) -> Vec<&Node>;

    /// All edges in the snapshot, in stable snapshot order.
    ///
    /// Edge order matters: classification, traversal, and cycle-path
    /// selection all follow this order deterministically.
    fn edges(&self) -> &[Edge];
}

/// Serialized form of a snapshot, as exchanged with external tooling.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// In-memory snapshot backed by a `HashMap` for O(1) node lookups and a
/// `Vec` preserving edge insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemorySnapshot {
    nodes: HashMap<NodeId, Node>,
    edges: Vec<Edge>,
}

impl InMemorySnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, builder style. A duplicate ID replaces the earlier node
    /// with a warning.
    #[must_use]
    pub fn with_node(mut self, node: Node) -> Self {
        self.insert_node(node);
        self
    }

    /// Add an edge, builder style. Edge order is preserved.
    #[must_use]
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Add a node in place.
    pub fn insert_node(&mut self, node: Node) {
        if let Some(previous) = self.nodes.insert(node.id.clone(), node) {
            tracing::warn!(node_id = %previous.id, "duplicate node id in snapshot, last entry wins");
        }
    }

    /// Add an edge in place.
    pub fn insert_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Number of nodes in the snapshot.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parse a snapshot from a JSON document string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SnapshotFormat`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: SnapshotDocument = serde_json::from_str(json)?;
        let mut snapshot = Self::new();
        for node in document.nodes {
            snapshot.insert_node(node);
        }
        snapshot.edges = document.edges;
        Ok(snapshot)
    }

    /// Read a snapshot document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read, or
    /// [`crate::Error::SnapshotFormat`] if its contents are malformed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize the snapshot to a JSON document string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SnapshotFormat`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        let document = SnapshotDocument {
            nodes: nodes.into_iter().cloned().collect(),
            edges: self.edges.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl GraphSnapshot for InMemorySnapshot {
    fn node_by_id(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
