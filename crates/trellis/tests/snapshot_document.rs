//! Snapshot document loading: the JSON interchange form used to hand a
//! graph snapshot to the engine from external tooling and fixtures.

use std::io::Write;
use tempfile::NamedTempFile;
use trellis::domain::NodeId;
use trellis::snapshot::{GraphSnapshot, InMemorySnapshot};
use trellis::validate::validate_dependency_edge;

const FIXTURE: &str = r#"{
    "nodes": [
        { "id": "req", "label": "Requirement", "type": "REQUIREMENT" },
        { "id": "t1", "label": "Design", "type": "TASK" },
        { "id": "t2", "label": "Build", "type": "TASK", "collapsed": true }
    ],
    "edges": [
        { "id": "h1", "source_id": "req", "target_id": "t1", "kind": "hierarchical" },
        { "id": "d1", "source_id": "t1", "target_id": "t2", "kind": "dependency", "dependency_kind": "FS" },
        { "id": "legacy", "source_id": "req", "target_id": "t2" }
    ]
}"#;

#[test]
fn load_from_file_and_validate() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();

    let snapshot = InMemorySnapshot::from_json_file(file.path()).unwrap();
    assert_eq!(snapshot.node_count(), 3);
    assert_eq!(snapshot.edges().len(), 3);
    assert!(snapshot.node_by_id(&NodeId::new("t2")).unwrap().collapsed);

    // The loaded graph behaves like any other snapshot: t1 -> t2 exists,
    // so the reverse edge closes a loop.
    let verdict = validate_dependency_edge(&snapshot, &NodeId::new("t2"), &NodeId::new("t1"));
    assert!(!verdict.is_valid);
    assert_eq!(
        verdict.error_reason.as_deref(),
        Some("cycle detected: Build → Design → Build")
    );

    // And the requirement node stays ineligible.
    let verdict = validate_dependency_edge(&snapshot, &NodeId::new("req"), &NodeId::new("t1"));
    assert!(!verdict.is_valid);
}

#[test]
fn legacy_edges_classify_as_hierarchical() {
    let snapshot = InMemorySnapshot::from_json_str(FIXTURE).unwrap();
    let legacy = snapshot
        .edges()
        .iter()
        .find(|e| e.id.as_str() == "legacy")
        .unwrap();
    assert!(trellis::classify::is_hierarchical(legacy));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = InMemorySnapshot::from_json_file(std::path::Path::new("/nonexistent/snapshot.json"));
    assert!(matches!(result, Err(trellis::Error::Io(_))));
}

#[test]
fn round_trip_preserves_graph_semantics() {
    let original = InMemorySnapshot::from_json_str(FIXTURE).unwrap();
    let json = original.to_json_string().unwrap();
    let restored = InMemorySnapshot::from_json_str(&json).unwrap();

    let verdict_original =
        validate_dependency_edge(&original, &NodeId::new("t2"), &NodeId::new("t1"));
    let verdict_restored =
        validate_dependency_edge(&restored, &NodeId::new("t2"), &NodeId::new("t1"));
    assert_eq!(verdict_original, verdict_restored);
}
