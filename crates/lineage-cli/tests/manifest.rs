//! Integration tests for lineage manifest resolution.

use std::path::Path;
use std::sync::Arc;

use lineage_cli::manifest::{LineageManifest, ManifestNode, resolve_manifest};
use lineage_report::render_origin_text;

fn parse(json: &str) -> LineageManifest {
    serde_json::from_str(json).expect("parse manifest")
}

#[test]
fn manifest_deserializes_documented_shape() {
    let manifest = parse(
        r#"{
            "root_folder": "/project",
            "origin": {
                "kind": "derived",
                "operation": "merge",
                "parents": [
                    { "kind": "leaf", "file": "/project/a.csv", "row": 5 },
                    { "kind": "leaf", "file": "/project/b.csv", "sheet": "inputs", "row": 2 }
                ]
            }
        }"#,
    );
    assert_eq!(manifest.root_folder.as_deref(), Some(Path::new("/project")));
    let ManifestNode::Derived { operation, parents } = &manifest.origin else {
        panic!("expected derived root");
    };
    assert_eq!(operation, "merge");
    assert_eq!(parents.len(), 2);
}

#[test]
fn resolution_shares_one_location_per_distinct_file() {
    let manifest = parse(
        r#"{
            "origin": {
                "kind": "derived",
                "operation": "concat",
                "parents": [
                    { "kind": "leaf", "file": "/data/a.csv", "row": 1 },
                    { "kind": "leaf", "file": "/data/a.csv", "row": 2 },
                    { "kind": "leaf", "file": "/data/b.csv", "row": 1 }
                ]
            }
        }"#,
    );
    let origin = resolve_manifest(&manifest).expect("resolve");
    let blocks: Vec<_> = origin.input_ancestors().collect();
    assert_eq!(blocks.len(), 3);
    assert!(Arc::ptr_eq(blocks[0].file(), blocks[1].file()));
    assert!(!Arc::ptr_eq(blocks[0].file(), blocks[2].file()));
}

#[test]
fn resolved_tree_renders_relative_to_root_folder() {
    let manifest = parse(
        r#"{
            "root_folder": "/project",
            "origin": {
                "kind": "derived",
                "operation": "merge",
                "parents": [
                    { "kind": "leaf", "file": "/project/a.csv", "row": 5 },
                    { "kind": "leaf", "file": "/project/b.csv", "sheet": "inputs", "row": 2 }
                ]
            }
        }"#,
    );
    let origin = resolve_manifest(&manifest).expect("resolve");
    assert_eq!(
        render_origin_text(&origin),
        "Derived via merge from:\n  Row 5 of 'a.csv'\n  'inputs'!A2 of 'b.csv'"
    );
}

#[test]
fn derived_node_without_parents_is_rejected() {
    let manifest = parse(
        r#"{
            "origin": { "kind": "derived", "operation": "merge", "parents": [] }
        }"#,
    );
    let error = resolve_manifest(&manifest).expect_err("empty parents must fail");
    assert!(error.to_string().contains("no parents"));
}
