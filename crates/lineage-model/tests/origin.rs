//! Tests for origin tree construction and ancestor traversal.

use std::sync::Arc;

use lineage_model::{
    LoadLocation, LocationBlock, LocationFile, LocationSheet, NullLocationFile, TableOrigin,
};
use proptest::prelude::{Strategy, prop, prop_assert, prop_assert_eq, proptest};

fn block(name: &str, row: u32) -> LocationBlock {
    let file: Arc<dyn LocationFile> =
        Arc::new(NullLocationFile::with_identifier(name, name.to_owned()));
    LocationSheet::new(file, None::<String>).block(row)
}

fn identifiers(origin: &TableOrigin) -> Vec<String> {
    origin
        .input_ancestors()
        .map(LoadLocation::load_identifier)
        .collect()
}

#[test]
fn leaf_has_location_and_no_operation() {
    let origin = TableOrigin::leaf(block("a.csv", 5));
    assert!(origin.is_leaf());
    assert!(origin.input_location().is_some());
    assert_eq!(origin.operation(), None);
    assert!(origin.parents().is_empty());
}

#[test]
fn branch_has_operation_and_no_location() {
    let origin = TableOrigin::derived(
        "merge",
        vec![
            Arc::new(TableOrigin::leaf(block("a.csv", 1))),
            Arc::new(TableOrigin::leaf(block("b.csv", 2))),
        ],
    );
    assert!(!origin.is_leaf());
    assert!(origin.input_location().is_none());
    assert_eq!(origin.operation(), Some("merge"));
    assert_eq!(origin.parents().len(), 2);
}

#[test]
#[should_panic(expected = "at least one parent")]
fn branch_requires_parents() {
    let _ = TableOrigin::derived("merge", Vec::new());
}

#[test]
fn leaf_ancestors_yield_its_own_location() {
    let origin = TableOrigin::leaf(block("a.csv", 5));
    assert_eq!(identifiers(&origin), vec!["a.csv#'Sheet1'!A5"]);
}

#[test]
fn branch_ancestors_concatenate_in_parent_order() {
    let shared = Arc::new(TableOrigin::leaf(block("shared.csv", 1)));
    let left = Arc::new(TableOrigin::derived(
        "normalize",
        vec![shared.clone(), Arc::new(TableOrigin::leaf(block("a.csv", 2)))],
    ));
    let origin = TableOrigin::derived("merge", vec![left, shared.clone()]);

    // Depth-first, order-preserving, no deduplication: the shared leaf
    // appears once per path that reaches it.
    assert_eq!(
        identifiers(&origin),
        vec![
            "shared.csv#'Sheet1'!A1",
            "a.csv#'Sheet1'!A2",
            "shared.csv#'Sheet1'!A1",
        ]
    );
}

#[test]
fn ancestors_are_restartable() {
    let origin = TableOrigin::derived(
        "merge",
        vec![
            Arc::new(TableOrigin::leaf(block("a.csv", 1))),
            Arc::new(TableOrigin::leaf(block("b.csv", 2))),
        ],
    );
    let first = identifiers(&origin);
    let second = identifiers(&origin);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn origin_is_shareable_across_threads() {
    let origin = Arc::new(TableOrigin::leaf(block("a.csv", 5)));
    let clone = origin.clone();
    let handle = std::thread::spawn(move || identifiers(&clone));
    assert_eq!(handle.join().expect("join"), identifiers(&origin));
}

/// Reference traversal: recursive leaf collection in parent order.
fn expected_identifiers(origin: &TableOrigin) -> Vec<String> {
    match origin {
        TableOrigin::Leaf(location) => vec![location.load_identifier()],
        TableOrigin::Branch(branch) => branch
            .parents()
            .iter()
            .flat_map(|parent| expected_identifiers(parent))
            .collect(),
    }
}

fn arbitrary_origin() -> impl Strategy<Value = TableOrigin> {
    let leaf = (0u32..100, 1u32..50)
        .prop_map(|(file, row)| TableOrigin::leaf(block(&format!("file-{file}.csv"), row)));
    leaf.prop_recursive(4, 24, 4, |inner| {
        (
            "[a-z]{1,8}",
            prop::collection::vec(inner.prop_map(Arc::new), 1..4),
        )
            .prop_map(|(operation, parents)| TableOrigin::derived(operation, parents))
    })
}

proptest! {
    #[test]
    fn ancestors_match_recursive_traversal(origin in arbitrary_origin()) {
        prop_assert_eq!(identifiers(&origin), expected_identifiers(&origin));
    }

    #[test]
    fn ancestors_never_empty_and_restartable(origin in arbitrary_origin()) {
        let first = identifiers(&origin);
        prop_assert!(!first.is_empty());
        prop_assert_eq!(first, identifiers(&origin));
    }
}
