//! Tests for issue tracking: the fail-fast and accumulating strategies.

use std::sync::Arc;

use lineage_model::{
    AccumulatingTracker, FailFastTracker, InputIssue, IssueDetail, IssueTracker, LoadItem,
    LocationFile, LocationSheet, NullLocationFile, PendingIssue, Severity, TableOrigin,
};

fn fixture_file() -> Arc<dyn LocationFile> {
    Arc::new(NullLocationFile::with_identifier(
        "fixture",
        "fixture-0001",
    ))
}

#[test]
fn fail_fast_tracker_raises_on_first_issue() {
    let mut tracker = FailFastTracker::new();
    assert!(tracker.is_ok());

    let result = tracker.add_error(IssueDetail::from("bad column count"));
    let error = result.expect_err("fail-fast add_error must fail");
    assert_eq!(error.issue().severity(), Severity::Error);

    // Nothing is ever recorded: termination happens before recording.
    assert!(tracker.issues().is_empty());
    assert!(tracker.is_ok());
}

#[test]
fn fail_fast_tracker_raises_on_warnings_too() {
    let mut tracker = FailFastTracker::new();
    assert!(tracker.add_warning(IssueDetail::from("extra column")).is_err());
    assert!(tracker.issues().is_empty());
}

#[test]
fn accumulating_tracker_is_ok_with_warnings_only() {
    let mut tracker = AccumulatingTracker::new();
    tracker
        .add_warning(IssueDetail::from("extra column"))
        .expect("accumulate warning");
    assert!(tracker.is_ok());
    assert_eq!(tracker.issues().len(), 1);
}

#[test]
fn accumulating_tracker_records_errors_in_order() {
    let mut tracker = AccumulatingTracker::new();
    tracker
        .add_warning(IssueDetail::from("first"))
        .expect("accumulate");
    tracker
        .add_error(IssueDetail::from("second"))
        .expect("accumulate");
    tracker
        .add_warning(IssueDetail::from("third"))
        .expect("accumulate");

    assert!(!tracker.is_ok());
    let details: Vec<String> = tracker
        .issues()
        .iter()
        .map(|issue| issue.detail().to_string())
        .collect();
    assert_eq!(details, vec!["first", "second", "third"]);
}

#[test]
fn intercept_converts_a_pending_issue() {
    let pending = PendingIssue::new(InputIssue::error("unreadable sheet"));
    let mut tracker = AccumulatingTracker::new();
    tracker.intercept(pending).expect("intercept");
    assert!(!tracker.is_ok());
    assert_eq!(tracker.issues().len(), 1);

    let pending = PendingIssue::new(InputIssue::error("unreadable sheet"));
    let mut fail_fast = FailFastTracker::new();
    assert!(fail_fast.intercept(pending).is_err());
}

#[test]
fn issue_carries_error_detail() {
    let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "truncated record");
    let issue = InputIssue::error(IssueDetail::Error(Box::new(source)));
    assert_eq!(issue.detail().to_string(), "truncated record");
}

#[test]
fn issue_display_prefers_the_most_precise_context() {
    let bare = InputIssue::warning("extra column");
    assert_eq!(bare.to_string(), "warning: extra column");

    let with_file = InputIssue::warning("extra column").with_location_file(fixture_file());
    assert_eq!(with_file.to_string(), "warning: extra column [fixture-0001]");

    let block = LocationSheet::new(fixture_file(), Some("inputs")).block(3);
    let with_origin = InputIssue::error("bad value")
        .with_location_file(fixture_file())
        .with_origin(TableOrigin::leaf(block));
    assert_eq!(
        with_origin.to_string(),
        "error: bad value [fixture-0001 Sheet 'inputs' Row 3]"
    );

    let with_item = InputIssue::error("unresolvable include")
        .with_load_item(LoadItem::root("input_all.csv"));
    assert_eq!(
        with_item.to_string(),
        "error: unresolvable include [included as \"input_all.csv\" from \"<root>\"]"
    );
}
