//! Tests for the text and HTML origin renderers.

use std::sync::Arc;

use lineage_model::{
    LocationFile, LocationSheet, NullLocationFile, TableOrigin,
};
use lineage_report::{render_input_list, render_origin_html, render_origin_text};

fn leaf(name: &str, row: u32) -> TableOrigin {
    let file: Arc<dyn LocationFile> =
        Arc::new(NullLocationFile::with_identifier(name, name.to_owned()));
    TableOrigin::leaf(LocationSheet::new(file, None::<String>).block(row))
}

#[test]
fn text_leaf_is_its_interactive_identifier() {
    let origin = leaf("a.csv", 5);
    assert_eq!(render_origin_text(&origin), "a.csv Row 5");
}

#[test]
fn text_branch_indents_parents() {
    let origin = TableOrigin::derived(
        "merge",
        vec![Arc::new(leaf("a.csv", 1)), Arc::new(leaf("b.csv", 2))],
    );
    assert_eq!(
        render_origin_text(&origin),
        "Derived via merge from:\n  a.csv Row 1\n  b.csv Row 2"
    );
}

#[test]
fn text_nested_branches_indent_two_spaces_per_level() {
    let inner = TableOrigin::derived("normalize", vec![Arc::new(leaf("a.csv", 1))]);
    let origin = TableOrigin::derived(
        "merge",
        vec![Arc::new(inner), Arc::new(leaf("b.csv", 2))],
    );
    insta::assert_snapshot!(render_origin_text(&origin), @r"
    Derived via merge from:
      Derived via normalize from:
        a.csv Row 1
      b.csv Row 2
    ");
}

#[test]
fn input_list_is_distinct_in_first_reached_order() {
    let shared = Arc::new(leaf("shared.csv", 1));
    let origin = TableOrigin::derived(
        "merge",
        vec![shared.clone(), Arc::new(leaf("b.csv", 2)), shared],
    );
    assert_eq!(
        render_input_list(&origin),
        "shared.csv#'Sheet1'!A1\nb.csv#'Sheet1'!A2"
    );
}

#[test]
fn html_leaf_without_uri_renders_without_href() {
    let origin = leaf("a.csv", 5);
    assert_eq!(
        render_origin_html(&origin),
        "<a class=\"input-table-origin\">a.csv Row 5</a>"
    );
}

#[test]
fn html_branch_wraps_parents_in_a_list() {
    let origin = TableOrigin::derived(
        "merge",
        vec![Arc::new(leaf("a.csv", 1)), Arc::new(leaf("b.csv", 2))],
    );
    assert_eq!(
        render_origin_html(&origin),
        "<div class=\"derived-table-origin\"><span>merge</span><ul>\
         <li><a class=\"input-table-origin\">a.csv Row 1</a></li>\n\
         <li><a class=\"input-table-origin\">b.csv Row 2</a></li></ul></div>"
    );
}

#[test]
fn html_escapes_user_controlled_text() {
    let origin = TableOrigin::derived(
        "<merge> & \"join\"",
        vec![Arc::new(leaf("a<b>.csv", 1))],
    );
    let html = render_origin_html(&origin);
    assert!(html.contains("&lt;merge&gt; &amp; &quot;join&quot;"));
    assert!(html.contains("a&lt;b&gt;.csv Row 1"));
    assert!(!html.contains("<merge>"));
    assert!(!html.contains("a<b>.csv"));
}
