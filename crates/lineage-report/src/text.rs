//! Line-oriented text rendering of origin trees.

use lineage_model::{LoadLocation, TableOrigin};

const INDENT: &str = "  ";

/// Render an origin tree as indented text.
///
/// A leaf renders as its interactive identifier. A branch renders as
/// `Derived via <operation> from:` followed by each parent indented one
/// level deeper; the top-level node starts at indent 0.
pub fn render_origin_text(origin: &TableOrigin) -> String {
    let mut lines: Vec<(usize, String)> = Vec::new();
    visit(origin, 0, &mut lines);
    let rendered: Vec<String> = lines
        .into_iter()
        .map(|(level, line)| format!("{}{line}", INDENT.repeat(level)))
        .collect();
    rendered.join("\n")
}

fn visit(origin: &TableOrigin, level: usize, lines: &mut Vec<(usize, String)>) {
    match origin {
        TableOrigin::Leaf(location) => {
            lines.push((level, location.interactive_identifier()));
        }
        TableOrigin::Branch(branch) => {
            lines.push((level, format!("Derived via {} from:", branch.operation())));
            for parent in branch.parents() {
                visit(parent, level + 1, lines);
            }
        }
    }
}

/// Render the distinct inputs of an origin tree, one load identifier per
/// line, in first-reached order.
pub fn render_input_list(origin: &TableOrigin) -> String {
    let mut seen: Vec<String> = Vec::new();
    for location in origin.input_ancestors() {
        let identifier = location.load_identifier();
        if !seen.contains(&identifier) {
            seen.push(identifier);
        }
    }
    seen.join("\n")
}
