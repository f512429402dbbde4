//! HTML rendering of origin trees.

use quick_xml::escape::escape;

use lineage_model::{LoadLocation, TableOrigin};

/// Render an origin tree as nested HTML.
///
/// Each leaf becomes a link to its interactive URI (the `href` attribute
/// is omitted when the location has none); each branch becomes a container
/// labeled with the operation name wrapping a list of its parents. All
/// user-controlled text is escaped before embedding.
pub fn render_origin_html(origin: &TableOrigin) -> String {
    match origin {
        TableOrigin::Leaf(location) => {
            let identifier = location.interactive_identifier();
            let label = escape(identifier.as_str());
            match location.interactive_uri(true) {
                Some(uri) => format!(
                    "<a href=\"{}\" class=\"input-table-origin\">{label}</a>",
                    escape(uri.as_str())
                ),
                None => format!("<a class=\"input-table-origin\">{label}</a>"),
            }
        }
        TableOrigin::Branch(branch) => {
            let parents: Vec<String> = branch
                .parents()
                .iter()
                .map(|parent| format!("<li>{}</li>", render_origin_html(parent)))
                .collect();
            format!(
                "<div class=\"derived-table-origin\"><span>{}</span><ul>{}</ul></div>",
                escape(branch.operation()),
                parents.join("\n")
            )
        }
    }
}
