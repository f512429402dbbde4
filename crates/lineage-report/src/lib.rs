//! Rendering of table origin trees for display.
//!
//! Two renderers over [`lineage_model::TableOrigin`]:
//!
//! - **Text**: indented, line-oriented form for terminals and logs
//! - **HTML**: nested, linkable form for reports and notebooks

mod html;
mod text;

pub use html::render_origin_html;
pub use text::{render_input_list, render_origin_text};
