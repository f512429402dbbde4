//! Library components of the lineage CLI.

pub mod logging;
pub mod manifest;
