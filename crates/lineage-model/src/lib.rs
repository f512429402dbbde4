//! Object model for the origin of tabular data.
//!
//! Tracks where every loaded table came from (file, sheet, row) and how
//! derived tables were combined, so that any piece of data can be traced
//! back to its exact source and load-time diagnostics can be attributed to
//! a precise location.
//!
//! The model is built by a loader and attached to tables as a
//! [`TableOrigin`]; transform stages extend it with branch nodes.
//! Diagnostics flow through an [`IssueTracker`].

pub mod error;
pub mod files;
pub mod folder;
pub mod issues;
pub mod load;
pub mod location;
pub mod origin;
pub mod sheet;

pub use error::{LocationError, Result};
pub use files::{FileStat, FilesystemLocationFile, NullLocationFile};
pub use folder::LocationFolder;
pub use issues::{
    AccumulatingTracker, FailFastTracker, InputError, InputIssue, IssueDetail, IssueTracker,
    PendingIssue, Severity,
};
pub use load::{LoadItem, ROOT_SOURCE_IDENTIFIER};
pub use location::{DEFAULT_SHEET_NAME, LoadLocation, LocationFile};
pub use origin::{InputAncestors, OriginBranch, TableOrigin};
pub use sheet::{LocationBlock, LocationSheet};
