//! Location capabilities: the traits every concrete source implements.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::error::{LocationError, Result};
use crate::load::LoadItem;

/// Sheet name substituted when a row is addressed without a named sheet.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Anything that can describe where it came from.
///
/// Implemented by files, folders, and individual blocks. The
/// `load_identifier` must be deterministic and unique per distinct physical
/// content within a process run: it is the key callers use for import-loop
/// detection and for load-result caching.
pub trait LoadLocation: Debug + Send + Sync {
    /// Folder to resolve relative references against, when one exists.
    fn local_folder_path(&self) -> Option<&Path>;

    /// The request that produced this location.
    fn load_item(&self) -> &LoadItem;

    /// Unique identifier of the loaded content.
    fn load_identifier(&self) -> String;

    /// Human-facing label, better suited for display than the load
    /// identifier.
    fn interactive_identifier(&self) -> String;

    /// URI usable to open this location in an external viewer, or `None`
    /// when the location is not resolvable. `read_only` is a hint for
    /// formats with locking semantics and has no effect elsewhere.
    fn interactive_uri(&self, read_only: bool) -> Option<String>;

    /// Resolve the URI and launch it via the host environment's default
    /// handler, detached. No output is captured.
    fn interactive_open(&self, read_only: bool) -> Result<()> {
        let uri = self
            .interactive_uri(read_only)
            .ok_or(LocationError::UriUnsupported)?;
        open::that_detached(uri).map_err(LocationError::Launch)
    }
}

/// A traceable load entity with sheet/row addressing.
///
/// The entity could be a file, a blob, or an http response; the instance
/// must hold enough information to uniquely identify the content that
/// resulted from loading it. The load specification alone may not do so
/// (it can contain partial record specifications such as "use latest"
/// resolved at load time), hence the separate `load_identifier`.
pub trait LocationFile: LoadLocation {
    /// The local path of this entity, when one exists.
    fn local_path(&self) -> Option<&Path>;

    /// URI opening this file at the given sheet/row, or `None` when the
    /// file is not resolvable.
    fn interactive_uri_at(
        &self,
        sheet: Option<&str>,
        row: Option<u32>,
        read_only: bool,
    ) -> Option<String>;

    /// Human-facing label for a position within this file.
    ///
    /// Defaults to the load identifier annotated with the sheet and row;
    /// implementations may replace this with a form better suited for
    /// interactive use.
    fn interactive_identifier_at(&self, sheet: Option<&str>, row: Option<u32>) -> String {
        let mut identifier = self.load_identifier();
        if let Some(sheet) = sheet {
            identifier.push_str(&format!(" Sheet '{sheet}'"));
        }
        if let Some(row) = row {
            identifier.push_str(&format!(" Row {row}"));
        }
        identifier
    }

    /// Launch the file at the given sheet/row via the host environment's
    /// default handler, detached.
    fn interactive_open_at(
        &self,
        sheet: Option<&str>,
        row: Option<u32>,
        read_only: bool,
    ) -> Result<()> {
        let uri = self
            .interactive_uri_at(sheet, row, read_only)
            .ok_or(LocationError::UriUnsupported)?;
        open::that_detached(uri).map_err(LocationError::Launch)
    }

    /// Return a path to a local copy, materializing one if the source is
    /// remote and supports it.
    fn ensure_local_path(&self) -> Result<PathBuf> {
        self.local_path()
            .map(Path::to_path_buf)
            .ok_or(LocationError::MaterializeUnsupported)
    }
}
