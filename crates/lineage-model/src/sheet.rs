//! Sheet- and row-level locations layered on top of a file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::load::LoadItem;
use crate::location::{DEFAULT_SHEET_NAME, LoadLocation, LocationFile};

/// A named (or unnamed) sheet within a file, grouping the rows read from
/// it. `metadata` is an open set of string annotations supplied by the
/// loader (template name, parser options).
#[derive(Debug, Clone)]
pub struct LocationSheet {
    file: Arc<dyn LocationFile>,
    sheet_name: Option<String>,
    metadata: BTreeMap<String, String>,
}

impl LocationSheet {
    pub fn new(file: Arc<dyn LocationFile>, sheet_name: Option<impl Into<String>>) -> Self {
        Self {
            file,
            sheet_name: sheet_name.map(Into::into),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach loader-supplied annotations.
    #[must_use]
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn file(&self) -> &Arc<dyn LocationFile> {
        &self.file
    }

    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// The location of one row within this sheet.
    pub fn block(&self, row: u32) -> LocationBlock {
        LocationBlock {
            sheet: self.clone(),
            row,
        }
    }
}

/// The finest-grained location: one row of one sheet of one file.
///
/// A block is itself a [`LoadLocation`], so a row that triggered a nested
/// include can be the source of the resulting [`LoadItem`].
#[derive(Debug, Clone)]
pub struct LocationBlock {
    sheet: LocationSheet,
    row: u32,
}

impl LocationBlock {
    pub fn sheet(&self) -> &LocationSheet {
        &self.sheet
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn file(&self) -> &Arc<dyn LocationFile> {
        self.sheet.file()
    }

    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet.sheet_name()
    }

    pub fn interactive_open(&self, read_only: bool) -> Result<()> {
        self.file()
            .interactive_open_at(self.sheet_name(), Some(self.row), read_only)
    }
}

impl LoadLocation for LocationBlock {
    fn local_folder_path(&self) -> Option<&Path> {
        self.file().local_folder_path()
    }

    fn load_item(&self) -> &LoadItem {
        self.file().load_item()
    }

    fn load_identifier(&self) -> String {
        format!(
            "{}#'{}'!A{}",
            self.file().load_identifier(),
            self.sheet_name().unwrap_or(DEFAULT_SHEET_NAME),
            self.row
        )
    }

    fn interactive_identifier(&self) -> String {
        self.file()
            .interactive_identifier_at(self.sheet_name(), Some(self.row))
    }

    fn interactive_uri(&self, read_only: bool) -> Option<String> {
        self.file()
            .interactive_uri_at(self.sheet_name(), Some(self.row), read_only)
    }
}

impl fmt::Display for LocationBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{}",
            self.interactive_identifier(),
            self.file().load_item()
        )
    }
}
