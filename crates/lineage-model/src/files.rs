//! Concrete file-level locations: the null variant and the filesystem
//! variant.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local};
use rand::Rng;
use tracing::warn;
use url::Url;

use crate::error::{LocationError, Result};
use crate::load::LoadItem;
use crate::location::{DEFAULT_SHEET_NAME, LoadLocation, LocationFile};

/// A file location with no physical backing.
///
/// Used when blocks originate from somewhere that cannot be reopened (a
/// generated stream, a test fixture). The identifier carries a random
/// suffix so two null files never collide.
#[derive(Debug)]
pub struct NullLocationFile {
    load_item: LoadItem,
    load_identifier: String,
}

impl NullLocationFile {
    pub fn new(description: &str) -> Self {
        Self::with_rng(description, &mut rand::thread_rng())
    }

    /// Build with an injected randomness source, for deterministic tests.
    pub fn with_rng<R: Rng>(description: &str, rng: &mut R) -> Self {
        let mut suffix = [0u8; 10];
        rng.fill(&mut suffix);
        Self::with_identifier(description, format!("{description}-{}", hex::encode(suffix)))
    }

    /// Build with a fixed identifier, bypassing the random suffix.
    pub fn with_identifier(description: &str, load_identifier: impl Into<String>) -> Self {
        Self {
            load_item: LoadItem::root(description),
            load_identifier: load_identifier.into(),
        }
    }
}

impl Default for NullLocationFile {
    fn default() -> Self {
        Self::new("Unknown")
    }
}

impl LoadLocation for NullLocationFile {
    fn local_folder_path(&self) -> Option<&Path> {
        None
    }

    fn load_item(&self) -> &LoadItem {
        &self.load_item
    }

    fn load_identifier(&self) -> String {
        self.load_identifier.clone()
    }

    fn interactive_identifier(&self) -> String {
        self.load_identifier.clone()
    }

    fn interactive_uri(&self, _read_only: bool) -> Option<String> {
        None
    }
}

impl LocationFile for NullLocationFile {
    fn local_path(&self) -> Option<&Path> {
        None
    }

    fn interactive_uri_at(
        &self,
        _sheet: Option<&str>,
        _row: Option<u32>,
        _read_only: bool,
    ) -> Option<String> {
        None
    }
}

/// Cached result of stat-ing a backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Modification time, second precision once formatted.
    pub modified: DateTime<Local>,
    /// File size in bytes.
    pub len: u64,
}

/// A location backed by a local filesystem path.
///
/// The stat result is fetched lazily on first use and cached; the load
/// identifier combines the absolute path with the modification time, so
/// identity changes if and only if the stat-reported modification time
/// changes. Modification time carries second granularity only: two writes
/// within the same second produce the same identifier.
#[derive(Debug)]
pub struct FilesystemLocationFile {
    local_path: PathBuf,
    load_item: LoadItem,
    root_folder: Option<PathBuf>,
    stat: Mutex<Option<FileStat>>,
}

impl FilesystemLocationFile {
    pub fn new(local_path: impl Into<PathBuf>) -> Self {
        let local_path = local_path.into();
        let load_item = LoadItem::root(local_path.display().to_string());
        Self {
            local_path,
            load_item,
            root_folder: None,
            stat: Mutex::new(None),
        }
    }

    /// Set the request that produced this file.
    #[must_use]
    pub fn with_load_item(mut self, load_item: LoadItem) -> Self {
        self.load_item = load_item;
        self
    }

    /// Set the root folder the interactive identifier is relativized to.
    #[must_use]
    pub fn with_root_folder(mut self, root_folder: impl Into<PathBuf>) -> Self {
        self.root_folder = Some(root_folder.into());
        self
    }

    /// Pre-seed the stat cache, for deterministic tests or when the caller
    /// already stat'd the file.
    #[must_use]
    pub fn with_stat(self, stat: FileStat) -> Self {
        *self.lock_stat() = Some(stat);
        self
    }

    pub fn root_folder(&self) -> Option<&Path> {
        self.root_folder.as_deref()
    }

    /// The cached stat result, fetching it on first use.
    pub fn stat(&self) -> Result<FileStat> {
        let mut cache = self.lock_stat();
        if let Some(stat) = *cache {
            return Ok(stat);
        }
        let stat = self.read_stat()?;
        *cache = Some(stat);
        Ok(stat)
    }

    /// Discard the cached stat result and re-stat the file.
    pub fn refresh_stat(&self) -> Result<FileStat> {
        let stat = self.read_stat()?;
        *self.lock_stat() = Some(stat);
        Ok(stat)
    }

    fn read_stat(&self) -> Result<FileStat> {
        let metadata = std::fs::metadata(&self.local_path).map_err(|source| {
            LocationError::Stat {
                path: self.local_path.clone(),
                source,
            }
        })?;
        let modified = metadata
            .modified()
            .map_err(|source| LocationError::Stat {
                path: self.local_path.clone(),
                source,
            })?;
        Ok(FileStat {
            modified: DateTime::<Local>::from(modified),
            len: metadata.len(),
        })
    }

    fn lock_stat(&self) -> std::sync::MutexGuard<'_, Option<FileStat>> {
        self.stat.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn absolute_path(&self) -> PathBuf {
        std::path::absolute(&self.local_path).unwrap_or_else(|_| self.local_path.clone())
    }
}

impl LoadLocation for FilesystemLocationFile {
    fn local_folder_path(&self) -> Option<&Path> {
        self.local_path.parent()
    }

    fn load_item(&self) -> &LoadItem {
        &self.load_item
    }

    fn load_identifier(&self) -> String {
        let name_part = self.absolute_path();
        match self.stat() {
            Ok(stat) => format!(
                "{}@{}",
                name_part.display(),
                stat.modified.format("%Y-%m-%dT%H:%M:%S")
            ),
            Err(error) => {
                warn!(
                    path = %self.local_path.display(),
                    %error,
                    "stat failed, load identifier falls back to the path alone"
                );
                name_part.display().to_string()
            }
        }
    }

    fn interactive_identifier(&self) -> String {
        match &self.root_folder {
            Some(root) => match self.local_path.strip_prefix(root) {
                Ok(relative) => relative.display().to_string(),
                Err(_) => self.local_path.display().to_string(),
            },
            None => self.local_path.display().to_string(),
        }
    }

    fn interactive_uri(&self, read_only: bool) -> Option<String> {
        self.interactive_uri_at(None, None, read_only)
    }
}

impl LocationFile for FilesystemLocationFile {
    fn local_path(&self) -> Option<&Path> {
        Some(&self.local_path)
    }

    fn interactive_uri_at(
        &self,
        sheet: Option<&str>,
        row: Option<u32>,
        _read_only: bool,
    ) -> Option<String> {
        let file_uri: String = Url::from_file_path(self.absolute_path()).ok()?.into();
        if sheet.is_none() && row.is_none() {
            return Some(file_uri);
        }
        let sheet = sheet.unwrap_or(DEFAULT_SHEET_NAME);
        let row_mark = match row {
            Some(row) => format!("!A{row}"),
            None => String::new(),
        };
        Some(format!("{file_uri}#'{sheet}'{row_mark}"))
    }

    fn interactive_identifier_at(&self, sheet: Option<&str>, row: Option<u32>) -> String {
        let identifier = self.interactive_identifier();
        match (sheet, row) {
            (None, None) => identifier,
            (None, Some(row)) => format!("Row {row} of '{identifier}'"),
            (Some(sheet), None) => format!("'{sheet}' of '{identifier}'"),
            (Some(sheet), Some(row)) => format!("'{sheet}'!A{row} of '{identifier}'"),
        }
    }
}
