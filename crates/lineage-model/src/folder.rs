use std::path::{Path, PathBuf};

use url::Url;

use crate::load::LoadItem;
use crate::location::LoadLocation;

/// A folder-level location, used for loads that address a directory (an
/// include of `mp/`, a search root). Carries no sheet/row addressing.
#[derive(Debug)]
pub struct LocationFolder {
    folder_path: PathBuf,
    load_item: LoadItem,
    root_folder: Option<PathBuf>,
}

impl LocationFolder {
    pub fn new(folder_path: impl Into<PathBuf>) -> Self {
        let folder_path = folder_path.into();
        let load_item = LoadItem::root(folder_path.display().to_string());
        Self {
            folder_path,
            load_item,
            root_folder: None,
        }
    }

    /// Set the request that produced this folder.
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

    pub fn folder_path(&self) -> &Path {
        &self.folder_path
    }
}

impl LoadLocation for LocationFolder {
    fn local_folder_path(&self) -> Option<&Path> {
        Some(&self.folder_path)
    }

    fn load_item(&self) -> &LoadItem {
        &self.load_item
    }

    fn load_identifier(&self) -> String {
        self.folder_path.display().to_string()
    }

    fn interactive_identifier(&self) -> String {
        let Some(root) = &self.root_folder else {
            return self.load_identifier();
        };
        match self.folder_path.strip_prefix(root) {
            Ok(relative) if relative.as_os_str().is_empty() => {
                format!("<root_folder: {}>", root.display())
            }
            Ok(relative) => relative.display().to_string(),
            Err(_) => self.load_identifier(),
        }
    }

    fn interactive_uri(&self, _read_only: bool) -> Option<String> {
        let absolute = std::path::absolute(&self.folder_path).ok()?;
        Url::from_directory_path(absolute).ok().map(String::from)
    }
}
