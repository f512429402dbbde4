//! The JSON lineage manifest and its resolution into an origin tree.
//!
//! A manifest is how an external pipeline hands its recorded lineage to
//! this tool: leaves name a file, optional sheet, and row; derived nodes
//! name the operation and its parents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use serde::Deserialize;

use lineage_model::{FilesystemLocationFile, LocationFile, LocationSheet, TableOrigin};

/// A lineage manifest, as supplied by an external pipeline.
#[derive(Debug, Deserialize)]
pub struct LineageManifest {
    /// Root folder used to relativize displayed identifiers.
    #[serde(default)]
    pub root_folder: Option<PathBuf>,
    /// The origin tree.
    pub origin: ManifestNode,
}

/// One node of the manifest's origin tree.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ManifestNode {
    /// A loaded input row.
    Leaf {
        file: PathBuf,
        #[serde(default)]
        sheet: Option<String>,
        row: u32,
    },
    /// A table derived from parent nodes.
    Derived {
        operation: String,
        parents: Vec<ManifestNode>,
    },
}

/// Resolve a manifest against the filesystem.
///
/// Leaves naming the same file share a single location instance, so the
/// file is stat'd once no matter how many rows reference it.
pub fn resolve_manifest(manifest: &LineageManifest) -> Result<TableOrigin> {
    let mut files: BTreeMap<PathBuf, Arc<dyn LocationFile>> = BTreeMap::new();
    resolve_node(
        &manifest.origin,
        manifest.root_folder.as_deref(),
        &mut files,
    )
}

fn resolve_node(
    node: &ManifestNode,
    root_folder: Option<&Path>,
    files: &mut BTreeMap<PathBuf, Arc<dyn LocationFile>>,
) -> Result<TableOrigin> {
    match node {
        ManifestNode::Leaf { file, sheet, row } => {
            let location = files
                .entry(file.clone())
                .or_insert_with(|| {
                    let mut location = FilesystemLocationFile::new(file);
                    if let Some(root) = root_folder {
                        location = location.with_root_folder(root);
                    }
                    Arc::new(location)
                })
                .clone();
            Ok(TableOrigin::leaf(
                LocationSheet::new(location, sheet.as_deref()).block(*row),
            ))
        }
        ManifestNode::Derived { operation, parents } => {
            if parents.is_empty() {
                bail!("derived node \"{operation}\" has no parents");
            }
            let parents = parents
                .iter()
                .map(|parent| resolve_node(parent, root_folder, files).map(Arc::new))
                .collect::<Result<Vec<_>>>()?;
            Ok(TableOrigin::derived(operation.clone(), parents))
        }
    }
}
