use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by location capabilities.
///
/// Domain-level diagnostics do not travel through this type; they are
/// reported as [`crate::InputIssue`]s. `LocationError` covers capability
/// gaps and host-environment failures only.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The location cannot be expressed as a URI (e.g. the null variant).
    #[error("no interactive URI available for this location")]
    UriUnsupported,

    /// A local path was requested from a source with no materialization
    /// strategy.
    #[error("no local copy available and no materialization strategy for this source")]
    MaterializeUnsupported,

    /// The backing file could not be stat'd.
    #[error("failed to stat {path}: {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The host environment failed to launch the interactive viewer.
    /// Wraps the opaque OS-level error; launches are fire-and-forget and
    /// nothing beyond the spawn is observed.
    #[error("failed to launch interactive viewer: {0}")]
    Launch(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LocationError>;
