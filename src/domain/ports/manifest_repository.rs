//! ManifestRepository port - abstraction for manifest persistence
//!
//! The manifest is loaded and saved as a whole; there is no per-entry I/O.

use std::path::Path;

use crate::domain::entities::Manifest;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest operation errors
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest document is not a flat string map
    #[error("invalid manifest format: {0}")]
    InvalidFormat(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

/// Abstract repository for manifest persistence
pub trait ManifestRepository {
    /// Load the manifest at `path`; a missing file yields an empty manifest
    fn load(&self, path: &Path) -> ManifestResult<Manifest>;

    /// Rewrite the whole manifest at `path`
    fn save(&self, manifest: &Manifest, path: &Path) -> ManifestResult<()>;

    /// Remove the manifest file; returns whether a file was removed
    fn delete(&self, path: &Path) -> ManifestResult<bool>;
}
