//! JSON Manifest Repository
//!
//! Implements the ManifestRepository port as a flat JSON object:
//!
//! ```json
//! {"app.js":"app-3f1c….js","/images/logo.png":"/images/logo-9a2b….png"}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::entities::{normalize_manifest_key, Manifest};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::manifest_repository::{
    ManifestError, ManifestRepository, ManifestResult,
};
use crate::infrastructure::fs::LocalFs;

/// JSON-based manifest repository
///
/// Stores the manifest as `.manifest.json` inside the published asset directory.
pub struct JsonManifestRepository {
    fs: LocalFs,
}

impl JsonManifestRepository {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for JsonManifestRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestRepository for JsonManifestRepository {
    fn load(&self, path: &Path) -> ManifestResult<Manifest> {
        if !self.fs.exists(path) {
            return Ok(Manifest::new());
        }

        let content = self
            .fs
            .read(path)
            .map_err(|e| ManifestError::Io(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(Manifest::new());
        }

        let raw: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| ManifestError::InvalidFormat(e.to_string()))?;
        let entries = raw
            .into_iter()
            .map(|(key, value)| (normalize_manifest_key(&key), value))
            .collect();

        Ok(Manifest::from_entries(entries))
    }

    fn save(&self, manifest: &Manifest, path: &Path) -> ManifestResult<()> {
        let content = serde_json::to_string_pretty(manifest.as_map())
            .map_err(|e| ManifestError::InvalidFormat(e.to_string()))?;
        self.fs
            .write(path, &content)
            .map_err(|e| ManifestError::Io(e.to_string()))
    }

    fn delete(&self, path: &Path) -> ManifestResult<bool> {
        if !self.fs.exists(path) {
            return Ok(false);
        }
        self.fs
            .remove(path)
            .map_err(|e| ManifestError::Io(e.to_string()))?;
        Ok(true)
    }
}
