//! Manifest store
//!
//! The published-name map for one asset directory. It is read from disk on
//! first use and every change is written straight back.

use std::path::{Path, PathBuf};

use crate::domain::entities::Manifest;
use crate::domain::ports::{ManifestError, ManifestRepository};
use crate::error::{ConduitError, ConduitResult};

pub struct ManifestStore {
    repository: Box<dyn ManifestRepository>,
    path: PathBuf,
    manifest: Option<Manifest>,
}

impl ManifestStore {
    /// File name of the manifest inside the asset directory
    pub const FILE_NAME: &'static str = ".manifest.json";

    /// Store for `<public_dir>/<scope_path>/.manifest.json`
    pub fn new(
        repository: Box<dyn ManifestRepository>,
        public_dir: &Path,
        scope_path: &str,
    ) -> Self {
        Self {
            repository,
            path: public_dir
                .join(scope_path.trim_matches('/'))
                .join(Self::FILE_NAME),
            manifest: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded map, reading it on first call
    pub fn load(&mut self) -> ConduitResult<&Manifest> {
        Ok(self.loaded()?)
    }

    fn loaded(&mut self) -> ConduitResult<&mut Manifest> {
        if self.manifest.is_none() {
            let manifest = self
                .repository
                .load(&self.path)
                .map_err(|e| self.error(e))?;
            tracing::debug!(path = %self.path.display(), entries = manifest.len(), "loaded manifest");
            self.manifest = Some(manifest);
        }
        Ok(self.manifest.get_or_insert_with(Manifest::new))
    }

    pub fn get(&mut self, name: &str) -> ConduitResult<Option<String>> {
        Ok(self.loaded()?.get(name).map(str::to_string))
    }

    pub fn get_or(&mut self, name: &str, default: &str) -> ConduitResult<String> {
        Ok(self.loaded()?.get_or(name, default).to_string())
    }

    /// Record `name → published` and persist the whole map
    pub fn add(&mut self, name: &str, published: &str) -> ConduitResult<()> {
        self.loaded()?.insert(name, published);

        let Some(manifest) = &self.manifest else {
            return Ok(());
        };
        self.repository
            .save(manifest, &self.path)
            .map_err(|e| self.error(e))
    }

    /// Forget every entry and remove the manifest file; true if a file was removed
    pub fn delete(&mut self) -> ConduitResult<bool> {
        self.manifest = Some(Manifest::new());
        self.repository
            .delete(&self.path)
            .map_err(|e| self.error(e))
    }

    fn error(&self, err: ManifestError) -> ConduitError {
        ConduitError::Manifest {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}
