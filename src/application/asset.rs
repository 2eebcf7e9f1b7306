//! Asset
//!
//! One resolved source file. The processed body is built on first use and
//! kept for the asset's lifetime; digest, freshness and output naming all
//! derive from it.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::application::environment::Environment;
use crate::application::session;
use crate::domain::value_objects::{digest_file_name, file_extensions, file_stem_all, ContentDigest};
use crate::error::ConduitResult;

#[derive(Debug)]
struct Built {
    body: String,
    dependencies: Vec<PathBuf>,
}

pub struct Asset<'env> {
    env: &'env Environment,
    path: PathBuf,
    logical_path: String,
    built: OnceCell<Built>,
    digest: OnceCell<ContentDigest>,
}

impl<'env> Asset<'env> {
    pub(crate) fn new(env: &'env Environment, path: PathBuf, logical_path: &str) -> Self {
        Self {
            env,
            path,
            logical_path: logical_path.to_string(),
            built: OnceCell::new(),
            digest: OnceCell::new(),
        }
    }

    /// Resolved absolute path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The name this asset was asked for by
    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// First of the file's extensions known to the content-type table
    pub fn format_extension(&self) -> Option<String> {
        self.env.format_extension(&self.path)
    }

    pub fn content_type(&self) -> Option<&'env str> {
        self.env.content_type(&self.path)
    }

    fn built(&self) -> ConduitResult<&Built> {
        if let Some(built) = self.built.get() {
            return Ok(built);
        }

        let processors = self.env.processors_for(&self.path);
        tracing::debug!(
            path = %self.path.display(),
            processors = ?processors.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "building asset"
        );
        let (body, dependencies) = session::build(self.env, &self.path, &processors)?;
        Ok(self.built.get_or_init(|| Built { body, dependencies }))
    }

    /// Dependency bodies followed by the asset's own processed body
    pub fn body(&self) -> ConduitResult<&str> {
        Ok(&self.built()?.body)
    }

    /// Files the body depends on, in discovery order
    pub fn dependencies(&self) -> ConduitResult<&[PathBuf]> {
        Ok(&self.built()?.dependencies)
    }

    /// SHA-256 of the final body
    pub fn digest(&self) -> ConduitResult<&ContentDigest> {
        if let Some(digest) = self.digest.get() {
            return Ok(digest);
        }
        let digest = ContentDigest::from_content(self.body()?);
        Ok(self.digest.get_or_init(|| digest))
    }

    /// Newest modification time of the file and everything it depends on
    pub fn last_modified(&self) -> ConduitResult<SystemTime> {
        let fs = self.env.fs();
        let mut newest = fs.modified(&self.path)?;
        for dependency in self.dependencies()? {
            let modified = fs.modified(dependency)?;
            if modified > newest {
                newest = modified;
            }
        }
        Ok(newest)
    }

    /// `<stem>[-<digest>]<format extension>`
    pub fn target_name(&self, include_hash: bool) -> ConduitResult<String> {
        let file_name = self.file_name();
        let stem = file_stem_all(&file_name);
        let extension = self
            .format_extension()
            .or_else(|| file_extensions(&file_name).first().cloned())
            .unwrap_or_default();

        if include_hash {
            Ok(format!("{}-{}{}", stem, self.digest()?, extension))
        } else {
            Ok(format!("{}{}", stem, extension))
        }
    }

    /// File name with `-<digest>` before its final extension
    pub fn fingerprinted_name(&self) -> ConduitResult<String> {
        Ok(digest_file_name(&self.file_name(), self.digest()?.as_str()))
    }

    /// True when `target` exists and is no older than the sources
    pub fn is_up_to_date(&self, target: &Path) -> ConduitResult<bool> {
        let fs = self.env.fs();
        if !fs.is_file(target) {
            return Ok(false);
        }
        Ok(fs.modified(target)? >= self.last_modified()?)
    }

    /// Write the asset into the published asset directory
    ///
    /// Returns `<asset_dir>/<name>`. In production the manifest is consulted
    /// first and updated after writing a fingerprinted file.
    pub fn write(&self) -> ConduitResult<String> {
        let env = self.env;
        let file_name = self.file_name();
        let asset_dir = env.asset_dir();

        if env.is_production() {
            if let Some(published) = env.manifest_entry(&file_name)? {
                tracing::debug!(asset = %file_name, published = %published, "manifest hit");
                return Ok(format!("{}/{}", asset_dir, published));
            }
        }

        let name = if env.is_production() {
            self.fingerprinted_name()?
        } else {
            file_name.clone()
        };
        let target = env.target_dir().join(&name);

        if !env.is_production() && self.is_up_to_date(&target)? {
            tracing::debug!(target = %target.display(), "target is up to date");
            return Ok(format!("{}/{}", asset_dir, name));
        }

        env.fs().write(&target, self.body()?)?;
        if env.is_production() {
            env.record_manifest_entry(&file_name, &name)?;
        }

        tracing::info!(asset = %self.logical_path, target = %target.display(), "published");
        Ok(format!("{}/{}", asset_dir, name))
    }
}

impl std::fmt::Debug for Asset<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Asset")
            .field("path", &self.path)
            .field("logical_path", &self.logical_path)
            .field("built", &self.built.get().is_some())
            .finish()
    }
}
