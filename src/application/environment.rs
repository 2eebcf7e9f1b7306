//! Environment
//!
//! Owns everything a build needs: the file system, the resolver, the three
//! processor registries, the directive handlers and the manifest. Callers
//! go through [`Environment::find`], [`Environment::publish`],
//! [`Environment::asset_url`] and [`Environment::tag`].

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::application::asset::Asset;
use crate::application::directives::DirectiveRegistry;
use crate::application::manifest_store::ManifestStore;
use crate::application::processor::{
    ProcessorDescriptor, ProcessorRegistry, ProcessorSpec, Variables,
};
use crate::application::session::{self, BuildSession};
use crate::config::Config;
use crate::domain::ports::{FileSystem, ManifestRepository};
use crate::domain::services::PathResolver;
use crate::domain::value_objects::{file_extensions, ContentTypes, APPLICATION_JAVASCRIPT, TEXT_CSS};
use crate::error::{ConduitError, ConduitResult};
use crate::infrastructure::{JsonManifestRepository, LocalFs};

pub struct Environment {
    fs: Box<dyn FileSystem>,
    resolver: PathResolver,
    content_types: ContentTypes,
    pre_processors: ProcessorRegistry,
    post_processors: ProcessorRegistry,
    bundle_processors: ProcessorRegistry,
    directives: DirectiveRegistry,
    manifest: RefCell<ManifestStore>,
    production: bool,
    public_dir: PathBuf,
    asset_dir: String,
    fingerprint_static: bool,
}

impl Environment {
    /// Environment over the local disk with a JSON manifest
    pub fn new(config: &Config) -> ConduitResult<Self> {
        Self::with_ports(
            config,
            Box::new(LocalFs::new()),
            Box::new(JsonManifestRepository::new()),
        )
    }

    /// Environment over the given file system and manifest repository
    pub fn with_ports(
        config: &Config,
        fs: Box<dyn FileSystem>,
        manifests: Box<dyn ManifestRepository>,
    ) -> ConduitResult<Self> {
        let extensions = config
            .content_types
            .extensions()
            .map(str::to_string)
            .collect();
        let resolver = PathResolver::new(config.paths.roots.clone(), extensions);

        let mut pre_processors = ProcessorRegistry::new();
        pre_processors.register(TEXT_CSS, ProcessorDescriptor::new(ProcessorSpec::Import));
        pre_processors.register(TEXT_CSS, ProcessorDescriptor::new(ProcessorSpec::Directive));
        pre_processors.register(
            APPLICATION_JAVASCRIPT,
            ProcessorDescriptor::new(ProcessorSpec::Directive),
        );

        let mut post_processors = ProcessorRegistry::new();
        post_processors.register(TEXT_CSS, ProcessorDescriptor::new(ProcessorSpec::RewriteUrls));
        post_processors.register(
            APPLICATION_JAVASCRIPT,
            ProcessorDescriptor::new(ProcessorSpec::SafetyColons),
        );
        for entry in &config.processors.post {
            post_processors.register(&entry.content_type, ProcessorDescriptor::from_config(entry)?);
        }

        let mut bundle_processors = ProcessorRegistry::new();
        for entry in &config.processors.compressors {
            bundle_processors.register(&entry.content_type, ProcessorDescriptor::from_config(entry)?);
        }

        let asset_dir = config.asset_dir().trim_matches('/').to_string();
        let manifest = ManifestStore::new(manifests, &config.output.public_dir, &asset_dir);

        tracing::debug!(
            environment = %config.environment.name,
            production = config.is_production(),
            roots = ?config.paths.roots,
            "environment ready"
        );

        Ok(Self {
            fs,
            resolver,
            content_types: config.content_types.clone(),
            pre_processors,
            post_processors,
            bundle_processors,
            directives: DirectiveRegistry::default(),
            manifest: RefCell::new(manifest),
            production: config.is_production(),
            public_dir: config.output.public_dir.clone(),
            asset_dir,
            fingerprint_static: config.static_files.fingerprint,
        })
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    pub fn directives(&self) -> &DirectiveRegistry {
        &self.directives
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Switch between development and production output
    pub fn set_production(&mut self, production: bool) {
        self.production = production;
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn asset_dir(&self) -> &str {
        &self.asset_dir
    }

    /// `<public_dir>/<asset_dir>`
    pub fn target_dir(&self) -> PathBuf {
        self.public_dir.join(&self.asset_dir)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest.borrow().path().to_path_buf()
    }

    /// First of the file's extensions known to the content-type table
    pub fn format_extension(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_string_lossy();
        let extensions = file_extensions(&name);
        self.content_types
            .format_extension(&extensions)
            .map(str::to_string)
    }

    pub fn content_type(&self, path: &Path) -> Option<&str> {
        let extension = self.format_extension(path)?;
        self.content_types.get(&extension)
    }

    /// Pre- and post-processors for the file's content type, plus the bundle
    /// processors in production
    pub fn processors_for(&self, path: &Path) -> Vec<&ProcessorDescriptor> {
        let Some(content_type) = self.content_type(path) else {
            return Vec::new();
        };

        let mut processors: Vec<&ProcessorDescriptor> = self
            .pre_processors
            .all(content_type)
            .iter()
            .chain(self.post_processors.all(content_type))
            .collect();
        if self.production {
            processors.extend(self.bundle_processors.all(content_type));
        }
        processors
    }

    pub(crate) fn variables_for(&self, path: &Path) -> Variables {
        session::variables(path, self.content_type(path))
    }

    pub fn register_pre_processor(&mut self, content_type: &str, descriptor: ProcessorDescriptor) {
        self.pre_processors.register(content_type, descriptor);
    }

    pub fn register_post_processor(&mut self, content_type: &str, descriptor: ProcessorDescriptor) {
        self.post_processors.register(content_type, descriptor);
    }

    pub fn register_bundle_processor(
        &mut self,
        content_type: &str,
        descriptor: ProcessorDescriptor,
    ) {
        self.bundle_processors.register(content_type, descriptor);
    }

    /// Register (or replace) a directive handler
    pub fn register_directive<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut BuildSession<'_>, &[String]) -> ConduitResult<()> + Send + Sync + 'static,
    {
        self.directives.register(name, handler);
    }

    /// The asset `logical` resolves to, if it is a file
    pub fn find(&self, logical: &str) -> Option<Asset<'_>> {
        let path = self.resolver.resolve(self.fs(), logical)?;
        if !self.fs.is_file(&path) {
            return None;
        }
        Some(Asset::new(self, path, logical))
    }

    pub fn asset(&self, logical: &str) -> ConduitResult<Asset<'_>> {
        self.find(logical)
            .ok_or_else(|| ConduitError::not_found(logical))
    }

    /// Build and write `logical`; returns `<asset_dir>/<published name>`
    pub fn publish(&self, logical: &str) -> ConduitResult<String> {
        self.asset(logical)?.write()
    }

    /// Public URL of a static file or published asset
    pub fn asset_url(&self, path: &str) -> ConduitResult<String> {
        let path = path.split('?').next().unwrap_or_default();
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        if path.starts_with("/packages") {
            return Ok(path);
        }

        let path = if self.production && self.fingerprint_static {
            self.manifest.borrow_mut().get_or(&path, &path)?
        } else {
            path
        };

        Ok(format!("/{}{}", self.asset_dir, path))
    }

    /// Publish `logical` and render the HTML tag that loads it
    pub fn tag(&self, logical: &str) -> ConduitResult<String> {
        let asset = self.asset(logical)?;
        let stylesheet = match asset.content_type() {
            Some(TEXT_CSS) => true,
            Some(APPLICATION_JAVASCRIPT) => false,
            _ => {
                return Err(ConduitError::UnsupportedContentType {
                    path: logical.to_string(),
                })
            }
        };

        let url = format!("/{}", asset.write()?);
        if stylesheet {
            Ok(format!(r#"<link rel="stylesheet" href="{}">"#, url))
        } else {
            Ok(format!(r#"<script src="{}"></script>"#, url))
        }
    }

    /// Empty the manifest and remove its file; true if a file was removed
    pub fn clear_manifest(&self) -> ConduitResult<bool> {
        self.manifest.borrow_mut().delete()
    }

    pub(crate) fn manifest_entry(&self, name: &str) -> ConduitResult<Option<String>> {
        self.manifest.borrow_mut().get(name)
    }

    pub(crate) fn record_manifest_entry(&self, name: &str, published: &str) -> ConduitResult<()> {
        self.manifest.borrow_mut().add(name, published)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("roots", &self.resolver.roots())
            .field("production", &self.production)
            .field("public_dir", &self.public_dir)
            .field("asset_dir", &self.asset_dir)
            .finish()
    }
}
