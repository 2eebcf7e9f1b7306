//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigWarning, ContentTypes, APPLICATION_JAVASCRIPT, TEXT_CSS};
use crate::error::ConduitResult;

use super::loader;

/// Search roots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directories searched, in order, when resolving logical paths
    #[serde(default = "default_roots")]
    pub roots: Vec<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
        }
    }
}

fn default_roots() -> Vec<PathBuf> {
    vec![
        PathBuf::from("app/assets/javascripts"),
        PathBuf::from("app/assets/stylesheets"),
        PathBuf::from("vendor/assets"),
    ]
}

/// Where published assets go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Web root
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Asset directory inside the web root (no trailing slash)
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,

    /// Asset directory used in production, if different
    #[serde(default)]
    pub production_asset_dir: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            asset_dir: default_asset_dir(),
            production_asset_dir: None,
        }
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_asset_dir() -> String {
    "assets".to_string()
}

/// Environment name and which names count as production
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_environment_name")]
    pub name: String,

    #[serde(default = "default_production_names")]
    pub production: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: default_environment_name(),
            production: default_production_names(),
        }
    }
}

impl EnvironmentConfig {
    pub fn is_production(&self) -> bool {
        self.production.iter().any(|name| *name == self.name)
    }
}

fn default_environment_name() -> String {
    "local".to_string()
}

fn default_production_names() -> Vec<String> {
    vec!["production".to_string(), "prod".to_string()]
}

/// Static file URL handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    /// Map static file URLs through the manifest in production
    #[serde(default = "default_true")]
    pub fingerprint: bool,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self { fingerprint: true }
    }
}

fn default_true() -> bool {
    true
}

/// One configured processor or compressor
///
/// Either `name` selects a built-in (`minify-css`, `minify-js`,
/// `safety-colons`, ...) or `command` runs an external program that reads the
/// asset on stdin and writes the result to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub content_type: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ProcessorConfig {
    pub fn builtin(content_type: &str, name: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            name: Some(name.to_string()),
            command: None,
            args: Vec::new(),
            options: BTreeMap::new(),
        }
    }
}

/// Third-party processors, appended after the built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorsConfig {
    /// Post-processors, run in every environment
    #[serde(default)]
    pub post: Vec<ProcessorConfig>,

    /// Bundle processors, run in production only
    #[serde(default = "default_compressors")]
    pub compressors: Vec<ProcessorConfig>,
}

impl Default for ProcessorsConfig {
    fn default() -> Self {
        Self {
            post: Vec::new(),
            compressors: default_compressors(),
        }
    }
}

fn default_compressors() -> Vec<ProcessorConfig> {
    vec![
        ProcessorConfig::builtin(TEXT_CSS, "minify-css"),
        ProcessorConfig::builtin(APPLICATION_JAVASCRIPT, "minify-js"),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub content_types: ContentTypes,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub environment: EnvironmentConfig,

    #[serde(default)]
    pub static_files: StaticFilesConfig,

    #[serde(default)]
    pub processors: ProcessorsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ConduitResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ConduitResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn discover(project_root: &Path) -> ConduitResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(project_root)
    }

    /// Apply environment variable overrides (CONDUIT_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Make relative roots and the public directory absolute against `base`
    pub fn rooted_at(mut self, base: &Path) -> Self {
        for root in &mut self.paths.roots {
            if root.is_relative() {
                *root = base.join(&*root);
            }
        }
        if self.output.public_dir.is_relative() {
            self.output.public_dir = base.join(&self.output.public_dir);
        }
        self
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Asset directory for the current environment
    pub fn asset_dir(&self) -> &str {
        match (&self.output.production_asset_dir, self.is_production()) {
            (Some(dir), true) => dir,
            _ => &self.output.asset_dir,
        }
    }

    /// Absolute directory published assets are written to
    pub fn target_dir(&self) -> PathBuf {
        self.output.public_dir.join(self.asset_dir())
    }
}
