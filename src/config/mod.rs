//! Configuration module for Conduit
//!
//! Configuration hierarchy, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (CONDUIT_*)
//! 3. Project config (conduit.toml)
//! 4. User config (~/.config/conduit/config.toml)
//! 5. Built-in defaults

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{load_layered, user_config_path, PROJECT_CONFIG_FILE};
pub use types::{
    Config, EnvironmentConfig, OutputConfig, PathsConfig, ProcessorConfig, ProcessorsConfig,
    StaticFilesConfig,
};
