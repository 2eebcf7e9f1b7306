//! Command handlers for the `conduit` binary

pub mod build;
pub mod inspect;
pub mod manifest;
mod project_root;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use conduit::config::{load_layered, user_config_path, Config};
use conduit::Environment;

/// Settings from global flags that shape the configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub env: Option<String>,
    pub production: bool,
}

/// Layered config: files, then `CONDUIT_*` variables, then flags
pub fn load_config(cwd: &Path, overrides: &ConfigOverrides) -> Result<Config> {
    let (config, warnings) = match &overrides.config {
        Some(file) => {
            let file = cwd.join(file);
            if !file.is_file() {
                bail!("config file not found: {}", file.display());
            }
            let mut files: Vec<PathBuf> = user_config_path().into_iter().collect();
            files.push(file.clone());
            let (config, warnings) = load_layered(&files)?;
            let root = file.parent().unwrap_or(cwd);
            (config.rooted_at(root), warnings)
        }
        None => {
            let root = project_root::discover_project_root(cwd);
            Config::discover(&root)
                .with_context(|| format!("loading configuration from {}", root.display()))?
        }
    };

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let mut config = config.with_env_overrides();
    if let Some(name) = &overrides.env {
        config.environment.name = name.clone();
    }
    if overrides.production && !config.is_production() {
        let name = "production".to_string();
        if !config.environment.production.contains(&name) {
            config.environment.production.push(name.clone());
        }
        config.environment.name = name;
    }
    Ok(config)
}

pub fn environment(overrides: &ConfigOverrides) -> Result<Environment> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    let config = load_config(&cwd, overrides)?;
    Ok(Environment::new(&config)?)
}

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}
