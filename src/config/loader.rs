//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{ConduitError, ConduitResult};

use super::types::Config;

/// Project configuration file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "conduit.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ConduitResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    let (config, warnings) = parse_with_warnings(&content, path)?;
    Ok((config, warnings))
}

fn parse_with_warnings(content: &str, path: &Path) -> ConduitResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| invalid(path, e))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Layer user config, then project config, over the defaults
///
/// Tables merge key by key; any other value in a later file replaces the
/// earlier one. Relative paths end up rooted at `project_root`.
pub fn discover(project_root: &Path) -> ConduitResult<(Config, Vec<ConfigWarning>)> {
    let mut files = Vec::new();
    if let Some(user_config) = user_config_path() {
        files.push(user_config);
    }
    files.push(project_root.join(PROJECT_CONFIG_FILE));

    let (config, warnings) = load_layered(&files)?;
    Ok((config.rooted_at(project_root), warnings))
}

/// Merge the given files, in order, over the defaults; missing files are skipped
pub fn load_layered(files: &[PathBuf]) -> ConduitResult<(Config, Vec<ConfigWarning>)> {
    let mut merged = toml::Table::new();
    let mut warnings = Vec::new();

    for file in files {
        if !file.is_file() {
            continue;
        }
        tracing::debug!(path = %file.display(), "loading config");
        let content = fs::read_to_string(file)?;
        let (_, file_warnings) = parse_with_warnings(&content, file)?;
        warnings.extend(file_warnings);

        let table: toml::Table = toml::from_str(&content).map_err(|e| invalid(file, e))?;
        merge_tables(&mut merged, table);
    }

    let config = toml::Value::Table(merged)
        .try_into()
        .map_err(|e| invalid(Path::new(PROJECT_CONFIG_FILE), e))?;
    Ok((config, warnings))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// `<config dir>/conduit/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("conduit").join("config.toml"))
}

/// Apply environment variable overrides (CONDUIT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`
pub(crate) fn apply_env_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Config {
    // CONDUIT_ENV
    if let Some(name) = lookup("CONDUIT_ENV").filter(|v| !v.trim().is_empty()) {
        config.environment.name = name.trim().to_string();
    }

    // CONDUIT_PUBLIC_DIR
    if let Some(dir) = lookup("CONDUIT_PUBLIC_DIR").filter(|v| !v.is_empty()) {
        config.output.public_dir = PathBuf::from(dir);
    }

    // CONDUIT_ASSET_DIR
    if let Some(dir) = lookup("CONDUIT_ASSET_DIR").filter(|v| !v.is_empty()) {
        config.output.asset_dir = dir.trim_matches('/').to_string();
    }

    // CONDUIT_ROOTS (path-list separated, like PATH)
    if let Some(roots) = lookup("CONDUIT_ROOTS") {
        let parsed: Vec<PathBuf> = std::env::split_paths(&roots)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        if !parsed.is_empty() {
            config.paths.roots = parsed;
        }
    }

    // CONDUIT_FINGERPRINT
    if let Some(val) = lookup("CONDUIT_FINGERPRINT") {
        config.static_files.fingerprint = val.to_lowercase() != "false" && val != "0";
    }

    config
}

fn invalid(path: &Path, err: impl std::fmt::Display) -> ConduitError {
    ConduitError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "roots",
        "content_types",
        "output",
        "public_dir",
        "asset_dir",
        "production_asset_dir",
        "environment",
        "name",
        "production",
        "static_files",
        "fingerprint",
        "processors",
        "post",
        "compressors",
        "content_type",
        "command",
        "args",
        "options",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
