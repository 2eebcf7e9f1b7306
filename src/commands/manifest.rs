//! Clear-manifest command handler

use anyhow::Result;

use super::{emit, environment, ConfigOverrides};

pub fn cmd_clear_manifest(overrides: &ConfigOverrides, json: bool) -> Result<()> {
    let env = environment(overrides)?;
    let path = env.manifest_path();
    let removed = env.clear_manifest()?;

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "clear-manifest",
            "path": path.display().to_string(),
            "removed": removed,
        }))?;
    } else if removed {
        println!("Removed {}", path.display());
    } else {
        println!("No manifest at {}", path.display());
    }
    Ok(())
}
