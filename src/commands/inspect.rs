//! Show and deps command handlers (debugging)

use std::io::Write;
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};

use super::{emit, environment, ConfigOverrides};

pub fn cmd_show(asset: &str, overrides: &ConfigOverrides, json: bool) -> Result<()> {
    let env = environment(overrides)?;
    let asset_ref = env.asset(asset)?;
    let body = asset_ref
        .body()
        .with_context(|| format!("building {}", asset))?;

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "show",
            "asset": asset,
            "path": asset_ref.path().display().to_string(),
            "body": body,
        }))?;
    } else {
        let mut out = std::io::stdout().lock();
        out.write_all(body.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

pub fn cmd_deps(asset: &str, overrides: &ConfigOverrides, json: bool) -> Result<()> {
    let env = environment(overrides)?;
    let asset_ref = env.asset(asset)?;

    let digest = asset_ref
        .digest()
        .with_context(|| format!("building {}", asset))?;
    let dependencies: Vec<String> = asset_ref
        .dependencies()?
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    let modified = asset_ref
        .last_modified()?
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let content_type = asset_ref.content_type().unwrap_or("unknown");

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "deps",
            "asset": asset,
            "path": asset_ref.path().display().to_string(),
            "content_type": content_type,
            "digest": digest.as_str(),
            "last_modified": modified,
            "dependencies": dependencies,
        }))?;
        return Ok(());
    }

    println!("{}", asset_ref.path().display());
    println!("  content type:  {}", content_type);
    println!("  digest:        {}", digest);
    println!("  last modified: {}", modified);
    if dependencies.is_empty() {
        println!("  dependencies:  none");
    } else {
        println!("  dependencies:");
        for dependency in &dependencies {
            println!("    {}", dependency);
        }
    }
    Ok(())
}
