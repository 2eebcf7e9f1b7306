//! Build command handler
//!
//! Publishes each requested asset and reports where it landed.

use anyhow::{Context, Result};

use super::{emit, environment, ConfigOverrides};

pub fn cmd_build(assets: &[String], overrides: &ConfigOverrides, json: bool) -> Result<()> {
    let env = environment(overrides)?;

    if json {
        emit(serde_json::json!({
            "event": "start",
            "command": "build",
            "production": env.is_production(),
            "assets": assets.len(),
        }))?;
    }

    let mut published = 0;
    for logical in assets {
        let path = env
            .publish(logical)
            .with_context(|| format!("building {}", logical))?;
        published += 1;

        if json {
            emit(serde_json::json!({
                "event": "published",
                "asset": logical,
                "path": path,
            }))?;
        } else {
            println!("{}", path);
        }
    }

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "build",
            "published": published,
        }))?;
    }
    Ok(())
}

/// Publish an asset and print its HTML tag
pub fn cmd_tag(asset: &str, overrides: &ConfigOverrides, json: bool) -> Result<()> {
    let env = environment(overrides)?;
    let tag = env
        .tag(asset)
        .with_context(|| format!("building {}", asset))?;

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "tag",
            "asset": asset,
            "tag": tag,
        }))?;
    } else {
        println!("{}", tag);
    }
    Ok(())
}

/// Print the URL `path` is served from
pub fn cmd_url(path: &str, overrides: &ConfigOverrides, json: bool) -> Result<()> {
    let env = environment(overrides)?;
    let url = env.asset_url(path)?;

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "url",
            "path": path,
            "url": url,
        }))?;
    } else {
        println!("{}", url);
    }
    Ok(())
}
