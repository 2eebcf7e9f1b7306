//! Conduit CLI - dependency-graph asset bundler
//!
//! Usage: conduit [OPTIONS] <COMMAND>
//!
//! Commands:
//!   build           Build and publish assets
//!   show            Print the processed body of an asset
//!   deps            Print digest and dependencies of an asset
//!   url             Print the public URL of a path
//!   tag             Publish an asset and print its HTML tag
//!   clear-manifest  Remove the manifest of published names

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::ConfigOverrides;
use conduit::logging::{init_logging, LoggingConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));

    let overrides = ConfigOverrides {
        config: cli.config.clone(),
        env: cli.env.clone(),
        production: cli.production,
    };

    match cli.command {
        Commands::Build { assets } => commands::build::cmd_build(&assets, &overrides, cli.json),
        Commands::Show { asset } => commands::inspect::cmd_show(&asset, &overrides, cli.json),
        Commands::Deps { asset } => commands::inspect::cmd_deps(&asset, &overrides, cli.json),
        Commands::Url { path } => commands::build::cmd_url(&path, &overrides, cli.json),
        Commands::Tag { asset } => commands::build::cmd_tag(&asset, &overrides, cli.json),
        Commands::ClearManifest => commands::manifest::cmd_clear_manifest(&overrides, cli.json),
    }
}
