use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Conduit - dependency-graph asset bundler
#[derive(Parser, Debug)]
#[command(name = "conduit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./conduit.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Environment name (overrides CONDUIT_ENV and the config file)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Build for production: compress, fingerprint and record in the manifest
    #[arg(long, global = true)]
    pub production: bool,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and publish assets into the public asset directory
    Build {
        /// Logical asset paths (e.g. application.js)
        #[arg(required = true)]
        assets: Vec<String>,
    },

    /// Print the processed body of an asset
    Show {
        /// Logical asset path
        asset: String,
    },

    /// Print digest, content type, modification time and dependencies
    Deps {
        /// Logical asset path
        asset: String,
    },

    /// Print the public URL of a static file or published asset
    Url {
        /// Path relative to the asset directory
        path: String,
    },

    /// Publish an asset and print the HTML tag that loads it
    Tag {
        /// Logical asset path
        asset: String,
    },

    /// Remove the manifest of published names
    ClearManifest,
}
