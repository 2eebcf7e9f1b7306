//! Conduit - dependency-graph asset bundler
//!
//! Conduit reads JavaScript and CSS sources whose header comments declare
//! their dependencies (`//= require lib/util`), resolves them across search
//! roots, and produces one bundled file per asset. Production builds run the
//! bundle through compressors, fingerprint the output name with a content
//! digest and record it in a manifest.
//!
//! ## Architecture
//!
//! - `domain/` - header parsing, path resolution, manifest data, ports
//! - `application/` - environment, assets, build sessions, processors
//! - `infrastructure/` - local file system and JSON manifest storage
//! - `config/` - layered TOML configuration
//!
//! ```no_run
//! use conduit::{Config, Environment};
//!
//! let env = Environment::new(&Config::default())?;
//! let published = env.publish("application.js")?;
//! println!("{}", published);
//! # Ok::<(), conduit::ConduitError>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use application::{
    Asset, BuildSession, DirectiveRegistry, Environment, Processor, ProcessorDescriptor,
    ProcessorRegistry, ProcessorSpec, Template, Variables,
};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{Directive, Manifest, ParsedSource};
pub use domain::services::{parse_source, split_header, split_words, PathResolver};
pub use domain::value_objects::{ContentDigest, ContentTypes};
pub use error::{ConduitError, ConduitResult};
