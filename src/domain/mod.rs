//! Domain Layer
//!
//! The pure part of Conduit: manifest and directive data, content types,
//! digests, header parsing and path resolution.
//!
//! ## Structure
//!
//! - `entities/` - Manifest, Directive, ParsedSource
//! - `value_objects/` - ContentTypes, ContentDigest, ConfigWarning
//! - `services/` - header scanner, directive parser, path resolver
//! - `ports/` - FileSystem and ManifestRepository traits
//!
//! All I/O goes through the traits in `ports/`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
