//! Domain Entities
//!
//! Pure data structures with identity.

mod directive;
mod manifest;

pub use directive::{Directive, ParsedSource};
pub use manifest::Manifest;
pub(crate) use manifest::normalize_manifest_key;
