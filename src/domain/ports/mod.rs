//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod manifest_repository;

pub use file_system::{DirEntry, FileSystem, FsError, FsResult};
pub use manifest_repository::{ManifestError, ManifestRepository, ManifestResult};
