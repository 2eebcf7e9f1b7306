//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system implementation
//! - `repositories/` - JSON manifest repository

pub mod fs;
pub mod repositories;

// Re-export for convenience
pub use fs::LocalFs;
pub use repositories::JsonManifestRepository;
