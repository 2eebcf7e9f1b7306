//! Value Objects
//!
//! Immutable types compared by value.

mod config_warning;
mod content_types;
mod digest;

pub use config_warning::ConfigWarning;
pub use content_types::{
    digest_file_name, file_extensions, file_stem_all, normalize_extension, ContentTypes, APPLICATION_JAVASCRIPT,
    TEXT_CSS,
};
pub use digest::ContentDigest;
