//! Domain Services
//!
//! Stateless logic over domain types: header scanning, directive parsing and
//! search-path resolution.

pub mod directive_parser;
pub mod header;
pub mod path_resolver;

pub use directive_parser::{directive_invocation, parse_source, split_words};
pub use header::split_header;
pub use path_resolver::PathResolver;
