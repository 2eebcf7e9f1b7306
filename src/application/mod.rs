//! Application Layer
//!
//! The build engine. It depends on the domain layer for parsing, resolution
//! and ports, and on infrastructure only for the default port
//! implementations.
//!
//! ## Parts
//!
//! - `Environment` - entry point: find, publish, asset_url, tag
//! - `Asset` - one resolved file with a lazily built body
//! - `BuildSession` - recursive require/import evaluation for one build
//! - `processor` - the processor contract, built-ins and registries
//! - `DirectiveRegistry` - header directive handlers
//! - `ManifestStore` - persisted published-name map

pub mod asset;
pub mod directives;
pub mod environment;
pub mod manifest_store;
pub mod processor;
pub mod session;


pub use asset::Asset;
pub use directives::{DirectiveHandler, DirectiveRegistry};
pub use environment::Environment;
pub use manifest_store::ManifestStore;
pub use processor::{
    Processor, ProcessorDescriptor, ProcessorRegistry, ProcessorSpec, Template, Variables,
};
pub use session::{BuildSession, VisitState, VisitTable};
