//! Common test utilities for Conduit CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and config-home directories
//! - Fixtures: Reusable source snippets

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
