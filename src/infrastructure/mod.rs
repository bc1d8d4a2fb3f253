//! Infrastructure layer.
//!
//! Technical concerns that support the engine without containing policy:
//! configuration loading and validation, and logging setup.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`bootstrap`] - Composition root wiring config into an engine

pub mod bootstrap;
pub mod config;
