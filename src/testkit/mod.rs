//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: Builders for goods and stacks.
//! - [`config`]: Canonical TOML documents.
//! - [`notifier`]: `RecordingNotifier` capturing every notice.
//! - [`harness`]: An engine wired to an in-memory host and tick scheduler.

pub mod config;
pub mod domain;
pub mod harness;
pub mod notifier;

pub use harness::Harness;
pub use notifier::RecordingNotifier;
