//! Inbound (driving) ports consumed by host-side callers.
//!
//! # Modules
//!
//! - [`limits`]: Limit queries and on-demand enforcement

pub mod limits;
