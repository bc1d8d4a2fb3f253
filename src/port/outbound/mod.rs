//! Outbound ports (driven side): interfaces implemented by the host.
//!
//! These contracts describe the live container, actor notifications and
//! the tick scheduler.

pub mod container;
pub mod notifier;
pub mod scheduler;
