//! Application services (use cases).
//!
//! These services apply the limit policy to live host state through the
//! ports.

pub mod arbitration;
pub mod cooldown;
pub mod enforcer;
pub mod interceptor;
pub mod messages;
pub mod reconciler;
pub mod registry;

pub use enforcer::{Enforcer, EnforcerSettings};
pub use messages::MessageTemplates;
pub use registry::LimitRegistry;
