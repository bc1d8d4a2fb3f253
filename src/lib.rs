//! Capguard - per-item-type quantity caps for inventory hosts.
//!
//! Every path by which an actor's holdings of a good can grow (ground
//! pickup, cursor placement, shift-click transfer, drag, hand swap, closing
//! the view with something on the cursor) is arbitrated against a
//! configured cap before the host applies it. A login sweep brings holdings
//! that grew while the actor was away back under the caps.
//!
//! # Architecture
//!
//! - **`domain`** - Goods, stacks, pathways, verdicts and deferred jobs
//! - **`port`** - The seams to the host: container access, notices,
//!   run-later scheduling, and the query surface offered to collaborators
//! - **`application`** - `LimitRegistry`, the arbitration policy,
//!   `MutationInterceptor`, `LoginReconciler`, wired by `Enforcer`
//! - **`adapter`** - In-memory host and tick scheduler; the CLI
//! - **`infrastructure`** - TOML configuration and logging
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use capguard::adapter::outbound::{MemoryHost, Position, TickScheduler};
//! use capguard::application::{Enforcer, EnforcerSettings, LimitRegistry};
//! use capguard::domain::{GoodType, Interception, ItemStack};
//! use capguard::port::NullNotifier;
//!
//! let pearl = GoodType::parse("ENDER_PEARL").unwrap();
//! let registry = Arc::new(LimitRegistry::with_limits([(pearl.clone(), 16)]));
//! let enforcer = Enforcer::new(
//!     registry,
//!     Arc::new(NullNotifier),
//!     Arc::new(TickScheduler::new()),
//!     EnforcerSettings::default(),
//! );
//!
//! let mut host = MemoryHost::new();
//! let actor = host.join();
//! let ground = host.spawn_ground(Position::default(), ItemStack::new(pearl, 20));
//! let outcome = host.pick_up(&enforcer, &actor, ground);
//! assert_eq!(outcome, Interception::Trim { accepted: 16, remainder: 4 });
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{Error, Result};
