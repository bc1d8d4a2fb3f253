//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the enforcement engine and the host
//! that owns the live inventories.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  registry · interceptor │
//!     ┌──────────────┤  reconciler             ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌───────────┐
//! │Container │           │  Scheduler  │              │ Notifier  │
//! │   Host   │           │             │              │           │
//! └──────────┘           └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ContainerHost`] - Live slot reads and cursor/holdings mutation
//! - [`ActorNotifier`] - Actor-facing notices
//! - [`Scheduler`] - Run-later continuations
//! - [`LimitQuery`], [`LimitEnforcement`] - Surface exposed to collaborators

pub mod inbound;
pub mod outbound;

pub use inbound::limits::{LimitEnforcement, LimitQuery};
pub use outbound::container::ContainerHost;
pub use outbound::notifier::{
    ActorNotifier, LogNotifier, Notice, NoticeKind, NotifierRegistry, NullNotifier,
};
pub use outbound::scheduler::Scheduler;
