//! Continuations deferred to a later tick.
//!
//! The host's container graph must not be mutated while the triggering
//! event is still being dispatched, so follow-up work is described as data
//! and handed to the scheduler. Every job re-checks actor liveness and
//! re-reads holdings when it runs.

use serde::{Deserialize, Serialize};

use super::id::{ActorId, GoodType};

/// Delay measured in host ticks.
pub type Ticks = u32;

/// Work scheduled to run on a later tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeferredJob {
    /// Sweep every limited good at session start.
    Reconcile { actor: ActorId },
    /// Finish a clamped bulk transfer out of the open foreign container.
    CompleteTransfer {
        actor: ActorId,
        slot: usize,
        good: GoodType,
        quantity: u32,
    },
    /// Divert a capped cursor stack to the ground. `quantity` is the
    /// cursor size seen when the event was arbitrated.
    DivertCursor {
        actor: ActorId,
        good: GoodType,
        quantity: u32,
    },
}

impl DeferredJob {
    /// Actor the job acts on.
    #[must_use]
    pub const fn actor(&self) -> &ActorId {
        match self {
            Self::Reconcile { actor }
            | Self::CompleteTransfer { actor, .. }
            | Self::DivertCursor { actor, .. } => actor,
        }
    }

    /// Stable name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Reconcile { .. } => "reconcile",
            Self::CompleteTransfer { .. } => "complete_transfer",
            Self::DivertCursor { .. } => "divert_cursor",
        }
    }
}
