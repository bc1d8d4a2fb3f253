//! The arbitration policy.
//!
//! Given a cap, the actor's current count and the quantity in motion,
//! decide whether an addition is allowed, refused, or clamped. The policy
//! only ever gates additions; removals never reach it.

use crate::domain::{PendingMutation, RejectReason, Verdict};

/// Arbitrate one addition against an optional cap.
///
/// Checks are performed in order: unlimited, banned, net-zero motion,
/// saturation, overflow. A `quantity` of zero describes motion that
/// conserves holdings (hand swaps); only the banned check applies to it.
#[must_use]
pub fn arbitrate(limit: Option<u32>, current: u32, quantity: u32) -> Verdict {
    let Some(limit) = limit else {
        return Verdict::Allow;
    };

    if limit == 0 {
        return Verdict::Reject {
            reason: RejectReason::Banned,
            limit,
        };
    }

    if quantity == 0 {
        return Verdict::Allow;
    }

    if current >= limit {
        return Verdict::Reject {
            reason: RejectReason::Saturated,
            limit,
        };
    }

    // current < limit here, so at least one unit fits
    let accepted = limit - current;
    if quantity > accepted {
        return Verdict::Partial {
            accepted,
            remainder: quantity - accepted,
            limit,
        };
    }

    Verdict::Allow
}

/// Arbitrate a classified mutation. Motion that does not land in the
/// actor's holdings is always allowed.
#[must_use]
pub fn arbitrate_pending(pending: &PendingMutation, limit: Option<u32>, current: u32) -> Verdict {
    if !pending.into_holdings {
        return Verdict::Allow;
    }
    arbitrate(limit, current, pending.quantity)
}
