//! Per-actor view-refresh throttle.
//!
//! Interaction-retry loops (repeatedly clicking a blocked slot) would
//! otherwise ask the host to resend the inventory view on every attempt.
//! The cooldown is presentation-only; it never influences a verdict.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::domain::ActorId;

/// Bounded cache of the last refresh instant per actor.
pub struct RefreshCooldown {
    /// Last refresh time per actor.
    cache: DashMap<ActorId, Instant>,
    /// Minimum spacing between two refreshes for the same actor.
    window: Duration,
    /// Maximum number of tracked actors.
    max_entries: usize,
}

impl RefreshCooldown {
    /// Create a cooldown with the given window and capacity.
    #[must_use]
    pub fn new(window: Duration, max_entries: usize) -> Self {
        Self {
            cache: DashMap::new(),
            window,
            max_entries: max_entries.max(1),
        }
    }

    /// Claim a refresh slot for `actor` now.
    ///
    /// Returns false while the actor is still inside the window.
    pub fn try_acquire(&self, actor: &ActorId) -> bool {
        self.try_acquire_at(actor, Instant::now())
    }

    /// Claim a refresh slot for `actor` at a caller-supplied instant.
    pub fn try_acquire_at(&self, actor: &ActorId, now: Instant) -> bool {
        if let Some(last) = self.cache.get(actor) {
            if now.saturating_duration_since(*last) < self.window {
                return false;
            }
        }

        self.cache.insert(*actor, now);

        if self.cache.len() > self.max_entries {
            self.gc(now);
        }

        true
    }

    /// Drop the entry for an actor that left.
    pub fn forget(&self, actor: &ActorId) {
        self.cache.remove(actor);
    }

    /// Number of tracked actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// True when no actor is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn gc(&self, now: Instant) {
        let window = self.window;

        // Remove expired entries
        self.cache
            .retain(|_, last| now.saturating_duration_since(*last) < window);

        // If still over limit, evict oldest first
        if self.cache.len() > self.max_entries {
            let mut entries: Vec<(ActorId, Instant)> = self
                .cache
                .iter()
                .map(|entry| (*entry.key(), *entry.value()))
                .collect();
            entries.sort_by(|a, b| a.1.cmp(&b.1));

            let to_remove = entries.len().saturating_sub(self.max_entries);
            for (actor, _) in entries.into_iter().take(to_remove) {
                self.cache.remove(&actor);
            }
        }
    }
}
