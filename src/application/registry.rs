//! Per-good capacity registry.
//!
//! Single source of truth for configured caps and for how many units of a
//! good an actor currently holds. Reads happen on every inventory event;
//! writes only through the administrative `set_limit` / `remove_limit`.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::info;

use crate::domain::{count_in, ActorId, GoodType, SlotCategory};
use crate::port::inbound::limits::LimitQuery;
use crate::port::outbound::container::ContainerHost;

/// Mapping from good to capacity. Absent means unlimited; zero means banned.
#[derive(Debug, Default)]
pub struct LimitRegistry {
    limits: RwLock<HashMap<GoodType, u32>>,
}

impl LimitRegistry {
    /// Create an empty registry (everything unlimited).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with configured caps.
    #[must_use]
    pub fn with_limits(limits: impl IntoIterator<Item = (GoodType, u32)>) -> Self {
        Self {
            limits: RwLock::new(limits.into_iter().collect()),
        }
    }

    /// Set or replace the cap for `good`. Returns the previous cap.
    pub fn set_limit(&self, good: GoodType, capacity: u32) -> Option<u32> {
        info!(good = %good, limit = capacity, "Item limit set");
        self.limits.write().insert(good, capacity)
    }

    /// Remove the cap for `good`, making it unlimited. Returns the old cap.
    pub fn remove_limit(&self, good: &GoodType) -> Option<u32> {
        let removed = self.limits.write().remove(good);
        if removed.is_some() {
            info!(good = %good, "Item limit removed");
        }
        removed
    }

    /// Snapshot of every configured cap, ordered by good.
    #[must_use]
    pub fn limits(&self) -> Vec<(GoodType, u32)> {
        let mut entries: Vec<_> = self
            .limits
            .read()
            .iter()
            .map(|(good, cap)| (good.clone(), *cap))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Number of capped goods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.limits.read().len()
    }

    /// True when no good carries a cap.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limits.read().is_empty()
    }
}

impl LimitQuery for LimitRegistry {
    fn is_limited(&self, good: &GoodType) -> bool {
        self.limits.read().contains_key(good)
    }

    fn limit_of(&self, good: &GoodType) -> Option<u32> {
        self.limits.read().get(good).copied()
    }

    fn all_limited_goods(&self) -> Vec<GoodType> {
        let mut goods: Vec<_> = self.limits.read().keys().cloned().collect();
        goods.sort();
        goods
    }

    /// Counts primary, armor and off-hand slots. The cursor is left out
    /// unless `include_in_transit` is set: for cursor-driven pathways the
    /// cursor is exactly the quantity under arbitration, and counting it
    /// twice rejects placements that fit.
    fn count_held(
        &self,
        host: &dyn ContainerHost,
        actor: &ActorId,
        good: &GoodType,
        include_in_transit: bool,
    ) -> u32 {
        let held = SlotCategory::HOLDINGS
            .iter()
            .fold(0u32, |total, category| {
                total.saturating_add(count_in(host.slots(actor, *category), good))
            });
        if !include_in_transit {
            return held;
        }
        let in_transit = host
            .cursor(actor)
            .filter(|stack| stack.good() == good)
            .map_or(0, |stack| stack.quantity());
        held.saturating_add(in_transit)
    }
}
