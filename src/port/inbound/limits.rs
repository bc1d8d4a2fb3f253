//! Limit queries and enforcement exposed to collaborators.
//!
//! Command handlers, region logic and other host code consult these
//! traits instead of reaching into the registry or interceptor directly.

use crate::domain::{ActorId, GoodType};
use crate::port::outbound::container::ContainerHost;

/// Read side of the limit registry.
pub trait LimitQuery: Send + Sync {
    /// True if an explicit cap exists for `good` (including zero).
    fn is_limited(&self, good: &GoodType) -> bool;

    /// The configured cap, or `None` when the good is unlimited.
    fn limit_of(&self, good: &GoodType) -> Option<u32>;

    /// Every good carrying a cap, in stable order.
    fn all_limited_goods(&self) -> Vec<GoodType>;

    /// Units of `good` the actor holds across primary, armor and off-hand
    /// slots, plus the cursor when `include_in_transit` is set.
    fn count_held(
        &self,
        host: &dyn ContainerHost,
        actor: &ActorId,
        good: &GoodType,
        include_in_transit: bool,
    ) -> u32;
}

/// Retroactive enforcement entry points.
pub trait LimitEnforcement {
    /// Remove units of `good` above its cap from the actor's holdings.
    /// Returns the number of units removed; zero when already compliant.
    fn enforce_now(&self, host: &mut dyn ContainerHost, actor: &ActorId, good: &GoodType) -> u32;

    /// Sweep every limited good and report the total removed.
    fn enforce_all(&self, host: &mut dyn ContainerHost, actor: &ActorId) -> u32;
}
