//! Container host port.
//!
//! This module defines the live container query/mutate surface the engine
//! needs from the host. The engine never holds a long-lived reference to
//! an actor's inventory; every arbitration reads it fresh through this
//! trait.

use crate::domain::{ActorId, GoodType, ItemStack, Slot, SlotCategory};

/// Live view of actor inventories supplied by the host.
///
/// # Implementation Notes
///
/// - Reads must be cheap: `slots` is called on every arbitration and
///   should return a borrowed slice, not a copy
/// - Unknown or offline actors report empty slot runs rather than failing
/// - `Cursor` is a single-slot category holding the in-transit stack
/// - Mutations are only issued by the engine from deferred jobs or for the
///   cursor itself, never while the host is mid-way through moving a stack
pub trait ContainerHost {
    /// Check whether the actor is still connected.
    fn is_online(&self, actor: &ActorId) -> bool;

    /// Slots of one category for the actor.
    fn slots(&self, actor: &ActorId, category: SlotCategory) -> &[Slot];

    /// The stack currently on the actor's cursor, if any.
    fn cursor(&self, actor: &ActorId) -> Option<&ItemStack> {
        self.slots(actor, SlotCategory::Cursor)
            .first()
            .and_then(Option::as_ref)
            .filter(|stack| !stack.is_empty())
    }

    /// Replace the cursor content.
    fn set_cursor(&mut self, actor: &ActorId, stack: Slot);

    /// Drop a stack on the ground at the actor's current position.
    fn drop_at_actor_position(&mut self, actor: &ActorId, stack: ItemStack);

    /// Remove up to `quantity` units of `good` from the actor's holdings
    /// (primary, armor, off-hand). Returns the number of units removed.
    fn remove_from_holdings(&mut self, actor: &ActorId, good: &GoodType, quantity: u32) -> u32;

    /// Insert a stack into the actor's holdings. Returns the units that did
    /// not fit.
    fn insert_into_holdings(&mut self, actor: &ActorId, stack: ItemStack) -> u32;

    /// Units of `good` the actor's holdings could still take in, counting
    /// partial stacks of the same good and empty slots.
    fn holdings_room(&self, actor: &ActorId, good: &GoodType) -> u32;

    /// Take up to `quantity` units of `good` out of slot `slot` of the
    /// foreign container the actor has open. Returns the units taken; zero
    /// when no container is open or the slot holds something else.
    fn take_from_open_container(
        &mut self,
        actor: &ActorId,
        slot: usize,
        good: &GoodType,
        quantity: u32,
    ) -> u32;

    /// Ask the host to resend the actor's inventory view after a cancelled
    /// interaction so the client does not show a phantom move.
    fn refresh_view(&mut self, actor: &ActorId);
}
