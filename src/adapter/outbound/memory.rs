//! In-memory container host.
//!
//! A complete [`ContainerHost`] backed by plain vectors, plus the host-side
//! event handlers a container UI would run: each action builds the
//! matching [`Pathway`], asks the [`Enforcer`] for an [`Interception`] and
//! applies it. Backs the `simulate` command and the test harness.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::Enforcer;
use crate::domain::{
    ActorId, ContainerSide, DragLanding, GoodType, Interception, ItemStack, Pathway, Slot,
    SlotCategory,
};
use crate::port::outbound::container::ContainerHost;

/// Units a single slot can hold.
pub const MAX_STACK: u32 = 64;
/// Primary slots per actor (storage grid plus hotbar).
pub const PRIMARY_SLOTS: usize = 36;
/// Armor slots per actor.
pub const ARMOR_SLOTS: usize = 4;
/// Slots in a freshly opened foreign container.
pub const CONTAINER_SLOTS: usize = 27;

/// Block position in the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// A stack lying on the ground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundStack {
    pub id: u64,
    pub position: Position,
    pub stack: ItemStack,
}

#[derive(Debug)]
struct ActorState {
    online: bool,
    position: Position,
    primary: Vec<Slot>,
    armor: Vec<Slot>,
    off_hand: Vec<Slot>,
    cursor: Vec<Slot>,
    open_container: Option<Vec<Slot>>,
    refreshes: u32,
}

impl ActorState {
    fn new() -> Self {
        Self {
            online: true,
            position: Position::default(),
            primary: vec![None; PRIMARY_SLOTS],
            armor: vec![None; ARMOR_SLOTS],
            off_hand: vec![None; 1],
            cursor: vec![None; 1],
            open_container: None,
            refreshes: 0,
        }
    }

    fn category(&self, category: SlotCategory) -> &[Slot] {
        match category {
            SlotCategory::Primary => &self.primary,
            SlotCategory::Armor => &self.armor,
            SlotCategory::OffHand => &self.off_hand,
            SlotCategory::Cursor => &self.cursor,
        }
    }

    fn category_mut(&mut self, category: SlotCategory) -> &mut Vec<Slot> {
        match category {
            SlotCategory::Primary => &mut self.primary,
            SlotCategory::Armor => &mut self.armor,
            SlotCategory::OffHand => &mut self.off_hand,
            SlotCategory::Cursor => &mut self.cursor,
        }
    }

    fn side_mut(&mut self, side: ContainerSide) -> Option<&mut Vec<Slot>> {
        match side {
            ContainerSide::Own => Some(&mut self.primary),
            ContainerSide::Foreign => self.open_container.as_mut(),
        }
    }

    fn take_cursor(&mut self) -> Option<ItemStack> {
        self.cursor[0].take().filter(|stack| !stack.is_empty())
    }

    fn set_cursor(&mut self, stack: Slot) {
        self.cursor[0] = stack.filter(|stack| !stack.is_empty());
    }
}

/// Reference host keeping every inventory in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    actors: HashMap<ActorId, ActorState>,
    ground: Vec<GroundStack>,
    next_ground_id: u64,
}

impl MemoryHost {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a new actor with an empty inventory.
    pub fn join(&mut self) -> ActorId {
        let actor = ActorId::new();
        self.actors.insert(actor, ActorState::new());
        actor
    }

    /// Reconnect a known actor, or connect one with this id.
    pub fn rejoin(&mut self, actor: &ActorId) {
        self.actors
            .entry(*actor)
            .or_insert_with(ActorState::new)
            .online = true;
    }

    /// Disconnect an actor; their inventory is kept.
    pub fn leave(&mut self, actor: &ActorId) {
        if let Some(state) = self.actors.get_mut(actor) {
            state.online = false;
            state.open_container = None;
        }
    }

    /// Move an actor.
    pub fn set_position(&mut self, actor: &ActorId, position: Position) {
        if let Some(state) = self.actors.get_mut(actor) {
            state.position = position;
        }
    }

    /// Place a stack directly into a slot, bypassing arbitration. Models
    /// inventory edits made while the actor was offline.
    pub fn insert_into_slot(
        &mut self,
        actor: &ActorId,
        category: SlotCategory,
        index: usize,
        stack: ItemStack,
    ) {
        if let Some(slot) = self
            .actors
            .get_mut(actor)
            .and_then(|state| state.category_mut(category).get_mut(index))
        {
            *slot = Some(stack).filter(|stack| !stack.is_empty());
        }
    }

    /// Put a stack on the actor's cursor, bypassing arbitration.
    pub fn put_on_cursor(&mut self, actor: &ActorId, stack: ItemStack) {
        if let Some(state) = self.actors.get_mut(actor) {
            state.set_cursor(Some(stack));
        }
    }

    /// Open a foreign container view holding `contents`.
    pub fn open_container(&mut self, actor: &ActorId, contents: Vec<Slot>) {
        if let Some(state) = self.actors.get_mut(actor) {
            let mut slots = contents;
            slots.resize(slots.len().max(CONTAINER_SLOTS), None);
            state.open_container = Some(slots);
        }
    }

    /// Slots of the open foreign container, empty when none is open.
    #[must_use]
    pub fn container_slots(&self, actor: &ActorId) -> &[Slot] {
        self.actors
            .get(actor)
            .and_then(|state| state.open_container.as_deref())
            .unwrap_or(&[])
    }

    /// Spawn a stack on the ground. Returns its id.
    pub fn spawn_ground(&mut self, position: Position, stack: ItemStack) -> u64 {
        let id = self.next_ground_id;
        self.next_ground_id += 1;
        self.ground.push(GroundStack {
            id,
            position,
            stack,
        });
        id
    }

    /// Every stack on the ground.
    #[must_use]
    pub fn ground(&self) -> &[GroundStack] {
        &self.ground
    }

    /// Units of `good` lying on the ground anywhere.
    #[must_use]
    pub fn ground_count(&self, good: &GoodType) -> u32 {
        self.ground
            .iter()
            .filter(|item| item.stack.good() == good)
            .map(|item| item.stack.quantity())
            .sum()
    }

    /// Number of view refreshes the actor received.
    #[must_use]
    pub fn refresh_count(&self, actor: &ActorId) -> u32 {
        self.actors.get(actor).map_or(0, |state| state.refreshes)
    }

    /// Pick up a ground stack.
    pub fn pick_up(&mut self, enforcer: &Enforcer, actor: &ActorId, ground_id: u64) -> Interception {
        let Some(index) = self.ground.iter().position(|item| item.id == ground_id) else {
            return Interception::Cancel;
        };
        let stack = self.ground[index].stack.clone();
        let outcome = enforcer.intercept(self, actor, &Pathway::GroundPickup { stack });

        let accepted = match outcome {
            Interception::Cancel => return outcome,
            Interception::Proceed => self.ground.remove(index).stack,
            Interception::Trim { accepted, .. } => {
                match self.ground[index].stack.split(accepted) {
                    Some(taken) => taken,
                    None => return outcome,
                }
            }
        };

        let leftover = self.insert_into_holdings(actor, accepted.clone());
        if leftover > 0 {
            let position = self.ground.get(index).map_or_else(
                || self.position_of(actor),
                |item| item.position,
            );
            self.spawn_ground(position, accepted.with_quantity(leftover));
        }
        self.ground.retain(|item| !item.stack.is_empty());
        outcome
    }

    /// Place the cursor stack into a slot of either side of the view.
    pub fn place_cursor(
        &mut self,
        enforcer: &Enforcer,
        actor: &ActorId,
        side: ContainerSide,
        slot: usize,
    ) -> Interception {
        let swaps = match (self.cursor(actor), self.side_slot(actor, side, slot)) {
            (Some(cursor), Some(existing)) => existing.good() != cursor.good(),
            _ => false,
        };
        let outcome = enforcer.intercept(
            self,
            actor,
            &Pathway::CursorPlace {
                target: side,
                swaps,
            },
        );
        let amount = match outcome {
            Interception::Cancel => return outcome,
            Interception::Proceed => u32::MAX,
            Interception::Trim { accepted, .. } => accepted,
        };

        let Some(state) = self.actors.get_mut(actor) else {
            return outcome;
        };
        let Some(mut cursor) = state.take_cursor() else {
            return outcome;
        };
        let Some(target) = state.side_mut(side).and_then(|slots| slots.get_mut(slot)) else {
            state.set_cursor(Some(cursor));
            return outcome;
        };

        match target {
            Some(existing) if existing.good() != cursor.good() => {
                // Different goods swap places, only for unmodified placements
                if outcome == Interception::Proceed {
                    std::mem::swap(existing, &mut cursor);
                }
            }
            _ => {
                let present = target.as_ref().map_or(0, ItemStack::quantity);
                let moved = amount
                    .min(cursor.quantity())
                    .min(MAX_STACK.saturating_sub(present));
                if let Some(placed) = cursor.split(moved) {
                    *target = Some(placed.with_quantity(present + placed.quantity()));
                }
            }
        }
        state.set_cursor(Some(cursor));
        outcome
    }

    /// Shift-click a stack to the other side of the view.
    pub fn shift_transfer(
        &mut self,
        enforcer: &Enforcer,
        actor: &ActorId,
        source: ContainerSide,
        slot: usize,
    ) -> Interception {
        let stack = match source {
            ContainerSide::Own => self
                .slots(actor, SlotCategory::Primary)
                .get(slot)
                .cloned()
                .flatten(),
            ContainerSide::Foreign => self.container_slots(actor).get(slot).cloned().flatten(),
        };
        let Some(stack) = stack else {
            return Interception::Proceed;
        };

        let outcome = enforcer.intercept(
            self,
            actor,
            &Pathway::BulkTransfer {
                source,
                slot,
                stack: stack.clone(),
            },
        );
        let amount = match outcome {
            Interception::Cancel => return outcome,
            Interception::Proceed => stack.quantity(),
            Interception::Trim { accepted, .. } => accepted,
        };

        match source {
            ContainerSide::Foreign => {
                let taken = self.take_from_open_container(actor, slot, stack.good(), amount);
                let leftover = self.insert_into_holdings(actor, stack.with_quantity(taken));
                if leftover > 0 {
                    // Whatever did not fit goes back where it came from
                    if let Some(container) = self
                        .actors
                        .get_mut(actor)
                        .and_then(|state| state.open_container.as_mut())
                    {
                        fill(container, stack.with_quantity(leftover));
                    }
                }
            }
            ContainerSide::Own => {
                let Some(state) = self.actors.get_mut(actor) else {
                    return outcome;
                };
                let Some(container) = state.open_container.as_mut() else {
                    return outcome;
                };
                let Some(mut moving) = state.primary[slot].take() else {
                    return outcome;
                };
                let leftover = fill(container, moving.clone());
                moving = moving.with_quantity(leftover);
                state.primary[slot] = Some(moving).filter(|stack| !stack.is_empty());
            }
        }
        outcome
    }

    /// Drag the cursor stack across several slots.
    pub fn drag(
        &mut self,
        enforcer: &Enforcer,
        actor: &ActorId,
        landings: Vec<DragLanding>,
    ) -> Interception {
        let Some(stack) = self.cursor(actor).cloned() else {
            return Interception::Proceed;
        };
        let pathway = Pathway::Drag { stack, landings };
        let outcome = enforcer.intercept(self, actor, &pathway);
        let mut own_budget = match outcome {
            Interception::Cancel => return outcome,
            Interception::Proceed => u32::MAX,
            Interception::Trim { accepted, .. } => accepted,
        };
        let Pathway::Drag { landings, .. } = pathway else {
            return outcome;
        };

        let Some(state) = self.actors.get_mut(actor) else {
            return outcome;
        };
        let Some(mut cursor) = state.take_cursor() else {
            return outcome;
        };

        for landing in landings {
            let mut quantity = landing.quantity.min(cursor.quantity());
            if landing.side == ContainerSide::Own {
                quantity = quantity.min(own_budget);
            }
            let Some(target) = state
                .side_mut(landing.side)
                .and_then(|slots| slots.get_mut(landing.slot))
            else {
                continue;
            };
            if target.as_ref().is_some_and(|existing| existing.good() != cursor.good()) {
                continue;
            }
            let present = target.as_ref().map_or(0, ItemStack::quantity);
            let moved = quantity.min(MAX_STACK.saturating_sub(present));
            if let Some(placed) = cursor.split(moved) {
                *target = Some(placed.with_quantity(present + placed.quantity()));
                if landing.side == ContainerSide::Own {
                    own_budget -= moved;
                }
            }
        }

        state.set_cursor(Some(cursor));
        outcome
    }

    /// Swap the main-hand (first hotbar slot) and off-hand stacks.
    pub fn swap_hands(&mut self, enforcer: &Enforcer, actor: &ActorId) -> Interception {
        let Some(state) = self.actors.get(actor) else {
            return Interception::Cancel;
        };
        let pathway = Pathway::HandSwap {
            main_hand: state.primary[0].clone(),
            off_hand: state.off_hand[0].clone(),
        };
        let outcome = enforcer.intercept(self, actor, &pathway);
        if outcome == Interception::Proceed {
            if let Some(state) = self.actors.get_mut(actor) {
                let main = state.primary[0].take();
                state.primary[0] = state.off_hand[0].take();
                state.off_hand[0] = main;
            }
        }
        outcome
    }

    /// Take a stack out of the open foreign container onto the cursor.
    pub fn pick_from_container(
        &mut self,
        enforcer: &Enforcer,
        actor: &ActorId,
        slot: usize,
    ) -> Interception {
        let outcome = enforcer.intercept(self, actor, &Pathway::Withdraw);
        if self.cursor(actor).is_some() {
            return outcome;
        }
        if let Some(state) = self.actors.get_mut(actor) {
            let taken = state
                .open_container
                .as_mut()
                .and_then(|slots| slots.get_mut(slot))
                .and_then(Option::take);
            state.set_cursor(taken);
        }
        outcome
    }

    /// Throw a primary slot's stack on the ground.
    pub fn discard(&mut self, enforcer: &Enforcer, actor: &ActorId, slot: usize, quantity: u32) -> Interception {
        let outcome = enforcer.intercept(self, actor, &Pathway::Withdraw);
        let dropped = self
            .actors
            .get_mut(actor)
            .and_then(|state| state.primary.get_mut(slot))
            .and_then(|slot| {
                let taken = slot.as_mut().and_then(|stack| stack.split(quantity));
                if slot.as_ref().is_some_and(ItemStack::is_empty) {
                    *slot = None;
                }
                taken
            });
        if let Some(stack) = dropped {
            self.drop_at_actor_position(actor, stack);
        }
        outcome
    }

    /// Press the drop key: the main-hand stack is thrown, then the cursor
    /// is checked.
    pub fn press_drop(&mut self, enforcer: &Enforcer, actor: &ActorId) -> Interception {
        let thrown = self
            .actors
            .get_mut(actor)
            .and_then(|state| state.primary[0].take());
        if let Some(stack) = thrown {
            self.drop_at_actor_position(actor, stack);
        }
        enforcer.intercept(self, actor, &Pathway::DropKey)
    }

    /// Close the inventory view. The cursor stack folds back into holdings
    /// after arbitration, as real clients do.
    pub fn close_view(&mut self, enforcer: &Enforcer, actor: &ActorId) -> Interception {
        let outcome = enforcer.intercept(self, actor, &Pathway::CloseView);
        let cursor = self.actors.get_mut(actor).and_then(|state| {
            state.open_container = None;
            state.take_cursor()
        });
        if let Some(stack) = cursor {
            let leftover = self.insert_into_holdings(actor, stack.clone());
            if leftover > 0 {
                self.drop_at_actor_position(actor, stack.with_quantity(leftover));
            }
        }
        outcome
    }

    fn side_slot(&self, actor: &ActorId, side: ContainerSide, slot: usize) -> Option<&ItemStack> {
        let slots = match side {
            ContainerSide::Own => self.slots(actor, SlotCategory::Primary),
            ContainerSide::Foreign => self.container_slots(actor),
        };
        slots.get(slot).and_then(Option::as_ref)
    }

    fn position_of(&self, actor: &ActorId) -> Position {
        self.actors
            .get(actor)
            .map_or_else(Position::default, |state| state.position)
    }
}

/// Merge into matching stacks, then empty slots. Returns units left over.
fn fill(slots: &mut [Slot], stack: ItemStack) -> u32 {
    let mut remaining = stack.quantity();

    for existing in slots.iter_mut().flatten() {
        if remaining == 0 {
            break;
        }
        if existing.good() == stack.good() && existing.quantity() < MAX_STACK {
            let moved = remaining.min(MAX_STACK - existing.quantity());
            *existing = existing.with_quantity(existing.quantity() + moved);
            remaining -= moved;
        }
    }

    for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
        if remaining == 0 {
            break;
        }
        let moved = remaining.min(MAX_STACK);
        *slot = Some(stack.with_quantity(moved));
        remaining -= moved;
    }

    remaining
}

impl ContainerHost for MemoryHost {
    fn is_online(&self, actor: &ActorId) -> bool {
        self.actors.get(actor).is_some_and(|state| state.online)
    }

    fn slots(&self, actor: &ActorId, category: SlotCategory) -> &[Slot] {
        self.actors
            .get(actor)
            .map(|state| state.category(category))
            .unwrap_or(&[])
    }

    fn set_cursor(&mut self, actor: &ActorId, stack: Slot) {
        if let Some(state) = self.actors.get_mut(actor) {
            state.set_cursor(stack);
        }
    }

    fn drop_at_actor_position(&mut self, actor: &ActorId, stack: ItemStack) {
        if stack.is_empty() {
            return;
        }
        let position = self.position_of(actor);
        self.spawn_ground(position, stack);
    }

    fn remove_from_holdings(&mut self, actor: &ActorId, good: &GoodType, quantity: u32) -> u32 {
        let Some(state) = self.actors.get_mut(actor) else {
            return 0;
        };
        let mut remaining = quantity;

        // Back of the grid first, then armor, then off-hand
        let slots = state
            .primary
            .iter_mut()
            .rev()
            .chain(state.armor.iter_mut())
            .chain(state.off_hand.iter_mut());
        for slot in slots {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot.as_mut().filter(|stack| stack.good() == good) else {
                continue;
            };
            if let Some(taken) = stack.split(remaining) {
                remaining -= taken.quantity();
            }
            if stack.is_empty() {
                *slot = None;
            }
        }

        quantity - remaining
    }

    fn insert_into_holdings(&mut self, actor: &ActorId, stack: ItemStack) -> u32 {
        match self.actors.get_mut(actor) {
            Some(state) => fill(&mut state.primary, stack),
            None => stack.quantity(),
        }
    }

    fn holdings_room(&self, actor: &ActorId, good: &GoodType) -> u32 {
        self.slots(actor, SlotCategory::Primary)
            .iter()
            .map(|slot| match slot {
                None => MAX_STACK,
                Some(stack) if stack.good() == good => MAX_STACK.saturating_sub(stack.quantity()),
                Some(_) => 0,
            })
            .fold(0u32, u32::saturating_add)
    }

    fn take_from_open_container(
        &mut self,
        actor: &ActorId,
        slot: usize,
        good: &GoodType,
        quantity: u32,
    ) -> u32 {
        let Some(entry) = self
            .actors
            .get_mut(actor)
            .and_then(|state| state.open_container.as_mut())
            .and_then(|slots| slots.get_mut(slot))
        else {
            return 0;
        };
        let Some(stack) = entry.as_mut().filter(|stack| stack.good() == good) else {
            return 0;
        };
        let taken = stack.split(quantity).map_or(0, |taken| taken.quantity());
        if stack.is_empty() {
            *entry = None;
        }
        taken
    }

    fn refresh_view(&mut self, actor: &ActorId) {
        if let Some(state) = self.actors.get_mut(actor) {
            state.refreshes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(name: &str, quantity: u32) -> ItemStack {
        ItemStack::new(GoodType::parse(name).unwrap(), quantity)
    }

    #[test]
    fn fill_merges_before_using_empty_slots() {
        let mut slots = vec![None, Some(stack("STONE", 60)), None];
        let leftover = fill(&mut slots, stack("STONE", 10));
        assert_eq!(leftover, 0);
        assert_eq!(slots[1].as_ref().unwrap().quantity(), 64);
        assert_eq!(slots[0].as_ref().unwrap().quantity(), 6);
    }

    #[test]
    fn fill_reports_overflow() {
        let mut slots = vec![Some(stack("DIRT", 64))];
        assert_eq!(fill(&mut slots, stack("STONE", 5)), 5);
    }

    #[test]
    fn remove_from_holdings_spans_categories() {
        let mut host = MemoryHost::new();
        let actor = host.join();
        host.insert_into_slot(&actor, SlotCategory::Primary, 0, stack("TOTEM_OF_UNDYING", 1));
        host.insert_into_slot(&actor, SlotCategory::OffHand, 0, stack("TOTEM_OF_UNDYING", 1));

        let good = GoodType::parse("TOTEM_OF_UNDYING").unwrap();
        assert_eq!(host.remove_from_holdings(&actor, &good, 5), 2);
        assert!(host.slots(&actor, SlotCategory::Primary)[0].is_none());
        assert!(host.slots(&actor, SlotCategory::OffHand)[0].is_none());
    }

    #[test]
    fn holdings_room_counts_partial_stacks_and_empty_slots() {
        let mut host = MemoryHost::new();
        let actor = host.join();
        let pearl = GoodType::parse("ENDER_PEARL").unwrap();
        for index in 0..PRIMARY_SLOTS {
            host.insert_into_slot(&actor, SlotCategory::Primary, index, stack("DIRT", 64));
        }
        assert_eq!(host.holdings_room(&actor, &pearl), 0);

        host.insert_into_slot(&actor, SlotCategory::Primary, 3, stack("ENDER_PEARL", 60));
        // An empty stack clears the slot
        host.insert_into_slot(&actor, SlotCategory::Primary, 7, stack("DIRT", 0));
        assert_eq!(host.holdings_room(&actor, &pearl), 4 + MAX_STACK);
    }

    #[test]
    fn unknown_actor_reads_empty() {
        let host = MemoryHost::new();
        let stranger = ActorId::new();
        assert!(host.slots(&stranger, SlotCategory::Primary).is_empty());
        assert!(host.cursor(&stranger).is_none());
        assert!(!host.is_online(&stranger));
    }

    #[test]
    fn drops_land_at_current_position() {
        let mut host = MemoryHost::new();
        let actor = host.join();
        host.set_position(&actor, Position::new(4, 64, -2));
        host.drop_at_actor_position(&actor, stack("STONE", 3));
        assert_eq!(host.ground()[0].position, Position::new(4, 64, -2));
        assert_eq!(host.ground_count(&GoodType::parse("STONE").unwrap()), 3);
    }

    #[test]
    fn leaving_closes_container_and_goes_offline() {
        let mut host = MemoryHost::new();
        let actor = host.join();
        host.open_container(&actor, vec![Some(stack("STONE", 1))]);
        host.leave(&actor);
        assert!(!host.is_online(&actor));
        assert!(host.container_slots(&actor).is_empty());
        host.rejoin(&actor);
        assert!(host.is_online(&actor));
    }
}
