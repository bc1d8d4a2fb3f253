//! Item stacks and the slot categories a host exposes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::GoodType;

/// A quantity of one good occupying a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    good: GoodType,
    quantity: u32,
}

impl ItemStack {
    /// Create a new stack.
    #[must_use]
    pub const fn new(good: GoodType, quantity: u32) -> Self {
        Self { good, quantity }
    }

    /// The good held in this stack.
    #[must_use]
    pub const fn good(&self) -> &GoodType {
        &self.good
    }

    /// Number of units in this stack.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// True when the stack holds no units.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    /// Return a copy of this stack with a different quantity.
    #[must_use]
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            good: self.good.clone(),
            quantity,
        }
    }

    /// Split `quantity` units off this stack, leaving the rest behind.
    ///
    /// Returns `None` when nothing could be split.
    pub fn split(&mut self, quantity: u32) -> Option<Self> {
        let taken = quantity.min(self.quantity);
        if taken == 0 {
            return None;
        }
        self.quantity -= taken;
        Some(self.with_quantity(taken))
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.quantity, self.good)
    }
}

/// One slot of a container: empty or holding a stack.
pub type Slot = Option<ItemStack>;

/// Slot groups a host exposes for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotCategory {
    /// Main storage grid including the hotbar.
    Primary,
    /// Equipped armor pieces.
    Armor,
    /// The off-hand slot.
    OffHand,
    /// Stack held on the cursor mid-interaction.
    Cursor,
}

impl SlotCategory {
    /// Categories that make up an actor's holdings at rest.
    pub const HOLDINGS: [SlotCategory; 3] = [Self::Primary, Self::Armor, Self::OffHand];

    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Armor => "armor",
            Self::OffHand => "off_hand",
            Self::Cursor => "cursor",
        }
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sum the units of `good` across a run of slots.
#[must_use]
pub fn count_in(slots: &[Slot], good: &GoodType) -> u32 {
    slots
        .iter()
        .flatten()
        .filter(|stack| stack.good() == good)
        .fold(0u32, |total, stack| total.saturating_add(stack.quantity()))
}
