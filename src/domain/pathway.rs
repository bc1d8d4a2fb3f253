//! Mutation pathways and their classification into pending mutations.
//!
//! A [`Pathway`] is the host-agnostic description of one inventory event.
//! Each variant carries only what that pathway needs. [`Pathway::classify`]
//! turns it into the [`PendingMutation`]s the policy arbitrates: which good
//! is moving, how many units, from where, and whether the actor's holdings
//! grow as a result.

use serde::{Deserialize, Serialize};

use super::id::GoodType;
use super::stack::{ItemStack, Slot};

/// Which side of an open container view a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerSide {
    /// The actor's own inventory.
    Own,
    /// A foreign container (chest, furnace, another actor's view).
    Foreign,
}

/// Location classes a unit can move between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationClass {
    Ground,
    ForeignContainer,
    OwnContainer,
    Cursor,
    HandSlot,
}

impl LocationClass {
    const fn of(side: ContainerSide) -> Self {
        match side {
            ContainerSide::Own => Self::OwnContainer,
            ContainerSide::Foreign => Self::ForeignContainer,
        }
    }
}

/// Portion of a drag gesture landing in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLanding {
    /// Side of the view the slot belongs to.
    pub side: ContainerSide,
    /// Slot index within that side.
    pub slot: usize,
    /// Units deposited into the slot.
    pub quantity: u32,
}

/// One intercepted inventory event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pathway {
    /// Picking a stack up from the ground.
    GroundPickup { stack: ItemStack },
    /// Placing the cursor stack into a slot (place all / one / some).
    CursorPlace {
        target: ContainerSide,
        /// The target slot holds a different good, so the whole cursor
        /// stack trades places with it and cannot be trimmed.
        #[serde(default)]
        swaps: bool,
    },
    /// Shift-click transfer of a whole stack to the other side of the view.
    BulkTransfer {
        source: ContainerSide,
        slot: usize,
        stack: ItemStack,
    },
    /// Dragging the cursor stack across several slots.
    Drag {
        stack: ItemStack,
        landings: Vec<DragLanding>,
    },
    /// Swapping main-hand and off-hand stacks.
    HandSwap { main_hand: Slot, off_hand: Slot },
    /// Closing the inventory view while something sits on the cursor.
    CloseView,
    /// Pressing the drop key while something sits on the cursor.
    DropKey,
    /// Removal-only motion: taking out of a foreign container, discarding,
    /// giving away.
    Withdraw,
}

impl Pathway {
    /// Stable name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GroundPickup { .. } => "ground_pickup",
            Self::CursorPlace { .. } => "cursor_place",
            Self::BulkTransfer { .. } => "bulk_transfer",
            Self::Drag { .. } => "drag",
            Self::HandSwap { .. } => "hand_swap",
            Self::CloseView => "close_view",
            Self::DropKey => "drop_key",
            Self::Withdraw => "withdraw",
        }
    }

    /// True for pathways that divert the whole cursor stack instead of
    /// accepting a partial amount.
    #[must_use]
    pub const fn diverts_cursor(&self) -> bool {
        matches!(self, Self::CloseView | Self::DropKey)
    }

    /// Classify this event given the actor's current cursor content.
    ///
    /// Returns up to two pending mutations (hand swaps move two stacks).
    /// Anything the host reports inconsistently, such as an empty cursor
    /// for a cursor-driven pathway, classifies as nothing in motion.
    #[must_use]
    pub fn classify(&self, cursor: Option<&ItemStack>) -> [Option<PendingMutation>; 2] {
        let single = match self {
            Self::GroundPickup { stack } => PendingMutation::moving(
                stack,
                stack.quantity(),
                LocationClass::Ground,
                LocationClass::OwnContainer,
            )
            .map(PendingMutation::counting_in_transit),
            Self::CursorPlace { target, .. } => cursor.and_then(|stack| {
                PendingMutation::moving(
                    stack,
                    stack.quantity(),
                    LocationClass::Cursor,
                    LocationClass::of(*target),
                )
            }),
            Self::BulkTransfer { source, stack, .. } => {
                let destination = match source {
                    ContainerSide::Own => LocationClass::ForeignContainer,
                    ContainerSide::Foreign => LocationClass::OwnContainer,
                };
                PendingMutation::moving(
                    stack,
                    stack.quantity(),
                    LocationClass::of(*source),
                    destination,
                )
                .map(PendingMutation::counting_in_transit)
            }
            Self::Drag { stack, landings } => {
                let into_own = landings
                    .iter()
                    .filter(|landing| landing.side == ContainerSide::Own)
                    .fold(0u32, |total, landing| total.saturating_add(landing.quantity));
                PendingMutation::moving(
                    stack,
                    into_own,
                    LocationClass::Cursor,
                    LocationClass::OwnContainer,
                )
            }
            Self::HandSwap {
                main_hand,
                off_hand,
            } => {
                return [
                    main_hand.as_ref().and_then(PendingMutation::swapping),
                    off_hand.as_ref().and_then(PendingMutation::swapping),
                ];
            }
            Self::CloseView | Self::DropKey => cursor.and_then(|stack| {
                PendingMutation::moving(
                    stack,
                    stack.quantity(),
                    LocationClass::Cursor,
                    LocationClass::OwnContainer,
                )
            }),
            Self::Withdraw => None,
        };
        [single, None]
    }
}

/// Transient description of one unit movement under arbitration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub good: GoodType,
    /// Units in motion. Zero for moves that conserve holdings.
    pub quantity: u32,
    pub source: LocationClass,
    pub destination: LocationClass,
    /// True when the destination is the actor's own holdings.
    pub into_holdings: bool,
    /// Whether the current cursor content counts as already held when
    /// comparing against the cap.
    pub include_in_transit: bool,
}

impl PendingMutation {
    fn moving(
        stack: &ItemStack,
        quantity: u32,
        source: LocationClass,
        destination: LocationClass,
    ) -> Option<Self> {
        if quantity == 0 {
            return None;
        }
        Some(Self {
            good: stack.good().clone(),
            quantity,
            source,
            destination,
            into_holdings: matches!(
                destination,
                LocationClass::OwnContainer | LocationClass::HandSlot
            ),
            include_in_transit: false,
        })
    }

    fn swapping(stack: &ItemStack) -> Option<Self> {
        if stack.is_empty() {
            return None;
        }
        Some(Self {
            good: stack.good().clone(),
            quantity: 0,
            source: LocationClass::HandSlot,
            destination: LocationClass::HandSlot,
            into_holdings: true,
            include_in_transit: false,
        })
    }

    fn counting_in_transit(mut self) -> Self {
        self.include_in_transit = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(name: &str, quantity: u32) -> ItemStack {
        ItemStack::new(GoodType::parse(name).unwrap(), quantity)
    }

    #[test]
    fn pickup_counts_cursor_as_held() {
        let [first, second] = Pathway::GroundPickup {
            stack: stack("STONE", 5),
        }
        .classify(None);
        let pending = first.unwrap();
        assert_eq!(pending.quantity, 5);
        assert!(pending.into_holdings);
        assert!(pending.include_in_transit);
        assert!(second.is_none());
    }

    #[test]
    fn cursor_place_uses_cursor_and_excludes_it_from_count() {
        let cursor = stack("STONE", 3);
        let [first, _] = Pathway::CursorPlace {
            target: ContainerSide::Own,
            swaps: false,
        }
        .classify(Some(&cursor));
        let pending = first.unwrap();
        assert_eq!(pending.quantity, 3);
        assert_eq!(pending.source, LocationClass::Cursor);
        assert!(!pending.include_in_transit);
    }

    #[test]
    fn cursor_place_into_foreign_container_does_not_add() {
        let cursor = stack("STONE", 3);
        let [first, _] = Pathway::CursorPlace {
            target: ContainerSide::Foreign,
            swaps: false,
        }
        .classify(Some(&cursor));
        assert!(!first.unwrap().into_holdings);
    }

    #[test]
    fn empty_cursor_is_nothing_in_motion() {
        for pathway in [
            Pathway::CursorPlace {
                target: ContainerSide::Own,
                swaps: false,
            },
            Pathway::CloseView,
            Pathway::DropKey,
        ] {
            assert_eq!(pathway.classify(None), [None, None]);
        }
    }

    #[test]
    fn bulk_transfer_direction_follows_source() {
        let into_own = Pathway::BulkTransfer {
            source: ContainerSide::Foreign,
            slot: 0,
            stack: stack("STONE", 64),
        }
        .classify(None)[0]
            .clone()
            .unwrap();
        assert!(into_own.into_holdings);

        let out_of_own = Pathway::BulkTransfer {
            source: ContainerSide::Own,
            slot: 0,
            stack: stack("STONE", 64),
        }
        .classify(None)[0]
            .clone()
            .unwrap();
        assert!(!out_of_own.into_holdings);
    }

    #[test]
    fn drag_sums_only_own_landings() {
        let pathway = Pathway::Drag {
            stack: stack("STONE", 9),
            landings: vec![
                DragLanding {
                    side: ContainerSide::Own,
                    slot: 1,
                    quantity: 3,
                },
                DragLanding {
                    side: ContainerSide::Foreign,
                    slot: 0,
                    quantity: 3,
                },
                DragLanding {
                    side: ContainerSide::Own,
                    slot: 2,
                    quantity: 3,
                },
            ],
        };
        assert_eq!(pathway.classify(None)[0].as_ref().unwrap().quantity, 6);
    }

    #[test]
    fn drag_into_foreign_only_is_nothing_in_motion() {
        let pathway = Pathway::Drag {
            stack: stack("STONE", 2),
            landings: vec![DragLanding {
                side: ContainerSide::Foreign,
                slot: 0,
                quantity: 2,
            }],
        };
        assert_eq!(pathway.classify(None), [None, None]);
    }

    #[test]
    fn hand_swap_moves_zero_net_units() {
        let [main, off] = Pathway::HandSwap {
            main_hand: Some(stack("TOTEM_OF_UNDYING", 1)),
            off_hand: Some(stack("SHIELD", 1)),
        }
        .classify(None);
        assert_eq!(main.unwrap().quantity, 0);
        assert_eq!(off.unwrap().quantity, 0);
    }

    #[test]
    fn withdraw_never_moves_anything() {
        assert_eq!(Pathway::Withdraw.classify(None), [None, None]);
    }
}
