//! Host-agnostic domain logic.

mod id;
mod job;
mod pathway;
mod stack;
mod verdict;

pub use id::{ActorId, GoodType};
pub use job::{DeferredJob, Ticks};
pub use pathway::{ContainerSide, DragLanding, LocationClass, Pathway, PendingMutation};
pub use stack::{count_in, ItemStack, Slot, SlotCategory};
pub use verdict::{Interception, RejectReason, RemediationMode, Verdict};
