//! Outbound adapters (driven side).

pub mod memory;
pub mod scheduler;

pub use memory::{GroundStack, MemoryHost, Position};
pub use scheduler::TickScheduler;
