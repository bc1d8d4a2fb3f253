//! Builders for domain primitives.

use crate::domain::{GoodType, ItemStack};

/// Parse a good type, panicking on invalid input.
pub fn good(name: &str) -> GoodType {
    GoodType::parse(name).expect("valid good type")
}

/// Build a stack of `quantity` units of `name`.
pub fn stack(name: &str, quantity: u32) -> ItemStack {
    ItemStack::new(good(name), quantity)
}
