use serde::{Deserialize, Serialize};

/// Wear value of a fully worn item
pub const MAX_WEAR: u16 = u16::MAX;

/// An instance of an item with quantity
///
/// The HUD only reads stacks; the inventory subsystem owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item id, also the name of the item's inventory image
    pub item_id: String,

    /// How many of this item
    pub quantity: u32,

    /// Tool wear, 0 = new, `MAX_WEAR` = broken
    #[serde(default)]
    pub wear: u16,
}

impl ItemStack {
    /// Creates a new item stack
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        ItemStack {
            item_id: item_id.into(),
            quantity,
            wear: 0,
        }
    }

    pub fn with_wear(mut self, wear: u16) -> Self {
        self.wear = wear;
        self
    }

    /// Returns true if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0 || self.item_id.is_empty()
    }

    /// Remaining durability in 0.0..=1.0, or None for unworn items
    pub fn durability(&self) -> Option<f32> {
        if self.wear == 0 {
            return None;
        }
        Some(1.0 - self.wear as f32 / MAX_WEAR as f32)
    }
}
