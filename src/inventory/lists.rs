use std::collections::HashMap;

use crate::hud::InventorySource;
use crate::item::ItemStack;

/// Named inventory lists ("main", "craft", ...) holding optional stacks
///
/// In-memory stand-in for the inventory subsystem, used by the demo and
/// tests. The HUD only ever sees it through [`InventorySource`].
#[derive(Debug, Clone, Default)]
pub struct InventoryLists {
    lists: HashMap<String, Vec<Option<ItemStack>>>,
}

impl InventoryLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or replaces) a list with `capacity` empty slots
    pub fn add_list(&mut self, name: impl Into<String>, capacity: usize) {
        self.lists.insert(name.into(), vec![None; capacity]);
    }

    /// Puts a stack into a slot; returns false if the list or slot doesn't exist
    pub fn set_slot(&mut self, list: &str, index: usize, stack: Option<ItemStack>) -> bool {
        match self.lists.get_mut(list).and_then(|slots| slots.get_mut(index)) {
            Some(slot) => {
                *slot = stack.filter(|s| !s.is_empty());
                true
            }
            None => false,
        }
    }

    pub fn slot(&self, list: &str, index: usize) -> Option<&ItemStack> {
        self.lists.get(list)?.get(index)?.as_ref()
    }
}

impl InventorySource for InventoryLists {
    fn list(&self, name: &str) -> Option<&[Option<ItemStack>]> {
        self.lists.get(name).map(Vec::as_slice)
    }
}
