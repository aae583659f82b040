// Inventory lists consulted by the HUD
//
// The HUD reads hotbar and preview contents through the `InventorySource`
// trait; `InventoryLists` is the in-process implementation.

pub mod lists;

pub use lists::InventoryLists;
