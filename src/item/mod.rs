// Item stacks as seen by the HUD
//
// Item semantics live in the inventory subsystem; this module only
// describes what a slot holds so the HUD can draw it.

pub mod stack;

pub use stack::ItemStack;
