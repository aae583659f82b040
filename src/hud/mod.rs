//! Heads-Up Display
//!
//! Script-defined overlay elements, the hotbar, crosshair, built-in status
//! bars and the selection highlight around the targeted block.
//!
//! # Architecture
//!
//! - [`store::ElementStore`] holds script elements by [`HudId`]; the scripting
//!   bridge mutates it through [`HudCommand`]s drained once per frame.
//! - [`selection::SelectionGeometry`] keeps the highlight in world coordinates (f64)
//!   and converts to render space only when drawing.
//! - [`hotbar::HotbarLayout`] is a pure function of scale, viewport and item count.
//! - [`compositor::Compositor`] draws one frame through a [`RenderSurface`] in a fixed
//!   order, gated by [`HudFlags`].
//! - [`Hud`] ties them together for the host.
//!
//! # Example Usage
//!
//! ```rust
//! use crate::hud::{Hud, CommandQueue};
//!
//! let mut hud = Hud::new(&config);
//! let queue = CommandQueue::new();
//! let scripts = queue.sender();
//!
//! // Each frame
//! hud.drain_commands(&queue);
//! hud.draw(&mut surface, &frame)?;
//! ```

pub mod bridge;
pub mod compositor;
pub mod element;
pub mod flags;
pub mod hotbar;
pub mod manager;
pub mod selection;
pub mod store;
pub mod surface;
pub mod widgets;

#[cfg(test)]
pub mod testing;

pub use bridge::{CommandQueue, HotbarParam, HudCommand};
pub use element::{HudDirection, HudElementDef, HudElementKind, HudStat, StatUpdate};
pub use flags::HudFlags;
pub use hotbar::HotbarScale;
pub use manager::Hud;
pub use selection::{Aabb, HaloMesh, HighlightMode};
pub use store::HudId;
pub use surface::{FrameContext, InventorySource, ItemRotation, RenderSurface, ResourceProvider};
