//! Boundary traits the HUD draws through
//!
//! The HUD never owns textures, fonts, inventories or the camera. A host
//! supplies them through these traits and a [`FrameContext`] each frame.

use glam::{DVec3, IVec3, Mat4};
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};

use super::flags::HudFlags;
use super::selection::{Aabb, HaloMesh};
use crate::item::ItemStack;

/// How an item image is animated inside its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRotation {
    Selected,
    #[allow(dead_code)] // Set by inventory menus, not the HUD
    Hovered,
    #[allow(dead_code)] // Set by inventory menus, not the HUD
    Dragged,
    None,
}

/// Texture and font lookups
///
/// Lookups never fail: a missing texture reports the size of the host's
/// placeholder image, and drawing it draws the placeholder.
pub trait ResourceProvider {
    fn texture_size(&self, name: &str) -> (u32, u32);

    /// True only for textures that really exist, so optional artwork can
    /// fall back to procedural drawing
    fn is_known_texture(&self, name: &str) -> bool;

    fn text_height(&self) -> u32;

    fn text_size(&self, text: &str) -> (u32, u32);
}

/// Draw primitives in screen space (2D) and render space (3D)
pub trait RenderSurface: ResourceProvider {
    fn viewport_size(&self) -> (u32, u32);

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), String>;

    /// Draws `src` of the texture (whole texture when `None`) into `dst`
    fn draw_image(
        &mut self,
        texture: &str,
        dst: Rect,
        src: Option<Rect>,
        tint: Color,
    ) -> Result<(), String>;

    /// Draws text with its top-left corner at `at`, clipped to `clip` if given
    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        color: Color,
        clip: Option<Rect>,
    ) -> Result<(), String>;

    /// Item icon for `item`, turned according to `rotation`
    fn draw_item_image(
        &mut self,
        item: &ItemStack,
        dst: Rect,
        rotation: ItemRotation,
    ) -> Result<(), String>;

    /// Wireframe box in render space (already camera-offset corrected)
    fn draw_box_3d(&mut self, aabb: &Aabb, color: Color, thickness: u32) -> Result<(), String>;

    /// Translucent mesh in render space textured with `texture`
    fn draw_mesh(&mut self, mesh: &HaloMesh, texture: &str) -> Result<(), String>;
}

/// Read-only view of the player's inventory lists
pub trait InventorySource {
    fn list(&self, name: &str) -> Option<&[Option<ItemStack>]>;
}

/// Per-frame session state supplied by the host
pub struct FrameContext<'a> {
    pub flags: HudFlags,
    pub camera_offset: IVec3,
    /// Projection * view, both relative to `camera_offset`
    pub view_projection: Mat4,
    pub player_position: DVec3,
    /// Selected hotbar slot, 0-based
    pub selected_item: usize,
    pub health: i32,
    pub breath: i32,
    pub inventory: &'a dyn InventorySource,
}
