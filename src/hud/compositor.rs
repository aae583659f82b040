//! Per-frame HUD drawing
//!
//! Draw order is fixed: hotbar, crosshair, status bars, script elements in
//! ascending id order, then the selection highlight. Each step checks its
//! own visibility flag before doing any work.

use glam::{IVec2, Vec2};
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};

use super::element::{
    HudDirection, HudElement, ImageElement, InventoryElement, StatBarElement, TextElement,
    WaypointElement,
};
use super::flags::HudFlags;
use super::hotbar::{HotbarLayout, HotbarParams, HotbarScale};
use super::selection::{SelectionDraw, SelectionGeometry};
use super::store::{ElementStore, HudId};
use super::surface::{FrameContext, RenderSurface};
use super::widgets::{draw_items, draw_statbar, SlotStyle};
use crate::config::HudConfig;

const HOTBAR_LIST: &str = "main";
const CROSSHAIR_HALF_LENGTH: i32 = 10;
/// Built-in status bars hide the breath bar while breath is full
const BREATH_MAX: i32 = 11;
const STATUS_ICON_SIZE: IVec2 = IVec2::new(24, 24);
const HEALTH_OFFSET: (i32, i32) = (-10 * 24 - 25, -(48 + 24 + 10));
const BREATH_OFFSET: (i32, i32) = (25, -(48 + 24 + 10));

/// Everything the compositor reads besides the frame context
pub struct HudScene<'a> {
    pub layout: &'a HotbarLayout,
    pub hotbar: &'a HotbarParams,
    pub elements: &'a ElementStore,
    pub selection: &'a SelectionGeometry,
}

pub struct Compositor {
    scale: HotbarScale,
    crosshair_color: Color,
    crosshair_image: Option<String>,
    selectionbox_color: Color,
    selectionbox_width: u32,
    halo_texture: String,
}

impl Compositor {
    pub fn new(config: &HudConfig) -> Self {
        Compositor {
            scale: config.hotbar_scale(),
            crosshair_color: config.crosshair_argb(),
            crosshair_image: config.crosshair_image.clone(),
            selectionbox_color: config.selectionbox_argb(),
            selectionbox_width: config.selectionbox_width,
            halo_texture: config.halo_texture.clone(),
        }
    }

    pub fn scale(&self) -> &HotbarScale {
        &self.scale
    }

    pub fn draw_frame<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &FrameContext,
        scene: &HudScene,
    ) -> Result<(), String> {
        let style = slot_style(surface, scene.layout, scene.hotbar);

        if frame.flags.contains(HudFlags::HOTBAR) {
            self.draw_hotbar(surface, frame, scene.layout, &style)?;
        }
        if frame.flags.contains(HudFlags::CROSSHAIR) {
            self.draw_crosshair(surface, scene.layout.display_center)?;
        }
        self.draw_status_bars(surface, frame, scene.layout.viewport)?;

        for (id, element) in scene.elements.iter() {
            self.draw_element(surface, frame, scene.layout, &style, id, element)?;
        }

        self.draw_selection(surface, scene.selection)
    }

    fn draw_hotbar<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &FrameContext,
        layout: &HotbarLayout,
        style: &SlotStyle,
    ) -> Result<(), String> {
        let Some(list) = frame.inventory.list(HOTBAR_LIST) else {
            return Ok(());
        };
        for row in &layout.rows {
            draw_items(
                surface,
                row.origin,
                list,
                row.first,
                row.end,
                frame.selected_item + 1,
                HudDirection::LeftRight,
                style,
            )?;
        }
        Ok(())
    }

    fn draw_crosshair<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        center: Point,
    ) -> Result<(), String> {
        if let Some(image) = self
            .crosshair_image
            .as_deref()
            .filter(|name| surface.is_known_texture(name))
        {
            let (w, h) = surface.texture_size(image);
            let dst = Rect::new(center.x() - w as i32 / 2, center.y() - h as i32 / 2, w, h);
            return surface.draw_image(image, dst, None, self.crosshair_color);
        }

        let (dx, dy) = (
            Point::new(CROSSHAIR_HALF_LENGTH, 0),
            Point::new(0, CROSSHAIR_HALF_LENGTH),
        );
        surface.draw_line(center - dx, center + dx, self.crosshair_color)?;
        surface.draw_line(center - dy, center + dy, self.crosshair_color)
    }

    fn draw_status_bars<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &FrameContext,
        viewport: (u32, u32),
    ) -> Result<(), String> {
        let anchor = anchor_point(Vec2::new(0.5, 1.0), viewport);
        let factor = self.scale.pixel_factor();

        if frame.flags.contains(HudFlags::HEALTHBAR) {
            draw_statbar(
                surface,
                anchor,
                HudDirection::LeftRight,
                "heart.png",
                frame.health,
                Point::from(HEALTH_OFFSET),
                STATUS_ICON_SIZE,
                factor,
            )?;
        }
        if frame.flags.contains(HudFlags::BREATHBAR) && frame.breath < BREATH_MAX {
            draw_statbar(
                surface,
                anchor,
                HudDirection::LeftRight,
                "bubble.png",
                frame.breath,
                Point::from(BREATH_OFFSET),
                STATUS_ICON_SIZE,
                factor,
            )?;
        }
        Ok(())
    }

    fn draw_element<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &FrameContext,
        layout: &HotbarLayout,
        style: &SlotStyle,
        id: HudId,
        element: &HudElement,
    ) -> Result<(), String> {
        match element {
            HudElement::Image(e) => self.draw_image_element(surface, layout.viewport, e),
            HudElement::Text(e) => self.draw_text_element(surface, layout.viewport, e),
            HudElement::StatBar(e) => self.draw_statbar_element(surface, layout.viewport, e),
            HudElement::Inventory(e) => {
                self.draw_inventory_element(surface, frame, layout.viewport, style, id, e)
            }
            HudElement::Waypoint(e) => self.draw_waypoint(surface, frame, layout.viewport, id, e),
        }
    }

    fn draw_image_element<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: (u32, u32),
        e: &ImageElement,
    ) -> Result<(), String> {
        let pos = anchor_point(e.position, viewport);
        let (tex_w, tex_h) = surface.texture_size(&e.name);

        // Negative scale is a percentage of the viewport on that axis
        let axis = |scale: f32, tex: u32, screen: u32| -> i32 {
            if scale < 0.0 {
                (screen as f32 * (scale * -0.01)) as i32
            } else {
                (tex as f32 * scale) as i32
            }
        };
        let dst_w = axis(e.scale.x, tex_w, viewport.0);
        let dst_h = axis(e.scale.y, tex_h, viewport.1);
        if dst_w <= 0 || dst_h <= 0 {
            return Ok(());
        }

        let align = Point::new(
            ((e.alignment.x - 1.0) * dst_w as f32 / 2.0) as i32,
            ((e.alignment.y - 1.0) * dst_h as f32 / 2.0) as i32,
        );
        let corner = pos + align + to_point(e.offset);
        let dst = Rect::new(corner.x(), corner.y(), dst_w as u32, dst_h as u32);
        surface.draw_image(&e.name, dst, None, Color::RGBA(255, 255, 255, 255))
    }

    fn draw_text_element<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: (u32, u32),
        e: &TextElement,
    ) -> Result<(), String> {
        if e.text.is_empty() {
            return Ok(());
        }
        let pos = anchor_point(e.position, viewport);
        let (text_w, text_h) = surface.text_size(&e.text);
        let align = Point::new(
            ((e.alignment.x - 1.0) * (text_w / 2) as f32) as i32,
            ((e.alignment.y - 1.0) * (text_h / 2) as f32) as i32,
        );
        let at = pos + align + to_point(e.offset);

        let clip_w = e.scale.x as i32;
        let clip_h = (surface.text_height() as f32 * e.scale.y) as i32;
        let clip = (clip_w > 0 && clip_h > 0)
            .then(|| Rect::new(at.x(), at.y(), clip_w as u32, clip_h as u32));

        surface.draw_text(&e.text, at, unpack_rgb(e.number), clip)
    }

    fn draw_statbar_element<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: (u32, u32),
        e: &StatBarElement,
    ) -> Result<(), String> {
        draw_statbar(
            surface,
            anchor_point(e.position, viewport),
            e.direction,
            &e.text,
            e.number.min(i32::MAX as u32) as i32,
            to_point(e.offset),
            e.size,
            self.scale.pixel_factor(),
        )
    }

    fn draw_inventory_element<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &FrameContext,
        viewport: (u32, u32),
        style: &SlotStyle,
        id: HudId,
        e: &InventoryElement,
    ) -> Result<(), String> {
        let Some(list) = frame.inventory.list(&e.text) else {
            log::trace!("hud: element {} previews unknown list '{}'", id.0, e.text);
            return Ok(());
        };
        let factor = self.scale.pixel_factor();
        let offset = Point::new(
            (e.offset.x * factor) as i32,
            (e.offset.y * factor) as i32,
        );
        draw_items(
            surface,
            anchor_point(e.position, viewport) + offset,
            list,
            0,
            e.number as usize,
            e.item as usize,
            e.direction,
            style,
        )
    }

    fn draw_waypoint<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &FrameContext,
        viewport: (u32, u32),
        id: HudId,
        e: &WaypointElement,
    ) -> Result<(), String> {
        let render_pos = (e.world_position - frame.camera_offset.as_dvec3()).as_vec3();
        let Some(screen) = project_to_screen(frame, render_pos, viewport) else {
            log::trace!("hud: waypoint {} not in view", id.0);
            return Ok(());
        };

        let distance = (10.0 * frame.player_position.distance(e.world_position)).floor() / 10.0;
        let color = unpack_rgb(e.number);
        surface.draw_text(&e.name, screen, color, None)?;
        let second_line = screen.offset(0, surface.text_height() as i32);
        surface.draw_text(&format!("{}{}", distance, e.text), second_line, color, None)
    }

    fn draw_selection<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        selection: &SelectionGeometry,
    ) -> Result<(), String> {
        match selection.draw_list(self.selectionbox_color) {
            SelectionDraw::Nothing => Ok(()),
            SelectionDraw::Boxes { boxes, color } => {
                for aabb in &boxes {
                    surface.draw_box_3d(aabb, color, self.selectionbox_width)?;
                }
                Ok(())
            }
            SelectionDraw::Halo { mesh } => surface.draw_mesh(&mesh, &self.halo_texture),
        }
    }
}

fn slot_style<'a, S: RenderSurface + ?Sized>(
    surface: &S,
    layout: &HotbarLayout,
    hotbar: &'a HotbarParams,
) -> SlotStyle<'a> {
    SlotStyle {
        slot_size: layout.slot_size,
        padding: layout.padding,
        background: hotbar
            .image
            .as_deref()
            .filter(|name| surface.is_known_texture(name)),
        selected: hotbar
            .selected_image
            .as_deref()
            .filter(|name| surface.is_known_texture(name)),
    }
}

/// Normalized anchor to pixels, rounded to nearest
pub fn anchor_point(position: Vec2, viewport: (u32, u32)) -> Point {
    Point::new(
        (position.x * viewport.0 as f32 + 0.5).floor() as i32,
        (position.y * viewport.1 as f32 + 0.5).floor() as i32,
    )
}

/// Projects a render-space point; None if behind the camera or off screen
///
/// Only clip w and the NDC x and y range are checked. Depth is not, so a
/// point beyond the far plane still projects and far waypoints stay visible.
pub fn project_to_screen(
    frame: &FrameContext,
    render_pos: glam::Vec3,
    viewport: (u32, u32),
) -> Option<Point> {
    let clip = frame.view_projection * render_pos.extend(1.0);
    if !(clip.w > 0.0) {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if !ndc.is_finite() || ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
        return None;
    }
    Some(Point::new(
        (viewport.0 as f32 * (0.5 * ndc.x + 0.5)) as i32,
        (viewport.1 as f32 * (0.5 - 0.5 * ndc.y)) as i32,
    ))
}

fn to_point(v: Vec2) -> Point {
    Point::new(v.x as i32, v.y as i32)
}

fn unpack_rgb(packed: u32) -> Color {
    Color::RGBA(
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
        255,
    )
}
