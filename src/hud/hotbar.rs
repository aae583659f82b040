//! Hotbar geometry
//!
//! [`HotbarLayout::compute`] is a pure function of the scale settings,
//! the viewport and the item count. [`slot_rects`] places item slots for
//! both the hotbar and script inventory previews.

use sdl2::rect::{Point, Rect};

use super::element::HudDirection;

/// Unscaled item image size in pixels
pub const HOTBAR_IMAGE_SIZE: i32 = 48;
pub const HOTBAR_ITEMCOUNT_DEFAULT: i32 = 8;
pub const HOTBAR_ITEMCOUNT_MAX: i32 = 9;

/// Scale inputs shared by every hotbar computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotbarScale {
    pub hud_scaling: f32,
    pub display_density: f32,
    /// Fraction of the viewport width the hotbar may span before wrapping
    pub max_width: f32,
}

impl Default for HotbarScale {
    fn default() -> Self {
        HotbarScale {
            hud_scaling: 1.0,
            display_density: 1.0,
            max_width: 1.0,
        }
    }
}

impl HotbarScale {
    /// Factor applied to script-supplied pixel sizes and offsets
    pub fn pixel_factor(&self) -> f32 {
        self.hud_scaling * self.display_density
    }
}

/// Script-adjustable hotbar parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotbarParams {
    pub item_count: i32,
    /// Texture stretched behind the slots
    pub image: Option<String>,
    /// Texture framing the selected slot
    pub selected_image: Option<String>,
}

impl Default for HotbarParams {
    fn default() -> Self {
        HotbarParams {
            item_count: HOTBAR_ITEMCOUNT_DEFAULT,
            image: None,
            selected_image: None,
        }
    }
}

impl HotbarParams {
    pub fn set_item_count(&mut self, count: i32) {
        self.item_count = count.clamp(1, HOTBAR_ITEMCOUNT_MAX);
    }
}

/// One run of slots drawn left to right from `origin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotbarRow {
    pub origin: Point,
    /// First inventory index in this row
    pub first: usize,
    /// One past the last inventory index
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotbarLayout {
    pub viewport: (u32, u32),
    pub display_center: Point,
    pub slot_size: i32,
    pub padding: i32,
    pub item_count: usize,
    pub rows: Vec<HotbarRow>,
}

impl HotbarLayout {
    pub fn compute(scale: &HotbarScale, viewport: (u32, u32), item_count: i32) -> Self {
        let item_count = item_count.clamp(1, HOTBAR_ITEMCOUNT_MAX);
        let (slot_size, padding) = slot_metrics(scale);
        let full = slot_size + padding * 2;
        let (screen_w, screen_h) = (viewport.0 as i32, viewport.1 as i32);
        let display_center = Point::new(screen_w / 2, screen_h / 2);

        let width = item_count * full;
        let mut origin = Point::new(
            display_center.x() - width / 2,
            screen_h - (slot_size + padding * 3),
        );

        let rows = if screen_w > 0 && width as f32 / screen_w as f32 > scale.max_width {
            // Too wide: first half on an upper row, the rest beneath it.
            origin = origin.offset(width / 4, 0);
            let lower = origin;
            let upper = origin.offset(0, -(slot_size + padding));
            let half = (item_count / 2) as usize;
            vec![
                HotbarRow {
                    origin: upper,
                    first: 0,
                    end: half,
                },
                HotbarRow {
                    origin: lower,
                    first: half,
                    end: item_count as usize,
                },
            ]
        } else {
            vec![HotbarRow {
                origin,
                first: 0,
                end: item_count as usize,
            }]
        };

        HotbarLayout {
            viewport,
            display_center,
            slot_size,
            padding,
            item_count: item_count as usize,
            rows,
        }
    }

    /// Item rects for every slot, indexed by inventory position
    pub fn slots(&self) -> Vec<Rect> {
        self.rows
            .iter()
            .flat_map(|row| {
                slot_rects(
                    row.origin,
                    self.slot_size,
                    self.padding,
                    row.end - row.first,
                    HudDirection::LeftRight,
                )
            })
            .collect()
    }
}

/// Item image size and padding for the given scale
pub fn slot_metrics(scale: &HotbarScale) -> (i32, i32) {
    let base = (HOTBAR_IMAGE_SIZE as f32 * scale.display_density + 0.5).floor() as i32;
    let slot_size = (base as f32 * scale.hud_scaling) as i32;
    (slot_size, slot_size / 12)
}

/// Rects of `count` consecutive item images growing from `origin`
///
/// `origin` is the upper-left corner of the bar; for right-to-left and
/// bottom-to-top growth it is the corner the bar grows away from.
pub fn slot_rects(
    origin: Point,
    slot_size: i32,
    padding: i32,
    count: usize,
    direction: HudDirection,
) -> Vec<Rect> {
    let full = slot_size + padding * 2;
    (0..count as i32)
        .map(|i| {
            let step = padding + i * full;
            let pos = match direction {
                HudDirection::RightLeft => Point::new(-step, padding),
                HudDirection::TopBottom => Point::new(padding, step),
                HudDirection::BottomTop => Point::new(padding, -step),
                HudDirection::LeftRight => Point::new(step, padding),
            };
            let corner = origin + pos;
            Rect::new(corner.x(), corner.y(), slot_size as u32, slot_size as u32)
        })
        .collect()
}
