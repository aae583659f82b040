//! Stat bars and item slots
//!
//! Shared by the built-in hotbar and status bars and by script elements,
//! so both look the same.

use glam::IVec2;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};

use super::element::HudDirection;
use super::hotbar::slot_rects;
use super::surface::{ItemRotation, RenderSurface};
use crate::item::ItemStack;

const WHITE: Color = Color::RGBA(255, 255, 255, 255);
const SLOT_BACKGROUND: Color = Color::RGBA(0, 0, 0, 128);
const SELECTED_FRAME: Color = Color::RGBA(255, 0, 0, 255);

/// Rect spanning two corners; None when it would be empty
pub fn rect_between(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Rect> {
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some(Rect::new(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32))
}

/// A row of icons: `count` counts half icons
///
/// A non-zero `size` replaces the texture size and, like `offset`, is
/// multiplied by `pixel_factor`.
#[allow(clippy::too_many_arguments)]
pub fn draw_statbar<S: RenderSurface + ?Sized>(
    surface: &mut S,
    pos: Point,
    direction: HudDirection,
    texture: &str,
    count: i32,
    offset: Point,
    size: IVec2,
    pixel_factor: f32,
) -> Result<(), String> {
    if texture.is_empty() || count <= 0 {
        return Ok(());
    }

    let (src_w, src_h) = surface.texture_size(texture);
    let (dst_w, dst_h, offset) = if size == IVec2::ZERO {
        (src_w as i32, src_h as i32, offset)
    } else {
        (
            (size.x as f32 * pixel_factor) as i32,
            (size.y as f32 * pixel_factor) as i32,
            Point::new(
                (offset.x() as f32 * pixel_factor) as i32,
                (offset.y() as f32 * pixel_factor) as i32,
            ),
        )
    };
    if dst_w <= 0 || dst_h <= 0 {
        return Ok(());
    }

    let step = match direction {
        HudDirection::RightLeft => Point::new(-dst_w, 0),
        HudDirection::TopBottom => Point::new(0, dst_h),
        HudDirection::BottomTop => Point::new(0, -dst_h),
        HudDirection::LeftRight => Point::new(dst_w, 0),
    };

    let mut p = pos + offset;
    for _ in 0..count / 2 {
        let dst = Rect::new(p.x(), p.y(), dst_w as u32, dst_h as u32);
        surface.draw_image(texture, dst, None, WHITE)?;
        p = p + step;
    }

    if count % 2 == 1 && dst_w >= 2 && src_w >= 2 {
        let src = Rect::new(0, 0, src_w / 2, src_h.max(1));
        let dst = Rect::new(p.x(), p.y(), (dst_w / 2) as u32, dst_h as u32);
        surface.draw_image(texture, dst, Some(src), WHITE)?;
    }

    Ok(())
}

/// Slot geometry plus the optional hotbar artwork
#[derive(Debug, Clone, Copy)]
pub struct SlotStyle<'a> {
    pub slot_size: i32,
    pub padding: i32,
    /// Drawn behind the whole bar; replaces per-slot backgrounds
    pub background: Option<&'a str>,
    /// Drawn around the selected slot instead of the red frame
    pub selected: Option<&'a str>,
}

/// Draws the slots `first..end` of `list`
///
/// `select_item` is 1-based; 0 selects nothing. Slots past the end of the
/// list are not drawn.
#[allow(clippy::too_many_arguments)]
pub fn draw_items<S: RenderSurface + ?Sized>(
    surface: &mut S,
    upper_left: Point,
    list: &[Option<ItemStack>],
    first: usize,
    end: usize,
    select_item: usize,
    direction: HudDirection,
    style: &SlotStyle,
) -> Result<(), String> {
    let end = end.min(list.len());
    if first >= end {
        return Ok(());
    }
    let count = end - first;

    if let Some(background) = style.background {
        let span = style.slot_size + style.padding * 2;
        let (mut width, mut height) = (count as i32 * span, span);
        if direction.is_vertical() {
            std::mem::swap(&mut width, &mut height);
        }
        let half_pad = style.padding / 2;
        if let Some(dst) = rect_between(-half_pad, -half_pad, width + half_pad, height + half_pad) {
            let dst = Rect::new(dst.x() + upper_left.x(), dst.y() + upper_left.y(), dst.width(), dst.height());
            surface.draw_image(background, dst, None, WHITE)?;
        }
    }

    let rects = slot_rects(upper_left, style.slot_size, style.padding, count, direction);
    for (i, rect) in (first..end).zip(rects) {
        let selected = i + 1 == select_item;
        draw_item(surface, list[i].as_ref(), rect, selected, style)?;
    }
    Ok(())
}

fn draw_item<S: RenderSurface + ?Sized>(
    surface: &mut S,
    stack: Option<&ItemStack>,
    rect: Rect,
    selected: bool,
    style: &SlotStyle,
) -> Result<(), String> {
    if selected {
        let p = style.padding;
        let (x1, y1, x2, y2) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        match style.selected {
            Some(image) => {
                if let Some(dst) = rect_between(x1 - p, y1 - p, x2 + p, y2 + p) {
                    surface.draw_image(image, dst, None, WHITE)?;
                }
            }
            None => {
                let frame = [
                    rect_between(x1 - p, y1 - p, x2 + p, y1),
                    rect_between(x1 - p, y2, x2 + p, y2 + p),
                    rect_between(x1 - p, y1, x1, y2),
                    rect_between(x2, y1, x2 + p, y2),
                ];
                for side in frame.into_iter().flatten() {
                    surface.fill_rect(side, SELECTED_FRAME)?;
                }
            }
        }
    }

    if style.background.is_none() {
        surface.fill_rect(rect, SLOT_BACKGROUND)?;
    }

    let rotation = if selected {
        ItemRotation::Selected
    } else {
        ItemRotation::None
    };
    match stack {
        Some(stack) => draw_item_stack(surface, stack, rect, rotation),
        None => Ok(()),
    }
}

/// Item image, wear bar and count for one stack
pub fn draw_item_stack<S: RenderSurface + ?Sized>(
    surface: &mut S,
    stack: &ItemStack,
    rect: Rect,
    rotation: ItemRotation,
) -> Result<(), String> {
    if stack.is_empty() {
        return Ok(());
    }

    surface.draw_item_image(stack, rect, rotation)?;

    if let Some(durability) = stack.durability() {
        draw_wear_bar(surface, rect, 1.0 - durability)?;
    }

    if stack.quantity >= 2 {
        let text = stack.quantity.to_string();
        let (w, h) = surface.text_size(&text);
        let (x2, y2) = (rect.right(), rect.bottom());
        if let Some(label) = rect_between(x2 - w as i32, y2 - h as i32, x2, y2) {
            surface.fill_rect(label, SLOT_BACKGROUND)?;
            surface.draw_text(&text, label.top_left(), WHITE, Some(label))?;
        }
    }

    Ok(())
}

/// Green at no wear through yellow to red at full wear
pub fn wear_color(wear: f32) -> Color {
    let level = ((wear * 600.0).floor() as i32).min(511);
    let level = (level + 10).min(511);
    if level <= 255 {
        Color::RGBA(level as u8, 255, 0, 255)
    } else {
        Color::RGBA(255, (511 - level) as u8, 0, 255)
    }
}

fn draw_wear_bar<S: RenderSurface + ?Sized>(
    surface: &mut S,
    rect: Rect,
    wear: f32,
) -> Result<(), String> {
    let bar_h = rect.height() as i32 / 16;
    let pad_x = rect.width() as i32 / 16;
    let pad_y = rect.height() as i32 / 16;
    let (x1, x2) = (rect.left() + pad_x, rect.right() - pad_x);
    let (y1, y2) = (rect.bottom() - pad_y - bar_h, rect.bottom() - pad_y);
    let mid = (wear * x1 as f32 + (1.0 - wear) * x2 as f32) as i32;

    if let Some(left) = rect_between(x1, y1, mid, y2) {
        surface.fill_rect(left, wear_color(wear))?;
    }
    if let Some(right) = rect_between(mid, y1, x2, y2) {
        surface.fill_rect(right, Color::RGBA(0, 0, 0, 255))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::testing::{DrawCall, RecordingSurface};

    fn style() -> SlotStyle<'static> {
        SlotStyle {
            slot_size: 48,
            padding: 4,
            background: None,
            selected: None,
        }
    }

    #[test]
    fn test_statbar_full_and_half_icons() {
        let mut surface = RecordingSurface::new(800, 600);
        draw_statbar(
            &mut surface,
            Point::new(10, 10),
            HudDirection::LeftRight,
            "heart.png",
            5,
            Point::new(0, 0),
            IVec2::ZERO,
            1.0,
        )
        .unwrap();

        let images = surface.images();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].1, Rect::new(10, 10, 16, 16));
        assert_eq!(images[1].1, Rect::new(26, 10, 16, 16));
        assert_eq!(images[2].1, Rect::new(42, 10, 8, 16));
        assert_eq!(images[2].2, Some(Rect::new(0, 0, 8, 16)));
    }

    #[test]
    fn test_statbar_size_override_scales_offset() {
        let mut surface = RecordingSurface::new(800, 600);
        draw_statbar(
            &mut surface,
            Point::new(100, 100),
            HudDirection::BottomTop,
            "bubble.png",
            4,
            Point::new(5, -5),
            IVec2::new(24, 24),
            2.0,
        )
        .unwrap();

        let images = surface.images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].1, Rect::new(110, 90, 48, 48));
        assert_eq!(images[1].1, Rect::new(110, 42, 48, 48));
    }

    #[test]
    fn test_statbar_zero_count_draws_nothing() {
        let mut surface = RecordingSurface::new(800, 600);
        draw_statbar(
            &mut surface,
            Point::new(0, 0),
            HudDirection::LeftRight,
            "heart.png",
            0,
            Point::new(0, 0),
            IVec2::ZERO,
            1.0,
        )
        .unwrap();
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_selected_slot_gets_frame() {
        let mut surface = RecordingSurface::new(800, 600);
        let list = vec![Some(ItemStack::new("dirt", 1)), None];
        draw_items(
            &mut surface,
            Point::new(0, 0),
            &list,
            0,
            2,
            1,
            HudDirection::LeftRight,
            &style(),
        )
        .unwrap();

        let frame_rects = surface
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Fill(_, color) if *color == SELECTED_FRAME))
            .count();
        assert_eq!(frame_rects, 4);
        assert_eq!(surface.items().len(), 1);
        assert_eq!(surface.items()[0].2, ItemRotation::Selected);
    }

    #[test]
    fn test_items_stop_at_list_end() {
        let mut surface = RecordingSurface::new(800, 600);
        let list = vec![Some(ItemStack::new("dirt", 1))];
        draw_items(
            &mut surface,
            Point::new(0, 0),
            &list,
            0,
            8,
            0,
            HudDirection::LeftRight,
            &style(),
        )
        .unwrap();
        // one background, one item image
        assert_eq!(surface.calls.len(), 2);
    }

    #[test]
    fn test_stack_count_and_wear() {
        let mut surface = RecordingSurface::new(800, 600);
        let stack = ItemStack::new("pick", 3).with_wear(u16::MAX / 2);
        draw_item_stack(&mut surface, &stack, Rect::new(0, 0, 48, 48), ItemRotation::None).unwrap();

        assert_eq!(surface.items().len(), 1);
        assert_eq!(surface.texts(), vec!["3".to_string()]);
        // wear bar (2 fills) + count label background
        let fills = surface.calls.iter().filter(|c| matches!(c, DrawCall::Fill(..))).count();
        assert_eq!(fills, 3);
    }

    #[test]
    fn test_wear_color_ramp() {
        assert_eq!(wear_color(0.0), Color::RGBA(10, 255, 0, 255));
        assert_eq!(wear_color(1.0), Color::RGBA(255, 0, 0, 255));
        let mid = wear_color(0.5);
        assert_eq!((mid.r, mid.b), (255, 0));
    }
}
