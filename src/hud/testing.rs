//! Render surface double that records draw calls

use std::collections::HashMap;

use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};

use super::selection::{Aabb, HaloMesh};
use super::surface::{ItemRotation, RenderSurface, ResourceProvider};
use crate::item::ItemStack;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fill(Rect, Color),
    Line(Point, Point, Color),
    Image(String, Rect, Option<Rect>, Color),
    Text(String, Point, Color),
    Item(String, Rect, ItemRotation),
    Box3d(Aabb, Color, u32),
    Mesh(HaloMesh, String),
}

pub struct RecordingSurface {
    pub viewport: (u32, u32),
    /// Textures reported as known, with their sizes
    pub textures: HashMap<String, (u32, u32)>,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingSurface {
            viewport: (width, height),
            textures: HashMap::new(),
            calls: Vec::new(),
        }
    }

    pub fn with_texture(mut self, name: &str, size: (u32, u32)) -> Self {
        self.textures.insert(name.to_string(), size);
        self
    }

    pub fn images(&self) -> Vec<(String, Rect, Option<Rect>)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Image(name, dst, src, _) => Some((name.clone(), *dst, *src)),
                _ => None,
            })
            .collect()
    }

    pub fn items(&self) -> Vec<(String, Rect, ItemRotation)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Item(id, dst, rotation) => Some((id.clone(), *dst, *rotation)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(text, ..) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn text_calls(&self) -> Vec<(String, Point, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(text, at, color) => Some((text.clone(), *at, *color)),
                _ => None,
            })
            .collect()
    }
}

impl ResourceProvider for RecordingSurface {
    fn texture_size(&self, name: &str) -> (u32, u32) {
        self.textures.get(name).copied().unwrap_or((16, 16))
    }

    fn is_known_texture(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    fn text_height(&self) -> u32 {
        8
    }

    fn text_size(&self, text: &str) -> (u32, u32) {
        (6 * text.chars().count() as u32, 8)
    }
}

impl RenderSurface for RecordingSurface {
    fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        self.calls.push(DrawCall::Fill(rect, color));
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), String> {
        self.calls.push(DrawCall::Line(from, to, color));
        Ok(())
    }

    fn draw_image(
        &mut self,
        texture: &str,
        dst: Rect,
        src: Option<Rect>,
        tint: Color,
    ) -> Result<(), String> {
        self.calls.push(DrawCall::Image(texture.to_string(), dst, src, tint));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        color: Color,
        _clip: Option<Rect>,
    ) -> Result<(), String> {
        self.calls.push(DrawCall::Text(text.to_string(), at, color));
        Ok(())
    }

    fn draw_item_image(
        &mut self,
        item: &ItemStack,
        dst: Rect,
        rotation: ItemRotation,
    ) -> Result<(), String> {
        self.calls.push(DrawCall::Item(item.item_id.clone(), dst, rotation));
        Ok(())
    }

    fn draw_box_3d(&mut self, aabb: &Aabb, color: Color, thickness: u32) -> Result<(), String> {
        self.calls.push(DrawCall::Box3d(*aabb, color, thickness));
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &HaloMesh, texture: &str) -> Result<(), String> {
        self.calls.push(DrawCall::Mesh(mesh.clone(), texture.to_string()));
        Ok(())
    }
}
