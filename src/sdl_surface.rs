//! SDL2 render surface
//!
//! Draws the HUD straight onto the window canvas. 3D primitives (selection
//! boxes, the halo mesh) are projected with the frame's view-projection
//! matrix and drawn as lines, since the canvas has no depth buffer.
//!
//! The halo is therefore a wireframe of its triangles at alpha 160, not a
//! translucent textured shell: `draw_mesh` ignores the texture name and
//! the vertex uvs, keeping only the vertex colors.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use sdl2::image::LoadTexture;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::{Window, WindowContext};

use crate::hud::{Aabb, HaloMesh, ItemRotation, RenderSurface, ResourceProvider};
use crate::item::ItemStack;
use crate::text::BitmapFont;

const PLACEHOLDER_SIZE: (u32, u32) = (16, 16);
const PLACEHOLDER_COLOR: Color = Color::RGBA(255, 0, 255, 255);

/// Box edges as pairs of [`Aabb::corners`] indices
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Textures by name, loaded from an asset directory
pub struct TextureCache<'t> {
    creator: &'t TextureCreator<WindowContext>,
    asset_dir: PathBuf,
    textures: HashMap<String, Texture<'t>>,
}

impl<'t> TextureCache<'t> {
    pub fn new(creator: &'t TextureCreator<WindowContext>, asset_dir: impl Into<PathBuf>) -> Self {
        TextureCache {
            creator,
            asset_dir: asset_dir.into(),
            textures: HashMap::new(),
        }
    }

    /// Loads `<asset_dir>/<name>`
    pub fn load(&mut self, name: &str) -> Result<(), String> {
        let path = self.asset_dir.join(name);
        let texture = self
            .creator
            .load_texture(&path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
        self.textures.insert(name.to_string(), texture);
        Ok(())
    }

    /// Loads `name` if the file exists, otherwise makes a flat-colored stand-in
    pub fn load_or_generate(
        &mut self,
        name: &str,
        size: (u32, u32),
        color: Color,
    ) -> Result<(), String> {
        if self.asset_dir.join(name).exists() {
            return self.load(name);
        }
        log::debug!("no {} in {}, generating", name, self.asset_dir.display());
        self.insert_solid(name, size, color)
    }

    pub fn insert_solid(&mut self, name: &str, size: (u32, u32), color: Color) -> Result<(), String> {
        let mut surface = Surface::new(size.0, size.1, PixelFormatEnum::RGBA8888)?;
        surface.fill_rect(None, color)?;
        let mut texture = self
            .creator
            .create_texture_from_surface(&surface)
            .map_err(|e| e.to_string())?;
        texture.set_blend_mode(BlendMode::Blend);
        self.textures.insert(name.to_string(), texture);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    fn size(&self, name: &str) -> Option<(u32, u32)> {
        self.textures.get(name).map(|t| {
            let query = t.query();
            (query.width, query.height)
        })
    }
}

/// One frame's view of the window as a HUD render surface
pub struct SdlSurface<'c, 't> {
    canvas: &'c mut Canvas<Window>,
    textures: &'c mut TextureCache<'t>,
    font: BitmapFont,
    view_projection: Mat4,
    /// Rotation of the selected hotbar item, in degrees
    spin: f64,
}

impl<'c, 't> SdlSurface<'c, 't> {
    pub fn new(
        canvas: &'c mut Canvas<Window>,
        textures: &'c mut TextureCache<'t>,
        font: BitmapFont,
        view_projection: Mat4,
        spin: f64,
    ) -> Self {
        canvas.set_blend_mode(BlendMode::Blend);
        SdlSurface {
            canvas,
            textures,
            font,
            view_projection,
            spin,
        }
    }

    fn project(&self, p: Vec3) -> Option<Point> {
        let clip = self.view_projection * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let (w, h) = self.viewport_size();
        Some(Point::new(
            (w as f32 * (0.5 * ndc.x + 0.5)) as i32,
            (h as f32 * (0.5 - 0.5 * ndc.y)) as i32,
        ))
    }

    /// Projects both ends; edges crossing the camera plane are skipped
    fn line_3d(&mut self, a: Vec3, b: Vec3, color: Color, thickness: u32) -> Result<(), String> {
        let (Some(a), Some(b)) = (self.project(a), self.project(b)) else {
            return Ok(());
        };
        self.canvas.set_draw_color(color);
        for i in 0..thickness.max(1) as i32 {
            let shift = Point::new(i - thickness as i32 / 2, 0);
            self.canvas.draw_line(a + shift, b + shift)?;
        }
        Ok(())
    }
}

impl ResourceProvider for SdlSurface<'_, '_> {
    fn texture_size(&self, name: &str) -> (u32, u32) {
        self.textures.size(name).unwrap_or(PLACEHOLDER_SIZE)
    }

    fn is_known_texture(&self, name: &str) -> bool {
        self.textures.contains(name)
    }

    fn text_height(&self) -> u32 {
        self.font.line_height()
    }

    fn text_size(&self, text: &str) -> (u32, u32) {
        self.font.text_size(text)
    }
}

impl RenderSurface for SdlSurface<'_, '_> {
    fn viewport_size(&self) -> (u32, u32) {
        let viewport = self.canvas.viewport();
        (viewport.width(), viewport.height())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(color);
        self.canvas.fill_rect(rect)
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(color);
        self.canvas.draw_line(from, to)
    }

    fn draw_image(
        &mut self,
        texture: &str,
        dst: Rect,
        src: Option<Rect>,
        tint: Color,
    ) -> Result<(), String> {
        let Some(tex) = self.textures.textures.get_mut(texture) else {
            return self.fill_rect(dst, PLACEHOLDER_COLOR);
        };
        tex.set_color_mod(tint.r, tint.g, tint.b);
        tex.set_alpha_mod(tint.a);
        self.canvas.copy(tex, src, dst)
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        color: Color,
        clip: Option<Rect>,
    ) -> Result<(), String> {
        self.font.draw(self.canvas, text, at, color, clip)
    }

    fn draw_item_image(
        &mut self,
        item: &ItemStack,
        dst: Rect,
        rotation: ItemRotation,
    ) -> Result<(), String> {
        let angle = match rotation {
            ItemRotation::Selected => self.spin,
            _ => 0.0,
        };
        let Some(tex) = self.textures.textures.get_mut(&item.item_id) else {
            // Unknown items still get a stable color of their own
            let hash = item
                .item_id
                .bytes()
                .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32));
            let color = Color::RGBA((hash >> 16) as u8, (hash >> 8) as u8, hash as u8, 255);
            let inset = Rect::new(
                dst.x() + 6,
                dst.y() + 6,
                dst.width().saturating_sub(12),
                dst.height().saturating_sub(12),
            );
            return self.fill_rect(inset, color);
        };
        tex.set_color_mod(255, 255, 255);
        tex.set_alpha_mod(255);
        self.canvas
            .copy_ex(tex, None, Some(dst), angle, None, false, false)
            .map_err(|e| e.to_string())
    }

    fn draw_box_3d(&mut self, aabb: &Aabb, color: Color, thickness: u32) -> Result<(), String> {
        let corners = aabb.corners();
        for (a, b) in BOX_EDGES {
            self.line_3d(corners[a], corners[b], color, thickness)?;
        }
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: &HaloMesh, _texture: &str) -> Result<(), String> {
        for tri in mesh.indices.chunks_exact(3) {
            let v: Vec<_> = tri.iter().map(|&i| mesh.vertices[i as usize]).collect();
            let c = v[0].color;
            let color = Color::RGBA(c.r, c.g, c.b, 160);
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                self.line_3d(v[a].position, v[b].position, color, 1)?;
            }
        }
        Ok(())
    }
}
