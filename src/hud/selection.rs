//! Selection highlight geometry
//!
//! Holds the volume the player is pointing at and turns it into something
//! drawable: wireframe boxes, a halo mesh, or nothing.
//!
//! Target boxes are stored relative to the target position, and the
//! target position is stored in true world space (`f64`). The camera
//! offset is subtracted only when draw geometry is produced, so the
//! stored state never accumulates rounding from the moving render origin.

use glam::{DVec3, IVec3, Vec2, Vec3};
use sdl2::pixels::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    #[default]
    Box,
    Halo,
    None,
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Zero or negative extent on any axis, or non-finite corners
    pub fn is_degenerate(&self) -> bool {
        !self.min.is_finite() || !self.max.is_finite() || self.extent().cmple(Vec3::ZERO).any()
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn expanded(&self, margin: f32) -> Aabb {
        Aabb::new(self.min - Vec3::splat(margin), self.max + Vec3::splat(margin))
    }

    pub fn translated(&self, by: Vec3) -> Aabb {
        Aabb::new(self.min + by, self.max + by)
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(b.x, b.y, b.z),
            Vec3::new(a.x, b.y, b.z),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub color: Color,
}

/// Triangle mesh enclosing the target, in target-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct HaloMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl HaloMesh {
    /// Six outward-facing quads, each mapped to the full 0..1 texture
    pub fn from_box(aabb: &Aabb) -> Self {
        let c = aabb.corners();
        // (corner indices counter-clockwise seen from outside, normal)
        let faces: [([usize; 4], Vec3); 6] = [
            ([3, 2, 6, 7], Vec3::Y),
            ([4, 5, 1, 0], Vec3::NEG_Y),
            ([1, 5, 6, 2], Vec3::X),
            ([4, 0, 3, 7], Vec3::NEG_X),
            ([5, 4, 7, 6], Vec3::Z),
            ([0, 1, 2, 3], Vec3::NEG_Z),
        ];
        let uvs = [
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (corners, normal) in faces {
            let base = vertices.len() as u16;
            for (corner, uv) in corners.iter().zip(uvs) {
                vertices.push(MeshVertex {
                    position: c[*corner],
                    normal,
                    uv,
                    color: Color::RGBA(255, 255, 255, 255),
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        HaloMesh { vertices, indices }
    }
}

/// World-space geometry ready to hand to the render surface
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionDraw {
    Nothing,
    Boxes { boxes: Vec<Aabb>, color: Color },
    Halo { mesh: HaloMesh },
}

pub struct SelectionGeometry {
    mode: HighlightMode,
    halo_margin: f32,
    boxes: Vec<Aabb>,
    halo: Option<HaloMesh>,
    world_pos: DVec3,
    camera_offset: IVec3,
    mesh_color: Color,
    face_normal: Vec3,
    regenerations: u64,
}

impl SelectionGeometry {
    /// `halo_margin` is how far the halo mesh sits outside the target
    pub fn new(mode: HighlightMode, halo_margin: f32) -> Self {
        SelectionGeometry {
            mode,
            halo_margin,
            boxes: Vec::new(),
            halo: None,
            world_pos: DVec3::ZERO,
            camera_offset: IVec3::ZERO,
            mesh_color: Color::RGBA(255, 255, 255, 255),
            face_normal: Vec3::ZERO,
            regenerations: 0,
        }
    }

    pub fn mode(&self) -> HighlightMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: HighlightMode) {
        if mode != self.mode {
            self.mode = mode;
            self.rebuild_halo();
        }
    }

    /// Points the highlight at `boxes` (relative to `world_pos`)
    ///
    /// Degenerate boxes are dropped; if none remain there is no target.
    /// The halo mesh is rebuilt only when the box set itself changes,
    /// moving the same shape to a new position reuses it.
    pub fn set_target(&mut self, world_pos: DVec3, boxes: &[Aabb]) {
        let kept: Vec<Aabb> = boxes.iter().copied().filter(|b| !b.is_degenerate()).collect();
        if kept.len() < boxes.len() {
            log::debug!(
                "selection: dropped {} degenerate box(es)",
                boxes.len() - kept.len()
            );
        }

        self.world_pos = world_pos;
        if kept != self.boxes {
            self.boxes = kept;
            self.rebuild_halo();
        }
    }

    pub fn clear_target(&mut self) {
        if !self.boxes.is_empty() {
            self.boxes.clear();
            self.rebuild_halo();
        }
    }

    /// Called every frame; the render origin moves even when the target does not
    pub fn set_camera_offset(&mut self, offset: IVec3) {
        self.camera_offset = offset;
    }

    pub fn set_mesh_color(&mut self, color: Color) {
        self.mesh_color = color;
    }

    pub fn set_face_normal(&mut self, normal: Vec3) {
        self.face_normal = normal;
    }

    pub fn has_target(&self) -> bool {
        !self.boxes.is_empty()
    }

    pub fn halo(&self) -> Option<&HaloMesh> {
        self.halo.as_ref()
    }

    pub fn camera_offset(&self) -> IVec3 {
        self.camera_offset
    }

    /// Number of halo meshes built so far
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    /// Target position relative to the current camera offset
    pub fn render_position(&self) -> Vec3 {
        (self.world_pos - self.camera_offset.as_dvec3()).as_vec3()
    }

    /// Geometry for this frame, translated into render space
    pub fn draw_list(&self, box_color: Color) -> SelectionDraw {
        if self.boxes.is_empty() {
            return SelectionDraw::Nothing;
        }

        let origin = self.render_position();
        match self.mode {
            HighlightMode::None => SelectionDraw::Nothing,
            HighlightMode::Box => {
                let m = self.mesh_color;
                let color = Color::RGBA(
                    (box_color.r as u32 * m.r as u32 / 255) as u8,
                    (box_color.g as u32 * m.g as u32 / 255) as u8,
                    (box_color.b as u32 * m.b as u32 / 255) as u8,
                    255,
                );
                SelectionDraw::Boxes {
                    boxes: self.boxes.iter().map(|b| b.translated(origin)).collect(),
                    color,
                }
            }
            HighlightMode::Halo => match &self.halo {
                Some(halo) => SelectionDraw::Halo {
                    mesh: self.colored_halo(halo, origin),
                },
                None => SelectionDraw::Nothing,
            },
        }
    }

    fn colored_halo(&self, halo: &HaloMesh, origin: Vec3) -> HaloMesh {
        let m = self.mesh_color;
        let brighten = |c: u8| (c as f32 * 1.5).min(255.0) as u8;
        let face_color = Color::RGBA(brighten(m.r), brighten(m.g), brighten(m.b), 0);

        let mut mesh = halo.clone();
        for vertex in &mut mesh.vertices {
            vertex.position += origin;
            vertex.color = if self.face_normal != Vec3::ZERO && vertex.normal == self.face_normal {
                face_color
            } else {
                m
            };
        }
        mesh
    }

    fn rebuild_halo(&mut self) {
        self.halo = None;
        if self.mode != HighlightMode::Halo || self.boxes.is_empty() {
            return;
        }

        // One enclosing box; overlapping translucent boxes would show inner faces.
        let Some(enclosing) = self.boxes.iter().copied().reduce(|a, b| a.union(&b)) else {
            return;
        };
        let halo_box = enclosing.expanded(self.halo_margin);
        if halo_box.is_degenerate() {
            log::debug!("selection: margin {} collapses the halo, skipping", self.halo_margin);
            return;
        }
        self.halo = Some(HaloMesh::from_box(&halo_box));
        self.regenerations += 1;
        log::trace!("selection: halo mesh rebuilt ({})", self.regenerations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5))
    }

    const WHITE: Color = Color::RGBA(255, 255, 255, 255);

    #[test]
    fn test_render_position_is_world_minus_offset() {
        let mut selection = SelectionGeometry::new(HighlightMode::Box, 0.05);
        selection.set_target(DVec3::new(30_000.25, 12.5, -30_000.75), &[unit_box()]);

        selection.set_camera_offset(IVec3::new(30_000, 0, -30_000));
        assert_eq!(selection.render_position(), Vec3::new(0.25, 12.5, -0.75));

        // target untouched, only the origin moved
        selection.set_camera_offset(IVec3::new(29_990, 10, -30_010));
        assert_eq!(selection.render_position(), Vec3::new(10.25, 2.5, 9.25));
        assert_eq!(selection.world_pos, DVec3::new(30_000.25, 12.5, -30_000.75));
    }

    #[test]
    fn test_box_mode_translates_every_box() {
        let mut selection = SelectionGeometry::new(HighlightMode::Box, 0.05);
        let slab = Aabb::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.0, 0.5));
        let post = Aabb::new(Vec3::new(-0.1, 0.0, -0.1), Vec3::new(0.1, 0.5, 0.1));
        selection.set_target(DVec3::new(10.0, 20.0, 30.0), &[slab, post]);
        selection.set_camera_offset(IVec3::new(10, 20, 30));

        let SelectionDraw::Boxes { boxes, color } = selection.draw_list(WHITE) else {
            panic!("expected boxes");
        };
        assert_eq!(boxes, vec![slab, post]);
        assert_eq!(color, WHITE);
        assert!(selection.halo().is_none());
    }

    #[test]
    fn test_box_color_is_modulated_by_mesh_color() {
        let mut selection = SelectionGeometry::new(HighlightMode::Box, 0.05);
        selection.set_target(DVec3::ZERO, &[unit_box()]);
        selection.set_mesh_color(Color::RGBA(255, 0, 128, 255));

        let SelectionDraw::Boxes { color, .. } =
            selection.draw_list(Color::RGBA(200, 200, 255, 255))
        else {
            panic!("expected boxes");
        };
        assert_eq!(color, Color::RGBA(200, 0, 128, 255));
    }

    #[test]
    fn test_degenerate_target_draws_nothing() {
        let mut selection = SelectionGeometry::new(HighlightMode::Halo, 0.05);
        let flat = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        selection.set_target(DVec3::new(5.0, 5.0, 5.0), &[flat]);

        assert!(!selection.has_target());
        assert!(selection.halo().is_none());
        assert_eq!(selection.regenerations(), 0);
        assert_eq!(selection.draw_list(WHITE), SelectionDraw::Nothing);
    }

    #[test]
    fn test_halo_encloses_all_boxes_with_margin() {
        let mut selection = SelectionGeometry::new(HighlightMode::Halo, 0.05);
        let a = Aabb::new(Vec3::new(-0.5, -0.5, -0.5), Vec3::new(0.5, 0.0, 0.5));
        let b = Aabb::new(Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5));
        selection.set_target(DVec3::ZERO, &[a, b]);

        let halo = selection.halo().expect("halo built");
        assert_eq!(halo.vertices.len(), 24);
        assert_eq!(halo.indices.len(), 36);

        let min = halo.vertices.iter().fold(Vec3::splat(f32::MAX), |m, v| m.min(v.position));
        let max = halo.vertices.iter().fold(Vec3::splat(f32::MIN), |m, v| m.max(v.position));
        assert!((min - Vec3::splat(-0.55)).abs().max_element() < 1e-6);
        assert!((max - Vec3::splat(0.55)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_halo_rebuilt_only_when_volume_changes() {
        let mut selection = SelectionGeometry::new(HighlightMode::Halo, 0.05);
        selection.set_target(DVec3::new(1.0, 2.0, 3.0), &[unit_box()]);
        assert_eq!(selection.regenerations(), 1);

        for frame in 0..10 {
            selection.set_camera_offset(IVec3::new(frame, 0, 0));
            selection.set_target(DVec3::new(1.0 + frame as f64, 2.0, 3.0), &[unit_box()]);
            let _ = selection.draw_list(WHITE);
        }
        assert_eq!(selection.regenerations(), 1);

        selection.set_target(DVec3::ZERO, &[unit_box().expanded(0.5)]);
        assert_eq!(selection.regenerations(), 2);
    }

    #[test]
    fn test_halo_draw_is_translated_and_face_highlighted() {
        let mut selection = SelectionGeometry::new(HighlightMode::Halo, 0.0);
        selection.set_target(DVec3::new(100.5, 0.0, 0.0), &[unit_box()]);
        selection.set_camera_offset(IVec3::new(100, 0, 0));
        selection.set_mesh_color(Color::RGBA(100, 200, 40, 255));
        selection.set_face_normal(Vec3::Y);

        let SelectionDraw::Halo { mesh } = selection.draw_list(WHITE) else {
            panic!("expected halo");
        };
        let top: Vec<&MeshVertex> = mesh.vertices.iter().filter(|v| v.normal == Vec3::Y).collect();
        assert_eq!(top.len(), 4);
        assert!(top.iter().all(|v| v.color == Color::RGBA(150, 255, 60, 0)));
        assert!(top.iter().all(|v| (v.position.y - 0.5).abs() < 1e-6));

        let xs = mesh.vertices.iter().map(|v| v.position.x);
        assert!(xs.clone().all(|x| (0.0..=1.0).contains(&x)));

        let side = mesh.vertices.iter().find(|v| v.normal == Vec3::X).unwrap();
        assert_eq!(side.color, Color::RGBA(100, 200, 40, 255));
    }

    #[test]
    fn test_mode_switch_builds_and_drops_halo() {
        let mut selection = SelectionGeometry::new(HighlightMode::Box, 0.05);
        selection.set_target(DVec3::ZERO, &[unit_box()]);
        assert!(selection.halo().is_none());

        selection.set_mode(HighlightMode::Halo);
        assert!(selection.halo().is_some());

        selection.set_mode(HighlightMode::None);
        assert!(selection.halo().is_none());
        assert_eq!(selection.draw_list(WHITE), SelectionDraw::Nothing);
    }

    #[test]
    fn test_collapsing_margin_builds_no_halo() {
        for margin in [-0.5, -0.6, f32::NAN] {
            let mut selection = SelectionGeometry::new(HighlightMode::Halo, margin);
            selection.set_target(DVec3::ZERO, &[unit_box()]);

            assert!(selection.has_target());
            assert!(selection.halo().is_none());
            assert_eq!(selection.regenerations(), 0);
            assert_eq!(selection.draw_list(WHITE), SelectionDraw::Nothing);
        }

        // a small inward margin still leaves a real volume
        let mut selection = SelectionGeometry::new(HighlightMode::Halo, -0.1);
        selection.set_target(DVec3::ZERO, &[unit_box()]);
        assert!(selection.halo().is_some());
    }

    #[test]
    fn test_clear_target() {
        let mut selection = SelectionGeometry::new(HighlightMode::Halo, 0.05);
        selection.set_target(DVec3::ZERO, &[unit_box()]);
        selection.clear_target();
        assert!(!selection.has_target());
        assert!(selection.halo().is_none());
        assert_eq!(selection.draw_list(WHITE), SelectionDraw::Nothing);
    }
}
