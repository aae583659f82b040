//! The HUD as the host sees it
//!
//! [`Hud`] owns the element store, the selection highlight, the hotbar
//! parameters and the compositor. Bridge commands are applied here and
//! the cached hotbar layout is refreshed when its inputs change.

use serde_json::Value;

use super::bridge::{CommandQueue, HotbarParam, HudCommand, StatRef};
use super::compositor::{Compositor, HudScene};
use super::element::{HudElementDef, StatUpdate};
use super::hotbar::{HotbarLayout, HotbarParams};
use super::selection::SelectionGeometry;
use super::store::{ElementStore, HudId};
use super::surface::{FrameContext, RenderSurface};
use crate::config::HudConfig;
use crate::error::HudError;

pub struct Hud {
    elements: ElementStore,
    selection: SelectionGeometry,
    hotbar: HotbarParams,
    layout: HotbarLayout,
    compositor: Compositor,
}

impl Hud {
    pub fn new(config: &HudConfig) -> Self {
        let hotbar = HotbarParams::default();
        let compositor = Compositor::new(config);
        let layout = HotbarLayout::compute(compositor.scale(), (0, 0), hotbar.item_count);
        Hud {
            elements: ElementStore::new(),
            selection: SelectionGeometry::new(config.node_highlighting, config.halo_margin),
            hotbar,
            layout,
            compositor,
        }
    }

    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    pub fn selection(&self) -> &SelectionGeometry {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionGeometry {
        &mut self.selection
    }

    pub fn hotbar(&self) -> &HotbarParams {
        &self.hotbar
    }

    /// Layout used by the last drawn frame
    pub fn layout(&self) -> &HotbarLayout {
        &self.layout
    }

    pub fn add(&mut self, def: HudElementDef) -> HudId {
        self.elements.add_def(def)
    }

    pub fn remove(&mut self, id: HudId) -> bool {
        self.elements.remove(id).is_some()
    }

    /// Decodes an untyped value for `stat` and writes it
    ///
    /// A shape mismatch is an error; an absent id or a field the element
    /// does not carry is not, and yields `Ok(false)`.
    pub fn change(&mut self, id: HudId, stat: StatRef, value: &Value) -> Result<bool, HudError> {
        let update = StatUpdate::decode(stat.resolve()?, value)?;
        Ok(self.elements.set_stat(id, update))
    }

    pub fn set_hotbar_param(&mut self, param: HotbarParam) {
        match param {
            HotbarParam::ItemCount(count) => self.hotbar.set_item_count(count),
            HotbarParam::Image(name) => self.hotbar.image = Some(name),
            HotbarParam::SelectedImage(name) => self.hotbar.selected_image = Some(name),
        }
    }

    /// Applies one command; returns the new id for `add`
    pub fn apply(&mut self, command: HudCommand) -> Result<Option<HudId>, HudError> {
        match command {
            HudCommand::Add { element } => return Ok(Some(self.add(element))),
            HudCommand::Remove { id } => {
                self.remove(id);
            }
            HudCommand::Change { id, stat, value } => {
                self.change(id, stat, &value)?;
            }
            HudCommand::Hotbar { param } => self.set_hotbar_param(param),
        }
        Ok(None)
    }

    /// Applies everything queued since the last frame
    ///
    /// Rejected commands are logged and skipped so one bad script call
    /// doesn't hold up the rest. Returns the ids assigned by `add`
    /// commands, in order.
    pub fn drain_commands(&mut self, queue: &CommandQueue) -> Vec<HudId> {
        let mut added = Vec::new();
        for command in queue.drain() {
            match self.apply(command) {
                Ok(Some(id)) => added.push(id),
                Ok(None) => {}
                Err(e) => log::warn!("hud: rejected command: {}", e),
            }
        }
        added
    }

    pub fn draw<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        frame: &FrameContext,
    ) -> Result<(), String> {
        self.selection.set_camera_offset(frame.camera_offset);

        let viewport = surface.viewport_size();
        if self.layout.viewport != viewport
            || self.layout.item_count != self.hotbar.item_count as usize
        {
            self.layout =
                HotbarLayout::compute(self.compositor.scale(), viewport, self.hotbar.item_count);
            log::debug!(
                "hud: hotbar laid out for {}x{} in {} row(s)",
                viewport.0,
                viewport.1,
                self.layout.rows.len()
            );
        }

        let scene = HudScene {
            layout: &self.layout,
            hotbar: &self.hotbar,
            elements: &self.elements,
            selection: &self.selection,
        };
        self.compositor.draw_frame(surface, frame, &scene)
    }
}
