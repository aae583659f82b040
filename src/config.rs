//! HUD configuration
//!
//! Stored as JSON in the user's config directory. Every field has a
//! default, so a partial file (or no file) is fine; a malformed file is
//! an error so typos don't silently reset the HUD.

use std::fs;
use std::path::{Path, PathBuf};

use sdl2::pixels::Color;
use serde::{Deserialize, Serialize};

use crate::error::HudError;
use crate::hud::{HighlightMode, HotbarScale};

const CONFIG_DIR: &str = "voxel-hud";
const CONFIG_FILE: &str = "hud.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub hud_scaling: f32,
    pub display_density: f32,
    /// Fraction of the window width the hotbar may span before wrapping
    pub hotbar_max_width: f32,
    pub crosshair_color: [u8; 3],
    pub crosshair_alpha: u8,
    /// Texture drawn instead of the line crosshair, if the host knows it
    pub crosshair_image: Option<String>,
    pub selectionbox_color: [u8; 3],
    /// Wireframe line width, clamped to 1..=5
    pub selectionbox_width: u32,
    pub node_highlighting: HighlightMode,
    /// Distance the halo mesh sits outside the target, in world units
    pub halo_margin: f32,
    pub halo_texture: String,
}

impl Default for HudConfig {
    fn default() -> Self {
        HudConfig {
            hud_scaling: 1.0,
            display_density: 1.0,
            hotbar_max_width: 1.0,
            crosshair_color: [255, 255, 255],
            crosshair_alpha: 255,
            crosshair_image: None,
            selectionbox_color: [0, 0, 0],
            selectionbox_width: 2,
            node_highlighting: HighlightMode::Box,
            halo_margin: 0.05,
            halo_texture: "halo.png".to_string(),
        }
    }
}

impl HudConfig {
    /// Default location: `<config dir>/voxel-hud/hud.json`, or `./hud.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR).join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, HudError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, HudError> {
        let config: HudConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Loads `path`, falling back to defaults only when the file is missing
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, HudError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no HUD config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        log::info!("loaded HUD config from {}", path.display());
        Ok(config)
    }

    fn sanitized(mut self) -> Self {
        self.selectionbox_width = self.selectionbox_width.clamp(1, 5);
        if !(self.hud_scaling.is_finite() && self.hud_scaling > 0.0) {
            log::warn!("hud_scaling {} out of range, using 1.0", self.hud_scaling);
            self.hud_scaling = 1.0;
        }
        if !(self.display_density.is_finite() && self.display_density > 0.0) {
            log::warn!("display_density {} out of range, using 1.0", self.display_density);
            self.display_density = 1.0;
        }
        if !(self.halo_margin.is_finite() && self.halo_margin >= 0.0) {
            log::warn!("halo_margin {} out of range, using 0.05", self.halo_margin);
            self.halo_margin = 0.05;
        }
        self
    }

    pub fn hotbar_scale(&self) -> HotbarScale {
        HotbarScale {
            hud_scaling: self.hud_scaling,
            display_density: self.display_density,
            max_width: self.hotbar_max_width,
        }
    }

    pub fn crosshair_argb(&self) -> Color {
        let [r, g, b] = self.crosshair_color;
        Color::RGBA(r, g, b, self.crosshair_alpha)
    }

    pub fn selectionbox_argb(&self) -> Color {
        let [r, g, b] = self.selectionbox_color;
        Color::RGBA(r, g, b, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = HudConfig::from_json(r#"{"hud_scaling": 1.5, "node_highlighting": "halo"}"#)
            .unwrap();
        assert_eq!(config.hud_scaling, 1.5);
        assert_eq!(config.node_highlighting, HighlightMode::Halo);
        assert_eq!(config.selectionbox_width, 2);
        assert_eq!(config.halo_texture, "halo.png");
    }

    #[test]
    fn test_values_are_sanitized() {
        let config =
            HudConfig::from_json(r#"{"selectionbox_width": 40, "hud_scaling": -2.0}"#).unwrap();
        assert_eq!(config.selectionbox_width, 5);
        assert_eq!(config.hud_scaling, 1.0);
    }

    #[test]
    fn test_negative_halo_margin_falls_back() {
        let config =
            HudConfig::from_json(r#"{"halo_margin": -0.6, "node_highlighting": "halo"}"#).unwrap();
        assert_eq!(config.halo_margin, 0.05);

        let config = HudConfig::from_json(r#"{"halo_margin": 0.0}"#).unwrap();
        assert_eq!(config.halo_margin, 0.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(matches!(
            HudConfig::from_json(r#"{"node_highlighting": "sparkles"}"#),
            Err(HudError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("voxel-hud-test-does-not-exist.json");
        let config = HudConfig::load_or_default(&path).unwrap();
        assert_eq!(config, HudConfig::default());
    }

    #[test]
    fn test_colors() {
        let config = HudConfig {
            crosshair_color: [10, 20, 30],
            crosshair_alpha: 128,
            ..Default::default()
        };
        assert_eq!(config.crosshair_argb(), Color::RGBA(10, 20, 30, 128));
        assert_eq!(config.selectionbox_argb(), Color::RGBA(0, 0, 0, 255));
    }
}
