//! Construction-time LED configuration, loadable from TOML.

use std::path::Path;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::color::LightColor;
use crate::constants;
use crate::error::{LedError, Result};

/// How the glass dome over the light is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlassStyle {
    /// Tinted radial gradient, darkening toward the edge.
    #[cfg_attr(not(feature = "texture-glass"), default)]
    Gradient,
    /// Rotated highlight texture.
    #[cfg(feature = "texture-glass")]
    #[default]
    Texture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedConfig {
    /// Base light color.
    pub color: LightColor,
    /// Tint the glass texture with the light color.
    pub tint_glass: bool,
    /// Duration of a full off → on sweep, in milliseconds.
    pub animation_ms: u64,
    pub glass: GlassStyle,
    /// Desaturate the glow's core as it brightens.
    pub white_core: bool,
    /// Draw only a flat rim, as in design previews.
    pub preview: bool,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            color: LightColor::default(),
            tint_glass: true,
            animation_ms: constants::DEFAULT_ANIMATION_MS,
            glass: GlassStyle::default(),
            white_core: false,
            preview: false,
        }
    }
}

impl LedConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded LED config from {}", path.display());
        Ok(config)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn with_color(mut self, color: LightColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_glass(mut self, glass: GlassStyle) -> Self {
        self.glass = glass;
        self
    }

    pub fn with_animation_ms(mut self, ms: u64) -> Self {
        self.animation_ms = ms;
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }
}
