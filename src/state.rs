//! Host-independent LED model.
//!
//! `LedState` owns everything the LED view draws from: color, intensity,
//! on/off state, bounds, derived gradients, raster caches, and the intensity
//! animator. The floem view forwards layout, frames, and commands to it.

use std::time::Instant;

use floem::peniko::Gradient;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::animator::{AnimateOptions, Frame, IntensityAnimator};
use crate::background::BackgroundCache;
use crate::color::LightColor;
use crate::config::{GlassStyle, LedConfig};
use crate::error::Result;
use crate::geometry::LedBounds;
#[cfg(feature = "texture-glass")]
use crate::glass::{self, GlassCache, GlassTexture};
use crate::gradient::{self, GradientStop};
use crate::light::{GlassLayer, LightCache};
use crate::math;

/// State kept across host-driven reconstruction of the LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub checked: bool,
}

/// Layout inputs the bounds and caches were last built for.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayoutKey {
    width: f64,
    height: f64,
    scale: f64,
}

pub struct LedState {
    config: LedConfig,
    color: LightColor,
    intensity: f64,
    on: bool,

    glow_stops: [GradientStop; 3],
    glow_dirty: bool,
    glow_paint: Option<Gradient>,
    glass_stops: [GradientStop; 5],

    layout: Option<LayoutKey>,
    bounds: Option<LedBounds>,
    background: BackgroundCache,
    light: LightCache,
    #[cfg(feature = "texture-glass")]
    glass_texture: GlassTexture,
    #[cfg(feature = "texture-glass")]
    glass_cache: GlassCache,

    animator: IntensityAnimator,
}

impl LedState {
    pub fn new(config: LedConfig) -> Self {
        let color = config.color;
        let animator = IntensityAnimator::new(config.animation_duration());
        Self {
            glow_stops: gradient::glow_stops(color, 0.0, config.white_core),
            glow_dirty: true,
            glow_paint: None,
            glass_stops: gradient::glass_stops(color),
            color,
            intensity: 0.0,
            on: false,
            layout: None,
            bounds: None,
            background: BackgroundCache::default(),
            light: LightCache::default(),
            #[cfg(feature = "texture-glass")]
            glass_texture: GlassTexture::builtin(),
            #[cfg(feature = "texture-glass")]
            glass_cache: GlassCache::default(),
            animator,
            config,
        }
    }

    /// Replace the built-in glass highlight with a host-provided texture.
    #[cfg(feature = "texture-glass")]
    pub fn set_glass_texture(&mut self, texture: GlassTexture) -> Result<()> {
        self.glass_texture = texture;
        self.glow_dirty = true;
        if self.config.preview {
            return Ok(());
        }
        if let (Some(bounds), Some(layout)) = (self.bounds, self.layout) {
            self.relayout_glass(&bounds, layout.scale)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &LedConfig {
        &self.config
    }

    pub fn light_color(&self) -> LightColor {
        self.color
    }

    /// Change the base color. Glow and glass are re-derived.
    pub fn set_light_color(&mut self, color: LightColor) -> Result<()> {
        if color == self.color {
            return Ok(());
        }
        self.color = color;
        self.glass_stops = gradient::glass_stops(color);
        self.recompute_glow();
        #[cfg(feature = "texture-glass")]
        {
            if self.config.glass == GlassStyle::Texture {
                let tint = self.glass_tint();
                self.glass_cache.retint(&self.glass_texture, tint)?;
            }
        }
        Ok(())
    }

    pub fn light_intensity(&self) -> f64 {
        self.intensity
    }

    /// Set the intensity immediately, without animating. Clamped to 0.0–1.0.
    pub fn set_light_intensity(&mut self, intensity: f64) {
        let intensity = math::clamp_unit(intensity);
        if intensity == self.intensity {
            return;
        }
        self.intensity = intensity;
        self.recompute_glow();
    }

    fn recompute_glow(&mut self) {
        self.glow_stops = gradient::glow_stops(self.color, self.intensity, self.config.white_core);
        self.glow_dirty = true;
    }

    /// Current glow stops, innermost first.
    pub fn glow_stops(&self) -> &[GradientStop; 3] {
        &self.glow_stops
    }

    pub fn glass_stops(&self) -> &[GradientStop; 5] {
        &self.glass_stops
    }

    /// Whether the glow must be rebuilt before the next draw.
    pub fn is_glow_dirty(&self) -> bool {
        self.glow_dirty
    }

    /// Glow paint for the flat preview, rebuilt only when color or intensity
    /// changed since the last call.
    pub fn glow_paint(&mut self) -> Option<&Gradient> {
        let bounds = self.bounds?;
        if self.glow_dirty || self.glow_paint.is_none() {
            self.glow_paint = Some(gradient::radial(
                bounds.glow.center(),
                bounds.glow_radius(),
                &self.glow_stops,
            ));
            self.glow_dirty = false;
        }
        self.glow_paint.as_ref()
    }

    /// Re-render the combined glow and glass image when color, intensity,
    /// glass, or layout changed since the last call. Returns whether it was
    /// rebuilt.
    pub fn refresh_light(&mut self) -> Result<bool> {
        let (Some(bounds), Some(layout)) = (self.bounds, self.layout) else {
            return Ok(false);
        };
        if self.config.preview || !self.glow_dirty {
            return Ok(false);
        }
        let glass = match self.config.glass {
            GlassStyle::Gradient => Some(GlassLayer::Gradient(&self.glass_stops)),
            #[cfg(feature = "texture-glass")]
            GlassStyle::Texture => self
                .glass_cache
                .pixels()
                .map(|(pixels, side)| GlassLayer::Texture { pixels, side }),
        };
        self.light
            .rebuild(&bounds, layout.scale, &self.glow_stops, glass.as_ref())?;
        self.glow_dirty = false;
        Ok(true)
    }

    /// Glow and glass image drawn over the glow bounds.
    pub fn light_image(&self) -> Option<(&floem::peniko::Image, &[u8])> {
        self.light.image()
    }

    /// Number of times the glow and glass image has been rendered.
    pub fn light_generation(&self) -> u64 {
        self.light.generation()
    }

    #[cfg(feature = "texture-glass")]
    fn glass_tint(&self) -> Option<LightColor> {
        self.config
            .tint_glass
            .then(|| gradient::glass_tint(self.color))
    }

    #[cfg(feature = "texture-glass")]
    fn relayout_glass(&mut self, bounds: &LedBounds, scale: f64) -> Result<()> {
        if self.config.glass != GlassStyle::Texture {
            return Ok(());
        }
        let side = (bounds.inner.width() * scale).round().max(1.0) as u32;
        let tint = self.glass_tint();
        self.glass_cache
            .relayout(&self.glass_texture, side, glass::random_angle(), tint)
    }

    #[cfg(feature = "texture-glass")]
    pub fn glass_generation(&self) -> u64 {
        self.glass_cache.generation()
    }

    /// Lay the LED out in a `width` × `height` area drawn at `scale`.
    ///
    /// Does nothing and returns `false` when the inputs did not change or
    /// describe an empty area. Otherwise rebuilds bounds, paints, and caches.
    pub fn resize(&mut self, width: f64, height: f64, scale: f64) -> Result<bool> {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let key = LayoutKey {
            width,
            height,
            scale,
        };
        if self.layout == Some(key) {
            return Ok(false);
        }
        let Some(bounds) = LedBounds::from_size(width, height) else {
            return Ok(false);
        };
        debug!("LED laid out at {width}x{height} @{scale}x");

        self.layout = Some(key);
        self.bounds = Some(bounds);
        self.glow_dirty = true;

        if self.config.preview {
            return Ok(true);
        }

        let px_w = (width * scale).round().max(1.0) as u32;
        let px_h = (height * scale).round().max(1.0) as u32;
        if let Some(raster_bounds) = LedBounds::from_size(px_w as f64, px_h as f64) {
            self.background.rebuild(&raster_bounds, px_w, px_h)?;
        }
        #[cfg(feature = "texture-glass")]
        self.relayout_glass(&bounds, scale)?;
        Ok(true)
    }

    pub fn bounds(&self) -> Option<&LedBounds> {
        self.bounds.as_ref()
    }

    pub fn background(&self) -> &BackgroundCache {
        &self.background
    }

    /// Whether drawing should fall back to the flat preview rendering.
    pub fn is_preview(&self) -> bool {
        self.config.preview || self.background.image().is_none()
    }

    /// Apply an animator frame. The animator has already moved on when this
    /// fails, so callers still need `is_animating` to keep frames coming.
    fn apply(&mut self, frame: Frame) -> Result<bool> {
        if let Some(intensity) = frame.intensity {
            self.set_light_intensity(intensity);
        }
        if let Some(color) = frame.end_color {
            self.set_light_color(color)?;
        }
        Ok(frame.animating)
    }

    /// Animate the intensity toward `target`. Returns whether frames are needed.
    pub fn animate_light_intensity(
        &mut self,
        target: f64,
        options: AnimateOptions,
        now: Instant,
    ) -> Result<bool> {
        let frame = self
            .animator
            .animate(self.intensity, target, options, now);
        self.apply(frame)
    }

    /// Advance the running animation to `now`. Returns whether more frames
    /// are needed.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        let frame = self.animator.tick(now);
        self.apply(frame)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Target of the running animation, if any.
    pub fn animation_target(&self) -> Option<f64> {
        self.animator.target()
    }

    /// Turn the light on or off, animating toward full or zero intensity.
    pub fn set_checked(&mut self, checked: bool, now: Instant) -> Result<bool> {
        self.on = checked;
        let target = if checked { 1.0 } else { 0.0 };
        self.animate_light_intensity(target, AnimateOptions::default(), now)
    }

    /// The on/off state. The intensity may still be on its way there.
    pub fn is_checked(&self) -> bool {
        self.on
    }

    pub fn toggle(&mut self, now: Instant) -> Result<bool> {
        self.set_checked(!self.on, now)
    }

    pub fn save_state(&self) -> SavedState {
        SavedState { checked: self.on }
    }

    /// Restore a saved on/off state, animating toward it.
    pub fn restore_state(&mut self, saved: SavedState, now: Instant) -> Result<bool> {
        self.set_checked(saved.checked, now)
    }

    /// Save the on/off state, then stop any animation and free the caches.
    pub fn detach(&mut self, now: Instant) -> SavedState {
        let saved = self.save_state();
        if let Some(reached) = self.animator.cancel(now) {
            self.set_light_intensity(reached);
        }
        self.background.release();
        self.light.release();
        #[cfg(feature = "texture-glass")]
        self.glass_cache.release();
        self.layout = None;
        saved
    }
}
