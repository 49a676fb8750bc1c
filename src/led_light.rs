//! The LED view.
//!
//! Paints the cached background, then the glow with the glass dome summed
//! onto it. On/off follows a `RwSignal<bool>`; everything else goes through
//! a [`LedHandle`].

use std::time::Instant;

use floem::action::exec_after;
use floem::kurbo::{Circle, Rect};
use floem::peniko::{Color, Gradient};
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, PaintCx, UpdateCx},
    View, ViewId,
};
use floem_renderer::Renderer;
use log::{error, trace};

use crate::animator::AnimateOptions;
use crate::color::LightColor;
use crate::config::LedConfig;
use crate::constants;
use crate::error::Result;
use crate::geometry::LedBounds;
#[cfg(feature = "texture-glass")]
use crate::glass::GlassTexture;
use crate::state::{LedState, SavedState};

enum LedUpdate {
    Checked(bool),
    Color(LightColor),
    Intensity(f64),
    Animate(f64, AnimateOptions),
    #[cfg(feature = "texture-glass")]
    GlassTexture(GlassTexture),
    Frame,
}

/// Imperative control over a [`LedLight`] that has been moved into the view tree.
#[derive(Clone, Copy)]
pub struct LedHandle {
    id: ViewId,
    checked: RwSignal<bool>,
}

impl LedHandle {
    pub fn set_light_color(&self, color: LightColor) {
        self.id.update_state(LedUpdate::Color(color));
    }

    /// Set the intensity (0.0–1.0) without animating.
    pub fn set_light_intensity(&self, intensity: f64) {
        self.id.update_state(LedUpdate::Intensity(intensity));
    }

    /// Animate the intensity toward `target` (0.0–1.0).
    pub fn animate_light_intensity(&self, target: f64, options: AnimateOptions) {
        self.id.update_state(LedUpdate::Animate(target, options));
    }

    /// Replace the glass highlight texture.
    #[cfg(feature = "texture-glass")]
    pub fn set_glass_texture(&self, texture: GlassTexture) {
        self.id.update_state(LedUpdate::GlassTexture(texture));
    }

    pub fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get_untracked()
    }

    pub fn toggle(&self) {
        self.checked.update(|c| *c = !*c);
    }

    /// The on/off state to hand to [`led_light`] when the LED is recreated.
    pub fn save_state(&self) -> SavedState {
        SavedState {
            checked: self.is_checked(),
        }
    }
}

/// Log a failed operation and report whether frames are still needed.
///
/// A failure can come after the animator moved on, so the animator decides.
fn settle(result: Result<bool>, state: &LedState) -> bool {
    result.unwrap_or_else(|e| {
        error!("LED update failed: {e}");
        state.is_animating()
    })
}

pub struct LedLight {
    id: ViewId,
    checked: RwSignal<bool>,
    size: floem::taffy::prelude::Size<f32>,
    state: LedState,
    frame_pending: bool,
}

/// Creates an LED indicator.
///
/// The light animates on and off as `checked` changes. An LED created with
/// `checked` already `true`, as when restoring a [`SavedState`], fades in
/// rather than appearing fully lit.
pub fn led_light(checked: RwSignal<bool>, config: LedConfig) -> LedLight {
    let id = ViewId::new();

    create_effect(move |_| {
        let on = checked.get();
        id.update_state(LedUpdate::Checked(on));
    });

    LedLight {
        id,
        checked,
        size: Default::default(),
        state: LedState::new(config),
        frame_pending: false,
    }
    .style(|s| s.width(48.0).height(48.0))
}

impl LedLight {
    pub fn handle(&self) -> LedHandle {
        LedHandle {
            id: self.id,
            checked: self.checked,
        }
    }

    fn schedule_frame(&mut self) {
        if self.frame_pending {
            return;
        }
        self.frame_pending = true;
        let id = self.id;
        exec_after(constants::FRAME_INTERVAL, move |_| {
            id.update_state(LedUpdate::Frame);
        });
    }

    /// Flat rim plus the glow, without any cached raster.
    fn paint_preview(&mut self, cx: &mut PaintCx, bounds: &LedBounds) {
        let (start, end) = bounds.rim_gradient_line();
        let [_, lr, lg, lb] = constants::RIM_LIGHT;
        let [_, dr, dg, db] = constants::RIM_DARK;
        let rim = Gradient::new_linear(start, end)
            .with_stops([Color::rgb8(lr, lg, lb), Color::rgb8(dr, dg, db)]);
        let circle = Circle::new(bounds.center(), bounds.outer.width() / 2.0);
        cx.fill(&circle, &rim, 0.0);

        let glow = Circle::new(bounds.glow.center(), bounds.glow_radius());
        if let Some(paint) = self.state.glow_paint() {
            cx.fill(&glow, paint, 0.0);
        }
    }
}

impl View for LedLight {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        let Ok(update) = state.downcast::<LedUpdate>() else {
            return;
        };
        let now = Instant::now();
        let result = match *update {
            LedUpdate::Checked(on) => {
                if on == self.state.is_checked() && !self.state.is_animating() {
                    return;
                }
                self.state.set_checked(on, now)
            }
            LedUpdate::Color(color) => self
                .state
                .set_light_color(color)
                .map(|_| self.state.is_animating()),
            LedUpdate::Intensity(intensity) => {
                self.state.set_light_intensity(intensity);
                Ok(self.state.is_animating())
            }
            LedUpdate::Animate(target, options) => {
                self.state.animate_light_intensity(target, options, now)
            }
            #[cfg(feature = "texture-glass")]
            LedUpdate::GlassTexture(texture) => self
                .state
                .set_glass_texture(texture)
                .map(|_| self.state.is_animating()),
            LedUpdate::Frame => {
                self.frame_pending = false;
                let result = self.state.tick(now);
                trace!("LED frame at intensity {:.3}", self.state.light_intensity());
                result
            }
        };
        if settle(result, &self.state) {
            self.schedule_frame();
        }
        self.id.request_paint();
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }

        // Bounds and caches only rebuild when the size or scale changed.
        if let Err(e) = self.state.resize(w, h, cx.scale()) {
            error!("LED background unavailable: {e}");
        }
        let Some(bounds) = self.state.bounds().copied() else {
            return;
        };

        if self.state.is_preview() {
            self.paint_preview(cx, &bounds);
            return;
        }

        if let Some((img, hash)) = self.state.background().image() {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash,
                },
                Rect::new(0.0, 0.0, w, h),
            );
        }

        // Glow and glass are re-summed only after color, intensity, or layout changed.
        if let Err(e) = self.state.refresh_light() {
            error!("LED glow unavailable: {e}");
        }
        if let Some((img, hash)) = self.state.light_image() {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash,
                },
                bounds.glow,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedError;

    #[test]
    fn failed_update_keeps_frames_while_animating() {
        let t0 = Instant::now();
        let mut state = LedState::new(LedConfig::default());
        let failure = || Err(LedError::RasterAlloc { width: 1, height: 1 });
        assert!(!settle(failure(), &state));

        state.set_checked(true, t0).unwrap();
        assert!(settle(failure(), &state));
        assert!(settle(Ok(true), &state));
        assert!(!settle(Ok(false), &state));
    }
}
