//! # floem-led
//!
//! An illuminated LED indicator widget for [Floem](https://github.com/lapce/floem).
//!
//! The LED is drawn procedurally: a metallic rim and inset shadow rasterized
//! once per size, a radial glow derived from the light color and intensity,
//! and a tinted glass dome added on top of the glow. Turning it on or off fades the intensity
//! with a decelerating curve.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_led::{led_light, LedConfig, LightColor};
//!
//! let on = RwSignal::new(false);
//! let led = led_light(on, LedConfig::default().with_color(LightColor::RED));
//! let handle = led.handle();
//! // Put `led` in your Floem view tree, then call `handle.toggle()`.
//! ```

mod animator;
mod background;
mod color;
mod config;
mod constants;
mod error;
mod geometry;
#[cfg(feature = "texture-glass")]
mod glass;
mod gradient;
mod led_light;
mod light;
mod math;
mod state;

pub use animator::{AnimateOptions, Frame, IntensityAnimator};
pub use background::BackgroundCache;
pub use color::LightColor;
pub use config::{GlassStyle, LedConfig};
pub use error::{LedError, Result};
pub use geometry::LedBounds;
#[cfg(feature = "texture-glass")]
pub use glass::GlassTexture;
pub use gradient::{glass_stops, glass_tint, glow_stops, GradientStop};
pub use led_light::{led_light, LedHandle, LedLight};
pub use state::{LedState, SavedState};
