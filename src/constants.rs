//! Proportions, colors, and timing constants for the LED.

use std::time::Duration;

/// Inset of the rim from the centered square, as a fraction of its side.
pub const RIM_INSET: f64 = 0.15;

/// Gap between the rim and the glass, as a fraction of the side.
pub const GLASS_OFFSET: f64 = 0.02;

/// Rim outline stroke width, as a fraction of the side.
pub const RIM_STROKE: f64 = 0.005;

/// Rim gradient runs from this fraction of the side at the top...
pub const RIM_GRADIENT_START: f64 = 0.40;
/// ...to this fraction at the bottom.
pub const RIM_GRADIENT_END: f64 = 0.60;

/// Rim gradient colors, top-left light to bottom-right dark (ARGB).
pub const RIM_LIGHT: [u8; 4] = [0xff, 0x80, 0x85, 0x80];
pub const RIM_DARK: [u8; 4] = [0xff, 0x30, 0x31, 0x30];

/// Translucent outline drawn over the rim and the glass edge (ARGB).
pub const RIM_OUTLINE: [u8; 4] = [0x4f, 0x33, 0x36, 0x33];

/// Inset shadow ramp inside the glass edge (ARGB) and its stop offsets.
pub const SHADOW_CLEAR: [u8; 4] = [0x00, 0x00, 0x05, 0x00];
pub const SHADOW_DARK: [u8; 4] = [0x50, 0x00, 0x05, 0x00];
pub const SHADOW_START: f64 = 0.96;
pub const SHADOW_END: f64 = 0.99;

/// Glow stop offsets, innermost first.
pub const GLOW_POSITIONS: [f32; 3] = [0.25, 0.70, 0.90];
/// Glow stop alphas at full intensity, innermost first.
pub const GLOW_ALPHAS: [f64; 3] = [255.0, 155.0, 0.0];
/// Saturation removed from the core at full intensity when white-core is on.
pub const WHITE_CORE_DESATURATION: f64 = 0.4;

/// Value channel of the dim glass tint.
pub const GLASS_TINT_VALUE: f64 = 0.27;
/// Glass gradient stop offsets and alphas, center first.
pub const GLASS_POSITIONS: [f32; 5] = [0.0, 0.80, 0.90, 0.94, 1.0];
pub const GLASS_ALPHAS: [u8; 5] = [90, 150, 180, 200, 225];

/// Full 0→1 sweep duration when none is configured.
pub const DEFAULT_ANIMATION_MS: u64 = 250;

/// Interval between animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Resolution of the built-in glass highlight texture.
#[cfg(feature = "texture-glass")]
pub const GLASS_TEXTURE_SIZE: u32 = 128;
