//! Textured glass dome overlay.
//!
//! A highlight texture is rotated by a random angle at every layout, so
//! neighbouring LEDs do not catch the light identically, then multiplied by
//! the dim glass tint and cached as a buffer covering the inner bounds. The
//! buffer is summed onto the glow by the light rasterizer.

use std::f64::consts::TAU;
use std::sync::Arc;

use log::debug;
use rand::Rng;

use crate::background::alloc_raster;
use crate::color::LightColor;
use crate::constants;
use crate::error::{LedError, Result};
use crate::math::{self, Rgba};

/// Source texture for the glass dome, straight-alpha RGBA8.
#[derive(Clone)]
pub struct GlassTexture {
    pixels: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

impl GlassTexture {
    /// Wrap host-provided pixels. Fails when the buffer does not hold
    /// exactly `width * height` RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));
        if width == 0 || height == 0 || expected != Some(pixels.len()) {
            return Err(LedError::InvalidTexture {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            pixels: Arc::new(pixels),
            width,
            height,
        })
    }

    /// Built-in specular highlight: a soft spot near the top-left edge
    /// plus a faint reflection opposite it.
    pub fn builtin() -> Self {
        let size = constants::GLASS_TEXTURE_SIZE;
        let c = size as f64 / 2.0;
        let side = size as usize;
        let mut pixels = vec![0u8; side * side * 4];

        for py in 0..size {
            for px in 0..size {
                let x = (px as f64 + 0.5 - c) / c;
                let y = (py as f64 + 0.5 - c) / c;
                let r = (x * x + y * y).sqrt();
                if r > 1.0 {
                    continue;
                }

                // Highlight centered up-left, falling off smoothly.
                let hx = x + 0.35;
                let hy = y + 0.45;
                let spec = (1.0 - (hx * hx + hy * hy).sqrt() / 0.55).max(0.0).powi(2) * 0.85;

                // Thin reflection hugging the lower-right edge.
                let facing = ((x + y) / std::f64::consts::SQRT_2).max(0.0);
                let edge = (1.0 - ((r - 0.88).abs() / 0.08)).max(0.0) * facing * 0.35;

                let white = Rgba {
                    r: 1.0,
                    g: 1.0,
                    b: 1.0,
                    a: 0.0,
                };
                let out = white.with_alpha(spec).add(white.with_alpha(edge));
                let o = (py as usize * side + px as usize) * 4;
                out.write_rgba8(&mut pixels[o..o + 4]);
            }
        }

        Self {
            pixels: Arc::new(pixels),
            width: size,
            height: size,
        }
    }

    fn sample(&self, u: f64, v: f64) -> Rgba {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return Rgba::TRANSPARENT;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        let x = ((u * w as f64) as usize).min(w - 1);
        let y = ((v * h as f64) as usize).min(h - 1);
        let o = (y * w + x) * 4;
        let p = &self.pixels[o..o + 4];
        Rgba::from_argb8(p[3], p[0], p[1], p[2])
    }
}

impl Default for GlassTexture {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Pick the rotation for a freshly laid out glass dome.
pub fn random_angle() -> f64 {
    rand::rng().random_range(0.0..TAU)
}

/// Render `texture` rotated by `angle` into a `side` × `side` buffer,
/// multiplied by `tint` when given.
pub(crate) fn rasterize_glass(
    texture: &GlassTexture,
    side: u32,
    angle: f64,
    tint: Option<LightColor>,
) -> Result<Vec<u8>> {
    let mut buf = alloc_raster(side, side)?;
    let c = side as f64 / 2.0;
    let (sin, cos) = (-angle).sin_cos();

    for py in 0..side {
        for px in 0..side {
            let dx = px as f64 + 0.5 - c;
            let dy = py as f64 + 0.5 - c;
            let sx = dx * cos - dy * sin;
            let sy = dx * sin + dy * cos;
            let mut texel = texture.sample((sx / c + 1.0) / 2.0, (sy / c + 1.0) / 2.0);
            if texel.a == 0.0 {
                continue;
            }
            if let Some(t) = tint {
                texel.r *= t.r();
                texel.g *= t.g();
                texel.b *= t.b();
            }
            texel.a *= math::disc_coverage((dx * dx + dy * dy).sqrt(), c);
            let o = (py as usize * side as usize + px as usize) * 4;
            texel.write_rgba8(&mut buf[o..o + 4]);
        }
    }

    Ok(buf)
}

/// Cached rotated glass buffer, at most one generation at a time.
#[derive(Default)]
pub struct GlassCache {
    pixels: Option<Vec<u8>>,
    side: u32,
    angle: f64,
    generation: u64,
}

impl GlassCache {
    /// Re-render for a new layout, rotated by `angle`.
    pub fn relayout(
        &mut self,
        texture: &GlassTexture,
        side: u32,
        angle: f64,
        tint: Option<LightColor>,
    ) -> Result<()> {
        self.side = side;
        self.angle = angle;
        self.render(texture, tint)
    }

    /// Re-render with a new tint, keeping the current size and rotation.
    pub fn retint(&mut self, texture: &GlassTexture, tint: Option<LightColor>) -> Result<()> {
        if self.side == 0 {
            return Ok(());
        }
        self.render(texture, tint)
    }

    fn render(&mut self, texture: &GlassTexture, tint: Option<LightColor>) -> Result<()> {
        self.pixels = None;
        self.pixels = Some(rasterize_glass(texture, self.side, self.angle, tint)?);
        self.generation += 1;
        debug!(
            "glass rendered at {0}x{0}, angle {1:.2} rad (generation {2})",
            self.side, self.angle, self.generation
        );
        Ok(())
    }

    pub fn release(&mut self) {
        self.pixels = None;
    }

    /// Rendered RGBA8 pixels and their side length.
    pub fn pixels(&self) -> Option<(&[u8], u32)> {
        self.pixels.as_deref().map(|p| (p, self.side))
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_texture_has_a_visible_highlight() {
        let tex = GlassTexture::builtin();
        let highlight = tex.sample(0.33, 0.28);
        assert!(highlight.a > 0.5);
        assert_eq!(tex.sample(0.0, 0.0).a, 0.0);
    }

    #[test]
    fn rejects_mismatched_pixel_buffers() {
        assert!(GlassTexture::from_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(GlassTexture::from_rgba8(0, 2, Vec::new()).is_err());
        assert!(GlassTexture::from_rgba8(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn tint_multiplies_the_highlight() {
        let tex = GlassTexture::from_rgba8(1, 1, vec![255, 255, 255, 255]).unwrap();
        let buf = rasterize_glass(&tex, 8, 0.0, Some(LightColor::RED)).unwrap();
        let o = (4 * 8 + 4) * 4;
        assert_eq!(&buf[o..o + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn half_turn_mirrors_the_texture() {
        // Opaque left half, transparent right half.
        let tex = GlassTexture::from_rgba8(2, 1, vec![255, 255, 255, 255, 0, 0, 0, 0]).unwrap();
        let upright = rasterize_glass(&tex, 16, 0.0, None).unwrap();
        let flipped = rasterize_glass(&tex, 16, std::f64::consts::PI, None).unwrap();
        let alpha = |buf: &[u8], x: usize| buf[(8 * 16 + x) * 4 + 3];
        assert_eq!(alpha(&upright, 4), 255);
        assert_eq!(alpha(&upright, 12), 0);
        assert_eq!(alpha(&flipped, 4), 0);
        assert_eq!(alpha(&flipped, 12), 255);
    }

    #[test]
    fn retint_keeps_angle_and_bumps_generation() {
        let tex = GlassTexture::builtin();
        let mut cache = GlassCache::default();
        cache.retint(&tex, None).unwrap();
        assert_eq!(cache.generation(), 0);
        cache.relayout(&tex, 24, 1.25, None).unwrap();
        cache.retint(&tex, Some(LightColor::BLUE)).unwrap();
        assert_eq!(cache.generation(), 2);
        assert_eq!(cache.angle(), 1.25);
        assert_eq!(cache.pixels().map(|(p, side)| (p.len(), side)), Some((24 * 24 * 4, 24)));
    }

    #[test]
    fn random_angle_is_a_full_turn_at_most() {
        for _ in 0..32 {
            let a = random_angle();
            assert!((0.0..TAU).contains(&a));
        }
    }
}
