//! Glow and glass combined into one cached image.
//!
//! The glass adds light on top of the glow instead of covering it. Floem's
//! renderer has no additive blend, so the two layers are summed here with
//! [`Rgba::add`] and the result is drawn over the background as one image.

use std::sync::Arc;

use floem::kurbo::Point;
use floem::peniko::{self, Blob};
use log::trace;

use crate::background::alloc_raster;
use crate::error::Result;
use crate::geometry::LedBounds;
use crate::gradient::{self, GradientStop};
use crate::math::{self, Rgba};

/// The glass layer summed onto the glow.
pub(crate) enum GlassLayer<'a> {
    /// Radial stops centered on the outer bounds, clipped to the inner oval.
    Gradient(&'a [GradientStop]),
    /// Pre-rendered square RGBA8 buffer covering the inner bounds.
    #[cfg(feature = "texture-glass")]
    Texture { pixels: &'a [u8], side: u32 },
}

impl GlassLayer<'_> {
    /// Glass color at logical point `p`, `dist` away from the center.
    /// `k` is the number of raster pixels per logical unit.
    fn sample(&self, bounds: &LedBounds, p: Point, dist: f64, k: f64) -> Rgba {
        match self {
            GlassLayer::Gradient(stops) => {
                let inner_r = bounds.inner.width() / 2.0;
                let cov = math::disc_coverage(dist * k, inner_r * k);
                if cov <= 0.0 {
                    return Rgba::TRANSPARENT;
                }
                let c = gradient::sample_stops(stops, dist / bounds.outer.height());
                c.with_alpha(c.a * cov)
            }
            #[cfg(feature = "texture-glass")]
            GlassLayer::Texture { pixels, side } => {
                let inner = bounds.inner;
                let u = (p.x - inner.x0) / inner.width();
                let v = (p.y - inner.y0) / inner.height();
                if *side == 0 || !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    return Rgba::TRANSPARENT;
                }
                let side = *side as usize;
                let x = ((u * side as f64) as usize).min(side - 1);
                let y = ((v * side as f64) as usize).min(side - 1);
                let o = (y * side + x) * 4;
                match pixels.get(o..o + 4) {
                    Some(t) => Rgba::from_argb8(t[3], t[0], t[1], t[2]),
                    None => Rgba::TRANSPARENT,
                }
            }
        }
    }
}

/// Rasterize the glow oval plus `glass` over the glow bounds at `scale`.
///
/// Returns the buffer and its side in pixels.
pub(crate) fn rasterize_light(
    bounds: &LedBounds,
    scale: f64,
    glow: &[GradientStop],
    glass: Option<&GlassLayer<'_>>,
) -> Result<(Vec<u8>, u32)> {
    let side = (bounds.glow.width() * scale).round().max(1.0) as u32;
    let mut buf = alloc_raster(side, side)?;

    let k = side as f64 / bounds.glow.width();
    let center = bounds.center();
    let glow_r = bounds.glow_radius();
    let width = side as usize;

    for py in 0..width {
        let y = bounds.glow.y0 + (py as f64 + 0.5) / k;
        for px in 0..width {
            let x = bounds.glow.x0 + (px as f64 + 0.5) / k;
            let p = Point::new(x, y);
            let dist = p.distance(center);
            if dist > glow_r + 1.0 / k {
                continue;
            }

            let mut out = Rgba::TRANSPARENT;
            let cov = math::disc_coverage(dist * k, glow_r * k);
            if cov > 0.0 {
                let c = gradient::sample_stops(glow, dist / glow_r);
                out = c.with_alpha(c.a * cov);
            }
            if let Some(glass) = glass {
                let lens = glass.sample(bounds, p, dist, k);
                if lens.a > 0.0 {
                    out = lens.add(out);
                }
            }

            let o = (py * width + px) * 4;
            out.write_rgba8(&mut buf[o..o + 4]);
        }
    }

    Ok((buf, side))
}

/// Cached glow-plus-glass image, drawn over the glow bounds.
#[derive(Default)]
pub(crate) struct LightCache {
    img: Option<peniko::Image>,
    hash: Vec<u8>,
    generation: u64,
}

impl LightCache {
    pub(crate) fn rebuild(
        &mut self,
        bounds: &LedBounds,
        scale: f64,
        glow: &[GradientStop],
        glass: Option<&GlassLayer<'_>>,
    ) -> Result<()> {
        self.release();

        let (pixels, side) = rasterize_light(bounds, scale, glow, glass)?;
        let blob = Blob::new(Arc::new(pixels));
        self.hash = blob.id().to_le_bytes().to_vec();
        self.img = Some(peniko::Image::new(blob, peniko::Format::Rgba8, side, side));
        self.generation += 1;
        trace!("light rendered at {side}x{side} (generation {})", self.generation);
        Ok(())
    }

    pub fn release(&mut self) {
        self.img = None;
        self.hash.clear();
    }

    pub fn image(&self) -> Option<(&peniko::Image, &[u8])> {
        self.img.as_ref().map(|img| (img, self.hash.as_slice()))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
