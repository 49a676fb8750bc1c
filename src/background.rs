//! Static LED background: metallic rim, outlines, and inset shadow.
//!
//! The background only depends on the bounds, so it is rasterized to an
//! RGBA8 buffer once per size and drawn as an image on every paint.

use std::sync::Arc;

use floem::kurbo::Point;
use floem::peniko::{self, Blob};
use log::debug;

use crate::constants;
use crate::error::{LedError, Result};
use crate::geometry::LedBounds;
use crate::math::{self, Rgba};

/// Allocate a zeroed RGBA8 buffer, reporting failure instead of aborting.
pub(crate) fn alloc_raster(width: u32, height: u32) -> Result<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(LedError::RasterAlloc { width, height })?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| LedError::RasterAlloc { width, height })?;
    buf.resize(len, 0);
    Ok(buf)
}

fn argb(c: [u8; 4]) -> Rgba {
    Rgba::from_argb8(c[0], c[1], c[2], c[3])
}

/// Position of `p` along the rim gradient axis, clamped to 0.0–1.0.
fn rim_gradient_t(p: Point, start: Point, end: Point) -> f64 {
    let axis = end - start;
    let len2 = axis.hypot2();
    if len2 == 0.0 {
        return 0.0;
    }
    math::clamp_unit((p - start).dot(axis) / len2)
}

fn shadow_color(t: f64) -> Rgba {
    let clear = argb(constants::SHADOW_CLEAR);
    let dark = argb(constants::SHADOW_DARK);
    if t <= constants::SHADOW_START {
        clear
    } else if t >= constants::SHADOW_END {
        dark
    } else {
        let k = (t - constants::SHADOW_START) / (constants::SHADOW_END - constants::SHADOW_START);
        clear.mix(dark, k)
    }
}

/// Rasterize the background for `bounds` into a `width` × `height` buffer.
///
/// Layers, bottom to top: rim gradient over the outer oval, outline of the
/// outer oval, outline of the inner oval, inset shadow over the inner oval.
pub(crate) fn rasterize_background(bounds: &LedBounds, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut buf = alloc_raster(width, height)?;

    let center = bounds.center();
    let outer_r = bounds.outer.width() / 2.0;
    let inner_r = bounds.inner.width() / 2.0;
    let stroke = bounds.rim_stroke_width();
    let (grad_start, grad_end) = bounds.rim_gradient_line();

    let rim_light = argb(constants::RIM_LIGHT);
    let rim_dark = argb(constants::RIM_DARK);
    let outline = argb(constants::RIM_OUTLINE);

    for py in 0..height {
        let y = py as f64 + 0.5;
        let row_offset = py as usize * width as usize * 4;

        for px in 0..width {
            let x = px as f64 + 0.5;
            let p = Point::new(x, y);
            let dist = p.distance(center);
            if dist > outer_r + stroke + 1.0 {
                continue; // fully outside
            }

            let mut out = Rgba::TRANSPARENT;

            let rim = math::disc_coverage(dist, outer_r);
            if rim > 0.0 {
                let t = rim_gradient_t(p, grad_start, grad_end);
                let c = rim_light.mix(rim_dark, t);
                out = c.with_alpha(c.a * rim).over(out);
            }

            for r in [outer_r, inner_r] {
                let cov = math::ring_coverage(dist, r, stroke);
                if cov > 0.0 {
                    out = outline.with_alpha(outline.a * cov).over(out);
                }
            }

            let glass = math::disc_coverage(dist, inner_r);
            if glass > 0.0 && inner_r > 0.0 {
                let c = shadow_color(dist / inner_r);
                out = c.with_alpha(c.a * glass).over(out);
            }

            let offset = row_offset + px as usize * 4;
            out.write_rgba8(&mut buf[offset..offset + 4]);
        }
    }

    Ok(buf)
}

/// Cached background image. Holds at most one generation at a time.
#[derive(Default)]
pub struct BackgroundCache {
    img: Option<peniko::Image>,
    hash: Vec<u8>,
    generation: u64,
}

impl BackgroundCache {
    /// Replace the cached image with one rasterized for `bounds`.
    ///
    /// The previous image is dropped before the new buffer is allocated.
    pub fn rebuild(&mut self, bounds: &LedBounds, width: u32, height: u32) -> Result<()> {
        self.img = None;
        self.hash.clear();

        let pixels = rasterize_background(bounds, width, height)?;
        let blob = Blob::new(Arc::new(pixels));
        self.hash = blob.id().to_le_bytes().to_vec();
        self.img = Some(peniko::Image::new(blob, peniko::Format::Rgba8, width, height));
        self.generation += 1;
        debug!(
            "background rasterized at {width}x{height} (generation {})",
            self.generation
        );
        Ok(())
    }

    /// Drop the cached image.
    pub fn release(&mut self) {
        self.img = None;
        self.hash.clear();
    }

    pub fn image(&self) -> Option<(&peniko::Image, &[u8])> {
        self.img.as_ref().map(|img| (img, self.hash.as_slice()))
    }

    /// Number of times the image has been rasterized.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
