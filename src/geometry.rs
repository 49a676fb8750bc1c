//! Nested LED bounds derived from the widget size.

use floem::kurbo::{Point, Rect};

use crate::constants;

/// Outer rim, inner glass, and glow halo rectangles. All three are squares
/// sharing one center, nested as `glow ⊇ outer ⊇ inner`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedBounds {
    /// Side of the centered square the LED is fitted into.
    pub size: f64,
    pub outer: Rect,
    pub inner: Rect,
    pub glow: Rect,
}

fn shrink(rect: Rect, by: f64) -> Rect {
    Rect::new(rect.x0 + by, rect.y0 + by, rect.x1 - by, rect.y1 - by)
}

impl LedBounds {
    /// Lay out the LED in a `width` × `height` area. Returns `None` when
    /// either dimension is not a positive finite number.
    pub fn from_size(width: f64, height: f64) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let size = width.min(height);
        let left = (width - size) / 2.0;
        let top = (height - size) / 2.0;
        let square = Rect::new(left, top, left + size, top + size);

        let inset = size * constants::RIM_INSET;
        let outer = shrink(square, inset);
        let inner = shrink(outer, size * constants::GLASS_OFFSET);
        let glow = shrink(inner, -inset);

        Some(Self {
            size,
            outer,
            inner,
            glow,
        })
    }

    pub fn center(&self) -> Point {
        self.outer.center()
    }

    pub fn rim_stroke_width(&self) -> f64 {
        self.size * constants::RIM_STROKE
    }

    /// Start and end points of the rim's linear gradient.
    pub fn rim_gradient_line(&self) -> (Point, Point) {
        let o = self.outer;
        (
            Point::new(o.x0 + constants::RIM_GRADIENT_START * self.size, o.y0),
            Point::new(o.x0 + constants::RIM_GRADIENT_END * self.size, o.y1),
        )
    }

    /// Radius of the glow gradient: half the glow height.
    pub fn glow_radius(&self) -> f64 {
        self.glow.height() / 2.0
    }
}
