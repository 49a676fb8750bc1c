//! Color and easing math shared by the gradient derivations and the
//! software rasterizers. All color values are normalized f64 in 0.0–1.0.

/// HSV → RGB. All values 0.0–1.0.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = (h * 6.0) % 6.0;
    let i = h6.floor() as u32;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// RGB → HSV. All values 0.0–1.0.
pub(crate) fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    (h, s, v)
}

/// Clamp into 0.0–1.0. NaN maps to 0.0 so it never reaches HSV math.
pub(crate) fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Decelerating ease: fast start, slow finish.
pub(crate) fn decelerate(t: f64) -> f64 {
    let t = clamp_unit(t);
    1.0 - (1.0 - t) * (1.0 - t)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Straight-alpha RGBA, every channel 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub(crate) const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub(crate) fn from_argb8(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub(crate) fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub(crate) fn mix(self, other: Rgba, t: f64) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    /// Source-over composite of `self` onto `dst`.
    pub(crate) fn over(self, dst: Rgba) -> Rgba {
        let a = self.a + dst.a * (1.0 - self.a);
        if a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let blend = |s: f64, d: f64| (s * self.a + d * dst.a * (1.0 - self.a)) / a;
        Rgba {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a,
        }
    }

    /// Additive composite, saturating at 1.0 per channel.
    pub(crate) fn add(self, dst: Rgba) -> Rgba {
        let a = (self.a + dst.a).min(1.0);
        if a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let sum = |s: f64, d: f64| ((s * self.a + d * dst.a) / a).min(1.0);
        Rgba {
            r: sum(self.r, dst.r),
            g: sum(self.g, dst.g),
            b: sum(self.b, dst.b),
            a,
        }
    }

    pub(crate) fn write_rgba8(self, out: &mut [u8]) {
        out[0] = (clamp_unit(self.r) * 255.0 + 0.5) as u8;
        out[1] = (clamp_unit(self.g) * 255.0 + 0.5) as u8;
        out[2] = (clamp_unit(self.b) * 255.0 + 0.5) as u8;
        out[3] = (clamp_unit(self.a) * 255.0 + 0.5) as u8;
    }
}

/// Anti-aliased coverage of a pixel whose center lies `dist` from the
/// center of a circle with `radius`.
pub(crate) fn disc_coverage(dist: f64, radius: f64) -> f64 {
    clamp_unit(radius - dist + 0.5)
}

/// Anti-aliased coverage of a centered ring of `width` on a circle.
pub(crate) fn ring_coverage(dist: f64, radius: f64, width: f64) -> f64 {
    let half = (width / 2.0).max(0.5);
    clamp_unit(half - (dist - radius).abs() + 0.5) * (width / (2.0 * half)).min(1.0)
}
