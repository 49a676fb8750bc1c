//! Glow and glass gradients derived from the light color and intensity.
//!
//! These are pure functions: they compute stop colors and offsets and never
//! draw. The painter turns them into peniko gradients once bounds are known.

use floem::kurbo::Point;
use floem::peniko::{ColorStop, Gradient};

use crate::color::LightColor;
use crate::constants;
use crate::math::{self, Rgba};

/// One stop of a radial gradient: color plus 0–255 alpha at `offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: LightColor,
    pub alpha: u8,
}

impl GradientStop {
    fn to_color_stop(self) -> ColorStop {
        ColorStop {
            offset: self.offset,
            color: self.color.to_peniko(self.alpha),
        }
    }
}

/// Glow stops, innermost first.
///
/// The light color's value channel is replaced by `intensity`, and alphas
/// ramp from 255·I at the core through 155·I to fully transparent. With
/// `white_core` the core loses up to 40 % of its saturation as it brightens.
pub fn glow_stops(color: LightColor, intensity: f64, white_core: bool) -> [GradientStop; 3] {
    let intensity = math::clamp_unit(intensity);
    let (h, s, _) = color.to_hsv();
    let lit = LightColor::from_hsv(h, s, intensity);
    let core = if white_core {
        LightColor::from_hsv(
            h,
            s * (1.0 - constants::WHITE_CORE_DESATURATION * intensity),
            intensity,
        )
    } else {
        lit
    };

    let alpha = |i: usize| (constants::GLOW_ALPHAS[i] * intensity).min(255.0) as u8;
    [
        GradientStop {
            offset: constants::GLOW_POSITIONS[0],
            color: core,
            alpha: alpha(0),
        },
        GradientStop {
            offset: constants::GLOW_POSITIONS[1],
            color: lit,
            alpha: alpha(1),
        },
        GradientStop {
            offset: constants::GLOW_POSITIONS[2],
            color: lit,
            alpha: alpha(2),
        },
    ]
}

/// Dim variant of the light color used to tint the glass dome.
pub fn glass_tint(color: LightColor) -> LightColor {
    color.with_value(constants::GLASS_TINT_VALUE)
}

/// Glass dome stops, center first: translucent tint darkening toward the edge.
pub fn glass_stops(color: LightColor) -> [GradientStop; 5] {
    let tint = glass_tint(color);
    std::array::from_fn(|i| GradientStop {
        offset: constants::GLASS_POSITIONS[i],
        color: tint,
        alpha: constants::GLASS_ALPHAS[i],
    })
}

/// Color of `stops` at `t`, padded past the first and last stop.
pub(crate) fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba {
    let rgba = |s: &GradientStop| Rgba {
        r: s.color.r(),
        g: s.color.g(),
        b: s.color.b(),
        a: s.alpha as f64 / 255.0,
    };
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset as f64 {
        return rgba(first);
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0].offset as f64, pair[1].offset as f64);
        if t <= hi {
            let k = if hi > lo { (t - lo) / (hi - lo) } else { 1.0 };
            return rgba(&pair[0]).mix(rgba(&pair[1]), k);
        }
    }
    rgba(last)
}

/// Radial peniko gradient over `stops` centered at `center`.
pub fn radial(center: Point, radius: f64, stops: &[GradientStop]) -> Gradient {
    let stops: Vec<ColorStop> = stops.iter().map(|s| s.to_color_stop()).collect();
    Gradient::new_radial(center, radius as f32).with_stops(stops.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_light_is_transparent() {
        let stops = glow_stops(LightColor::RED, 0.0, false);
        assert!(stops.iter().all(|s| s.alpha == 0));
        assert_eq!(stops[0].color.to_rgb8(), (0, 0, 0));
    }

    #[test]
    fn full_intensity_core_is_the_light_color() {
        let stops = glow_stops(LightColor::RED, 1.0, false);
        assert_eq!(stops[0].alpha, 255);
        assert_eq!(stops[0].color, LightColor::RED);
        assert_eq!(stops[1].alpha, 155);
        assert_eq!(stops[2].alpha, 0);
    }

    #[test]
    fn white_core_desaturates_the_center_only() {
        let stops = glow_stops(LightColor::RED, 1.0, true);
        let (_, core_s, _) = stops[0].color.to_hsv();
        let (_, mid_s, _) = stops[1].color.to_hsv();
        assert!((core_s - 0.6).abs() < 0.01);
        assert_eq!(mid_s, 1.0);
    }

    #[test]
    fn stops_are_ordered() {
        let stops = glow_stops(LightColor::BLUE, 0.5, false);
        assert!(stops.windows(2).all(|w| w[0].offset < w[1].offset));
        let glass = glass_stops(LightColor::BLUE);
        assert!(glass.windows(2).all(|w| w[0].offset < w[1].offset));
    }

    #[test]
    fn same_intensity_gives_same_stops() {
        let a = glow_stops(LightColor::GREEN, 0.37, true);
        let b = glow_stops(LightColor::GREEN, 0.37, true);
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_intensity_is_clamped() {
        assert_eq!(
            glow_stops(LightColor::GREEN, 3.0, false),
            glow_stops(LightColor::GREEN, 1.0, false)
        );
        assert_eq!(
            glow_stops(LightColor::GREEN, f64::NAN, false),
            glow_stops(LightColor::GREEN, 0.0, false)
        );
    }

    #[test]
    fn sampling_pads_and_interpolates() {
        let stops = glow_stops(LightColor::RED, 1.0, false);
        assert_eq!(sample_stops(&stops, 0.0).a, 1.0);
        assert_eq!(sample_stops(&stops, 1.0).a, 0.0);
        let mid = sample_stops(&stops, 0.80);
        assert!((mid.a - 77.5 / 255.0).abs() < 1e-6);
        assert_eq!(mid.r, 1.0);
        assert_eq!(sample_stops(&[], 0.5), Rgba::TRANSPARENT);
    }

    #[test]
    fn glass_tint_is_dim() {
        let (_, _, v) = glass_tint(LightColor::YELLOW).to_hsv();
        assert!((v - 0.27).abs() < 1e-9);
        assert_eq!(glass_stops(LightColor::YELLOW)[4].alpha, 225);
    }
}
