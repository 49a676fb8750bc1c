//! LightColor — the base color every LED gradient is derived from.
//!
//! Stores opaque RGB as f64 values in the 0.0–1.0 range. Parses and formats
//! hex strings, and serializes as one so configs can say `color = "#00FF00"`.

use std::fmt;
use std::str::FromStr;

use floem::peniko::Color;
use serde::{Deserialize, Serialize};

use crate::error::LedError;
use crate::math;

/// Opaque RGB color with components in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LightColor {
    r: f64,
    g: f64,
    b: f64,
}

impl LightColor {
    pub const RED: LightColor = LightColor::from_rgb8_const(255, 0, 0);
    pub const GREEN: LightColor = LightColor::from_rgb8_const(0, 255, 0);
    pub const BLUE: LightColor = LightColor::from_rgb8_const(0, 0, 255);
    pub const YELLOW: LightColor = LightColor::from_rgb8_const(255, 255, 0);
    pub const WHITE: LightColor = LightColor::from_rgb8_const(255, 255, 255);

    const fn from_rgb8_const(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Red component (0.0–1.0).
    pub fn r(&self) -> f64 {
        self.r
    }
    /// Green component (0.0–1.0).
    pub fn g(&self) -> f64 {
        self.g
    }
    /// Blue component (0.0–1.0).
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Create from 0–255 RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb8_const(r, g, b)
    }

    /// Create from f64 RGB. Out-of-range components are clamped.
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: math::clamp_unit(r),
            g: math::clamp_unit(g),
            b: math::clamp_unit(b),
        }
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        )
    }

    /// Create from HSV values (all 0.0–1.0, clamped).
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let (r, g, b) = math::hsv_to_rgb(
            math::clamp_unit(h),
            math::clamp_unit(s),
            math::clamp_unit(v),
        );
        Self { r, g, b }
    }

    /// Convert to HSV (all 0.0–1.0). Returns (h, s, v).
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        math::rgb_to_hsv(self.r, self.g, self.b)
    }

    /// Same hue and saturation with the value channel replaced.
    pub fn with_value(&self, v: f64) -> Self {
        let (h, s, _) = self.to_hsv();
        Self::from_hsv(h, s, v)
    }

    /// Parse `#RGB` or `#RRGGBB` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim().trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match stripped.len() {
            3 => {
                let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
                let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
                let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
                Some(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
                let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
                let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
                Some(Self::from_rgb8(r, g, b))
            }
            _ => None,
        }
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// The peniko color with the given 0–255 alpha.
    pub fn to_peniko(&self, alpha: u8) -> Color {
        let (r, g, b) = self.to_rgb8();
        Color::rgba8(r, g, b, alpha)
    }
}

impl Default for LightColor {
    fn default() -> Self {
        Self::GREEN
    }
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for LightColor {
    type Err = LedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| LedError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for LightColor {
    type Error = LedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LightColor> for String {
    fn from(c: LightColor) -> Self {
        c.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(LightColor::from_hex("#F00"), Some(LightColor::RED));
        assert_eq!(LightColor::from_hex("00ff00"), Some(LightColor::GREEN));
        assert_eq!(LightColor::from_hex("#12345"), None);
        assert_eq!(LightColor::from_hex("#GG0000"), None);
    }

    #[test]
    fn hex_formatting_is_uppercase_with_hash() {
        assert_eq!(LightColor::from_rgb8(0x3b, 0x82, 0xf6).to_hex(), "#3B82F6");
    }

    #[test]
    fn invalid_string_reports_the_input() {
        let err = "blue".parse::<LightColor>().unwrap_err();
        assert!(err.to_string().contains("blue"));
    }

    #[test]
    fn with_value_keeps_hue() {
        let dim = LightColor::RED.with_value(0.5);
        let (h, s, v) = dim.to_hsv();
        assert_eq!(h, 0.0);
        assert_eq!(s, 1.0);
        assert!((v - 0.5).abs() < 1e-9);
    }

    #[test]
    fn from_rgb_clamps_components() {
        let c = LightColor::from_rgb(2.0, -1.0, f64::NAN);
        assert_eq!(c.to_rgb8(), (255, 0, 0));
    }
}
