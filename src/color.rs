use std::fmt;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Start of the series gradient (a magenta pink).
pub const SERIES_START: Color = Color::new(0xff, 0x40, 0x81);
/// End of the series gradient (a teal green).
pub const SERIES_END: Color = Color::new(0x66, 0xc2, 0xa5);

/// An RGB color. Serializes as a `#rrggbb` hex string since that is what
/// chart frontends consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse a hex color string, with or without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::new(r, g, b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| D::Error::custom(format!("invalid hex color '{s}'")))
    }
}

/// A linear gradient between two colors over an integer domain `[0, steps]`.
///
/// Indices past the end of the domain extrapolate linearly with each channel
/// clamped to the valid range. Colors are recomputed per call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    start: Color,
    end: Color,
    steps: usize,
}

impl Gradient {
    pub fn new(start: Color, end: Color, steps: usize) -> Self {
        Gradient { start, end, steps }
    }

    pub fn color_at(&self, index: usize) -> Color {
        let t = if self.steps == 0 {
            0.0
        } else {
            index as f64 / self.steps as f64
        };

        Color::new(
            lerp(self.start.r, self.end.r, t),
            lerp(self.start.g, self.end.g, t),
            lerp(self.start.b, self.end.b, t),
        )
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient::new(SERIES_START, SERIES_END, 8)
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints_are_exact() {
        let g = Gradient::default();
        assert_eq!(g.color_at(0), SERIES_START);
        assert_eq!(g.color_at(8), SERIES_END);
    }

    #[test]
    fn gradient_is_linear_between_endpoints() {
        let g = Gradient::default();
        let mid = g.color_at(4);
        assert_eq!(mid.r, 179); // (255 + 102) / 2, rounded
        assert_eq!(mid.g, 129);
        assert_eq!(mid.b, 147);
    }

    #[test]
    fn red_channel_is_monotonic() {
        let g = Gradient::default();
        for i in 0..8 {
            assert!(g.color_at(i).r >= g.color_at(i + 1).r);
        }
    }

    #[test]
    fn out_of_domain_indices_extrapolate_with_clamping() {
        let g = Gradient::default();
        // Red decreases past the end of the domain and bottoms out at zero.
        let far = g.color_at(100);
        assert_eq!(far.r, 0);
        assert_eq!(far.g, 255);
        assert_eq!(far.b, 255);
    }

    #[test]
    fn hex_round_trip() {
        let c = Color::from_hex("#ff4081").unwrap();
        assert_eq!(c, SERIES_START);
        assert_eq!(c.to_string(), "#ff4081");
        assert_eq!(Color::from_hex("66c2a5"), Some(SERIES_END));
        assert_eq!(Color::from_hex("bogus!"), None);
    }

    #[test]
    fn serializes_as_hex_string() {
        let s = serde_json::to_string(&SERIES_START).unwrap();
        assert_eq!(s, "\"#ff4081\"");
        let back: Color = serde_json::from_str(&s).unwrap();
        assert_eq!(back, SERIES_START);
    }
}
