//! Accent color types.
//!
//! The whole field is drawn in one accent color: discs at full opacity and
//! connection lines at a per-link alpha. [`Srgb`] holds the accent, [`Rgba`]
//! pairs it with an alpha for a single draw call.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`. The hex round-trip quantizes to
/// 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Parses a hex color string like "#00ffc6" or "00FFC6".
    ///
    /// Returns `FieldError::InvalidColor` if the input is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, FieldError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| FieldError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Channels quantized to 8 bits with rounding.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// This color at the given alpha.
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { color: self, alpha }
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A color plus an alpha for one draw call.
///
/// `alpha` is passed through as computed; surfaces clamp it to [0, 1] when
/// they rasterize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Srgb,
    pub alpha: f64,
}

impl Rgba {
    /// CSS `rgba(r, g, b, a)` form accepted by a 2D canvas context.
    pub fn to_css(self) -> String {
        let [r, g, b] = self.color.to_rgb8();
        format!("rgba({r}, {g}, {b}, {})", self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_accent_with_and_without_hash() {
        let a = Srgb::from_hex("#00FFC6").unwrap();
        let b = Srgb::from_hex("00ffc6").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rgb8(), [0, 255, 198]);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Srgb::from_hex("#fff"),
            Err(FieldError::InvalidColor(_))
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Srgb::from_hex("#00ffzz").is_err());
    }

    #[test]
    fn from_hex_rejects_sign_prefixed_channels() {
        assert!(matches!(
            Srgb::from_hex("#+f+f+f"),
            Err(FieldError::InvalidColor(_))
        ));
        assert!(Srgb::from_hex("-1-1-1").is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input_without_panicking() {
        assert!(Srgb::from_hex("ééé").is_err());
    }

    #[test]
    fn to_hex_is_lowercase_and_clamped() {
        let c = Srgb {
            r: 1.5,
            g: -0.2,
            b: 198.0 / 255.0,
        };
        assert_eq!(c.to_hex(), "#ff00c6");
    }

    #[test]
    fn css_rgba_matches_canvas_stroke_style() {
        let accent = Srgb::from_hex("#00ffc6").unwrap();
        assert_eq!(accent.with_alpha(0.995).to_css(), "rgba(0, 255, 198, 0.995)");
        assert_eq!(accent.with_alpha(1.0).to_css(), "rgba(0, 255, 198, 1)");
    }

    #[test]
    fn serde_uses_hex_string() {
        let accent = Srgb::from_hex("#00ffc6").unwrap();
        let json = serde_json::to_string(&accent).unwrap();
        assert_eq!(json, "\"#00ffc6\"");
        let back: Srgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_rgb8(), accent.to_rgb8());
    }

    #[test]
    fn deserialize_rejects_bad_hex() {
        assert!(serde_json::from_str::<Srgb>("\"nope\"").is_err());
    }
}
