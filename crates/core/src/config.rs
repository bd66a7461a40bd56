//! Tunable constants of the particle field.
//!
//! [`FieldConfig::default`] reproduces the landing-page background: one
//! particle per 9000 px², radii in [1.0, 2.5), speeds up to 0.2 px/frame,
//! links within a (W/7)×(H/7) squared-distance threshold fading over 20000.

use crate::color::Srgb;
use crate::error::FieldError;
use crate::params::{param_bool, param_f64, param_string};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Surface area (px²) per particle.
pub const DEFAULT_DENSITY: f64 = 9000.0;
/// Smallest particle radius.
pub const DEFAULT_MIN_SIZE: f64 = 1.0;
/// Upper bound (exclusive) of the particle radius.
pub const DEFAULT_MAX_SIZE: f64 = 2.5;
/// Largest velocity component magnitude, px/frame.
pub const DEFAULT_MAX_SPEED: f64 = 0.2;
/// Each surface dimension is divided by this to form the link threshold.
pub const DEFAULT_LINK_DIVISOR: f64 = 7.0;
/// Squared distance at which a link fades to zero opacity.
pub const DEFAULT_OPACITY_FALLOFF: f64 = 20_000.0;
/// Stroke width of connection lines.
pub const DEFAULT_LINE_WIDTH: f64 = 0.5;
/// Radius recorded with the pointer position.
pub const DEFAULT_INFLUENCE_RADIUS: f64 = 150.0;
/// Accent color of discs and lines.
pub const DEFAULT_COLOR: &str = "#00ffc6";
/// Most particles a field will hold, whatever the surface size and density.
pub const MAX_PARTICLES: usize = 10_000;

/// Parameters controlling particle generation and drawing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub density: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub max_speed: f64,
    pub link_divisor: f64,
    pub opacity_falloff: f64,
    pub line_width: f64,
    pub influence_radius: f64,
    pub color: Srgb,
    /// Clamp link opacity to [0, 1] before drawing.
    pub clamp_opacity: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            max_speed: DEFAULT_MAX_SPEED,
            link_divisor: DEFAULT_LINK_DIVISOR,
            opacity_falloff: DEFAULT_OPACITY_FALLOFF,
            line_width: DEFAULT_LINE_WIDTH,
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            color: accent(),
            clamp_opacity: true,
        }
    }
}

fn accent() -> Srgb {
    Srgb {
        r: 0.0,
        g: 1.0,
        b: 198.0 / 255.0,
    }
}

impl FieldConfig {
    /// Builds a config from a JSON params object, falling back to defaults per
    /// key, then validates it.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let config = Self {
            density: param_f64(params, "density", DEFAULT_DENSITY),
            min_size: param_f64(params, "min_size", DEFAULT_MIN_SIZE),
            max_size: param_f64(params, "max_size", DEFAULT_MAX_SIZE),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            link_divisor: param_f64(params, "link_divisor", DEFAULT_LINK_DIVISOR),
            opacity_falloff: param_f64(params, "opacity_falloff", DEFAULT_OPACITY_FALLOFF),
            line_width: param_f64(params, "line_width", DEFAULT_LINE_WIDTH),
            influence_radius: param_f64(params, "influence_radius", DEFAULT_INFLUENCE_RADIUS),
            color: Srgb::from_hex(&param_string(params, "color", DEFAULT_COLOR))?,
            clamp_opacity: param_bool(params, "clamp_opacity", true),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make particle generation or linking meaningless.
    pub fn validate(&self) -> Result<(), FieldError> {
        let at_least_one = [
            ("density", self.density),
            ("link_divisor", self.link_divisor),
            ("opacity_falloff", self.opacity_falloff),
        ];
        for (name, value) in at_least_one {
            if !(value.is_finite() && value >= 1.0) {
                return Err(FieldError::invalid_param(
                    name,
                    format!("must be a number >= 1, got {value}"),
                ));
            }
        }
        let non_negative = [
            ("min_size", self.min_size),
            ("max_speed", self.max_speed),
            ("line_width", self.line_width),
            ("influence_radius", self.influence_radius),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FieldError::invalid_param(
                    name,
                    format!("must be a non-negative number, got {value}"),
                ));
            }
        }
        if !self.max_size.is_finite() || self.max_size < self.min_size {
            return Err(FieldError::invalid_param(
                "max_size",
                format!("must be at least min_size ({})", self.min_size),
            ));
        }
        Ok(())
    }

    /// Rejects a `width`×`height` surface on which `density` would spawn more
    /// than [`MAX_PARTICLES`] particles.
    pub fn check_surface(&self, width: f64, height: f64) -> Result<(), FieldError> {
        let count = (width * height / self.density).floor();
        if count.is_finite() && count > MAX_PARTICLES as f64 {
            return Err(FieldError::invalid_param(
                "density",
                format!(
                    "{} px² per particle gives {count} particles on {width}x{height}, limit is {MAX_PARTICLES}",
                    self.density
                ),
            ));
        }
        Ok(())
    }

    /// Current values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "density": self.density,
            "min_size": self.min_size,
            "max_size": self.max_size,
            "max_speed": self.max_speed,
            "link_divisor": self.link_divisor,
            "opacity_falloff": self.opacity_falloff,
            "line_width": self.line_width,
            "influence_radius": self.influence_radius,
            "color": self.color.to_hex(),
            "clamp_opacity": self.clamp_opacity,
        })
    }

    /// Types, defaults and descriptions of every parameter.
    pub fn param_schema() -> Value {
        json!({
            "density": {
                "type": "number",
                "default": DEFAULT_DENSITY,
                "min": 1.0,
                "description": "Surface area in px² per particle"
            },
            "min_size": {
                "type": "number",
                "default": DEFAULT_MIN_SIZE,
                "min": 0.0,
                "description": "Smallest particle radius"
            },
            "max_size": {
                "type": "number",
                "default": DEFAULT_MAX_SIZE,
                "min": 0.0,
                "description": "Largest particle radius (exclusive)"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "description": "Largest velocity component, px per frame"
            },
            "link_divisor": {
                "type": "number",
                "default": DEFAULT_LINK_DIVISOR,
                "min": 1.0,
                "description": "Link threshold is (W/d)×(H/d) in squared px"
            },
            "opacity_falloff": {
                "type": "number",
                "default": DEFAULT_OPACITY_FALLOFF,
                "min": 1.0,
                "description": "Squared distance at which a link becomes transparent"
            },
            "line_width": {
                "type": "number",
                "default": DEFAULT_LINE_WIDTH,
                "min": 0.0,
                "description": "Stroke width of connection lines"
            },
            "influence_radius": {
                "type": "number",
                "default": DEFAULT_INFLUENCE_RADIUS,
                "min": 0.0,
                "description": "Radius recorded with the tracked pointer"
            },
            "color": {
                "type": "string",
                "default": DEFAULT_COLOR,
                "description": "Accent color as #rrggbb"
            },
            "clamp_opacity": {
                "type": "boolean",
                "default": true,
                "description": "Clamp link opacity to [0, 1]"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_landing_page_constants() {
        let c = FieldConfig::default();
        assert_eq!(c.density, 9000.0);
        assert_eq!(c.min_size, 1.0);
        assert_eq!(c.max_size, 2.5);
        assert_eq!(c.max_speed, 0.2);
        assert_eq!(c.link_divisor, 7.0);
        assert_eq!(c.opacity_falloff, 20_000.0);
        assert_eq!(c.line_width, 0.5);
        assert_eq!(c.influence_radius, 150.0);
        assert_eq!(c.color.to_hex(), DEFAULT_COLOR);
        assert!(c.clamp_opacity);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn from_json_empty_object_is_default() {
        assert_eq!(FieldConfig::from_json(&json!({})).unwrap(), FieldConfig::default());
    }

    #[test]
    fn from_json_applies_overrides() {
        let c = FieldConfig::from_json(&json!({
            "density": 4500,
            "color": "#007fff",
            "clamp_opacity": false,
        }))
        .unwrap();
        assert_eq!(c.density, 4500.0);
        assert_eq!(c.color.to_hex(), "#007fff");
        assert!(!c.clamp_opacity);
        assert_eq!(c.max_speed, DEFAULT_MAX_SPEED);
    }

    #[test]
    fn from_json_rejects_zero_density() {
        let err = FieldConfig::from_json(&json!({"density": 0})).unwrap_err();
        assert!(err.to_string().contains("density"), "got: {err}");
    }

    #[test]
    fn from_json_enforces_schema_minimum_of_one() {
        for key in ["density", "link_divisor", "opacity_falloff"] {
            let min = FieldConfig::param_schema()[key]["min"].as_f64().unwrap();
            assert_eq!(min, 1.0);
            let mut params = json!({});
            params[key] = json!(0.5);
            assert!(
                matches!(
                    FieldConfig::from_json(&params),
                    Err(FieldError::InvalidParameter { .. })
                ),
                "{key} = 0.5 should be rejected"
            );
            params[key] = json!(1.0);
            assert!(FieldConfig::from_json(&params).is_ok());
        }
    }

    #[test]
    fn from_json_rejects_vanishing_density() {
        assert!(FieldConfig::from_json(&json!({"density": 1e-6})).is_err());
    }

    #[test]
    fn check_surface_caps_particle_count() {
        let c = FieldConfig::default();
        assert!(c.check_surface(1920.0, 1080.0).is_ok());
        let dense = FieldConfig {
            density: 1.0,
            ..FieldConfig::default()
        };
        assert!(matches!(
            dense.check_surface(1280.0, 720.0),
            Err(FieldError::InvalidParameter { .. })
        ));
        // exactly at the limit is allowed
        assert!(dense.check_surface(100.0, 100.0).is_ok());
        assert!(dense.check_surface(100.0, 101.0).is_err());
    }

    #[test]
    fn from_json_rejects_inverted_size_range() {
        let err = FieldConfig::from_json(&json!({"min_size": 3.0, "max_size": 2.0})).unwrap_err();
        assert!(err.to_string().contains("max_size"), "got: {err}");
    }

    #[test]
    fn from_json_rejects_negative_speed() {
        assert!(FieldConfig::from_json(&json!({"max_speed": -1.0})).is_err());
    }

    #[test]
    fn from_json_rejects_bad_color() {
        assert!(matches!(
            FieldConfig::from_json(&json!({"color": "teal"})),
            Err(FieldError::InvalidColor(_))
        ));
    }

    #[test]
    fn params_reflect_values_and_feed_back_into_from_json() {
        let c = FieldConfig {
            density: 1234.0,
            line_width: 1.0,
            ..FieldConfig::default()
        };
        let again = FieldConfig::from_json(&c.params()).unwrap();
        assert_eq!(again.density, 1234.0);
        assert_eq!(again.line_width, 1.0);
    }

    #[test]
    fn schema_lists_every_param_with_type_default_description() {
        let schema = FieldConfig::param_schema();
        let params = FieldConfig::default().params();
        for key in params.as_object().unwrap().keys() {
            let entry = &schema[key];
            assert!(entry.get("type").is_some(), "{key} missing 'type'");
            assert!(entry.get("default").is_some(), "{key} missing 'default'");
            assert!(entry.get("description").is_some(), "{key} missing 'description'");
        }
    }

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let c: FieldConfig = serde_json::from_str(r#"{"max_speed": 0.4}"#).unwrap();
        assert_eq!(c.max_speed, 0.4);
        assert_eq!(c.density, DEFAULT_DENSITY);
    }
}
