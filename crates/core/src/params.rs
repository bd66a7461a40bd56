//! Typed lookups into a JSON params object.
//!
//! Each helper takes the params value, a key, and a default. A missing key or
//! a value of the wrong JSON type yields the default, so a partial override
//! object like `{"density": 6000}` is always usable.

use serde_json::Value;

/// Reads an `f64` (JSON integers included), or `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads a `bool`, or `default`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Reads a string, or `default`.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_float_and_integer() {
        let params = json!({"max_speed": 0.5, "density": 6000});
        assert!((param_f64(&params, "max_speed", 0.2) - 0.5).abs() < f64::EPSILON);
        assert!((param_f64(&params, "density", 9000.0) - 6000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_on_missing_wrong_type_or_null() {
        let params = json!({"density": "dense", "line_width": null});
        assert!((param_f64(&params, "density", 9000.0) - 9000.0).abs() < f64::EPSILON);
        assert!((param_f64(&params, "line_width", 0.5) - 0.5).abs() < f64::EPSILON);
        assert!((param_f64(&params, "absent", 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!([1, 2, 3]);
        assert!((param_f64(&params, "density", 9000.0) - 9000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_bool_reads_and_falls_back() {
        let params = json!({"clamp_opacity": false, "other": 1});
        assert!(!param_bool(&params, "clamp_opacity", true));
        assert!(param_bool(&params, "other", true));
        assert!(param_bool(&params, "absent", true));
    }

    #[test]
    fn param_string_reads_and_falls_back() {
        let params = json!({"color": "#ff0000", "bad": 3});
        assert_eq!(param_string(&params, "color", "#00ffc6"), "#ff0000");
        assert_eq!(param_string(&params, "bad", "#00ffc6"), "#00ffc6");
        assert_eq!(param_string(&params, "absent", "x"), "x");
    }

    #[test]
    fn param_string_keeps_empty_string() {
        let params = json!({"color": ""});
        assert_eq!(param_string(&params, "color", "#00ffc6"), "");
    }
}
