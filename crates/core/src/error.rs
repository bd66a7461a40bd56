//! Error types for the plexus core.

use thiserror::Error;

/// Errors produced while configuring or hosting a particle field.
///
/// The per-frame operations (`init`, `update`, `connect`) never fail; these
/// errors come from the edges: parameter parsing, surface allocation, file
/// output and host interop.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero (or their product overflowed) when allocating a surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A configuration value was outside its accepted range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing a snapshot or reading a recipe failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// The host environment (browser, canvas) rejected a call.
    #[error("host error: {0}")]
    Host(String),
}

impl FieldError {
    /// Shorthand for [`FieldError::InvalidParameter`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        FieldError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = format!("{}", FieldError::InvalidDimensions);
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_parameter_includes_name_and_reason() {
        let err = FieldError::invalid_param("density", "must be positive");
        let msg = format!("{err}");
        assert!(msg.contains("density"), "missing name in: {msg}");
        assert!(msg.contains("must be positive"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = format!("{}", FieldError::InvalidColor("bad hex".into()));
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn io_and_host_include_message() {
        assert!(FieldError::Io("disk full".into())
            .to_string()
            .contains("disk full"));
        assert!(FieldError::Host("no 2d context".into())
            .to_string()
            .contains("no 2d context"));
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}
