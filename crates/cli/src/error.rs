//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: field error (bad dimensions, invalid params or colors)
//! - 11: I/O error (PNG write, recipe read)
//! - 12: input error (bad JSON params, bad recipient, bad background)
//! - 13: serialization error

use plexus_core::FieldError;
use plexus_site::SiteError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    Field(FieldError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            other => CliError::Field(other),
        }
    }
}

impl From<SiteError> for CliError {
    fn from(e: SiteError) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_exit_code_is_10() {
        assert_eq!(CliError::Field(FieldError::InvalidDimensions).exit_code(), 10);
    }

    #[test]
    fn io_input_serialization_exit_codes() {
        assert_eq!(CliError::Io("x".into()).exit_code(), 11);
        assert_eq!(CliError::Input("x".into()).exit_code(), 12);
        assert_eq!(CliError::Serialization("x".into()).exit_code(), 13);
    }

    #[test]
    fn from_field_error_io_routes_to_cli_io() {
        let cli_err = CliError::from(FieldError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_field_error_non_io_routes_to_cli_field() {
        let cli_err = CliError::from(FieldError::invalid_param("density", "must be positive"));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("density"));
    }

    #[test]
    fn from_site_error_routes_to_input() {
        let cli_err = CliError::from(SiteError::InvalidRecipient("nobody".into()));
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("nobody"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        assert_eq!(CliError::from(bad).exit_code(), 13);
    }
}
