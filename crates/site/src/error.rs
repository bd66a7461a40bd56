//! Error types for the site glue.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteError {
    /// The contact recipient is not usable in a `mailto:` URI.
    #[error("invalid recipient address: '{0}'")]
    InvalidRecipient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_recipient_includes_address() {
        let msg = SiteError::InvalidRecipient("nobody".into()).to_string();
        assert!(msg.contains("nobody"), "got: {msg}");
    }
}
