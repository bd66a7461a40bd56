//! Contact-form submission as a `mailto:` link.
//!
//! The form never talks to a server: submitting it composes a
//! `mailto:<recipient>?subject=…&body=…` URI and hands it to the browser.
//! Subject and body are percent-encoded with the same unreserved set as
//! JavaScript's `encodeURIComponent`.

use crate::error::SiteError;
use serde::{Deserialize, Serialize};

/// Stand-in for an empty name field.
pub const NAME_PLACEHOLDER: &str = "[Your Name]";
/// Stand-in for an empty message field.
pub const MESSAGE_PLACEHOLDER: &str = "[Message]";
/// Subject line of every inquiry.
pub const DEFAULT_SUBJECT: &str = "Inquiry from Techfaim Website";
/// Addressee of the body's greeting line.
pub const DEFAULT_TEAM: &str = "Techfaim Team";

/// Raw values of the three contact inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Where inquiries go and how they are headed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    recipient: String,
    pub subject: String,
    pub team: String,
}

impl ContactConfig {
    /// A config with the default subject and greeting.
    ///
    /// The recipient must look like `local@domain` and contain nothing that
    /// would break the URI (whitespace, `?`, `&`, `#`).
    pub fn new(recipient: &str) -> Result<Self, SiteError> {
        let recipient = recipient.trim();
        let valid = match recipient.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !recipient
                        .chars()
                        .any(|c| c.is_whitespace() || matches!(c, '?' | '&' | '#'))
            }
            None => false,
        };
        if !valid {
            return Err(SiteError::InvalidRecipient(recipient.to_string()));
        }
        Ok(Self {
            recipient: recipient.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            team: DEFAULT_TEAM.to_string(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// The plain-text body: greeting, name, message and reply address.
pub fn compose_body(form: &ContactForm, config: &ContactConfig) -> String {
    format!(
        "Hi {},\n\nMy name is {}.\n\n{}\n\nContact Email: {}",
        config.team,
        or_placeholder(&form.name, NAME_PLACEHOLDER),
        or_placeholder(&form.message, MESSAGE_PLACEHOLDER),
        form.email,
    )
}

/// The complete `mailto:` URI for a submitted form.
pub fn compose_mailto(form: &ContactForm, config: &ContactConfig) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        config.recipient,
        encode_component(&config.subject),
        encode_component(&compose_body(form, config)),
    )
}

/// Percent-encodes UTF-8 bytes outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
