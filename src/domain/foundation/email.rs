//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A normalised (trimmed, lower-cased) email address.
///
/// Members are keyed on email, so every comparison goes through this type
/// to keep the webhook, login and gating paths agreeing on the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalises an email address.
    ///
    /// Only the shape is checked: a non-empty local part and domain around a
    /// single `@`, no whitespace. Deliverability is the auth provider's job.
    ///
    /// This is stricter than a bare "contains `@`" check: `a@b@c` and
    /// `@example.com` are rejected.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }

        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
                Ok(Self(trimmed.to_lowercase()))
            }
            _ => Err(ValidationError::invalid_format("email", "missing @ symbol")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}
