use serde::{Deserialize, Serialize};
use std::fmt;

/// An email address that has already passed syntax validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Wrap an address that validation has accepted
    pub(crate) fn new_unchecked(address: String) -> Self {
        Self(address)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single failed constraint on a submitted field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validated contact form submission
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: EmailAddress,
    pub subject: String,
    pub message: String,
}

/// Validated newsletter signup
#[derive(Debug, Clone)]
pub struct NewsletterSignup {
    pub email: EmailAddress,
    pub interests: Vec<String>,
}

/// A rendered email ready to hand to the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}
