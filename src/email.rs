//! A newtype for validated email addresses.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Error for strings that cannot be parsed into a valid email address.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0} is not a valid email address")]
pub struct EmailAddressError(pub String);

/// An email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create and validate an email address.
    ///
    /// The validation only checks that the string contains an '@'. Fully
    /// validating an email address is only possible by sending mail to it.
    ///
    /// # Errors
    ///
    /// Returns an [EmailAddressError] if the string is not a valid email address.
    pub fn new(raw_email: &str) -> Result<Self, EmailAddressError> {
        if raw_email.contains('@') {
            Ok(Self(raw_email.to_string()))
        } else {
            Err(EmailAddressError(raw_email.to_string()))
        }
    }

    /// Create an email address, skipping validation.
    ///
    /// The caller should ensure the string is a valid email address.
    pub fn new_unchecked(raw_email: &str) -> Self {
        Self(raw_email.to_string())
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod email_tests {
    use super::{Email, EmailAddressError};

    #[test]
    fn new_accepts_valid_email() {
        let result = Email::new("foo@example.com");

        assert_eq!(result, Ok(Email::new_unchecked("foo@example.com")));
    }

    #[test]
    fn new_rejects_string_without_at_sign() {
        let result = Email::new("foo.example.com");

        assert_eq!(
            result,
            Err(EmailAddressError("foo.example.com".to_string()))
        );
    }
}
