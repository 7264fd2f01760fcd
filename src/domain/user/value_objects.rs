use serde::{Deserialize, Serialize};
use std::fmt;

use thiserror::Error;

/// Error raised when an email address fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid email address: {0}")]
pub struct InvalidEmail(pub String);

/// Email value object representing a valid email address
///
/// # Invariants
/// - Must contain '@' character
/// - Must be at least 3 characters long
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use hackhub_core::domain::user::Email;
    ///
    /// let email = Email::new("leader@example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "leader@example.com");
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, InvalidEmail> {
        let email = email.into();
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(InvalidEmail(email))
        }
    }

    /// Validates an email string
    ///
    /// # Validation Rules
    /// - Must contain '@' character
    /// - Must be at least 3 characters long
    fn is_valid(email: &str) -> bool {
        email.contains('@') && email.len() >= 3
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!(Email::new("test@example.com").is_ok());
    }

    #[test]
    fn valid_email_minimum_length() {
        assert!(Email::new("a@b").is_ok());
    }

    #[test]
    fn invalid_email_no_at_symbol() {
        assert!(Email::new("invalid").is_err());
    }

    #[test]
    fn invalid_email_too_short() {
        assert!(Email::new("a@").is_err());
    }

    #[test]
    fn invalid_email_reports_the_input() {
        let err = Email::new("nope").unwrap_err();
        assert_eq!(err.to_string(), "invalid email address: nope");
    }

    #[test]
    fn email_display() {
        let email = Email::new("test@example.com").unwrap();
        assert_eq!(format!("{}", email), "test@example.com");
    }
}
