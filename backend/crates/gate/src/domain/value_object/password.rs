//! Password Value Object
//!
//! Raw password from user input, checked against the auth service's policy
//! before it is forwarded. Hashing and storage are the auth service's job.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Shortest password the auth service accepts
pub const PASSWORD_MIN_CHARS: usize = 6;
/// bcrypt truncates beyond 72 bytes; the auth service rejects longer input
pub const PASSWORD_MAX_BYTES: usize = 72;

pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(AppError::bad_request("Password cannot be empty")
                .with_action("Please enter a password"));
        }

        let chars = raw.chars().count();
        if chars < PASSWORD_MIN_CHARS {
            return Err(AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                PASSWORD_MIN_CHARS, chars
            ))
            .with_action("Please choose a longer password"));
        }

        if raw.len() > PASSWORD_MAX_BYTES {
            return Err(AppError::bad_request(format!(
                "Password must be at most {} bytes",
                PASSWORD_MAX_BYTES
            ))
            .with_action("Please choose a shorter password"));
        }

        if raw.chars().any(char::is_control) {
            return Err(AppError::bad_request("Password contains control characters"));
        }

        Ok(Self(raw))
    }

    /// Raw value, only for the request body sent to the auth service
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_bounds() {
        assert!(Password::new("12345").is_err());
        assert!(Password::new("123456").is_ok());
        assert!(Password::new("a".repeat(72)).is_ok());
        assert!(Password::new("a".repeat(73)).is_err());
    }

    #[test]
    fn test_password_rejects_blank_and_control() {
        assert!(Password::new("      ").is_err());
        assert!(Password::new("abc\u{0007}defg").is_err());
    }

    #[test]
    fn test_password_counts_characters_not_bytes_for_minimum() {
        // 6 characters, 12 bytes
        assert!(Password::new("ñññññ\u{e9}").is_ok());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("secret-value").unwrap();
        assert_eq!(format!("{:?}", password), "Password(***)");
        assert_eq!(password.expose(), "secret-value");
    }
}
