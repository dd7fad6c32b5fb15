//! User field validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email is missing an '@' separator")]
    MalformedEmail,

    #[error("Profile picture URL must use a secure scheme (https://)")]
    InsecureProfilePictureUrl,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

static SECURE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https://").unwrap());

/// Normalize an email for storage: lower-cased and whitespace-trimmed.
///
/// Every write path goes through this, so stored emails compare
/// byte-for-byte.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an already-normalized email.
///
/// Only structural checks; deliverability is not this crate's concern.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !email.contains('@') {
        return Err(UserValidationError::MalformedEmail);
    }

    Ok(())
}

/// Validate a profile picture URL: secure scheme required when present
pub fn validate_profile_picture_url(url: &str) -> Result<(), UserValidationError> {
    if !SECURE_URL.is_match(url) {
        return Err(UserValidationError::InsecureProfilePictureUrl);
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 8 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Foo@Bar.com "), "foo@bar.com");
        assert_eq!(normalize_email("plain@example.org"), "plain@example.org");
        assert_eq!(normalize_email("\tUPPER@CASE.NET\n"), "upper@case.net");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("foo@bar.com").is_ok());
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
        assert_eq!(
            validate_email("not-an-email"),
            Err(UserValidationError::MalformedEmail)
        );
    }

    #[test]
    fn test_secure_profile_picture_urls() {
        assert!(validate_profile_picture_url("https://cdn.example.com/me.png").is_ok());
        assert!(validate_profile_picture_url("https://a").is_ok());
    }

    #[test]
    fn test_insecure_profile_picture_urls() {
        assert_eq!(
            validate_profile_picture_url("http://cdn.example.com/me.png"),
            Err(UserValidationError::InsecureProfilePictureUrl)
        );
        assert_eq!(
            validate_profile_picture_url("ftp://cdn.example.com/me.png"),
            Err(UserValidationError::InsecureProfilePictureUrl)
        );
        assert_eq!(
            validate_profile_picture_url("cdn.example.com/me.png"),
            Err(UserValidationError::InsecureProfilePictureUrl)
        );
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("1234567"),
            Err(UserValidationError::PasswordTooShort(8))
        );
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(129);
        assert_eq!(
            validate_password(&long_password),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }
}
