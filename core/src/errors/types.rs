//! Domain-specific error types for authentication and related operations
//!
//! Messages here are for logs. The presentation layer decides what a
//! client is allowed to see.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are deliberately merged
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    /// Current password did not match during a password change
    #[error("Incorrect password")]
    IncorrectPassword,
}

/// Token-related errors
///
/// The first three variants are the only credential outcomes the
/// lifecycle operations report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Did not decode: malformed, tampered, expired past leeway, or wrong kind
    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Credential expired")]
    ExpiredCredential,

    /// A consumed refresh credential was presented again
    #[error("Refresh credential reuse detected")]
    ReuseDetected,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password too short (min: {min_length})")]
    PasswordTooShort { min_length: usize },
}
