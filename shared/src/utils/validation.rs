//! Subject and password validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of an email address (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 320;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$")
        .expect("email pattern is a valid regex")
});

/// Normalize an email address into a subject identity
///
/// Subjects are compared case-insensitively, so the canonical form is
/// trimmed and lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check whether an already-normalized email address is well formed
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(email)
}

/// Check a password against the minimum length policy
pub fn meets_password_policy(password: &str, min_length: usize) -> bool {
    password.chars().count() >= min_length
}
