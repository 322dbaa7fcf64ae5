//! Common utility functions

pub mod validation;

pub use validation::{is_valid_email, meets_password_policy, normalize_email};
