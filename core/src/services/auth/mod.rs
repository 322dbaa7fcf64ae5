//! Account service module
//!
//! This module provides the account flows built on the token lifecycle:
//! - Registration with email/password
//! - Login issuing a fresh credential pair
//! - Refresh and logout delegation
//! - Current user lookup, password change and account deletion

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
