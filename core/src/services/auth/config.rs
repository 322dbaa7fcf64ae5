//! Configuration for the authentication service

use ts_shared::config::PasswordConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minimum accepted password length in characters
    pub password_min_length: usize,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            allow_registration: true,
        }
    }
}

impl AuthServiceConfig {
    /// Build from shared password settings
    pub fn from_password_config(config: &PasswordConfig) -> Self {
        Self {
            password_min_length: config.min_length,
            ..Self::default()
        }
    }
}
