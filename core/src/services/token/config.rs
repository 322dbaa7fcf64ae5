//! Configuration for the token service

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use ts_shared::config::JwtConfig;

use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
    /// `iss` claim written and required
    pub issuer: String,
    /// `aud` claim written and required
    pub audience: String,
    /// Grace period applied to a refresh credential's `exp`, in seconds;
    /// access credentials get none
    pub leeway_seconds: u64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 30,
            issuer: "tessera".to_string(),
            audience: "tessera-api".to_string(),
            leeway_seconds: 60,
        }
    }
}

impl TokenServiceConfig {
    /// Build the service configuration from shared JWT settings
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = Algorithm::from_str(&jwt.algorithm).map_err(|_| DomainError::Internal {
            message: format!("Unsupported JWT algorithm: {}", jwt.algorithm),
        })?;

        Ok(Self {
            jwt_secret: jwt.secret.clone(),
            algorithm,
            access_token_expiry_minutes: jwt.access_token_expiry_minutes,
            refresh_token_expiry_days: jwt.refresh_token_expiry_days,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            leeway_seconds: jwt.leeway_seconds,
        })
    }

    /// Lifetime of an access credential
    pub fn access_lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_minutes)
    }

    /// Lifetime of a refresh credential and its session record
    pub fn refresh_lifetime(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}
