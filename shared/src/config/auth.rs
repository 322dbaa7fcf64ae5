//! Authentication configuration: token signing, lifetimes and password hashing

use serde::{Deserialize, Serialize};

use super::{env_parse, env_string, ConfigError};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// HMAC algorithms accepted for signing credentials
pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to sign and verify every credential
    pub secret: String,

    /// Algorithm identifier (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access credential lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh credential lifetime in days
    pub refresh_token_expiry_days: i64,

    /// `iss` claim written into and required from every credential
    pub issuer: String,

    /// `aud` claim written into and required from every credential
    pub audience: String,

    /// Clock skew tolerated when checking `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            algorithm: default_algorithm(),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 30,
            issuer: String::from("tessera"),
            audience: String::from("tessera-api"),
            leeway_seconds: default_leeway(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    /// Set the signing algorithm identifier
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Load from `JWT_*`, `ACCESS_TOKEN_EXPIRE_MINUTES` and `REFRESH_TOKEN_EXPIRE_DAYS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            secret: env_string("JWT_SECRET", DEFAULT_SECRET),
            algorithm: env_string("JWT_ALGORITHM", &defaults.algorithm).to_uppercase(),
            access_token_expiry_minutes: env_parse(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                defaults.access_token_expiry_minutes,
            )?,
            refresh_token_expiry_days: env_parse(
                "REFRESH_TOKEN_EXPIRE_DAYS",
                defaults.refresh_token_expiry_days,
            )?,
            issuer: env_string("JWT_ISSUER", &defaults.issuer),
            audience: env_string("JWT_AUDIENCE", &defaults.audience),
            leeway_seconds: env_parse("JWT_LEEWAY_SECONDS", defaults.leeway_seconds)?,
        })
    }

    /// Reject empty secrets, unsupported algorithms and non-positive lifetimes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "JWT_SECRET".to_string(),
                value: String::new(),
            });
        }
        if !SUPPORTED_ALGORITHMS.contains(&self.algorithm.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "JWT_ALGORITHM".to_string(),
                value: self.algorithm.clone(),
            });
        }
        if self.access_token_expiry_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES".to_string(),
                value: self.access_token_expiry_minutes.to_string(),
            });
        }
        if self.refresh_token_expiry_days <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "REFRESH_TOKEN_EXPIRE_DAYS".to_string(),
                value: self.refresh_token_expiry_days.to_string(),
            });
        }
        Ok(())
    }
}

/// Password and bearer-secret hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    pub bcrypt_cost: u32,

    /// Minimum accepted password length in characters
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            min_length: 8,
        }
    }
}

impl PasswordConfig {
    /// Load from `BCRYPT_COST` and `PASSWORD_MIN_LENGTH`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            bcrypt_cost: env_parse("BCRYPT_COST", defaults.bcrypt_cost)?,
            min_length: env_parse("PASSWORD_MIN_LENGTH", defaults.min_length)?,
        };
        if !(4..=31).contains(&config.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST".to_string(),
                value: config.bcrypt_cost.to_string(),
            });
        }
        Ok(config)
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            password: PasswordConfig::from_env()?,
        })
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_leeway() -> u64 {
    60
}
