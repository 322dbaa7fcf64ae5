//! Signed credential encoding and decoding

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Why a presented credential failed to decode
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed credential")]
    Malformed,

    #[error("bad signature")]
    BadSignature,

    #[error("credential expired")]
    Expired,

    #[error("wrong credential kind")]
    WrongKind,
}

/// Encodes claims to signed strings and back
///
/// Expiry is checked here against the caller's `now` rather than the
/// wall clock, so services can run on an injected clock.
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
}

impl TokenCodec {
    /// Create a codec for an HMAC algorithm
    ///
    /// # Returns
    ///
    /// * `Err(DomainError::Internal)` - Non-HMAC algorithm or empty secret
    pub fn new(config: &TokenServiceConfig) -> Result<Self, DomainError> {
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Internal {
                message: format!("Unsupported JWT algorithm: {:?}", config.algorithm),
            });
        }
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT secret must not be empty".to_string(),
            });
        }

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Ok(Self {
            algorithm: config.algorithm,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            leeway_seconds: i64::try_from(config.leeway_seconds).unwrap_or(i64::MAX),
        })
    }

    /// Encodes claims into a signed credential
    pub fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Decodes and checks a credential
    ///
    /// # Arguments
    ///
    /// * `token` - The presented credential
    /// * `expected` - Kind the caller is prepared to accept
    /// * `now` - Current time for the expiry check
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer, audience, kind and expiry all check out
    /// * `Err(CodecError)` - The first check that failed
    pub fn decode(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, CodecError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => CodecError::BadSignature,
                ErrorKind::ExpiredSignature => CodecError::Expired,
                _ => CodecError::Malformed,
            })?
            .claims;

        if claims.typ != expected {
            return Err(CodecError::WrongKind);
        }
        if claims.sub.is_empty() {
            return Err(CodecError::Malformed);
        }
        if expected == TokenKind::Refresh && claims.session_id().is_none() {
            return Err(CodecError::Malformed);
        }
        // Access credentials get no grace period past `exp`.
        let leeway = match expected {
            TokenKind::Access => 0,
            TokenKind::Refresh => self.leeway_seconds,
        };
        if claims.exp < now.timestamp().saturating_sub(leeway) {
            return Err(CodecError::Expired);
        }

        Ok(claims)
    }
}
