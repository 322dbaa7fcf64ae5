//! Secret hasher trait and the bcrypt implementation

use std::sync::Arc;

use sha2::{Digest, Sha256};
use ts_shared::config::PasswordConfig;

use crate::errors::DomainError;

/// Salted, slow, one-way hash for bearer secrets
pub trait SecretHasher: Send + Sync {
    /// Hash a secret for storage
    fn hash(&self, secret: &str) -> Result<String, DomainError>;

    /// Check a secret against a stored digest
    ///
    /// Returns `false` for a mismatch and for an unparseable digest.
    fn verify(&self, secret: &str, digest: &str) -> bool;
}

/// bcrypt-backed hasher
///
/// bcrypt ignores input past 72 bytes and signed refresh credentials are
/// longer than that, so the secret is reduced to its SHA-256 hex digest
/// (64 bytes) before it reaches bcrypt.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with an explicit work factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Create a hasher from password configuration
    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }

    /// Configured work factor
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn prehash(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

impl SecretHasher for BcryptHasher {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        bcrypt::hash(prehash(secret), self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash secret: {}", e),
        })
    }

    fn verify(&self, secret: &str, digest: &str) -> bool {
        bcrypt::verify(prehash(secret), digest).unwrap_or(false)
    }
}

/// Hashes `secret` on the blocking thread pool, off the async workers
pub async fn hash_blocking(
    hasher: Arc<dyn SecretHasher>,
    secret: String,
) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || hasher.hash(&secret))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Hashing task failed: {}", e),
        })?
}

/// Verifies `secret` against `digest` on the blocking thread pool
///
/// A panicked or cancelled task counts as a mismatch.
pub async fn verify_blocking(
    hasher: Arc<dyn SecretHasher>,
    secret: String,
    digest: String,
) -> bool {
    tokio::task::spawn_blocking(move || hasher.verify(&secret, &digest))
        .await
        .unwrap_or(false)
}
