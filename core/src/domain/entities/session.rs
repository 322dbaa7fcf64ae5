//! Refresh session record persisted for every live refresh credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted evidence that a refresh credential was legitimately issued
///
/// The credential itself is never stored, only a slow salted hash of it.
/// At most one record exists per subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSession {
    /// Random session id, embedded in the credential as `jti`
    pub session_id: String,

    /// Owning subject
    pub subject: String,

    /// Hash of the refresh credential
    pub token_hash: String,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the record no longer authorizes rotation
    pub expires_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Creates a new session record
    pub fn new(
        session_id: String,
        subject: String,
        token_hash: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            subject,
            token_hash,
            created_at,
            expires_at,
        }
    }

    /// Whether the record has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
