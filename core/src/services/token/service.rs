//! Token lifecycle service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::entities::session::RefreshSession;
use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError, ValidationError};
use crate::repositories::SessionRepository;
use crate::services::hashing::{hash_blocking, verify_blocking, SecretHasher};

use super::clock::{Clock, SystemClock};
use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Service that issues, rotates and revokes credential pairs
///
/// Holds no mutable state of its own. Every durable fact lives in the
/// session repository, so one instance can be shared across tasks.
pub struct TokenService<R: SessionRepository> {
    pub(crate) repository: R,
    hasher: Arc<dyn SecretHasher>,
    clock: Arc<dyn Clock>,
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl<R: SessionRepository> TokenService<R> {
    /// Creates a new token service running on the wall clock
    ///
    /// # Arguments
    ///
    /// * `repository` - Session repository for persistence
    /// * `hasher` - Hasher applied to refresh credentials before storage
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or error if the signing setup is invalid
    pub fn new(
        repository: R,
        hasher: Arc<dyn SecretHasher>,
        config: TokenServiceConfig,
    ) -> Result<Self, DomainError> {
        Self::with_clock(repository, hasher, Arc::new(SystemClock), config)
    }

    /// Creates a new token service with an explicit clock
    pub fn with_clock(
        repository: R,
        hasher: Arc<dyn SecretHasher>,
        clock: Arc<dyn Clock>,
        config: TokenServiceConfig,
    ) -> Result<Self, DomainError> {
        let codec = TokenCodec::new(&config)?;

        Ok(Self {
            repository,
            hasher,
            clock,
            codec,
            config,
        })
    }

    /// Service configuration
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a fresh pair for `subject`, replacing any prior session
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The new pair; its refresh credential is the only live one
    /// * `Err(DomainError::ValidationErr)` - Empty subject
    /// * `Err(DomainError::StorageUnavailable)` - The session could not be stored
    pub async fn issue(&self, subject: &str) -> Result<TokenPair, DomainError> {
        if subject.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "subject".to_string(),
            }
            .into());
        }

        let now = self.clock.now();
        let (pair, session) = self.mint(subject, now).await?;
        let session_id = session.session_id.clone();

        self.repository.replace_for_subject(subject, session).await?;

        info!(subject, session_id = %session_id, "Issued credential pair");
        Ok(pair)
    }

    /// Exchanges a refresh credential for a new pair
    ///
    /// The presented credential is consumed; presenting it again revokes
    /// every session of its subject.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Rotation succeeded
    /// * `Err(TokenError::InvalidCredential)` - Did not decode as a refresh credential
    /// * `Err(TokenError::ReuseDetected)` - Unknown, mismatched or already consumed session
    /// * `Err(TokenError::ExpiredCredential)` - Session record has expired
    /// * `Err(DomainError::StorageUnavailable)` - Store failure
    pub async fn refresh(&self, presented: &str) -> Result<TokenPair, DomainError> {
        let now = self.clock.now();

        let claims = match self.codec.decode(presented, TokenKind::Refresh, now) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Rejected refresh credential");
                return Err(TokenError::InvalidCredential.into());
            }
        };
        let subject = claims.sub.as_str();
        let session_id = claims
            .session_id()
            .ok_or(TokenError::InvalidCredential)?;

        let record = match self.repository.find_by_session_id(session_id).await? {
            Some(record) => record,
            None => {
                warn!(subject, session_id, "Refresh presented for unknown session");
                return Err(self.revoke_lineage(subject).await);
            }
        };

        let hash_matches = verify_blocking(
            self.hasher.clone(),
            presented.to_string(),
            record.token_hash.clone(),
        )
        .await;
        if record.subject != subject || !hash_matches {
            warn!(subject, session_id, "Refresh credential does not match its session");
            return Err(self.revoke_lineage(subject).await);
        }

        if record.is_expired_at(now) {
            self.repository.delete_by_session_id(session_id).await?;
            info!(subject, session_id, "Refresh session expired");
            return Err(TokenError::ExpiredCredential.into());
        }

        let (pair, session) = self.mint(subject, now).await?;
        let next_session_id = session.session_id.clone();

        // Consume and replace in one step; losing means another caller rotated first.
        if !self.repository.rotate(session_id, session).await? {
            warn!(subject, session_id, "Refresh session already consumed");
            return Err(self.revoke_lineage(subject).await);
        }

        info!(
            subject,
            previous_session_id = session_id,
            session_id = %next_session_id,
            "Rotated refresh credential"
        );
        Ok(pair)
    }

    /// Ends the session behind a refresh credential
    ///
    /// Never fails. Undecodable credentials count as already logged out
    /// and store failures are only logged.
    pub async fn logout(&self, presented: &str) {
        let claims = match self
            .codec
            .decode(presented, TokenKind::Refresh, self.clock.now())
        {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Logout with undecodable credential");
                return;
            }
        };
        let Some(session_id) = claims.session_id() else {
            return;
        };

        match self.repository.delete_by_session_id(session_id).await {
            Ok(true) => info!(subject = %claims.sub, session_id, "Logged out"),
            Ok(false) => debug!(subject = %claims.sub, session_id, "Session already gone"),
            Err(e) => warn!(
                subject = %claims.sub,
                session_id,
                error = %e,
                "Failed to delete session during logout"
            ),
        }
    }

    /// Checks an access credential and returns its subject
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The subject
    /// * `Err(TokenError::InvalidCredential)` - Bad signature, malformed, expired or wrong kind
    pub fn verify_access(&self, presented: &str) -> Result<String, DomainError> {
        self.codec
            .decode(presented, TokenKind::Access, self.clock.now())
            .map(|claims| claims.sub)
            .map_err(|e| {
                debug!(error = %e, "Rejected access credential");
                DomainError::Token(TokenError::InvalidCredential)
            })
    }

    /// Deletes every session of `subject`
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of sessions removed
    pub async fn revoke_all(&self, subject: &str) -> Result<usize, DomainError> {
        let count = self.repository.delete_all_for_subject(subject).await?;
        info!(subject, revoked = count, "Revoked all sessions");
        Ok(count)
    }

    /// Builds a pair and the session record backing its refresh half
    async fn mint(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<(TokenPair, RefreshSession), DomainError> {
        let access_lifetime = self.config.access_lifetime();
        let refresh_lifetime = self.config.refresh_lifetime();
        let session_id = Uuid::new_v4().to_string();

        let access_claims = Claims::access(
            subject,
            now,
            access_lifetime,
            &self.config.issuer,
            &self.config.audience,
        );
        let refresh_claims = Claims::refresh(
            subject,
            &session_id,
            now,
            refresh_lifetime,
            &self.config.issuer,
            &self.config.audience,
        );

        let access_token = self.codec.encode(&access_claims)?;
        let refresh_token = self.codec.encode(&refresh_claims)?;
        let token_hash = hash_blocking(self.hasher.clone(), refresh_token.clone()).await?;

        let session = RefreshSession::new(
            session_id,
            subject.to_string(),
            token_hash,
            now,
            now + refresh_lifetime,
        );
        let pair = TokenPair::new(
            access_token,
            refresh_token,
            access_lifetime.num_seconds(),
            refresh_lifetime.num_seconds(),
        );

        Ok((pair, session))
    }

    /// Wipes the subject's lineage and returns the error to report
    ///
    /// A store failure during the wipe is reported instead of
    /// `ReuseDetected`.
    async fn revoke_lineage(&self, subject: &str) -> DomainError {
        match self.repository.delete_all_for_subject(subject).await {
            Ok(count) => {
                warn!(subject, revoked = count, "Refresh reuse detected, lineage revoked");
                TokenError::ReuseDetected.into()
            }
            Err(e) => {
                error!(subject, error = %e, "Failed to revoke lineage after reuse");
                e
            }
        }
    }
}
