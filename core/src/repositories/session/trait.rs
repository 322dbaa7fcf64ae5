//! Session repository trait defining the interface for refresh session persistence.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::session::RefreshSession;
use crate::errors::DomainError;

/// Repository trait for refresh session persistence
///
/// Every method is atomic with respect to concurrent callers. Backend
/// failures surface as `DomainError::StorageUnavailable`.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Atomically remove every record for `subject` and insert `session`
    ///
    /// # Arguments
    /// * `subject` - Subject whose lineage is being replaced
    /// * `session` - The new record; its `subject` must equal `subject`
    ///
    /// # Returns
    /// * `Ok(())` - Exactly one record now exists for the subject
    /// * `Err(DomainError)` - Store failure; no partial state is visible
    async fn replace_for_subject(
        &self,
        subject: &str,
        session: RefreshSession,
    ) -> Result<(), DomainError>;

    /// Find a record by its session id
    ///
    /// # Returns
    /// * `Ok(Some(RefreshSession))` - Record found
    /// * `Ok(None)` - No record with this id
    /// * `Err(DomainError)` - Store failure
    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<RefreshSession>, DomainError>;

    /// Atomically consume `session_id` and install `session` in its place
    ///
    /// Succeeds only if this call removed the record for `session_id`.
    /// On success every other record of the new session's subject is gone
    /// too, so the new record is the subject's only one. On failure nothing
    /// changes.
    ///
    /// # Returns
    /// * `Ok(true)` - The old record was consumed and `session` stored
    /// * `Ok(false)` - No record existed for `session_id`; nothing stored
    /// * `Err(DomainError)` - Store failure; no partial state is visible
    async fn rotate(
        &self,
        session_id: &str,
        session: RefreshSession,
    ) -> Result<bool, DomainError>;

    /// Remove the record with this session id, if present
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the record
    /// * `Ok(false)` - No record existed (or another caller removed it first)
    /// * `Err(DomainError)` - Store failure
    async fn delete_by_session_id(&self, session_id: &str) -> Result<bool, DomainError>;

    /// Remove every record belonging to `subject`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records removed
    /// * `Err(DomainError)` - Store failure
    async fn delete_all_for_subject(&self, subject: &str) -> Result<usize, DomainError>;
}

#[async_trait]
impl<T: SessionRepository + ?Sized> SessionRepository for Arc<T> {
    async fn replace_for_subject(
        &self,
        subject: &str,
        session: RefreshSession,
    ) -> Result<(), DomainError> {
        (**self).replace_for_subject(subject, session).await
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<RefreshSession>, DomainError> {
        (**self).find_by_session_id(session_id).await
    }

    async fn rotate(
        &self,
        session_id: &str,
        session: RefreshSession,
    ) -> Result<bool, DomainError> {
        (**self).rotate(session_id, session).await
    }

    async fn delete_by_session_id(&self, session_id: &str) -> Result<bool, DomainError> {
        (**self).delete_by_session_id(session_id).await
    }

    async fn delete_all_for_subject(&self, subject: &str) -> Result<usize, DomainError> {
        (**self).delete_all_for_subject(subject).await
    }
}
