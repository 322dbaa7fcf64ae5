//! In-memory implementation of SessionRepository
//!
//! Used by tests and by development builds without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::session::RefreshSession;
use crate::errors::DomainError;

use super::r#trait::SessionRepository;

/// Session repository backed by a map keyed on session id
///
/// Each trait method takes the lock once, which makes the replace, rotate
/// and delete operations atomic with respect to each other.
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, RefreshSession>>>,
}

impl InMemorySessionRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held for `subject`
    pub async fn count_for_subject(&self, subject: &str) -> usize {
        let sessions = self.sessions.read().await;
        sessions.values().filter(|s| s.subject == subject).count()
    }

    /// Records currently held for `subject`
    pub async fn find_by_subject(&self, subject: &str) -> Vec<RefreshSession> {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .filter(|s| s.subject == subject)
            .cloned()
            .collect()
    }

    /// Total number of records
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn replace_for_subject(
        &self,
        subject: &str,
        session: RefreshSession,
    ) -> Result<(), DomainError> {
        if session.subject != subject {
            return Err(DomainError::Validation {
                message: "Session subject does not match".to_string(),
            });
        }

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.subject != subject);
        sessions.insert(session.session_id.clone(), session);
        Ok(())
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<RefreshSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn rotate(
        &self,
        session_id: &str,
        session: RefreshSession,
    ) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(session_id).is_none() {
            return Ok(false);
        }

        sessions.retain(|_, s| s.subject != session.subject);
        sessions.insert(session.session_id.clone(), session);
        Ok(true)
    }

    async fn delete_by_session_id(&self, session_id: &str) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(session_id).is_some())
    }

    async fn delete_all_for_subject(&self, subject: &str) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.subject != subject);
        Ok(before - sessions.len())
    }
}
