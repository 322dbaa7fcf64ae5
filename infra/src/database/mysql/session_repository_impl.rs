//! MySQL implementation of the SessionRepository trait.
//!
//! One row per live refresh session. A UNIQUE index on `subject` backs the
//! one-session-per-subject rule at the schema level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ts_core::domain::entities::session::RefreshSession;
use ts_core::errors::DomainError;
use ts_core::repositories::SessionRepository;

use super::storage_error;

/// MySQL implementation of SessionRepository
#[derive(Clone)]
pub struct MySqlSessionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    /// Create a new MySQL session repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshSession entity
    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<RefreshSession, DomainError> {
        Ok(RefreshSession {
            session_id: row.try_get("session_id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get session_id: {}", e),
            })?,
            subject: row.try_get("subject").map_err(|e| DomainError::Internal {
                message: format!("Failed to get subject: {}", e),
            })?,
            token_hash: row.try_get("token_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token_hash: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
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

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM refresh_sessions WHERE subject = ?")
            .bind(subject)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to delete previous sessions", e))?;

        let query = r#"
            INSERT INTO refresh_sessions (
                session_id, subject, token_hash, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&session.session_id)
            .bind(&session.subject)
            .bind(&session.token_hash)
            .bind(session.created_at)
            .bind(session.expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to insert session", e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit session replacement", e))?;

        Ok(())
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<RefreshSession>, DomainError> {
        let query = r#"
            SELECT session_id, subject, token_hash, created_at, expires_at
            FROM refresh_sessions
            WHERE session_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find session", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    async fn rotate(
        &self,
        session_id: &str,
        session: RefreshSession,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin transaction", e))?;

        let consumed = sqlx::query("DELETE FROM refresh_sessions WHERE session_id = ?")
            .bind(session_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to consume session", e))?;

        if consumed.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| storage_error("Failed to roll back rotation", e))?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM refresh_sessions WHERE subject = ?")
            .bind(&session.subject)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to delete previous sessions", e))?;

        let query = r#"
            INSERT INTO refresh_sessions (
                session_id, subject, token_hash, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&session.session_id)
            .bind(&session.subject)
            .bind(&session.token_hash)
            .bind(session.created_at)
            .bind(session.expires_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to insert session", e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit rotation", e))?;

        Ok(true)
    }

    async fn delete_by_session_id(&self, session_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_subject(&self, subject: &str) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE subject = ?")
            .bind(subject)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete sessions for subject", e))?;

        Ok(result.rows_affected() as usize)
    }
}
