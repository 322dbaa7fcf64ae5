//! User repository trait defining the interface for account persistence.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Emails are stored and looked up in normalized form; callers normalize
/// before calling.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    /// * `Err(DomainError)` - Other failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the stored password hash for a user
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - No such user
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<User, DomainError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - The user was removed
    /// * `Ok(false)` - No such user
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        (**self).find_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        (**self).create(user).await
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<User, DomainError> {
        (**self).update_password(id, password_hash).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        (**self).delete(id).await
    }
}
