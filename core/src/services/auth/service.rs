//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};
use ts_shared::utils::validation::{is_valid_email, meets_password_policy, normalize_email};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{SessionRepository, UserRepository};
use crate::services::hashing::{hash_blocking, verify_blocking, SecretHasher};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service for account and session flows
pub struct AuthService<U, R>
where
    U: UserRepository,
    R: SessionRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for credential lifecycle
    token_service: Arc<TokenService<R>>,
    /// Hasher for login passwords
    hasher: Arc<dyn SecretHasher>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, R> AuthService<U, R>
where
    U: UserRepository,
    R: SessionRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for credential issue and rotation
    /// * `hasher` - Hasher for login passwords
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<R>>,
        hasher: Arc<dyn SecretHasher>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            hasher,
            config,
        }
    }

    /// Token service backing this account service
    pub fn token_service(&self) -> &Arc<TokenService<R>> {
        &self.token_service
    }

    /// Register a new account
    ///
    /// # Arguments
    ///
    /// * `email` - Raw email; normalized before use
    /// * `password` - Plain password
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(ValidationError)` - Bad email or password too short
    /// * `Err(AuthError::UserAlreadyExists)` - Email already registered
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<User> {
        if !self.config.allow_registration {
            return Err(DomainError::Unauthorized);
        }

        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        self.check_password_policy(password)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = hash_blocking(self.hasher.clone(), password.to_string()).await?;
        let user = self
            .user_repository
            .create(User::new(email, password_hash))
            .await?;

        info!(user_id = %user.id, subject = %user.email, "Registered user");
        Ok(user)
    }

    /// Log in with email and password
    ///
    /// Any prior session of the account is destroyed.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh credential pair
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email, wrong password or inactive account
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let email = normalize_email(email);

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!(subject = %email, "Login for unknown account");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let password_matches = verify_blocking(
            self.hasher.clone(),
            password.to_string(),
            user.password_hash.clone(),
        )
        .await;
        if !password_matches {
            warn!(subject = %email, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_active {
            warn!(subject = %email, "Login for inactive account");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.token_service.issue(&user.email).await
    }

    /// Exchange a refresh credential for a new pair
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.token_service.refresh(refresh_token).await
    }

    /// End the session behind a refresh credential; never fails
    pub async fn logout(&self, refresh_token: &str) {
        self.token_service.logout(refresh_token).await
    }

    /// Resolve an access credential to its active user
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The user
    /// * `Err(TokenError::InvalidCredential)` - Credential rejected
    /// * `Err(DomainError::Unauthorized)` - User missing or inactive
    pub async fn current_user(&self, access_token: &str) -> DomainResult<User> {
        let subject = self.token_service.verify_access(access_token)?;
        self.find_active_user(&subject).await
    }

    /// Load the active user behind an already verified subject
    pub async fn find_active_user(&self, subject: &str) -> DomainResult<User> {
        match self.user_repository.find_by_email(subject).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(DomainError::Unauthorized),
        }
    }

    /// Change the password of an authenticated user
    ///
    /// Existing sessions stay valid.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Password changed
    /// * `Err(AuthError::IncorrectPassword)` - `old_password` did not match
    /// * `Err(ValidationError::PasswordTooShort)` - New password rejected
    pub async fn change_password(
        &self,
        subject: &str,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self.find_active_user(subject).await?;

        let password_matches = verify_blocking(
            self.hasher.clone(),
            old_password.to_string(),
            user.password_hash.clone(),
        )
        .await;
        if !password_matches {
            warn!(subject, "Password change with incorrect old password");
            return Err(AuthError::IncorrectPassword.into());
        }
        self.check_password_policy(new_password)?;

        let password_hash = hash_blocking(self.hasher.clone(), new_password.to_string()).await?;
        self.user_repository
            .update_password(user.id, &password_hash)
            .await?;

        info!(user_id = %user.id, subject, "Password changed");
        Ok(())
    }

    /// Delete an authenticated user's account and every session it holds
    pub async fn delete_account(&self, subject: &str) -> DomainResult<()> {
        let user = self.find_active_user(subject).await?;

        self.token_service.revoke_all(&user.email).await?;
        if !self.user_repository.delete(user.id).await? {
            return Err(AuthError::UserNotFound.into());
        }

        info!(user_id = %user.id, subject, "Account deleted");
        Ok(())
    }

    fn check_password_policy(&self, password: &str) -> DomainResult<()> {
        if meets_password_policy(password, self.config.password_min_length) {
            Ok(())
        } else {
            Err(ValidationError::PasswordTooShort {
                min_length: self.config.password_min_length,
            }
            .into())
        }
    }
}
