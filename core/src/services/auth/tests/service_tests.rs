//! Unit tests for the authentication service

use std::sync::Arc;

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{InMemorySessionRepository, InMemoryUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::hashing::{BcryptHasher, SecretHasher};
use crate::services::token::{TokenService, TokenServiceConfig};

const PASSWORD: &str = "s3cret-password";

struct Fixture {
    service: AuthService<InMemoryUserRepository, InMemorySessionRepository>,
    users: Arc<InMemoryUserRepository>,
    sessions: InMemorySessionRepository,
}

fn fixture() -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = InMemorySessionRepository::new();
    let hasher: Arc<dyn SecretHasher> = Arc::new(BcryptHasher::new(4));
    let token_service = TokenService::new(
        sessions.clone(),
        hasher.clone(),
        TokenServiceConfig {
            jwt_secret: "auth-test-secret".to_string(),
            ..TokenServiceConfig::default()
        },
    )
    .unwrap();

    let service = AuthService::new(
        users.clone(),
        Arc::new(token_service),
        hasher,
        AuthServiceConfig::default(),
    );

    Fixture {
        service,
        users,
        sessions,
    }
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let f = fixture();

    let user = f.service.register("  A@X.Com ", PASSWORD).await.unwrap();

    assert_eq!(user.email, "a@x.com");
    assert_ne!(user.password_hash, PASSWORD);
    assert!(user.is_active);
}

#[tokio::test]
async fn test_register_rejects_duplicates_case_insensitively() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();

    let result = f.service.register("A@X.COM", PASSWORD).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_register_validates_input() {
    let f = fixture();

    assert!(matches!(
        f.service.register("not-an-email", PASSWORD).await,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
    assert!(matches!(
        f.service.register("   ", PASSWORD).await,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
    assert!(matches!(
        f.service.register("a@x.com", "short").await,
        Err(DomainError::ValidationErr(ValidationError::PasswordTooShort { min_length: 8 }))
    ));
    assert!(f.users.is_empty().await);
}

#[tokio::test]
async fn test_registration_can_be_disabled() {
    let f = fixture();
    let service = AuthService::new(
        f.users.clone(),
        f.service.token_service().clone(),
        Arc::new(BcryptHasher::new(4)),
        AuthServiceConfig {
            allow_registration: false,
            ..AuthServiceConfig::default()
        },
    );

    assert!(matches!(
        service.register("a@x.com", PASSWORD).await,
        Err(DomainError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_login_issues_pair() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();

    let pair = f.service.login("A@x.com", PASSWORD).await.unwrap();

    let user = f.service.current_user(&pair.access_token).await.unwrap();
    assert_eq!(user.email, "a@x.com");
    assert_eq!(f.sessions.count_for_subject("a@x.com").await, 1);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let f = fixture();
    let user = f.service.register("a@x.com", PASSWORD).await.unwrap();

    let unknown = f.service.login("b@x.com", PASSWORD).await;
    let wrong = f.service.login("a@x.com", "wrong-password").await;

    let mut inactive = user.clone();
    inactive.deactivate();
    f.users.delete(user.id).await.unwrap();
    f.users.create(inactive).await.unwrap();
    let disabled = f.service.login("a@x.com", PASSWORD).await;

    for result in [unknown, wrong, disabled] {
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }
    assert!(f.sessions.is_empty().await);
}

#[tokio::test]
async fn test_second_login_kills_first_session() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();

    let first = f.service.login("a@x.com", PASSWORD).await.unwrap();
    let second = f.service.login("a@x.com", PASSWORD).await.unwrap();

    assert!(matches!(
        f.service.refresh(&first.refresh_token).await,
        Err(DomainError::Token(TokenError::ReuseDetected))
    ));
    // Reuse of the stale credential also wiped the newer session.
    assert!(f.service.refresh(&second.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_login_refresh_replay_scenario() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();

    let first = f.service.login("a@x.com", PASSWORD).await.unwrap();
    let second = f.service.refresh(&first.refresh_token).await.unwrap();

    assert!(matches!(
        f.service.refresh(&first.refresh_token).await,
        Err(DomainError::Token(TokenError::ReuseDetected))
    ));
    assert!(matches!(
        f.service.refresh(&second.refresh_token).await,
        Err(DomainError::Token(TokenError::ReuseDetected))
    ));
    assert!(f.sessions.is_empty().await);
}

#[tokio::test]
async fn test_logout() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();
    let pair = f.service.login("a@x.com", PASSWORD).await.unwrap();

    f.service.logout(&pair.refresh_token).await;
    f.service.logout("garbage").await;

    assert!(f.sessions.is_empty().await);
}

#[tokio::test]
async fn test_current_user_rejects_refresh_credential() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();
    let pair = f.service.login("a@x.com", PASSWORD).await.unwrap();

    assert!(matches!(
        f.service.current_user(&pair.refresh_token).await,
        Err(DomainError::Token(TokenError::InvalidCredential))
    ));
}

#[tokio::test]
async fn test_current_user_for_deleted_account() {
    let f = fixture();
    let user = f.service.register("a@x.com", PASSWORD).await.unwrap();
    let pair = f.service.login("a@x.com", PASSWORD).await.unwrap();

    f.users.delete(user.id).await.unwrap();

    assert!(matches!(
        f.service.current_user(&pair.access_token).await,
        Err(DomainError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_change_password() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();
    let pair = f.service.login("a@x.com", PASSWORD).await.unwrap();

    f.service
        .change_password("a@x.com", PASSWORD, "another-password")
        .await
        .unwrap();

    assert!(f.service.login("a@x.com", PASSWORD).await.is_err());
    // Sessions survive a password change; the login above failed so it did not replace it.
    assert!(f.service.refresh(&pair.refresh_token).await.is_ok());
    assert!(f.service.login("a@x.com", "another-password").await.is_ok());
}

#[tokio::test]
async fn test_change_password_failures() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();

    assert!(matches!(
        f.service
            .change_password("a@x.com", "wrong-password", "another-password")
            .await,
        Err(DomainError::Auth(AuthError::IncorrectPassword))
    ));
    assert!(matches!(
        f.service.change_password("a@x.com", PASSWORD, "short").await,
        Err(DomainError::ValidationErr(ValidationError::PasswordTooShort { .. }))
    ));
    assert!(matches!(
        f.service
            .change_password("b@x.com", PASSWORD, "another-password")
            .await,
        Err(DomainError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_delete_account_revokes_sessions() {
    let f = fixture();
    f.service.register("a@x.com", PASSWORD).await.unwrap();
    let pair = f.service.login("a@x.com", PASSWORD).await.unwrap();

    f.service.delete_account("a@x.com").await.unwrap();

    assert!(f.users.is_empty().await);
    assert!(f.sessions.is_empty().await);
    assert!(f.service.refresh(&pair.refresh_token).await.is_err());
    assert!(f.service.login("a@x.com", PASSWORD).await.is_err());
}
