//! Authentication route handlers
//!
//! Account endpoints (register, me, change password, delete account) and
//! the credential lifecycle endpoints (login, refresh, logout).

pub mod change_password;
pub mod delete_account;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use ts_core::repositories::{SessionRepository, UserRepository};
use ts_core::services::auth::AuthService;

/// Application state that holds shared services
pub struct AppState<U, R>
where
    U: UserRepository,
    R: SessionRepository,
{
    pub auth_service: Arc<AuthService<U, R>>,
}

impl<U, R> AppState<U, R>
where
    U: UserRepository,
    R: SessionRepository,
{
    pub fn new(auth_service: Arc<AuthService<U, R>>) -> Self {
        Self { auth_service }
    }
}
