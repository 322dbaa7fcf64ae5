use actix_web::{web, HttpResponse};

use ts_core::repositories::{SessionRepository, UserRepository};

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for DELETE /api/v1/auth/account
///
/// Revokes every session of the caller, then removes the account.
pub async fn delete_account<U, R>(
    state: web::Data<AppState<U, R>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
{
    match state.auth_service.delete_account(&auth.subject).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(error),
    }
}
