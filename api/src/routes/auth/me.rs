use actix_web::{web, HttpResponse};

use ts_core::repositories::{SessionRepository, UserRepository};

use crate::dto::auth::UserResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/auth/me
///
/// Requires a Bearer access credential.
pub async fn me<U, R>(state: web::Data<AppState<U, R>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
{
    match state.auth_service.find_active_user(&auth.subject).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
