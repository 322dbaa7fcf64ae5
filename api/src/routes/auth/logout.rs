use actix_web::{web, HttpResponse};

use ts_core::repositories::{SessionRepository, UserRepository};

use crate::dto::auth::{MessageResponse, RefreshTokenRequest};

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Always answers 200. A missing body, a bad credential and a storage
/// failure are all treated as "already logged out".
pub async fn logout<U, R>(
    state: web::Data<AppState<U, R>>,
    request: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
{
    match request {
        Some(request) => state.auth_service.logout(&request.refresh_token).await,
        None => tracing::debug!("Logout without a readable body"),
    }

    HttpResponse::Ok().json(MessageResponse::new("Logged out"))
}
