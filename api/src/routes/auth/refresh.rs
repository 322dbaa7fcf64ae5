use actix_web::{web, HttpResponse};
use validator::Validate;

use ts_core::repositories::{SessionRepository, UserRepository};

use crate::dto::auth::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates a refresh credential. The presented credential is consumed and
/// can never be used again.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer",
///     "expires_in": 900,
///     "refresh_expires_in": 2592000
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired or replayed credential, reported uniformly
/// - 503 Service Unavailable: Session store unreachable
pub async fn refresh<U, R>(
    state: web::Data<AppState<U, R>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
