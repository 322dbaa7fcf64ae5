use actix_web::{web, HttpResponse};
use validator::Validate;

use ts_core::repositories::{SessionRepository, UserRepository};

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Exchanges email and password for a fresh credential pair. Any earlier
/// session of the same account stops being refreshable.
///
/// ## Errors
/// - 401 Unauthorized: Unknown email, wrong password or inactive account
pub async fn login<U, R>(
    state: web::Data<AppState<U, R>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
