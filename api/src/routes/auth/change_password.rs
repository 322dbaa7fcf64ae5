use actix_web::{web, HttpResponse};
use validator::Validate;

use ts_core::repositories::{SessionRepository, UserRepository};

use crate::dto::auth::{ChangePasswordRequest, MessageResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/change-password
///
/// ## Errors
/// - 400 Bad Request: Old password incorrect or new password too short
/// - 401 Unauthorized: Missing or invalid access credential
pub async fn change_password<U, R>(
    state: web::Data<AppState<U, R>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
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
        .change_password(&auth.subject, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed")),
        Err(error) => handle_domain_error(error),
    }
}
