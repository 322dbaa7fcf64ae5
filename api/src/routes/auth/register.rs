use actix_web::{web, HttpResponse};
use validator::Validate;

use ts_core::repositories::{SessionRepository, UserRepository};

use crate::dto::auth::{RegisterRequest, UserResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "email": "a@example.com",
///     "password": "correct horse"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The created account as a [`UserResponse`].
///
/// ## Errors
/// - 400 Bad Request: Invalid email or password below the minimum length
/// - 409 Conflict: Email already registered
pub async fn register<U, R>(
    state: web::Data<AppState<U, R>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.email, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
