//! Mapping of domain errors onto HTTP responses
//!
//! Every error body is a [`ErrorResponse`] from `ts_shared`. Credential
//! rejections are collapsed into one uniform 401 so that a caller cannot
//! tell an expired session from a replayed one.

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use ts_core::errors::{AuthError, DomainError, TokenError};
use ts_shared::errors::{error_codes, ErrorResponse};

const SESSION_INVALID_MESSAGE: &str = "Session invalid, please log in again";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => {
                tracing::debug!(error = %auth_error, "Login rejected");
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    error_codes::INVALID_CREDENTIALS,
                    "Invalid email or password",
                ))
            }
            AuthError::UserAlreadyExists => HttpResponse::Conflict().json(ErrorResponse::new(
                error_codes::CONFLICT,
                "Email already registered",
            )),
            AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                "User not found",
            )),
            AuthError::IncorrectPassword => HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::BAD_REQUEST,
                "Old password is incorrect",
            )),
        },

        DomainError::Token(token_error) => match token_error {
            TokenError::InvalidCredential
            | TokenError::ExpiredCredential
            | TokenError::ReuseDetected => {
                tracing::debug!(error = %token_error, "Credential rejected");
                session_invalid_response()
            }
            TokenError::TokenGenerationFailed => {
                tracing::error!(error = %token_error, "Token generation failed");
                internal_error_response()
            }
        },

        DomainError::ValidationErr(validation_error) => HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, validation_error.to_string()),
        ),

        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message)),

        DomainError::Unauthorized => unauthorized_response("Authentication required"),

        DomainError::StorageUnavailable { message } => {
            tracing::error!(error = %message, "Session store unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable, please retry",
            ))
        }

        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            internal_error_response()
        }
    }
}

/// Uniform 401 for every rejected refresh credential
pub fn session_invalid_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::SESSION_INVALID,
        SESSION_INVALID_MESSAGE,
    ))
}

/// 401 for a missing or rejected bearer credential
pub fn unauthorized_response(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(error_codes::UNAUTHORIZED, message))
}

fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

/// 400 listing the failing fields of a request body
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(response)
}

/// `JsonConfig` error handler rendering body parse failures as [`ErrorResponse`]
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new(error_codes::BAD_REQUEST, "Malformed request body")
        .add_detail("reason", err.to_string());

    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
