//! Application factory
//!
//! Builds the actix-web application from shared state. The same factory is
//! used by the binary and by the HTTP tests.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use ts_core::repositories::{SessionRepository, UserRepository};
use ts_shared::config::CorsConfig;
use ts_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::middleware::{
    auth::{AccessTokenVerifier, JwtAuth},
    cors::create_cors,
};
use crate::routes::auth::{
    change_password::change_password, delete_account::delete_account, login::login,
    logout::logout, me::me, refresh::refresh, register::register, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, R>(
    app_state: web::Data<AppState<U, R>>,
    cors_config: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.auth_service.token_service().clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(create_cors(cors_config))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, R>))
                    .route("/login", web::post().to(login::<U, R>))
                    .route("/refresh", web::post().to(refresh::<U, R>))
                    .route("/logout", web::post().to(logout::<U, R>))
                    .route(
                        "/me",
                        web::get().to(me::<U, R>).wrap(JwtAuth::new()),
                    )
                    .route(
                        "/change-password",
                        web::post()
                            .to(change_password::<U, R>)
                            .wrap(JwtAuth::new()),
                    )
                    .route(
                        "/account",
                        web::delete()
                            .to(delete_account::<U, R>)
                            .wrap(JwtAuth::new()),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tessera-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
