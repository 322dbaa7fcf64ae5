use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use ts_api::app::create_app;
use ts_api::routes::auth::AppState;
use ts_api::telemetry::init_tracing;
use ts_core::services::auth::{AuthService, AuthServiceConfig};
use ts_core::services::hashing::{BcryptHasher, SecretHasher};
use ts_core::services::token::{TokenService, TokenServiceConfig};
use ts_infra::database::{MySqlSessionRepository, MySqlUserRepository};
use ts_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.logging);
    info!(environment = ?config.environment, "Starting Tessera API server");

    let pool = ts_infra::initialize(config.database.clone())
        .await
        .context("Failed to initialize database")?;

    let session_repository = MySqlSessionRepository::new(pool.get_pool().clone());
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));

    let hasher: Arc<dyn SecretHasher> = Arc::new(BcryptHasher::from_config(&config.auth.password));
    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)
        .context("Invalid token configuration")?;
    let token_service = Arc::new(
        TokenService::new(session_repository, hasher.clone(), token_config)
            .context("Failed to create token service")?,
    );
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        hasher,
        AuthServiceConfig::from_password_config(&config.auth.password),
    ));

    let app_state = web::Data::new(AppState::new(auth_service));
    let cors_config = config.cors.clone();
    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server terminated with an error")?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}
