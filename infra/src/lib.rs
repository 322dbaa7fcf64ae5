//! # Infrastructure Layer
//!
//! Concrete persistence for the Tessera credential service.
//!
//! ## Architecture
//!
//! - **Database**: MySQL connection pool, embedded migrations and the
//!   MySQL implementations of the user and session repositories
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use ts_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Connect to the database, check it answers, and bring the schema up to date
///
/// Migrations run only when `config.run_migrations` is set.
#[cfg(feature = "mysql")]
pub async fn initialize(
    config: ts_shared::config::DatabaseConfig,
) -> Result<database::DatabasePool, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let run_migrations = config.run_migrations;
    let pool = database::DatabasePool::new(config).await?;
    if !pool.health_check().await? {
        return Err(InfrastructureError::Config(
            "Database answered the health check unexpectedly".to_string(),
        ));
    }
    if run_migrations {
        pool.run_migrations().await?;
    }

    tracing::info!("Infrastructure services initialized successfully");
    Ok(pool)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
