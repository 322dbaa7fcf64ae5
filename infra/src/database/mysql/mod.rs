//! MySQL repository implementations

mod session_repository_impl;
mod user_repository_impl;

pub use session_repository_impl::MySqlSessionRepository;
pub use user_repository_impl::MySqlUserRepository;

use ts_core::errors::DomainError;

/// Map a driver failure to the storage error the services expect
pub(crate) fn storage_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::StorageUnavailable {
        message: format!("{}: {}", context, error),
    }
}
