//! Repository interfaces and in-memory implementations.

pub mod session;
pub mod user;

pub use session::{InMemorySessionRepository, SessionRepository};
pub use user::{InMemoryUserRepository, UserRepository};
