//! Domain entities representing core business objects.

pub mod session;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use session::RefreshSession;
pub use token::{Claims, TokenKind, TokenPair, TOKEN_TYPE_BEARER};
pub use user::User;
