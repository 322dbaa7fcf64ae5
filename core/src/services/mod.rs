//! Business services containing domain logic and use cases.

pub mod auth;
pub mod hashing;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use hashing::{BcryptHasher, SecretHasher};
pub use token::{
    Clock, CodecError, ManualClock, SystemClock, TokenCodec, TokenService, TokenServiceConfig,
};
