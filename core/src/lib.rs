//! # Tessera Core
//!
//! Core credential lifecycle logic for the Tessera backend.
//! This crate contains domain entities, the token codec, secret hashing,
//! repository interfaces and the services that issue, rotate and revoke
//! access/refresh credential pairs.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
