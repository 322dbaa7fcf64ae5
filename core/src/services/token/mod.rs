//! Token lifecycle module
//!
//! This module handles:
//! - Encoding and decoding of signed access/refresh credentials
//! - Issuing credential pairs and persisting refresh sessions
//! - One-time rotation of refresh credentials with reuse detection
//! - Logout and lineage revocation

mod clock;
mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{CodecError, TokenCodec};
pub use config::TokenServiceConfig;
pub use service::TokenService;
