//! One-way hashing for bearer secrets
//!
//! Login passwords and refresh credentials go through the same primitive.

mod hasher;


pub use hasher::{hash_blocking, verify_blocking, BcryptHasher, SecretHasher};
