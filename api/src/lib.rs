//! # Tessera API
//!
//! actix-web HTTP layer over the credential lifecycle services.
//! The binary in `main.rs` wires MySQL-backed repositories into
//! [`app::create_app`]; tests wire the in-memory ones.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
