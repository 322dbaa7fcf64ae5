//! Shared setup for the HTTP tests: in-memory repositories, a fast hasher
//! and a manual clock.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::Utc;

use ts_api::routes::auth::AppState;
use ts_core::repositories::{InMemorySessionRepository, InMemoryUserRepository};
use ts_core::services::{
    AuthService, AuthServiceConfig, BcryptHasher, ManualClock, SecretHasher, TokenService,
    TokenServiceConfig,
};

pub const PASSWORD: &str = "correct-horse";

pub type TestState = AppState<InMemoryUserRepository, InMemorySessionRepository>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub sessions: InMemorySessionRepository,
    pub clock: Arc<ManualClock>,
}

pub fn context() -> TestContext {
    let sessions = InMemorySessionRepository::new();
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let hasher: Arc<dyn SecretHasher> = Arc::new(BcryptHasher::new(4));

    let config = TokenServiceConfig {
        jwt_secret: "http-test-secret".to_string(),
        ..TokenServiceConfig::default()
    };
    let token_service =
        TokenService::with_clock(sessions.clone(), hasher.clone(), clock.clone(), config)
            .expect("token service");

    let auth_service = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(token_service),
        hasher,
        AuthServiceConfig::default(),
    );

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(auth_service))),
        sessions,
        clock,
    }
}
