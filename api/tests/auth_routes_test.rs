//! HTTP tests for the account endpoints

mod common;

use actix_web::{http::header, http::StatusCode, test};
use serde_json::{json, Value};
use ts_api::app::create_app;
use ts_shared::config::CorsConfig;

use common::{context, PASSWORD};

fn register_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": email, "password": password }))
}

fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": email, "password": password }))
}

fn bearer(token: &Value) -> (header::HeaderName, String) {
    (
        header::AUTHORIZATION,
        format!("Bearer {}", token.as_str().unwrap()),
    )
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_route_returns_not_found() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_register_normalizes_email_and_hides_hash() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;

    let resp = test::call_service(&app, register_request("  Alice@Example.COM ", PASSWORD).to_request()).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["is_active"], true);
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_register_duplicate_email_conflicts() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;

    let first = test::call_service(&app, register_request("a@x.com", PASSWORD).to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(&app, register_request("A@X.com", PASSWORD).to_request()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["error"], "CONFLICT");
}

#[actix_web::test]
async fn test_register_rejects_bad_input() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;

    let short = test::call_service(&app, register_request("a@x.com", "short").to_request()).await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(short).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let bad_email = test::call_service(&app, register_request("not-an-email", PASSWORD).to_request()).await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    let malformed = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, malformed).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_login_returns_bearer_pair() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;
    test::call_service(&app, register_request("a@x.com", PASSWORD).to_request()).await;

    let resp = test::call_service(&app, login_request("A@x.com", PASSWORD).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 15 * 60);
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert_eq!(ctx.sessions.count_for_subject("a@x.com").await, 1);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;
    test::call_service(&app, register_request("a@x.com", PASSWORD).to_request()).await;

    let wrong_password = test::call_service(&app, login_request("a@x.com", "wrong-password").to_request()).await;
    let unknown_user = test::call_service(&app, login_request("b@x.com", PASSWORD).to_request()).await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a: Value = test::read_body_json(wrong_password).await;
    let b: Value = test::read_body_json(unknown_user).await;
    assert_eq!(a["error"], "INVALID_CREDENTIALS");
    assert_eq!(a["message"], b["message"]);
}

#[actix_web::test]
async fn test_me_requires_access_credential() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;
    test::call_service(&app, register_request("a@x.com", PASSWORD).to_request()).await;
    let pair: Value =
        test::call_and_read_body_json(&app, login_request("a@x.com", PASSWORD).to_request()).await;

    let ok = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&pair["access_token"]))
        .to_request();
    let resp = test::call_service(&app, ok).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "a@x.com");

    let missing = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, missing).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");

    let wrong_kind = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&pair["refresh_token"]))
        .to_request();
    let resp = test::call_service(&app, wrong_kind).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_change_password() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;
    test::call_service(&app, register_request("a@x.com", PASSWORD).to_request()).await;
    let pair: Value =
        test::call_and_read_body_json(&app, login_request("a@x.com", PASSWORD).to_request()).await;

    let wrong_old = test::TestRequest::post()
        .uri("/api/v1/auth/change-password")
        .insert_header(bearer(&pair["access_token"]))
        .set_json(json!({ "old_password": "nope-nope", "new_password": "brand-new-pass" }))
        .to_request();
    let resp = test::call_service(&app, wrong_old).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let ok = test::TestRequest::post()
        .uri("/api/v1/auth/change-password")
        .insert_header(bearer(&pair["access_token"]))
        .set_json(json!({ "old_password": PASSWORD, "new_password": "brand-new-pass" }))
        .to_request();
    let resp = test::call_service(&app, ok).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let old_login = test::call_service(&app, login_request("a@x.com", PASSWORD).to_request()).await;
    assert_eq!(old_login.status(), StatusCode::UNAUTHORIZED);

    let new_login = test::call_service(&app, login_request("a@x.com", "brand-new-pass").to_request()).await;
    assert_eq!(new_login.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_delete_account_revokes_sessions() {
    let ctx = context();
    let sessions = ctx.sessions.clone();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;
    test::call_service(&app, register_request("a@x.com", PASSWORD).to_request()).await;
    let pair: Value =
        test::call_and_read_body_json(&app, login_request("a@x.com", PASSWORD).to_request()).await;
    assert_eq!(sessions.count_for_subject("a@x.com").await, 1);

    let delete = test::TestRequest::delete()
        .uri("/api/v1/auth/account")
        .insert_header(bearer(&pair["access_token"]))
        .to_request();
    let resp = test::call_service(&app, delete).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(sessions.count_for_subject("a@x.com").await, 0);

    // The access credential is still well formed but its account is gone
    let me = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&pair["access_token"]))
        .to_request();
    let resp = test::call_service(&app, me).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let refresh = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": pair["refresh_token"] }))
        .to_request();
    let resp = test::call_service(&app, refresh).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
