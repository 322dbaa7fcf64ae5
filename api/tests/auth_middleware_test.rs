//! HTTP tests for bearer authentication on protected routes

mod common;

use actix_web::{http::header, http::StatusCode, test};
use chrono::Duration;
use serde_json::{json, Value};
use ts_api::app::create_app;
use ts_shared::config::CorsConfig;

use common::{context, PASSWORD};

fn me_with(authorization: String) -> test::TestRequest {
    test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header((header::AUTHORIZATION, authorization))
}

#[actix_web::test]
async fn test_access_credential_checks() {
    let ctx = context();
    let clock = ctx.clock.clone();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;

    let register = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "a@x.com", "password": PASSWORD }))
        .to_request();
    test::call_service(&app, register).await;
    let login = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "a@x.com", "password": PASSWORD }))
        .to_request();
    let pair: Value = test::call_and_read_body_json(&app, login).await;
    let access = pair["access_token"].as_str().unwrap().to_string();

    let wrong_scheme = test::call_service(&app, me_with(format!("Basic {}", access)).to_request()).await;
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);

    let mut tampered = access.clone();
    tampered.push('x');
    let resp = test::call_service(&app, me_with(format!("Bearer {}", tampered)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    clock.advance(Duration::minutes(14) + Duration::seconds(59));
    let resp = test::call_service(&app, me_with(format!("Bearer {}", access)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // No grace period once the access credential has expired
    clock.advance(Duration::seconds(2));
    let resp = test::call_service(&app, me_with(format!("Bearer {}", access)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_public_routes_need_no_credential() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state, &CorsConfig::default())).await;

    let refresh = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": "x" }))
        .to_request();
    let resp = test::call_service(&app, refresh).await;

    // Rejected by the lifecycle, not by the middleware
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SESSION_INVALID");
}
