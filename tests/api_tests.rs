//! HTTP API tests
//!
//! Drives the full actix-web app against a temporary SQLite database.

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, LOCATION, REFERER};
use actix_web::{App, test};
use serde_json::{Value, json};
use shorturl::runtime::startup::AppServices;
use shorturl::storage::SeaOrmStorage;
use tempfile::TempDir;

use common::test_config;

async fn setup() -> (AppServices, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(&dir);
    let storage = SeaOrmStorage::new(&config.database)
        .await
        .expect("Failed to create storage");
    (AppServices::new(Arc::new(storage), &config), dir)
}

fn bearer(services: &AppServices, owner: i64) -> String {
    let token = services
        .jwt
        .generate_access_token(owner)
        .expect("Failed to sign token");
    format!("Bearer {}", token)
}

macro_rules! init_app {
    ($services:expr) => {
        test::init_service(App::new().configure(|cfg| $services.configure(cfg))).await
    };
}

// =============================================================================
// 认证
// =============================================================================

#[actix_rt::test]
async fn test_missing_token_is_unauthorized() {
    let (services, _dir) = setup().await;
    let app = init_app!(services);

    let req = test::TestRequest::post()
        .uri("/shorturl")
        .set_json(json!({"url": "https://example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);
    assert!(body["data"].is_null());
}

#[actix_rt::test]
async fn test_invalid_token_is_forbidden() {
    let (services, _dir) = setup().await;
    let app = init_app!(services);

    let req = test::TestRequest::post()
        .uri("/shorturl")
        .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
        .set_json(json!({"url": "https://example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2002);
}

// =============================================================================
// 创建 / 跳转 / 统计 / 删除
// =============================================================================

#[actix_rt::test]
async fn test_full_link_lifecycle() {
    let (services, _dir) = setup().await;
    let owner = bearer(&services, 1);
    let stranger = bearer(&services, 2);
    let app = init_app!(services);

    // 创建
    let req = test::TestRequest::post()
        .uri("/shorturl")
        .insert_header((AUTHORIZATION, owner.clone()))
        .set_json(json!({"url": "https://example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    let code = body["data"]["encoded"]
        .as_str()
        .expect("encoded code")
        .to_string();
    assert!(!code.is_empty() && code.len() <= 7);

    // 重复创建
    let req = test::TestRequest::post()
        .uri("/shorturl")
        .insert_header((AUTHORIZATION, stranger.clone()))
        .set_json(json!({"url": "https://example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);

    // 跳转
    for referrer in ["a.com", "a.com", "b.com"] {
        let req = test::TestRequest::get()
            .uri(&format!("/{}", code))
            .insert_header((REFERER, referrer))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(LOCATION).unwrap().to_str().unwrap(),
            "https://example.com"
        );
        assert_eq!(
            resp.headers().get(CACHE_CONTROL).unwrap().to_str().unwrap(),
            "no-store"
        );
    }

    // 统计：只有所有者可见
    let req = test::TestRequest::get()
        .uri(&format!("/{}/+", code))
        .insert_header((AUTHORIZATION, owner.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["totalVisits"], 3);
    assert_eq!(body["data"]["referrers"][0]["referrer"], "a.com");
    assert_eq!(body["data"]["referrers"][0]["count"], 2);
    assert_eq!(body["data"]["referrers"][1]["referrer"], "b.com");
    assert_eq!(body["data"]["dailyVisits"][0]["count"], 3);

    let req = test::TestRequest::get()
        .uri(&format!("/{}/+", code))
        .insert_header((AUTHORIZATION, stranger.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 删除：非所有者 404，所有者 204，再删 404
    let req = test::TestRequest::delete()
        .uri(&format!("/shorturl/{}", code))
        .insert_header((AUTHORIZATION, stranger))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/shorturl/{}", code))
        .insert_header((AUTHORIZATION, owner.clone()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/shorturl/{}", code))
        .insert_header((AUTHORIZATION, owner))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri(&format!("/{}", code))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

// =============================================================================
// 输入校验
// =============================================================================

#[actix_rt::test]
async fn test_malformed_body_is_bad_request() {
    let (services, _dir) = setup().await;
    let owner = bearer(&services, 1);
    let app = init_app!(services);

    let req = test::TestRequest::post()
        .uri("/shorturl")
        .insert_header((AUTHORIZATION, owner))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

#[actix_rt::test]
async fn test_invalid_url_and_expiration() {
    let (services, _dir) = setup().await;
    let owner = bearer(&services, 1);
    let app = init_app!(services);

    let req = test::TestRequest::post()
        .uri("/shorturl")
        .insert_header((AUTHORIZATION, owner.clone()))
        .set_json(json!({"url": "ftp://files.example"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3002);

    let req = test::TestRequest::post()
        .uri("/shorturl")
        .insert_header((AUTHORIZATION, owner))
        .set_json(json!({
            "url": "https://example.com",
            "expiration_date": "2001-01-01T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3003);
}

#[actix_rt::test]
async fn test_oversized_relative_expiration_is_bad_request() {
    let (services, _dir) = setup().await;
    let owner = bearer(&services, 1);
    let app = init_app!(services);

    let req = test::TestRequest::post()
        .uri("/shorturl")
        .insert_header((AUTHORIZATION, owner))
        .set_json(json!({
            "url": "https://x.com",
            "expiration_date": "100000000000d100000000000d"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3003);
}

#[actix_rt::test]
async fn test_invalid_code_on_redirect() {
    let (services, _dir) = setup().await;
    let app = init_app!(services);

    let req = test::TestRequest::get().uri("/ab_cd").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3007);
}

#[actix_rt::test]
async fn test_unknown_code_is_not_found() {
    let (services, _dir) = setup().await;
    let app = init_app!(services);

    let req = test::TestRequest::get().uri("/abc123").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
}

// =============================================================================
// 健康检查
// =============================================================================

#[actix_rt::test]
async fn test_health_is_not_a_short_code() {
    let (services, _dir) = setup().await;
    let app = init_app!(services);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
