//! API 流程集成测试
//!
//! 通过 `tower::ServiceExt::oneshot` 直接驱动路由器，不绑定端口。
//! 关注点：
//! - 信封格式与状态码符合对外契约
//! - 请求体不合法时不触发任何出站调用
//! - 机密 client secret 与提供商侧细节绝不出现在响应中
//! - CORS 只放行配置的前端源

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use pretty_assertions::assert_eq;
use reddit_authorizer::config::AppConfig;
use reddit_authorizer::server::AuthorizerServer;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// 构建指向 mock 提供商的完整应用路由器
fn build_app(token_url: String) -> Router {
    let vars = HashMap::from([
        ("CLIENT_ID".to_string(), "test_client_id".to_string()),
        (
            "CLIENT_SECRET".to_string(),
            "test_client_secret".to_string(),
        ),
        ("AUTHORIZER_TOKEN_URL".to_string(), token_url),
    ]);

    let config = Arc::new(AppConfig::from_vars(&vars).unwrap());
    AuthorizerServer::new(config).unwrap().router()
}

fn token_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_200_with_empty_body() {
    let app = build_app("https://www.reddit.com/api/v1/access_token".to_string());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn malformed_json_returns_400_envelope() {
    let app = build_app("https://www.reddit.com/api/v1/access_token".to_string());

    let response = app
        .oneshot(token_request("definitely not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({
            "status": "error",
            "message": "Malformed request, please try again"
        })
    );
}

#[tokio::test]
async fn missing_code_returns_400_without_outbound_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = build_app(format!("{}/api/v1/access_token", server.uri()));

    let response = app.oneshot(token_request("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_code_returns_400_without_outbound_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = build_app(format!("{}/api/v1/access_token", server.uri()));

    let response = app.oneshot(token_request(r#"{"code":""}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn successful_exchange_returns_success_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "abc123",
            "token_type": "bearer",
            "expires_in": 3600,
            "scope": "identity"
        })))
        .mount(&server)
        .await;

    let app = build_app(format!("{}/api/v1/access_token", server.uri()));

    let response = app
        .oneshot(token_request(r#"{"code":"valid_code"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({
            "status": "success",
            "data": { "token": "abc123" }
        })
    );
}

#[tokio::test]
async fn exchange_failure_returns_generic_500_without_provider_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("invalid_grant: code already used (internal trace 42)"),
        )
        .mount(&server)
        .await;

    let app = build_app(format!("{}/api/v1/access_token", server.uri()));

    let response = app
        .oneshot(token_request(r#"{"code":"used_code"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let rendered = String::from_utf8(bytes.to_vec()).unwrap();

    // 通用提示，不含提供商侧状态码、响应体或机密凭据
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&rendered).unwrap(),
        serde_json::json!({
            "status": "error",
            "message": "Unexpected error when authenticating with Reddit, please try again"
        })
    );
    assert!(!rendered.contains("invalid_grant"));
    assert!(!rendered.contains("401"));
    assert!(!rendered.contains("test_client_secret"));
}

#[tokio::test]
async fn success_envelope_never_contains_client_secret() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "abc123"
        })))
        .mount(&server)
        .await;

    let app = build_app(format!("{}/api/v1/access_token", server.uri()));

    let response = app
        .oneshot(token_request(r#"{"code":"valid_code"}"#))
        .await
        .unwrap();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let rendered = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!rendered.contains("test_client_secret"));
    assert!(!rendered.contains("test_client_id"));
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin_for_post() {
    let app = build_app("https://www.reddit.com/api/v1/access_token".to_string());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/token")
                .header(header::ORIGIN, FRONTEND_ORIGIN)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(FRONTEND_ORIGIN)
    );

    let allowed_methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(allowed_methods.contains("POST"));
}

#[tokio::test]
async fn cors_rejects_unknown_origin() {
    let app = build_app("https://www.reddit.com/api/v1/access_token".to_string());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/token")
                .header(header::ORIGIN, "https://evil.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
