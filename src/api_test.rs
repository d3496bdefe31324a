use super::*;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpAuthApi {
    let config = AuthConfig {
        login_url: format!("{}/auth/login", server.uri()),
        profile_url: format!("{}/auth/profile", server.uri()),
        request_timeout: None,
    };
    HttpAuthApi::new(&config).unwrap()
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_posts_credentials_and_reads_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "alice@example.test", "password": "pw" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "tok123",
            "refresh_token": "ignored"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = api_for(&server)
        .login(&Credentials::new("alice@example.test", "pw"))
        .await
        .unwrap();
    assert_eq!(token.as_str(), "tok123");
}

#[tokio::test]
async fn login_rejection_uses_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized",
            "statusCode": 401
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .login(&Credentials::new("alice@example.test", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::Service { status: 401, message: "Unauthorized".into() });
}

#[tokio::test]
async fn login_rejection_without_body_uses_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = api_for(&server).login(&Credentials::new("a", "b")).await.unwrap_err();
    assert_eq!(err.message(), "Unauthorized");
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn login_without_token_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let err = api_for(&server).login(&Credentials::new("a", "b")).await.unwrap_err();
    assert!(matches!(err, AuthError::Decode(ref msg) if msg.contains("access_token")));
}

// =============================================================
// fetch_profile
// =============================================================

#[tokio::test]
async fn profile_sent_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", "Bearer tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "name": "Alice" })))
        .expect(1)
        .mount(&server)
        .await;

    let user = api_for(&server).fetch_profile(&AccessToken::new("tok123")).await.unwrap();
    assert_eq!(user.as_value(), &json!({ "id": 1, "name": "Alice" }));
}

#[tokio::test]
async fn null_profile_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_profile(&AccessToken::new("tok")).await.unwrap_err();
    assert!(matches!(err, AuthError::Decode(_)));
}

#[tokio::test]
async fn profile_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 1 }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = AuthConfig {
        login_url: format!("{}/auth/login", server.uri()),
        profile_url: format!("{}/auth/profile", server.uri()),
        request_timeout: Some(Duration::from_millis(200)),
    };
    let err = HttpAuthApi::new(&config)
        .unwrap()
        .fetch_profile(&AccessToken::new("tok"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Transport(_)));
    assert!(!err.message().is_empty());
}

// =============================================================
// service_message
// =============================================================

#[test]
fn service_message_joins_message_list() {
    let body = json!({ "message": ["email must be an email", "password should not be empty"] }).to_string();
    assert_eq!(
        service_message(StatusCode::BAD_REQUEST, &body),
        "email must be an email, password should not be empty"
    );
}

#[test]
fn service_message_falls_back_to_error_field() {
    let body = json!({ "error": "invalid_grant" }).to_string();
    assert_eq!(service_message(StatusCode::BAD_REQUEST, &body), "invalid_grant");
}

#[test]
fn service_message_ignores_blank_message() {
    let body = json!({ "message": "" }).to_string();
    assert_eq!(service_message(StatusCode::FORBIDDEN, &body), "Forbidden");
}

#[test]
fn service_message_for_unregistered_status() {
    let status = StatusCode::from_u16(599).unwrap();
    assert_eq!(service_message(status, "<html>"), "request failed with status 599");
}
