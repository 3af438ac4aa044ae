//! Integration tests for the shop client using wiremock
//!
//! These tests run the real reqwest transport against a mocked backend.

use std::sync::Arc;

use serde_json::json;
use shopfront_client::{
    ApiBase, AuthStatus, ErrorKind, FileBackend, LoginOutcome, ProductQuery, ReqwestTransport,
    SessionStore, ShopClient,
};
use shopfront_core::{CartItemRequest, EntityId, Navigation};
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer, session: SessionStore) -> ShopClient {
    ShopClient::from_parts(
        ApiBase::new(format!("{}/api", server.uri())),
        session,
        Arc::new(ReqwestTransport::new().unwrap()),
    )
}

#[tokio::test]
async fn test_login_stores_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "email": "root@shop.io", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "T",
            "user": { "id": 1, "name": "Root", "role": "admin" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, SessionStore::in_memory());
    client.auth().login("root@shop.io", "secret").await.unwrap();

    assert_eq!(client.session().get_token().as_deref(), Some("T"));
    assert!(client.guard().is_admin());
}

#[tokio::test]
async fn test_unauthorized_message_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "invalid credentials" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, SessionStore::in_memory());
    let err = client
        .auth()
        .login("ada@shop.io", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "invalid credentials");
    assert!(client.session().get_token().is_none());
}

#[tokio::test]
async fn test_product_filters_reach_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category", "tea & coffee"))
        .and(query_param("sort", "price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "products": [{ "id": 1, "name": "Sencha" }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, SessionStore::in_memory());
    let query = ProductQuery::new()
        .filter("category", "tea & coffee")
        .filter("sort", "price");
    let data = client.products().get_all(&query).await.unwrap();

    assert_eq!(data["products"][0]["name"], "Sencha");
}

#[tokio::test]
async fn test_html_error_page_is_server_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, SessionStore::in_memory());
    let err = client.orders().get_all().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerResponse);
    assert_eq!(
        err.to_string(),
        "Server returned invalid response (Status: 502)"
    );
}

#[tokio::test]
async fn test_cart_uses_bearer_from_file_session() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "file-token",
            "user": { "id": 2, "name": "Ada", "role": "customer" }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer file-token"))
        .and(body_json(json!({ "productId": 5, "quantity": 2 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server, SessionStore::new(FileBackend::new(&session_path)))
        .flows()
        .user_login("ada@shop.io", "secret")
        .await
        .unwrap();
    assert_eq!(outcome, LoginOutcome::Redirect(Navigation::Landing));

    // A fresh client over the same file picks the session up.
    let client = client_for(&mock_server, SessionStore::new(FileBackend::new(&session_path)));
    assert!(client.guard().require_auth().is_granted());
    client
        .cart()
        .add(&CartItemRequest {
            product_id: EntityId::from(5),
            quantity: 2,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejected_session_is_cleared() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .mount(&mock_server)
        .await;

    let session = SessionStore::in_memory();
    session
        .set_session("stale", &serde_json::from_value(json!({ "name": "Ada" })).unwrap())
        .unwrap();
    let client = client_for(&mock_server, session);

    let status = client.flows().check_auth_status().await.unwrap();

    assert_eq!(status, AuthStatus::Expired(Navigation::Landing));
    assert!(client.session().get_token().is_none());
    assert!(client.session().get_user().is_none());
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client = ShopClient::from_parts(
        ApiBase::new("http://127.0.0.1:9/api"),
        SessionStore::in_memory(),
        Arc::new(ReqwestTransport::new().unwrap()),
    );

    let err = client.users().get_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}
