//! API client integration tests against a mock HTTP server.
//!
//! Run with: `cargo test -p flexdoc-client`

use std::sync::Arc;

use mockito::Matcher;
use serde_json::json;

use flexdoc_client::{ApiClient, AuthEvent, FilePayload};
use flexdoc_core::constants::storage_keys;
use flexdoc_core::models::{ConversionType, LoginRequest, SignupRequest};
use flexdoc_core::{ClientConfig, ClientError, KeyValueStore, MemoryKeyStore};

fn sample_user() -> serde_json::Value {
    json!({
        "_id": "u1",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "a@b.com",
        "created_at": "2025-01-15T10:30:00Z"
    })
}

fn sample_file(id: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "user_id": "u1",
        "original_filename": "report.pdf",
        "converted_filename": "report.xlsx",
        "file_type": "pdf",
        "conversion_type": "pdf_to_excel",
        "file_size": 1024,
        "cloud_url": "https://cdn.example.com/report.xlsx",
        "status": "completed",
        "created_at": "2025-02-01T08:00:00Z"
    })
}

async fn client_with_store(url: &str) -> (ApiClient, Arc<MemoryKeyStore>) {
    let keystore = Arc::new(MemoryKeyStore::new());
    let client = ApiClient::new(
        &ClientConfig::new(url),
        keystore.clone() as Arc<dyn KeyValueStore>,
    )
    .unwrap();
    (client, keystore)
}

#[tokio::test]
async fn login_posts_credentials_and_returns_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/login")
        .match_body(Matcher::Json(json!({
            "email": "a@b.com",
            "password": "Abcd1234"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "user": sample_user(), "token": "tok123" }).to_string())
        .create_async()
        .await;

    let (client, _) = client_with_store(&server.url()).await;
    let response = client
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "Abcd1234".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.token, "tok123");
    assert_eq!(response.user.id, "u1");
    mock.assert_async().await;
}

#[tokio::test]
async fn signup_returns_user_without_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/signup")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(sample_user().to_string())
        .create_async()
        .await;

    let (client, _) = client_with_store(&server.url()).await;
    let user = client
        .signup(&SignupRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "a@b.com".to_string(),
            password: "Abcd1234".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.email, "a@b.com");
    mock.assert_async().await;
}

#[tokio::test]
async fn stored_credential_is_attached_as_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/files")
        .match_header("authorization", "Bearer tok123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "success": true, "count": 0, "files": [] }).to_string())
        .create_async()
        .await;

    let (client, keystore) = client_with_store(&server.url()).await;
    keystore
        .set(storage_keys::AUTH_TOKEN, "tok123")
        .await
        .unwrap();

    let listing = client.list_files().await.unwrap();
    assert_eq!(listing.count, 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_credential_omits_authorization_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/files")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "success": true, "count": 0, "files": [] }).to_string())
        .create_async()
        .await;

    let (client, _) = client_with_store(&server.url()).await;
    client.list_files().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_evicts_stored_session_and_broadcasts() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/files")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({ "detail": "Token expired" }).to_string())
        .create_async()
        .await;

    let (client, keystore) = client_with_store(&server.url()).await;
    keystore
        .set(storage_keys::AUTH_TOKEN, "stale")
        .await
        .unwrap();
    keystore.set(storage_keys::USER_DATA, "{}").await.unwrap();
    let mut events = client.subscribe();

    let err = client.list_files().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert_eq!(err.to_string(), "Token expired");

    // Durable entries are deleted synchronously before the error propagates.
    assert_eq!(keystore.get(storage_keys::AUTH_TOKEN).await.unwrap(), None);
    assert_eq!(keystore.get(storage_keys::USER_DATA).await.unwrap(), None);
    assert_eq!(events.recv().await.unwrap(), AuthEvent::SessionEvicted);
}

#[tokio::test]
async fn server_detail_message_takes_precedence() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/convert")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({ "detail": "Unsupported conversion" }).to_string())
        .create_async()
        .await;

    let (client, _) = client_with_store(&server.url()).await;
    let payload = FilePayload::new("report.pdf", "application/pdf", vec![1, 2, 3]);
    let err = client
        .convert_file(&payload, ConversionType::PdfToExcel)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Unsupported conversion");
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn missing_detail_falls_back_to_status_description() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/files")
        .with_status(500)
        .with_body("backend exploded")
        .create_async()
        .await;

    let (client, _) = client_with_store(&server.url()).await;
    let err = client.list_files().await.unwrap_err();

    assert_eq!(err.to_string(), "Internal Server Error");
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn not_found_propagates_without_eviction() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/files/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({ "detail": "File not found" }).to_string())
        .create_async()
        .await;

    let (client, keystore) = client_with_store(&server.url()).await;
    keystore
        .set(storage_keys::AUTH_TOKEN, "tok123")
        .await
        .unwrap();

    let err = client.delete_file("missing").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    // 404 is not an auth failure; the credential stays.
    assert_eq!(
        keystore.get(storage_keys::AUTH_TOKEN).await.unwrap(),
        Some("tok123".to_string())
    );
}

#[tokio::test]
async fn convert_submits_multipart_and_returns_file() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/convert")
        .match_header(
            "content-type",
            Matcher::Regex("multipart/form-data.*".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "message": "Converted",
                "file": sample_file("f1")
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (client, _) = client_with_store(&server.url()).await;
    let payload = FilePayload::new("report.pdf", "application/pdf", vec![1, 2, 3]);
    let response = client
        .convert_file(&payload, ConversionType::PdfToExcel)
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.file.id, "f1");
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/convert")
        .expect(0)
        .create_async()
        .await;

    let (client, _) = client_with_store(&server.url()).await;
    let payload = FilePayload::new("tune.mp3", "audio/mpeg", vec![1, 2, 3]);
    let err = client
        .convert_file(&payload, ConversionType::PdfToExcel)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidInput(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn delete_returns_confirmation() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/files/f1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "success": true, "message": "Deleted", "file_id": "f1" }).to_string(),
        )
        .create_async()
        .await;

    let (client, _) = client_with_store(&server.url()).await;
    let response = client.delete_file("f1").await.unwrap();
    assert!(response.success);
    assert_eq!(response.file_id, "f1");
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Nothing listens on this port.
    let keystore = Arc::new(MemoryKeyStore::new());
    let client = ApiClient::new(
        &ClientConfig::new("http://127.0.0.1:9"),
        keystore as Arc<dyn KeyValueStore>,
    )
    .unwrap();

    let err = client.list_files().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Transport(_) | ClientError::Timeout
    ));
    assert_eq!(err.status_code(), None);
}
