//! Integration tests for the HTTP client: bearer attachment, 401 handling,
//! and error-body normalization against a mock backend.

use mediq_core::api::types::DoctorProfile;
use mediq_core::api::{ApiClient, ErrorKind};
use mediq_core::session::{Session, SessionStore, UserInfo};
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn store_with_session(dir: &std::path::Path) -> SessionStore {
    let store = SessionStore::with_path(dir.join("session.json"));
    store
        .set_session(&Session {
            access_token: "AAA".to_string(),
            refresh_token: "BBB".to_string(),
            user: UserInfo {
                id: 1,
                email: "doctor@test.com".to_string(),
                role: "doctor".to_string(),
            },
        })
        .unwrap();
    store
}

#[tokio::test]
async fn public_path_never_gets_authorization_header() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    // Token stored, but login is public: the header must not appear.
    let store = store_with_session(dir.path());

    Mock::given(method("POST"))
        .and(path("/v1/users/login/"))
        .respond_with(move |req: &Request| {
            assert!(
                req.headers.get("authorization").is_none(),
                "public path carried an Authorization header"
            );
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "success",
                "detail": "Logged in",
                "data": {
                    "id": 1,
                    "email": "doctor@test.com",
                    "role": "doctor",
                    "access_token": "NEW",
                    "refresh_token": "NEW2",
                },
            }))
        })
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store);
    let session = client.login("doctor@test.com", "secret1").await.unwrap();
    assert_eq!(session.access_token, "NEW");
    assert_eq!(session.user.email, "doctor@test.com");
}

#[tokio::test]
async fn protected_path_carries_bearer_token() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = store_with_session(dir.path());

    Mock::given(method("GET"))
        .and(path("/v1/users/my-account/"))
        .and(header("authorization", "Bearer AAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "email": "doctor@test.com",
            "role": "doctor",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store);
    let user = client.my_account().await.unwrap();
    assert_eq!(user.id, 1);
}

#[tokio::test]
async fn protected_path_without_token_sends_no_header() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = SessionStore::with_path(dir.path().join("session.json"));

    Mock::given(method("POST"))
        .and(path("/v1/doctors/"))
        .respond_with(move |req: &Request| {
            assert!(req.headers.get("authorization").is_none());
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"detail": "created"}))
        })
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store);
    client
        .create_doctor(&DoctorProfile {
            name: "Jane Doe".to_string(),
            specialty: "Cardiology".to_string(),
            contact_number: "9876543210".to_string(),
            hospital: "City Hospital".to_string(),
            license_number: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn unauthorized_on_protected_path_clears_session() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = store_with_session(dir.path());
    let session_path = dir.path().join("session.json");
    assert!(session_path.exists());

    Mock::given(method("GET"))
        .and(path("/v1/users/my-account/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Token expired"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store.clone());
    let err = client.my_account().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::SessionExpired);
    assert!(!session_path.exists(), "session file survived a 401");
    assert!(store.access_token().is_none());
}

#[tokio::test]
async fn unauthorized_on_login_leaves_session_intact() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = store_with_session(dir.path());

    Mock::given(method("POST"))
        .and(path("/v1/users/login/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store.clone());
    let err = client.login("doctor@test.com", "wrong").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.message, "Invalid credentials");
    // Failed login must not wipe the stored session.
    assert!(store.session().is_some());
}

#[tokio::test]
async fn register_sends_role_and_returns_id() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = SessionStore::with_path(dir.path().join("session.json"));

    Mock::given(method("POST"))
        .and(path("/v1/users/"))
        .and(body_json(serde_json::json!({
            "email": "new@test.com",
            "password": "secret1",
            "role": "doctor",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "email": "new@test.com",
            "role": "doctor",
            "is_verified": false,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store);
    let id = client.register("new@test.com", "secret1").await.unwrap();
    assert_eq!(id, 42);
}

#[tokio::test]
async fn verify_otp_hits_per_user_path_without_header() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = store_with_session(dir.path());

    Mock::given(method("POST"))
        .and(path("/v1/users/42/verify-otp/"))
        .and(body_json(serde_json::json!({"otp": "123456"})))
        .respond_with(move |req: &Request| {
            assert!(req.headers.get("authorization").is_none());
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"detail": "Verified"}))
        })
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store);
    client.verify_otp(42, "123456").await.unwrap();
}

#[tokio::test]
async fn resend_otp_posts_to_per_user_path() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = SessionStore::with_path(dir.path().join("session.json"));

    Mock::given(method("POST"))
        .and(path("/v1/users/42/resend-otp/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"detail": "Sent"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store);
    client.resend_otp(42).await.unwrap();
}

#[tokio::test]
async fn error_body_message_key_is_surfaced() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = SessionStore::with_path(dir.path().join("session.json"));

    Mock::given(method("POST"))
        .and(path("/v1/users/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"message": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store);
    let err = client.register("dup@test.com", "secret1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Api);
    assert_eq!(err.message, "Email already registered");
}

#[tokio::test]
async fn create_doctor_serializes_missing_license_as_null() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let store = store_with_session(dir.path());

    Mock::given(method("POST"))
        .and(path("/v1/doctors/"))
        .and(header_exists("authorization"))
        .and(body_json(serde_json::json!({
            "name": "Jane Doe",
            "specialty": "Cardiology",
            "contact_number": "9876543210",
            "hospital": "City Hospital",
            "license_number": null,
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"detail": "created"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), store);
    client
        .create_doctor(&DoctorProfile {
            name: "Jane Doe".to_string(),
            specialty: "Cardiology".to_string(),
            contact_number: "9876543210".to_string(),
            hospital: "City Hospital".to_string(),
            license_number: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn network_failure_is_reported_as_such() {
    let dir = tempdir().unwrap();
    let store = SessionStore::with_path(dir.path().join("session.json"));

    // Port 1 is never listening.
    let client = ApiClient::new("http://127.0.0.1:1", store);
    let err = client.login("doctor@test.com", "secret1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
}
