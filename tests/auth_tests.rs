use serde_json::json;
use travel_booking_client::admin::keys;
use travel_booking_client::auth::{RegisterRequest, SessionState};
use travel_booking_client::config::ClientOptions;
use travel_booking_client::TravelClient;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn admin_user() -> serde_json::Value {
    json!({
        "id": 1,
        "first_name": "Ada",
        "last_name": "Obi",
        "email": "ada@example.com",
        "roles": [
            {"id": 2, "name": "Admin", "permissions": ["bookings.*", {"id": 9, "name": "drivers.view"}]}
        ]
    })
}

#[tokio::test]
async fn test_login_stores_token_and_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_string_contains("username=ada%40example.com"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "login-token",
            "token_type": "bearer",
            "user": admin_user()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let mut session = client.auth().subscribe();

    let response = client.auth().login("ada@example.com", "secret").await.unwrap();

    assert_eq!(response.access_token, "login-token");
    assert!(client.auth().is_authenticated());
    assert_eq!(client.token().get().as_deref(), Some("login-token"));

    assert!(session.has_changed().unwrap());
    let state = session.borrow_and_update().clone();
    assert_eq!(state.user().map(|u| u.full_name()), Some("Ada Obi".to_string()));
    assert!(client.auth().has_permission(keys::BOOKINGS_DELETE));
    assert!(client.auth().has_permission(keys::DRIVERS_VIEW));
    assert!(!client.auth().has_permission(keys::DRIVERS_DELETE));
    assert!(client.auth().permissions().has_role("admin"));
}

#[tokio::test]
async fn test_login_failure_reports_invalid_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();

    let err = client.auth().login("ada@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    assert!(!client.auth().is_authenticated());
    assert_eq!(client.auth().session(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_register_then_load_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(admin_user()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let request = RegisterRequest {
        email: "ada@example.com".to_string(),
        password: "secret-password".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Obi".to_string(),
        phone: None,
    };

    client.auth().register(&request).await.unwrap();
    assert_eq!(client.auth().session(), SessionState::TokenOnly);

    let user = client.auth().me().await.unwrap();
    assert_eq!(user.id, 1);
    assert!(matches!(client.auth().session(), SessionState::Authenticated { .. }));

    client.auth().logout().unwrap();
    assert!(!client.auth().is_authenticated());
    assert_eq!(client.auth().session(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_token_survives_restart_with_file_storage() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("session.json");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "persisted-token"
        })))
        .mount(&mock_server)
        .await;

    let options = ClientOptions::default().with_token_storage_path(&token_path);
    let client = TravelClient::new_with_options(&mock_server.uri(), options.clone()).unwrap();
    client.auth().login("ada@example.com", "secret").await.unwrap();

    let restarted = TravelClient::new_with_options(&mock_server.uri(), options.clone()).unwrap();
    assert!(restarted.auth().is_authenticated());
    assert_eq!(restarted.token().get().as_deref(), Some("persisted-token"));
    assert_eq!(restarted.auth().session(), SessionState::TokenOnly);

    restarted.auth().logout().unwrap();
    let after_logout = TravelClient::new_with_options(&mock_server.uri(), options).unwrap();
    assert!(!after_logout.auth().is_authenticated());
}

#[tokio::test]
async fn test_login_with_unwritable_token_path_keeps_session_consistent() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "unsaved-token",
            "user": admin_user()
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // A directory cannot be written as the token file
    let options = ClientOptions::default().with_token_storage_path(dir.path());
    let client = TravelClient::new_with_options(&mock_server.uri(), options).unwrap();

    let result = client.auth().login("ada@example.com", "secret").await;

    assert!(result.is_err());
    assert!(!client.auth().is_authenticated());
    assert!(client.token().get().is_none());
    assert_eq!(client.auth().session(), SessionState::Anonymous);
}
