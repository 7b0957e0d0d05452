//! End-to-end tests that exercise the full router against an in-memory
//! database, from raw HTTP request to response body.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use clap::Parser;
use events::EventPublisher;
use migration::{Migrator, MigratorTrait};
use notifications::{Manager, NotificationEventHandler};
use serde_json::{json, Value};
use service::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

async fn test_app() -> (Router, web::AppState) {
    let config = Config::parse_from([
        "delivery_network_api",
        "--database-url",
        "sqlite::memory:",
    ]);

    let db = service::init_database(&config)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None).await.expect("migrations failed");
    let db = Arc::new(db);

    let notification_manager = Arc::new(Manager::new());
    let event_publisher = EventPublisher::new().with_handler(Arc::new(
        NotificationEventHandler::new(notification_manager.clone()),
    ));

    let app_state = web::AppState::new(config, &db, event_publisher, notification_manager);
    let router = web::router::define_routes(app_state.clone());

    (router, app_state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn register_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": "correct horse battery staple",
        "full_name": "Ada Lovelace"
    })
}

async fn register_user(router: &Router, username: &str) {
    let response = router
        .clone()
        .oneshot(json_request("POST", "/register", register_body(username)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn login(router: &Router, username: &str, password: &str) -> axum::response::Response {
    let body = format!(
        "username={}&password={}",
        username.replace('@', "%40"),
        password.replace(' ', "+")
    );
    router
        .clone()
        .oneshot(form_request("/token", &body))
        .await
        .unwrap()
}

#[tokio::test]
async fn root_and_health_endpoints_respond() {
    let (router, _) = test_app().await;

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let banner = body_json(response).await;
    assert_eq!(banner["status"], "Online");

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_creates_identity_and_rejects_duplicates() {
    let (router, _) = test_app().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/register",
            register_body("ada@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Identity registered");

    // Same username again, different password: storage-level uniqueness
    let mut duplicate = register_body("ada@example.com");
    duplicate["password"] = json!("another password entirely");
    let response = router
        .oneshot(json_request("POST", "/register", duplicate))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"ALREADY EXISTS");
}

#[tokio::test]
async fn register_rejects_non_email_usernames() {
    let (router, _) = test_app().await;

    let response = router
        .oneshot(json_request(
            "POST",
            "/register",
            register_body("not-an-email"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_returns_bearer_token_for_valid_credentials() {
    let (router, _) = test_app().await;
    register_user(&router, "ada@example.com").await;

    let response = login(&router, "ada@example.com", "correct horse battery staple").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (router, _) = test_app().await;
    register_user(&router, "ada@example.com").await;

    let wrong_password = login(&router, "ada@example.com", "wrong").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = body_bytes(wrong_password).await;

    let unknown_user = login(&router, "nobody@example.com", "wrong").await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body = body_bytes(unknown_user).await;

    // A caller probing for registered usernames learns nothing from the
    // response body either.
    assert_eq!(wrong_password_body, unknown_user_body);
}

#[tokio::test]
async fn users_listing_requires_a_valid_token_and_hides_digests() {
    let (router, _) = test_app().await;
    register_user(&router, "ada@example.com").await;

    let response = login(&router, "ada@example.com", "correct horse battery staple").await;
    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/users")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let users = body_json(response).await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "ada@example.com");
    assert_eq!(users[0]["role"], "user");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn users_listing_rejects_bad_tokens() {
    let (router, app_state) = test_app().await;
    register_user(&router, "ada@example.com").await;

    let get_users = |auth: Option<String>| {
        let router = router.clone();
        async move {
            let mut builder = Request::builder().uri("/users");
            if let Some(value) = auth {
                builder = builder.header(header::AUTHORIZATION, value);
            }
            router
                .oneshot(builder.body(Body::empty()).unwrap())
                .await
                .unwrap()
        }
    };

    // No Authorization header at all
    let response = get_users(None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Not a token
    let response = get_users(Some("Bearer garbage".to_string())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Well-formed but expired, signed with the server's own key
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({
            "sub": "ada@example.com",
            "exp": (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp()
        }),
        &jsonwebtoken::EncodingKey::from_secret(
            app_state.config.token_signing_key().as_bytes(),
        ),
    )
    .unwrap();
    let response = get_users(Some(format!("Bearer {expired}"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Valid token with a corrupted signature
    let response = login(&router, "ada@example.com", "correct horse battery staple").await;
    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();
    let (head, signature) = token.rsplit_once('.').unwrap();
    let mut sig_chars: Vec<char> = signature.chars().collect();
    sig_chars[0] = if sig_chars[0] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{head}.{}", sig_chars.iter().collect::<String>());
    let response = get_users(Some(format!("Bearer {tampered}"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

fn inquiry_body(email: &str) -> Value {
    json!({
        "name": "Grace Hopper",
        "company": "Eckert-Mauchly",
        "email": email,
        "budget": "10k-50k",
        "service": "Logistics Integration",
        "date": "2025-09-01",
        "time": "14:00",
        "message": "We need help connecting our dispatch system."
    })
}

#[tokio::test]
async fn inquiry_submission_notifies_connected_dashboards() {
    let (router, app_state) = test_app().await;

    // Stand in for a connected admin dashboard
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    app_state.notification_manager.register_connection(tx);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/inquiry",
            inquiry_body("grace@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = body_json(response).await;
    assert_eq!(stored["email"], "grace@example.com");
    assert!(stored["id"].as_str().is_some_and(|id| !id.is_empty()));

    // Exactly one frame, carrying the stored inquiry
    let frame = rx.try_recv().expect("expected a notification frame");
    let axum::extract::ws::Message::Text(text) = frame else {
        panic!("expected a text frame");
    };
    let notification: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(notification["type"], "new_inquiry");
    assert_eq!(notification["data"]["email"], "grace@example.com");
    assert_eq!(notification["data"]["id"], stored["id"]);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn inquiry_submission_rejects_malformed_email() {
    let (router, _) = test_app().await;

    let response = router
        .oneshot(json_request("POST", "/inquiry", inquiry_body("not-an-email")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn inquiry_listing_returns_newest_first() {
    let (router, _) = test_app().await;

    for email in ["first@example.com", "second@example.com"] {
        let response = router
            .clone()
            .oneshot(json_request("POST", "/inquiry", inquiry_body(email)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let response = router
        .oneshot(
            Request::builder()
                .uri("/inquiry")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let inquiries = body_json(response).await;
    let inquiries = inquiries.as_array().unwrap();
    assert_eq!(inquiries.len(), 2);
    assert_eq!(inquiries[0]["email"], "second@example.com");
    assert_eq!(inquiries[1]["email"], "first@example.com");
}
