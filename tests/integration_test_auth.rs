mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_register_sets_session_and_dashboard_opens() {
    let app = TestApp::new().await;
    let session = app.register("Host@Example.com").await;
    assert!(!session.is_empty());

    let response = app.get("/api/dashboard", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["user"]["email"], "host@example.com");
    assert_eq!(body["invitations"], json!([]));
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let app = TestApp::new().await;

    let response = app.get("/api/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "Not authorized");

    let forged = app.get("/api/dashboard", Some("not-a-jwt")).await;
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_flow_and_errors() {
    let app = TestApp::new().await;
    app.register("host@example.com").await;

    let ok = app.post_action("/actions/auth/login", json!({
        "email": "  HOST@example.com ",
        "password": "secret123"
    }), None).await;
    assert_eq!(ok["success"], true);
    assert_eq!(ok["user"]["first_name"], "Jean");

    let wrong = app.post_action("/actions/auth/login", json!({
        "email": "host@example.com",
        "password": "nope"
    }), None).await;
    assert_eq!(wrong, json!({ "success": false, "error": "Identifiants invalides" }));

    let empty = app.post_action("/actions/auth/login", json!({}), None).await;
    assert_eq!(empty["error"], "Email et mot de passe requis");
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;
    app.register("host@example.com").await;

    let duplicate = app.post_action("/actions/auth/register", json!({
        "email": "HOST@example.com",
        "password": "secret123",
        "firstName": "A",
        "lastName": "B"
    }), None).await;
    assert_eq!(duplicate["error"], "Un compte existe déjà avec cet email");

    let short = app.post_action("/actions/auth/register", json!({
        "email": "other@example.com",
        "password": "123",
        "firstName": "A",
        "lastName": "B"
    }), None).await;
    assert_eq!(short["error"], "Password trop court (min 6)");

    let missing = app.post_action("/actions/auth/register", json!({ "email": "x@y.z" }), None).await;
    assert_eq!(missing["error"], "Tous les champs sont requis");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;
    let session = app.register("host@example.com").await;

    let response = app.send(
        axum::http::Request::builder()
            .method("POST")
            .uri("/actions/auth/logout")
            .header(axum::http::header::COOKIE, format!("session={}", session))
            .body(axum::body::Body::empty())
            .unwrap()
    ).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cleared = response.headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .any(|c| c.starts_with("session=;") || c.starts_with("session=\"\""));
    assert!(cleared);
}
