mod common;

use axum::http::{header, StatusCode};
use common::{body_text, parse_body, TestApp, BASE_URL};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["status"], "ok");
}

#[tokio::test]
async fn test_unknown_invitation_page_is_404() {
    let app = TestApp::new().await;
    let response = app.get("/inv/unknown", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("Invitation introuvable"));
}

#[tokio::test]
async fn test_page_follows_lifecycle() {
    let app = TestApp::new().await;
    let host = app.register("host@example.com").await;
    let (id, slug) = app.create_invitation(&host, "classic").await;
    let page = format!("/inv/{}", slug);

    let draft = app.get(&page, None).await;
    assert_eq!(draft.status(), StatusCode::OK);
    assert!(body_text(draft).await.contains("Invitation en brouillon"));

    app.post_action(&format!("/actions/invitations/{}/activate", id), json!({}), Some(&host)).await;
    assert!(body_text(app.get(&page, None).await).await.contains("Invitation privée"));

    app.post_action(&format!("/actions/invitations/{}/publish", id), json!({}), Some(&host)).await;
    let public = app.get(&page, None).await;
    assert_eq!(public.status(), StatusCode::OK);
    let html = body_text(public).await;
    assert!(html.contains("Jean &amp; Marie"));
    assert!(html.contains("Kinshasa, Gombe"));
    assert!(html.contains(&format!("{}/api/generate-image?slug={}", BASE_URL, slug)));
    assert!(html.contains("/actions/inv/"));

    app.post_action(&format!("/actions/invitations/{}/archive", id), json!({}), Some(&host)).await;
    assert!(body_text(app.get(&page, None).await).await.contains("Invitation en brouillon"));
}

#[tokio::test]
async fn test_unknown_guest_token_page() {
    let app = TestApp::new().await;
    let response = app.get("/g/not-a-token", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Invitation introuvable"));
}

#[tokio::test]
async fn test_sitemap() {
    let app = TestApp::new().await;
    let response = app.get("/sitemap.xml", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/xml"));

    let xml = body_text(response).await;
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(&format!("<loc>{}/inv/create</loc>", BASE_URL)));
    assert_eq!(xml.matches("<url>").count(), 4);
}
