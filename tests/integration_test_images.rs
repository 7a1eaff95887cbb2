mod common;

use axum::http::{header, StatusCode};
use common::{body_bytes, body_text, TestApp};
use serde_json::json;

fn png_size(png: &[u8]) -> (u32, u32) {
    assert_eq!(&png[1..4], b"PNG");
    let w = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let h = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    (w, h)
}

#[tokio::test]
async fn test_invitation_image_errors_are_plain_text() {
    let app = TestApp::new().await;

    let missing = app.get("/api/generate-image", None).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert!(missing.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));

    let unknown = app.get("/api/generate-image?slug=nope", None).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(unknown).await, "Invitation non trouvée");
}

#[tokio::test]
async fn test_invitation_image_is_cached_png() {
    let app = TestApp::new().await;
    let host = app.register("host@example.com").await;
    let (_, slug) = app.create_invitation(&host, "classic").await;

    let response = app.get(&format!("/api/generate-image?slug={}", slug), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=300");

    let first = body_bytes(response).await;
    assert_eq!(png_size(&first), (1200, 630));

    let again = body_bytes(app.get(&format!("/api/generate-image?slug={}", slug), None).await).await;
    assert_eq!(first, again);
}

#[tokio::test]
async fn test_guest_image() {
    let app = TestApp::new().await;
    let host = app.register("host@example.com").await;
    let (_, slug) = app.create_invitation(&host, "elegant").await;

    let missing = app.get("/api/generate-my-inv", None).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(missing).await, "Le slug du guest est requis");

    let unknown = app.get("/api/generate-my-inv?guestSlug=nope", None).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(unknown).await, "Guest non trouvé");

    let confirmed = app.post_action(&format!("/actions/inv/{}/confirm", slug), json!({ "fullName": "Paul" }), None).await;
    let guest_slug = confirmed["guest"]["slug"].as_str().unwrap();

    let response = app.get(&format!("/api/generate-my-inv?guestSlug={}", guest_slug), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(png_size(&body_bytes(response).await), (900, 630));
}

#[tokio::test]
async fn test_preview_with_unknown_theme_falls_back() {
    let app = TestApp::new().await;
    let response = app.get("/api/preview-image?hostManName=Jean&startsAt=n%27importe&theme=neon", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(png_size(&body_bytes(response).await), (1200, 630));
}

#[tokio::test]
async fn test_qr_svg() {
    let app = TestApp::new().await;
    let host = app.register("host@example.com").await;
    let (_, slug) = app.create_invitation(&host, "classic").await;

    let response = app.get(&format!("/api/qr?slug={}&size=5000", slug), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    let svg = body_text(response).await;
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="1024""#));

    let unknown = app.get("/api/qr?slug=nope", None).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert!(unknown.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
    assert_eq!(body_text(unknown).await, "Invitation non trouvée");

    let missing = app.get("/api/qr", None).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(missing).await, "Le slug de l'invitation est requis");
}
