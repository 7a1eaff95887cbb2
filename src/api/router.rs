use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, auth, invitation, guest, rsvp, draft, dashboard, image, page};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public pages
        .route("/inv/{slug}", get(page::invitation_page))
        .route("/g/{token}", get(page::guest_page))
        .route("/sitemap.xml", get(page::sitemap))

        // Images
        .route("/api/generate-image", get(image::invitation_image))
        .route("/api/generate-my-inv", get(image::guest_image))
        .route("/api/preview-image", get(image::preview_image))
        .route("/api/qr", get(image::qr_code))

        // Dashboard
        .route("/api/dashboard", get(dashboard::overview))
        .route("/api/dashboard/invitations/{slug}", get(dashboard::invitation_detail))

        // Auth actions
        .route("/actions/auth/register", post(auth::register))
        .route("/actions/auth/login", post(auth::login))
        .route("/actions/auth/logout", post(auth::logout))

        // Host actions. `{invitation}` is the id for lifecycle actions and the slug for guest actions.
        .route("/actions/invitations", post(invitation::create_invitation))
        .route("/actions/invitations/{invitation}/activate", post(invitation::activate_invitation))
        .route("/actions/invitations/{invitation}/archive", post(invitation::archive_invitation))
        .route("/actions/invitations/{invitation}/publish", post(invitation::publish_invitation))
        .route("/actions/invitations/{invitation}/unpublish", post(invitation::unpublish_invitation))
        .route("/actions/invitations/{invitation}/delete", post(invitation::delete_invitation))
        .route("/actions/invitations/{invitation}/guests/{guest_id}/delete", post(guest::delete_guest))
        .route("/actions/invitations/{invitation}/guests/{guest_id}/seat", post(guest::assign_seat))

        // Guest actions
        .route("/actions/inv/{slug}/confirm", post(rsvp::confirm))
        .route("/actions/inv/{slug}/decline", post(rsvp::decline))
        .route("/actions/guests/{token}/respond", post(rsvp::respond))

        // Drafts
        .route("/actions/drafts/save", post(draft::save_draft))
        .route("/actions/drafts/load", post(draft::load_draft))
        .route("/actions/drafts/clear", post(draft::clear_draft))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
