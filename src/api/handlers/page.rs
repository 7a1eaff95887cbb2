use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use crate::state::AppState;
use crate::domain::models::invitation::{Invitation, InvitationState};
use crate::domain::services::card::{
    datefmt::{DisplayDate, StartsAt},
    CardFields, DEFAULT_DESCRIPTION, DEFAULT_LOCATION,
};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use serde::Serialize;
use tera::Context;
use tracing::debug;

#[derive(Serialize)]
struct SitemapEntry {
    path: &'static str,
    changefreq: &'static str,
    priority: &'static str,
}

const SITEMAP: [SitemapEntry; 4] = [
    SitemapEntry { path: "/", changefreq: "weekly", priority: "1.0" },
    SitemapEntry { path: "/inv/create", changefreq: "monthly", priority: "0.8" },
    SitemapEntry { path: "/auth/login", changefreq: "yearly", priority: "0.5" },
    SitemapEntry { path: "/auth/register", changefreq: "yearly", priority: "0.5" },
];

/// `GET /inv/{slug}`: the card and RSVP form, or a placeholder explaining why not.
pub async fn invitation_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let invitation = state.invitation_repo.find_by_slug(&slug).await?;
    let visible = InvitationState::resolve(invitation.as_ref(), Utc::now());

    let invitation = match (visible, invitation) {
        (InvitationState::Viewable, Some(inv)) => inv,
        (other, _) => {
            debug!("Invitation page {} not viewable: {:?}", slug, other);
            return state_page(&state, other);
        }
    };

    let card = state.card_renderer.compose(&CardFields::from(&invitation), None)?;

    let mut ctx = detail_context(&state, &invitation);
    ctx.insert("card_svg", &card.svg);
    ctx.insert("share_url", &state.config.invitation_url(&invitation.slug));
    ctx.insert(
        "image_url",
        &format!("{}/api/generate-image?slug={}", state.config.app_base_url, invitation.slug),
    );
    ctx.insert(
        "map_url",
        &invitation
            .latitude
            .zip(invitation.longitude)
            .map(|(lat, lng)| format!("https://www.google.com/maps?q={},{}", lat, lng)),
    );

    render_html(&state, "pages/invitation.html", &ctx, StatusCode::OK)
}

/// `GET /g/{token}`: a guest's own card and answer.
pub async fn guest_page(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Response, AppError> {
    let Some(guest) = state.guest_repo.find_by_token(&token).await? else {
        return state_page(&state, InvitationState::NotFound);
    };
    let Some(invitation) = state.invitation_repo.find_by_id(&guest.invitation_id).await? else {
        return state_page(&state, InvitationState::NotFound);
    };

    let mut ctx = detail_context(&state, &invitation);
    ctx.insert("guest", &guest);
    ctx.insert("token", &guest.token);

    render_html(&state, "pages/guest.html", &ctx, StatusCode::OK)
}

/// `GET /sitemap.xml`
pub async fn sitemap(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let mut ctx = Context::new();
    ctx.insert("base_url", &state.config.app_base_url);
    ctx.insert("lastmod", &Utc::now().format("%Y-%m-%d").to_string());
    ctx.insert("entries", &SITEMAP);

    let xml = state
        .templates
        .render("sitemap.xml", &ctx)
        .map_err(|e| AppError::Render(format!("sitemap: {:?}", e)))?;

    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response())
}

fn detail_context(state: &AppState, invitation: &Invitation) -> Context {
    let when = DisplayDate::format(&StartsAt::At(invitation.starts_at), state.card_renderer.timezone());

    let mut ctx = Context::new();
    ctx.insert("invitation", invitation);
    ctx.insert("date", &when.date);
    ctx.insert("time", &when.time);
    ctx.insert(
        "description",
        invitation.description.as_deref().filter(|d| !d.trim().is_empty()).unwrap_or(DEFAULT_DESCRIPTION),
    );
    ctx.insert(
        "location",
        invitation.location.as_deref().filter(|l| !l.trim().is_empty()).unwrap_or(DEFAULT_LOCATION),
    );
    ctx
}

fn state_page(state: &AppState, visible: InvitationState) -> Result<Response, AppError> {
    let mut ctx = Context::new();
    ctx.insert("state", &visible);
    ctx.insert("title", visible.title());
    ctx.insert("description", visible.description());

    let status = match visible {
        InvitationState::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    render_html(state, "pages/state.html", &ctx, status)
}

fn render_html(state: &AppState, template: &str, ctx: &Context, status: StatusCode) -> Result<Response, AppError> {
    let html = state
        .templates
        .render(template, ctx)
        .map_err(|e| AppError::Render(format!("{}: {:?}", template, e)))?;
    Ok((status, Html(html)).into_response())
}
