use axum::{extract::{State, Path}, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{ConfirmRequest, DeclineRequest, RespondRequest};
use crate::api::dtos::responses::ActionResult;
use crate::domain::models::guest::Guest;
use crate::domain::services::rsvp::ConfirmInput;
use std::sync::Arc;
use serde_json::{json, Value};

pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<ConfirmRequest>,
) -> ActionResult {
    let input = ConfirmInput {
        full_name: payload.full_name,
        phone: payload.phone,
    };

    match state.rsvp_service.confirm(&slug, input).await {
        Ok(guest) => ActionResult::with("guest", guest_link(&guest)),
        Err(e) => ActionResult::from_error(e, "Impossible d'enregistrer votre réponse"),
    }
}

pub async fn decline(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<DeclineRequest>,
) -> ActionResult {
    match state.rsvp_service.decline(&slug, payload.token.as_deref()).await {
        Ok(Some(guest)) => ActionResult::with("guest", guest_link(&guest)),
        Ok(None) => ActionResult::done(),
        Err(e) => ActionResult::from_error(e, "Impossible d'enregistrer votre réponse"),
    }
}

pub async fn respond(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Json(payload): Json<RespondRequest>,
) -> ActionResult {
    match state.rsvp_service.respond_by_token(&token, payload.decision).await {
        Ok(guest) => ActionResult::with("guest", guest_link(&guest)),
        Err(e) => ActionResult::from_error(e, "Impossible d'enregistrer votre réponse"),
    }
}

/// The token is only ever handed back to the guest who just answered.
fn guest_link(guest: &Guest) -> Value {
    json!({
        "slug": guest.slug,
        "token": guest.token,
        "status": guest.status,
        "respondedAt": guest.responded_at,
    })
}
