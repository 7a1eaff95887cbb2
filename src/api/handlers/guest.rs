use axum::{extract::{State, Path}, Json};
use crate::state::AppState;
use crate::api::extractors::maybe_auth::MaybeAuthUser;
use crate::api::dtos::requests::AssignSeatRequest;
use crate::api::dtos::responses::ActionResult;
use std::sync::Arc;

pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(host): MaybeAuthUser,
    Path((slug, guest_id)): Path<(String, String)>,
) -> ActionResult {
    let Some(host) = host else {
        return ActionResult::unauthorized();
    };

    match state.rsvp_service.delete_guest(&host, &slug, &guest_id).await {
        Ok(()) => ActionResult::done(),
        Err(e) => ActionResult::from_error(e, "Impossible de supprimer l'invité"),
    }
}

pub async fn assign_seat(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(host): MaybeAuthUser,
    Path((slug, guest_id)): Path<(String, String)>,
    Json(payload): Json<AssignSeatRequest>,
) -> ActionResult {
    let Some(host) = host else {
        return ActionResult::unauthorized();
    };

    match state.rsvp_service.assign_seat(&host, &slug, &guest_id, &payload.seat_number).await {
        Ok(()) => ActionResult::done(),
        Err(e) => ActionResult::from_error(e, "Impossible d'attribuer la place"),
    }
}
