use axum::{extract::State, Json};
use crate::state::AppState;
use crate::api::extractors::maybe_auth::MaybeAuthUser;
use crate::api::dtos::responses::ActionResult;
use crate::domain::models::draft::InvitationDraft;
use std::sync::Arc;
use chrono::Utc;

pub async fn save_draft(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(host): MaybeAuthUser,
    Json(payload): Json<InvitationDraft>,
) -> ActionResult {
    let Some(host) = host else {
        return ActionResult::unauthorized();
    };

    match state.draft_service.save(&host.user_id, payload, Utc::now()).await {
        Ok(draft) => ActionResult::with("savedAt", draft.saved_at),
        Err(e) => ActionResult::from_error(e, "Impossible d'enregistrer le brouillon"),
    }
}

pub async fn load_draft(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(host): MaybeAuthUser,
) -> ActionResult {
    let Some(host) = host else {
        return ActionResult::unauthorized();
    };

    match state.draft_service.load(&host.user_id, Utc::now()).await {
        Ok(draft) => ActionResult::with("draft", draft),
        Err(e) => ActionResult::from_error(e, "Impossible de charger le brouillon"),
    }
}

pub async fn clear_draft(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(host): MaybeAuthUser,
) -> ActionResult {
    let Some(host) = host else {
        return ActionResult::unauthorized();
    };

    match state.draft_service.clear(&host.user_id).await {
        Ok(()) => ActionResult::done(),
        Err(e) => ActionResult::from_error(e, "Impossible de supprimer le brouillon"),
    }
}
