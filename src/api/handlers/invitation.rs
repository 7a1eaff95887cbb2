use axum::{extract::{State, Path}, Json};
use crate::state::AppState;
use crate::api::extractors::maybe_auth::MaybeAuthUser;
use crate::api::dtos::requests::CreateInvitationRequest;
use crate::api::dtos::responses::ActionResult;
use crate::domain::services::invitation_service::HostAction;
use std::sync::Arc;
use serde_json::json;

pub async fn create_invitation(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(host): MaybeAuthUser,
    Json(payload): Json<CreateInvitationRequest>,
) -> ActionResult {
    let Some(host) = host else {
        tracing::warn!("Invitation creation without session");
        return ActionResult::unauthorized();
    };

    match state.invitation_service.create(&host, payload.into()).await {
        Ok(inv) => ActionResult::with(
            "invitation",
            json!({
                "id": inv.id,
                "slug": inv.slug,
                "title": inv.title,
                "startsAt": inv.starts_at,
                "visibility": inv.visibility,
                "status": inv.status,
                "createdAt": inv.created_at,
            }),
        ),
        Err(e) => ActionResult::from_error(e, "Failed to create invitation"),
    }
}

pub async fn activate_invitation(
    State(state): State<Arc<AppState>>,
    host: MaybeAuthUser,
    Path(id): Path<String>,
) -> ActionResult {
    host_action(&state, host, &id, HostAction::Activate, "Impossible d'activer l'invitation").await
}

pub async fn archive_invitation(
    State(state): State<Arc<AppState>>,
    host: MaybeAuthUser,
    Path(id): Path<String>,
) -> ActionResult {
    host_action(&state, host, &id, HostAction::Archive, "Impossible d'archiver l'invitation").await
}

pub async fn publish_invitation(
    State(state): State<Arc<AppState>>,
    host: MaybeAuthUser,
    Path(id): Path<String>,
) -> ActionResult {
    host_action(&state, host, &id, HostAction::Publish, "Impossible de publier l'invitation").await
}

pub async fn unpublish_invitation(
    State(state): State<Arc<AppState>>,
    host: MaybeAuthUser,
    Path(id): Path<String>,
) -> ActionResult {
    host_action(&state, host, &id, HostAction::Unpublish, "Impossible de dépublier l'invitation").await
}

pub async fn delete_invitation(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(host): MaybeAuthUser,
    Path(id): Path<String>,
) -> ActionResult {
    let Some(host) = host else {
        return ActionResult::unauthorized();
    };

    match state.invitation_service.delete(&host, &id).await {
        Ok(()) => ActionResult::done(),
        Err(e) => ActionResult::from_error(e, "Impossible de supprimer l'invitation"),
    }
}

async fn host_action(
    state: &AppState,
    MaybeAuthUser(host): MaybeAuthUser,
    id: &str,
    action: HostAction,
    fallback: &str,
) -> ActionResult {
    let Some(host) = host else {
        return ActionResult::unauthorized();
    };

    match state.invitation_service.apply(&host, id, action).await {
        Ok(()) => ActionResult::done(),
        Err(e) => ActionResult::from_error(e, fallback),
    }
}
