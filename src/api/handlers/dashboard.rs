use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::DashboardResponse;
use crate::domain::models::auth::UserProfile;
use crate::error::AppError;
use std::sync::Arc;

pub async fn overview(
    State(state): State<Arc<AppState>>,
    AuthUser(host): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth_service.current_user(&host).await?.map(|u| UserProfile {
        id: u.id,
        email: u.email,
        first_name: u.first_name,
        last_name: u.last_name,
    });

    let invitations = state.invitation_service.list_for_host(&host).await?;

    Ok(Json(DashboardResponse { user, invitations }))
}

pub async fn invitation_detail(
    State(state): State<Arc<AppState>>,
    AuthUser(host): AuthUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state.invitation_service.detail_for_host(&host, &slug).await?;
    Ok(Json(detail))
}
