use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use crate::state::AppState;
use crate::api::dtos::requests::{GuestImageQuery, ImageQuery, PreviewQuery, QrQuery};
use crate::domain::services::card::{datefmt::StartsAt, CardFields, PersonalBlock};
use crate::domain::services::qr::QrMatrix;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{error, info};

const IMAGE_CACHE_CONTROL: &str = "public, max-age=300";
const QR_DEFAULT_PX: u32 = 256;
const QR_MIN_PX: u32 = 64;
const QR_MAX_PX: u32 = 1024;

/// `GET /api/generate-image?slug=`
pub async fn invitation_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImageQuery>,
) -> Response {
    let dev = state.config.is_development();
    invitation_png(&state, query).await.unwrap_or_else(|e| plain_error(e, dev))
}

/// `GET /api/generate-my-inv?guestSlug=`
pub async fn guest_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GuestImageQuery>,
) -> Response {
    let dev = state.config.is_development();
    guest_png(&state, query).await.unwrap_or_else(|e| plain_error(e, dev))
}

/// `GET /api/preview-image?hostManName=..&theme=..`
pub async fn preview_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> Response {
    let dev = state.config.is_development();
    let fields = CardFields {
        host_man_name: query.host_man_name,
        host_woman_name: query.host_woman_name,
        description: query.description,
        location: query.location,
        starts_at: query.starts_at.map(StartsAt::Raw).unwrap_or(StartsAt::Missing),
        theme: query.theme.unwrap_or_default(),
    };

    render(&state, fields, None).await.unwrap_or_else(|e| plain_error(e, dev))
}

/// `GET /api/qr?slug=&size=`
pub async fn qr_code(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QrQuery>,
) -> Response {
    let dev = state.config.is_development();
    qr_svg(&state, query).await.unwrap_or_else(|e| plain_error(e, dev))
}

async fn qr_svg(state: &AppState, query: QrQuery) -> Result<Response, AppError> {
    let slug = query
        .slug
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Le slug de l'invitation est requis".into()))?;

    let invitation = state
        .invitation_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Invitation non trouvée".into()))?;

    let size = query.size.unwrap_or(QR_DEFAULT_PX).clamp(QR_MIN_PX, QR_MAX_PX);
    let matrix = QrMatrix::build(&state.config.invitation_url(&invitation.slug), query.level)?;

    Ok((
        [(header::CONTENT_TYPE, "image/svg+xml"), (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL)],
        matrix.to_svg(size),
    )
        .into_response())
}

async fn invitation_png(state: &AppState, query: ImageQuery) -> Result<Response, AppError> {
    let slug = query
        .slug
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Le slug de l'invitation est requis".into()))?;

    let invitation = state
        .invitation_repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Invitation non trouvée".into()))?;

    render(state, CardFields::from(&invitation), None).await
}

async fn guest_png(state: &AppState, query: GuestImageQuery) -> Result<Response, AppError> {
    let guest_slug = query
        .guest_slug
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Le slug du guest est requis".into()))?;

    let guest = state
        .guest_repo
        .find_by_slug(&guest_slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Guest non trouvé".into()))?;

    let invitation = state
        .invitation_repo
        .find_by_id(&guest.invitation_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Invitation non trouvée".into()))?;

    let personal = PersonalBlock {
        guest_name: guest.name,
        share_url: state.config.invitation_url(&invitation.slug),
    };

    info!("Rendering personal card for guest {}", guest.id);
    render(state, CardFields::from(&invitation), Some(personal)).await
}

async fn render(state: &AppState, fields: CardFields, personal: Option<PersonalBlock>) -> Result<Response, AppError> {
    let renderer = state.card_renderer.clone();
    let png = tokio::task::spawn_blocking(move || renderer.render_png(&fields, personal.as_ref()))
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Render task failed: {}", e)))??;

    Ok((
        [(header::CONTENT_TYPE, "image/png"), (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL)],
        png,
    )
        .into_response())
}

/// Image routes answer in plain text, including for 5xx.
fn plain_error(e: AppError, detailed: bool) -> Response {
    let (status, body) = match e {
        AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        other => {
            error!("Card image generation failed: {:?}", other);
            let body = if detailed {
                format!("Erreur détaillée: {}", other)
            } else {
                "Erreur lors de la génération de l'image".to_string()
            };
            (StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    };

    (status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}
