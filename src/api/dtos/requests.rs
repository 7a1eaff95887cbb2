use crate::domain::models::guest::RsvpDecision;
use crate::domain::services::invitation_service::CreateInvitationInput;
use crate::domain::services::qr::ErrorCorrection;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationRequest {
    pub host_man_name: Option<String>,
    pub host_woman_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<String>,
    pub coordinate_lat: Option<f64>,
    pub coordinate_lng: Option<f64>,
    pub theme: Option<String>,
}

impl From<CreateInvitationRequest> for CreateInvitationInput {
    fn from(req: CreateInvitationRequest) -> Self {
        Self {
            host_man_name: req.host_man_name,
            host_woman_name: req.host_woman_name,
            description: req.description,
            location: req.location,
            starts_at: req.starts_at,
            coordinate_lat: req.coordinate_lat,
            coordinate_lng: req.coordinate_lng,
            theme: req.theme,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSeatRequest {
    pub seat_number: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    #[serde(default)]
    pub full_name: String,
    pub phone: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct DeclineRequest {
    pub token: Option<String>,
}

#[derive(Deserialize)]
pub struct RespondRequest {
    pub decision: RsvpDecision,
}

#[derive(Deserialize)]
pub struct ImageQuery {
    pub slug: Option<String>,
}

#[derive(Deserialize)]
pub struct GuestImageQuery {
    #[serde(rename = "guestSlug")]
    pub guest_slug: Option<String>,
}

/// Raw card fields for previewing an invitation before it exists.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreviewQuery {
    pub host_man_name: Option<String>,
    pub host_woman_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<String>,
    pub theme: Option<String>,
}

#[derive(Deserialize)]
pub struct QrQuery {
    pub slug: Option<String>,
    pub size: Option<u32>,
    #[serde(default)]
    pub level: ErrorCorrection,
}
