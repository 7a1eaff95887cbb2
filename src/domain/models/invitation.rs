use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, Type};

pub const DEFAULT_THEME: &str = "minimalist";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum InvitationStatus {
    Draft,
    Active,
    Archived,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    Private,
    Public,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Invitation {
    pub id: String,
    pub slug: String,
    pub host_id: String,
    pub title: String,
    pub host_man_name: Option<String>,
    pub host_woman_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub starts_at: DateTime<Utc>,
    pub theme: String,
    pub visibility: Visibility,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewInvitationParams {
    pub slug: String,
    pub host_id: String,
    pub host_man_name: Option<String>,
    pub host_woman_name: Option<String>,
    pub description: Option<String>,
    pub location: String,
    pub coordinate: Option<(f64, f64)>,
    pub starts_at: DateTime<Utc>,
    pub theme: Option<String>,
}

impl Invitation {
    pub fn new(params: NewInvitationParams) -> Self {
        let now = Utc::now();
        let title = couple_title(params.host_man_name.as_deref(), params.host_woman_name.as_deref())
            .unwrap_or_else(|| "Événement".to_string());

        Self {
            id: Uuid::new_v4().to_string(),
            slug: params.slug,
            host_id: params.host_id,
            title,
            host_man_name: params.host_man_name,
            host_woman_name: params.host_woman_name,
            description: params.description,
            location: Some(params.location),
            latitude: params.coordinate.map(|(lat, _)| lat),
            longitude: params.coordinate.map(|(_, lng)| lng),
            starts_at: params.starts_at,
            theme: params
                .theme
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_THEME.to_string()),
            visibility: Visibility::Private,
            status: InvitationStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Joins the non-empty host names with " & ".
pub fn couple_title(man: Option<&str>, woman: Option<&str>) -> Option<String> {
    let names: Vec<&str> = [man, woman]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names.join(" & "))
    }
}

/// What a visitor of `/inv/{slug}` gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvitationState {
    Viewable,
    NotFound,
    Private,
    Draft,
    Archived,
    Inactive,
}

impl InvitationState {
    pub fn resolve(invitation: Option<&Invitation>, now: DateTime<Utc>) -> Self {
        let Some(inv) = invitation else {
            return InvitationState::NotFound;
        };

        match (inv.status, inv.visibility) {
            (InvitationStatus::Draft, _) => InvitationState::Draft,
            (InvitationStatus::Archived, _) => InvitationState::Archived,
            (InvitationStatus::Active, Visibility::Private) => InvitationState::Private,
            (InvitationStatus::Active, Visibility::Public) => {
                if inv.starts_at + Duration::days(1) < now {
                    InvitationState::Inactive
                } else {
                    InvitationState::Viewable
                }
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            InvitationState::Viewable => "Invitation",
            InvitationState::NotFound => "Invitation introuvable",
            InvitationState::Private => "Invitation privée",
            InvitationState::Draft => "Invitation en brouillon",
            InvitationState::Archived => "Invitation archivée",
            InvitationState::Inactive => "Invitation inactive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            InvitationState::Viewable => "",
            InvitationState::NotFound => "Cette invitation n'existe pas ou a été supprimée.",
            InvitationState::Private => "Cette invitation n'est accessible que sur invitation personnelle.",
            InvitationState::Draft => "Cette invitation est en cours de préparation.",
            InvitationState::Archived => "Cette invitation a été archivée.",
            InvitationState::Inactive => "Cette invitation n'est plus active.",
        }
    }
}
