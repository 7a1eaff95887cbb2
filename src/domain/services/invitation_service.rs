use std::sync::Arc;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::models::{
    auth::HostIdentity,
    guest::Guest,
    invitation::{Invitation, InvitationStatus, NewInvitationParams, Visibility},
};
use crate::domain::ports::{GuestCounts, GuestRepository, InvitationRepository};
use crate::domain::services::card::datefmt::parse_timestamp;
use crate::domain::services::identifiers::random_slug;
use crate::error::AppError;

pub const MAX_LOCATION_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
const SLUG_ATTEMPTS: usize = 8;

#[derive(Debug, Default, Clone)]
pub struct CreateInvitationInput {
    pub host_man_name: Option<String>,
    pub host_woman_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<String>,
    pub coordinate_lat: Option<f64>,
    pub coordinate_lng: Option<f64>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Activate,
    Archive,
    Publish,
    Unpublish,
}

#[derive(Debug, Serialize)]
pub struct InvitationSummary {
    #[serde(flatten)]
    pub invitation: Invitation,
    pub guests: GuestCounts,
}

#[derive(Debug, Serialize)]
pub struct InvitationDetail {
    pub invitation: Invitation,
    pub guests: Vec<Guest>,
    pub counts: GuestCounts,
}

pub struct InvitationService {
    invitations: Arc<dyn InvitationRepository>,
    guests: Arc<dyn GuestRepository>,
    timezone: Tz,
}

impl InvitationService {
    pub fn new(invitations: Arc<dyn InvitationRepository>, guests: Arc<dyn GuestRepository>, timezone: Tz) -> Self {
        Self { invitations, guests, timezone }
    }

    pub async fn create(&self, host: &HostIdentity, input: CreateInvitationInput) -> Result<Invitation, AppError> {
        let host_man_name = trimmed(input.host_man_name);
        let host_woman_name = trimmed(input.host_woman_name);
        if host_man_name.is_none() && host_woman_name.is_none() {
            return Err(AppError::Validation("Au moins un nom (Monsieur ou Madame) est requis".into()));
        }

        let raw_start = trimmed(input.starts_at).ok_or_else(|| AppError::Validation("Start date/time required".into()))?;

        let location = trimmed(input.location).ok_or_else(|| AppError::Validation("Location is required".into()))?;
        if location.chars().count() > MAX_LOCATION_LEN {
            return Err(AppError::Validation(format!(
                "Location is too long (max {} characters)",
                MAX_LOCATION_LEN
            )));
        }

        let description = trimmed(input.description);
        if description.as_ref().is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN) {
            return Err(AppError::Validation(format!(
                "Description is too long (max {} characters)",
                MAX_DESCRIPTION_LEN
            )));
        }

        let starts_at = parse_timestamp(&raw_start, self.timezone)
            .ok_or_else(|| AppError::Validation("Invalid start time".into()))?;

        let coordinate = match (input.coordinate_lat, input.coordinate_lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            let slug = self.unused_slug().await?;
            let invitation = Invitation::new(NewInvitationParams {
                slug,
                host_id: host.user_id.clone(),
                host_man_name: host_man_name.clone(),
                host_woman_name: host_woman_name.clone(),
                description: description.clone(),
                location: location.clone(),
                coordinate,
                starts_at,
                theme: input.theme.clone(),
            });

            match self.invitations.create(&invitation).await {
                Ok(created) => {
                    info!("Host {} created invitation {} ({})", host.user_id, created.id, created.slug);
                    return Ok(created);
                }
                // lost a race for the slug between the check and the insert
                Err(e) if e.is_unique_violation_on("slug") && attempts < SLUG_ATTEMPTS => {
                    warn!("Invitation slug {} taken at insert, regenerating", invitation.slug);
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn apply(&self, host: &HostIdentity, invitation_id: &str, action: HostAction) -> Result<(), AppError> {
        let updated = match action {
            HostAction::Activate => self.invitations.set_status(&host.user_id, invitation_id, InvitationStatus::Active).await?,
            HostAction::Archive => self.invitations.set_status(&host.user_id, invitation_id, InvitationStatus::Draft).await?,
            HostAction::Publish => self.invitations.set_visibility(&host.user_id, invitation_id, Visibility::Public).await?,
            HostAction::Unpublish => self.invitations.set_visibility(&host.user_id, invitation_id, Visibility::Private).await?,
        };

        if !updated {
            warn!("Host {} attempted {:?} on invitation {} without ownership", host.user_id, action, invitation_id);
            return Err(AppError::Unauthorized);
        }

        info!("Host {} applied {:?} to invitation {}", host.user_id, action, invitation_id);
        Ok(())
    }

    pub async fn delete(&self, host: &HostIdentity, invitation_id: &str) -> Result<(), AppError> {
        if !self.invitations.delete(&host.user_id, invitation_id).await? {
            warn!("Host {} attempted to delete invitation {} without ownership", host.user_id, invitation_id);
            return Err(AppError::Unauthorized);
        }
        info!("Host {} deleted invitation {}", host.user_id, invitation_id);
        Ok(())
    }

    pub async fn list_for_host(&self, host: &HostIdentity) -> Result<Vec<InvitationSummary>, AppError> {
        let invitations = self.invitations.list_by_host(&host.user_id).await?;
        let mut summaries = Vec::with_capacity(invitations.len());
        for invitation in invitations {
            let guests = self.guests.count_by_invitation(&invitation.id).await?;
            summaries.push(InvitationSummary { invitation, guests });
        }
        Ok(summaries)
    }

    /// Another host's invitation is reported as missing.
    pub async fn detail_for_host(&self, host: &HostIdentity, slug: &str) -> Result<InvitationDetail, AppError> {
        let invitation = self
            .invitations
            .find_by_slug(slug)
            .await?
            .filter(|inv| inv.host_id == host.user_id)
            .ok_or_else(|| AppError::NotFound("Invitation not found".into()))?;

        let guests = self.guests.list_by_invitation(&invitation.id).await?;
        let counts = self.guests.count_by_invitation(&invitation.id).await?;

        Ok(InvitationDetail { invitation, guests, counts })
    }

    async fn unused_slug(&self) -> Result<String, AppError> {
        for _ in 0..SLUG_ATTEMPTS {
            let slug = random_slug();
            if self.invitations.find_by_slug(&slug).await?.is_none() {
                return Ok(slug);
            }
        }
        Err(AppError::Conflict("Could not allocate a unique slug".into()))
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
