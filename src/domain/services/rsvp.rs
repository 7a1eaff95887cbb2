use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

use crate::domain::models::{
    auth::HostIdentity,
    guest::{Guest, RsvpDecision},
    invitation::Invitation,
};
use crate::domain::ports::{GuestRepository, InvitationRepository};
use crate::domain::services::identifiers::{random_slug, random_token};
use crate::error::AppError;

/// Extra inserts allowed after a token collision.
pub const TOKEN_RETRIES: usize = 2;
const SLUG_ATTEMPTS: usize = 8;
const MAX_SEAT_LEN: usize = 16;

pub struct ConfirmInput {
    pub full_name: String,
    pub phone: Option<String>,
}

pub struct RsvpService {
    invitations: Arc<dyn InvitationRepository>,
    guests: Arc<dyn GuestRepository>,
}

impl RsvpService {
    pub fn new(invitations: Arc<dyn InvitationRepository>, guests: Arc<dyn GuestRepository>) -> Self {
        Self { invitations, guests }
    }

    /// Records an acceptance as a new guest row. Every call creates a row, even for a
    /// name already on the list.
    pub async fn confirm(&self, slug: &str, input: ConfirmInput) -> Result<Guest, AppError> {
        let invitation = self
            .invitations
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Invitation not found".into()))?;

        let full_name = input.full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::Validation("Le nom complet est requis".into()));
        }
        let phone = input.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());

        let guest_slug = self.unused_guest_slug().await?;
        let mut guest = Guest::new(invitation.id.clone(), full_name.to_string(), phone, guest_slug, random_token());
        guest.respond(RsvpDecision::Accepted, Utc::now());

        let mut retries = 0;
        let mut slug_attempts = 1;
        loop {
            match self.guests.create(&guest).await {
                Ok(created) => {
                    info!("Guest {} accepted invitation {}", created.id, slug);
                    return Ok(created);
                }
                Err(e) if e.is_unique_violation_on("token") && retries < TOKEN_RETRIES => {
                    retries += 1;
                    warn!("Guest token collision on invitation {}, retry {}/{}", slug, retries, TOKEN_RETRIES);
                    guest.token = random_token();
                }
                // lost a race for the guest slug between the check and the insert
                Err(e) if e.is_unique_violation_on("slug") && slug_attempts < SLUG_ATTEMPTS => {
                    slug_attempts += 1;
                    warn!("Guest slug {} taken at insert, regenerating", guest.slug);
                    guest.slug = self.unused_guest_slug().await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Without a guest token there is nobody to attach the answer to, so it is only logged.
    pub async fn decline(&self, slug: &str, token: Option<&str>) -> Result<Option<Guest>, AppError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            info!(slug = %slug, decision = "DECLINED", "Anonymous RSVP received");
            return Ok(None);
        };

        let invitation = self
            .invitations
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Invitation not found".into()))?;

        let guest = self
            .guests
            .find_by_token(token)
            .await?
            .filter(|g| g.invitation_id == invitation.id)
            .ok_or_else(|| AppError::NotFound("Guest not found".into()))?;

        self.apply(guest, RsvpDecision::Declined).await.map(Some)
    }

    pub async fn respond_by_token(&self, token: &str, decision: RsvpDecision) -> Result<Guest, AppError> {
        let guest = self
            .guests
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::NotFound("Guest not found".into()))?;

        self.apply(guest, decision).await
    }

    pub async fn delete_guest(&self, host: &HostIdentity, invitation_slug: &str, guest_id: &str) -> Result<(), AppError> {
        let invitation = self.owned_invitation(host, invitation_slug).await?;

        if !self.guests.delete(&invitation.id, guest_id).await? {
            return Err(AppError::NotFound("Guest not found".into()));
        }

        info!("Host {} removed guest {} from {}", host.user_id, guest_id, invitation_slug);
        Ok(())
    }

    /// Seats are not stored yet; the request is checked and logged.
    pub async fn assign_seat(
        &self,
        host: &HostIdentity,
        invitation_slug: &str,
        guest_id: &str,
        seat: &str,
    ) -> Result<(), AppError> {
        let invitation = self.owned_invitation(host, invitation_slug).await?;

        let seat = seat.trim();
        if seat.is_empty() || seat.chars().count() > MAX_SEAT_LEN {
            return Err(AppError::Validation("Numéro de place invalide".into()));
        }

        if self.guests.find_by_id(&invitation.id, guest_id).await?.is_none() {
            return Err(AppError::NotFound("Guest not found".into()));
        }

        info!(guest_id = %guest_id, seat = %seat, invitation = %invitation_slug, "Seat assignment requested");
        Ok(())
    }

    async fn apply(&self, mut guest: Guest, decision: RsvpDecision) -> Result<Guest, AppError> {
        let previous = guest.status;
        guest.respond(decision, Utc::now());
        let updated = self.guests.update_response(&guest).await?;
        info!("Guest {} moved from {:?} to {:?}", updated.id, previous, updated.status);
        Ok(updated)
    }

    async fn owned_invitation(&self, host: &HostIdentity, slug: &str) -> Result<Invitation, AppError> {
        self.invitations
            .find_by_slug(slug)
            .await?
            .filter(|inv| inv.host_id == host.user_id)
            .ok_or(AppError::Unauthorized)
    }

    async fn unused_guest_slug(&self) -> Result<String, AppError> {
        for _ in 0..SLUG_ATTEMPTS {
            let slug = random_slug();
            if self.guests.find_by_slug(&slug).await?.is_none() {
                return Ok(slug);
            }
        }
        Err(AppError::Conflict("Impossible de générer un identifiant unique".into()))
    }
}
