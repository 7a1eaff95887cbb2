use std::sync::Arc;
use crate::domain::ports::{GuestRepository, InvitationRepository};
use crate::domain::services::{
    auth_service::AuthService, card::CardRenderer, draft_service::DraftService,
    invitation_service::InvitationService, rsvp::RsvpService,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub invitation_repo: Arc<dyn InvitationRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub auth_service: Arc<AuthService>,
    pub invitation_service: Arc<InvitationService>,
    pub rsvp_service: Arc<RsvpService>,
    pub draft_service: Arc<DraftService>,
    pub card_renderer: Arc<CardRenderer>,
    pub templates: Arc<Tera>,
}
