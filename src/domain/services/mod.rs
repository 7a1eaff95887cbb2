pub mod auth_service;
pub mod card;
pub mod draft_service;
pub mod identifiers;
pub mod invitation_service;
pub mod qr;
pub mod rsvp;
