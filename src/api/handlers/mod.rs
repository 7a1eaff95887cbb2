pub mod auth;
pub mod dashboard;
pub mod draft;
pub mod guest;
pub mod health;
pub mod image;
pub mod invitation;
pub mod page;
pub mod rsvp;
