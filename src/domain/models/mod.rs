pub mod auth;
pub mod draft;
pub mod guest;
pub mod invitation;
pub mod user;
