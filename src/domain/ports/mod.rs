use crate::domain::models::{
    guest::Guest,
    invitation::{Invitation, InvitationStatus, Visibility},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
}

/// Guest tallies shown next to each invitation on the dashboard.
#[derive(Debug, Clone, Default, serde::Serialize, sqlx::FromRow)]
pub struct GuestCounts {
    pub accepted: i64,
    pub declined: i64,
}

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn create(&self, invitation: &Invitation) -> Result<Invitation, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Invitation>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Invitation>, AppError>;
    async fn list_by_host(&self, host_id: &str) -> Result<Vec<Invitation>, AppError>;
    /// Updates only rows owned by `host_id`. Returns false when nothing matched.
    async fn set_status(&self, host_id: &str, id: &str, status: InvitationStatus) -> Result<bool, AppError>;
    async fn set_visibility(&self, host_id: &str, id: &str, visibility: Visibility) -> Result<bool, AppError>;
    async fn delete(&self, host_id: &str, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Guest>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Guest>, AppError>;
    async fn find_by_id(&self, invitation_id: &str, id: &str) -> Result<Option<Guest>, AppError>;
    async fn list_by_invitation(&self, invitation_id: &str) -> Result<Vec<Guest>, AppError>;
    async fn count_by_invitation(&self, invitation_id: &str) -> Result<GuestCounts, AppError>;
    async fn update_response(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn delete(&self, invitation_id: &str, id: &str) -> Result<bool, AppError>;
}

/// String key-value storage with a write timestamp.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<(String, DateTime<Utc>)>, AppError>;
    async fn put(&self, key: &str, value: &str, at: DateTime<Utc>) -> Result<(), AppError>;
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

#[cfg(test)]
pub mod memory;
