use crate::domain::{
    models::invitation::{Invitation, InvitationStatus, Visibility},
    ports::InvitationRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteInvitationRepo {
    pool: SqlitePool,
}

impl SqliteInvitationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for SqliteInvitationRepo {
    async fn create(&self, invitation: &Invitation) -> Result<Invitation, AppError> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO invitations (id, slug, host_id, title, host_man_name, host_woman_name, description, location, latitude, longitude, starts_at, theme, visibility, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id, slug, host_id, title, host_man_name, host_woman_name, description, location, latitude, longitude, starts_at, theme, visibility, status, created_at, updated_at",
        )
            .bind(&invitation.id)
            .bind(&invitation.slug)
            .bind(&invitation.host_id)
            .bind(&invitation.title)
            .bind(&invitation.host_man_name)
            .bind(&invitation.host_woman_name)
            .bind(&invitation.description)
            .bind(&invitation.location)
            .bind(invitation.latitude)
            .bind(invitation.longitude)
            .bind(invitation.starts_at)
            .bind(&invitation.theme)
            .bind(invitation.visibility)
            .bind(invitation.status)
            .bind(invitation.created_at)
            .bind(invitation.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let err = AppError::from_sqlx(e);
                if !matches!(err, AppError::UniqueViolation { .. }) {
                    error!("SQLite invitation insert failed: {:?}", err);
                }
                err
            })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Invitation>, AppError> {
        sqlx::query_as::<_, Invitation>("SELECT id, slug, host_id, title, host_man_name, host_woman_name, description, location, latitude, longitude, starts_at, theme, visibility, status, created_at, updated_at FROM invitations WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Invitation>, AppError> {
        sqlx::query_as::<_, Invitation>("SELECT id, slug, host_id, title, host_man_name, host_woman_name, description, location, latitude, longitude, starts_at, theme, visibility, status, created_at, updated_at FROM invitations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_host(&self, host_id: &str) -> Result<Vec<Invitation>, AppError> {
        sqlx::query_as::<_, Invitation>(
            "SELECT id, slug, host_id, title, host_man_name, host_woman_name, description, location, latitude, longitude, starts_at, theme, visibility, status, created_at, updated_at FROM invitations WHERE host_id = ? ORDER BY created_at DESC",
        )
            .bind(host_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_status(&self, host_id: &str, id: &str, status: InvitationStatus) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE invitations SET status = ?, updated_at = ? WHERE id = ? AND host_id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .bind(host_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_visibility(&self, host_id: &str, id: &str, visibility: Visibility) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE invitations SET visibility = ?, updated_at = ? WHERE id = ? AND host_id = ?")
            .bind(visibility)
            .bind(Utc::now())
            .bind(id)
            .bind(host_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, host_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM invitations WHERE id = ? AND host_id = ?")
            .bind(id)
            .bind(host_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite invitation deletion failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
