use crate::domain::{
    models::guest::Guest,
    ports::{GuestCounts, GuestRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

pub struct SqliteGuestRepo {
    pool: SqlitePool,
}

impl SqliteGuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for SqliteGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at",
        )
            .bind(&guest.id)
            .bind(&guest.slug)
            .bind(&guest.token)
            .bind(&guest.invitation_id)
            .bind(&guest.name)
            .bind(&guest.phone)
            .bind(&guest.email)
            .bind(guest.status)
            .bind(guest.responded_at)
            .bind(guest.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let err = AppError::from_sqlx(e);
                if !matches!(err, AppError::UniqueViolation { .. }) {
                    error!("SQLite guest insert failed: {:?}", err);
                }
                err
            })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at FROM guests WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at FROM guests WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, invitation_id: &str, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at FROM guests WHERE id = ? AND invitation_id = ?")
            .bind(id)
            .bind(invitation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_invitation(&self, invitation_id: &str) -> Result<Vec<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            "SELECT id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at FROM guests WHERE invitation_id = ? ORDER BY created_at DESC",
        )
            .bind(invitation_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_invitation(&self, invitation_id: &str) -> Result<GuestCounts, AppError> {
        sqlx::query_as::<_, GuestCounts>(
            "SELECT COALESCE(SUM(CASE WHEN status = 'ACCEPTED' THEN 1 ELSE 0 END), 0) AS accepted, \
                    COALESCE(SUM(CASE WHEN status = 'DECLINED' THEN 1 ELSE 0 END), 0) AS declined \
             FROM guests WHERE invitation_id = ?",
        )
            .bind(invitation_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_response(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET status = ?, responded_at = ? WHERE id = ? RETURNING id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at",
        )
            .bind(guest.status)
            .bind(guest.responded_at)
            .bind(&guest.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Guest not found".into()))
    }

    async fn delete(&self, invitation_id: &str, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = ? AND invitation_id = ?")
            .bind(id)
            .bind(invitation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite guest deletion failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
