use crate::domain::{
    models::guest::Guest,
    ports::{GuestCounts, GuestRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

pub struct PostgresGuestRepo {
    pool: PgPool,
}

impl PostgresGuestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for PostgresGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at",
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
                    error!("Postgres guest insert failed: {:?}", err);
                }
                err
            })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at FROM guests WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at FROM guests WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, invitation_id: &str, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at FROM guests WHERE id = $1 AND invitation_id = $2")
            .bind(id)
            .bind(invitation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_invitation(&self, invitation_id: &str) -> Result<Vec<Guest>, AppError> {
        sqlx::query_as::<_, Guest>(
            "SELECT id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at FROM guests WHERE invitation_id = $1 ORDER BY created_at DESC",
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
             FROM guests WHERE invitation_id = $1",
        )
            .bind(invitation_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_response(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET status = $1, responded_at = $2 WHERE id = $3 RETURNING id, slug, token, invitation_id, name, phone, email, status, responded_at, created_at",
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
        let result = sqlx::query("DELETE FROM guests WHERE id = $1 AND invitation_id = $2")
            .bind(id)
            .bind(invitation_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres guest deletion failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
