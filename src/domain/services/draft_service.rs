use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::domain::models::draft::{is_expired, Draft, InvitationDraft};
use crate::domain::ports::KeyValueStore;
use crate::error::AppError;

pub struct DraftService {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl DraftService {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub async fn save(&self, user_id: &str, payload: InvitationDraft, now: DateTime<Utc>) -> Result<Draft, AppError> {
        let draft = Draft::new(payload, now);
        let value = serde_json::to_string(&draft.payload)
            .map_err(|e| AppError::InternalWithMsg(format!("Draft serialization failed: {}", e)))?;
        self.store.put(&Draft::key_for(user_id), &value, now).await?;
        Ok(draft)
    }

    /// Expired or unreadable drafts are removed and reported as absent.
    pub async fn load(&self, user_id: &str, now: DateTime<Utc>) -> Result<Option<Draft>, AppError> {
        let key = Draft::key_for(user_id);
        let Some((value, saved_at)) = self.store.get(&key).await? else {
            return Ok(None);
        };

        if is_expired(saved_at, now, self.ttl) {
            debug!("Draft for {} expired, clearing", user_id);
            self.store.delete(&key).await?;
            return Ok(None);
        }

        match serde_json::from_str::<InvitationDraft>(&value) {
            Ok(payload) => Ok(Some(Draft::new(payload, saved_at))),
            Err(e) => {
                warn!("Dropping unreadable draft for {}: {}", user_id, e);
                self.store.delete(&key).await?;
                Ok(None)
            }
        }
    }

    pub async fn clear(&self, user_id: &str) -> Result<(), AppError> {
        self.store.delete(&Draft::key_for(user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::memory::MemoryKeyValueStore;

    fn payload() -> InvitationDraft {
        InvitationDraft {
            host_man_name: "Jean".into(),
            location: "Kinshasa".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let svc = DraftService::new(Arc::new(MemoryKeyValueStore::default()), Duration::minutes(10));
        let now = Utc::now();
        svc.save("u1", payload(), now).await.unwrap();

        let loaded = svc.load("u1", now + Duration::minutes(5)).await.unwrap().unwrap();
        assert_eq!(loaded.payload, payload());
        assert!(svc.load("u2", now).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_draft_is_removed() {
        let store = Arc::new(MemoryKeyValueStore::default());
        let svc = DraftService::new(store.clone(), Duration::minutes(10));
        let now = Utc::now();
        svc.save("u1", payload(), now).await.unwrap();

        assert!(svc.load("u1", now + Duration::minutes(11)).await.unwrap().is_none());
        assert!(store.get(&Draft::key_for("u1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let svc = DraftService::new(Arc::new(MemoryKeyValueStore::default()), Duration::minutes(10));
        let now = Utc::now();
        svc.save("u1", payload(), now).await.unwrap();
        svc.clear("u1").await.unwrap();
        assert!(svc.load("u1", now).await.unwrap().is_none());
    }
}
