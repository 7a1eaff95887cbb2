//! In-memory port implementations for service unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::*;
use crate::domain::models::guest::GuestStatus;

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::UniqueViolation { field: "email".into() });
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryInvitationRepo {
    pub rows: Mutex<Vec<Invitation>>,
}

#[async_trait]
impl InvitationRepository for MemoryInvitationRepo {
    async fn create(&self, invitation: &Invitation) -> Result<Invitation, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|i| i.slug == invitation.slug) {
            return Err(AppError::UniqueViolation { field: "slug".into() });
        }
        rows.push(invitation.clone());
        Ok(invitation.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Invitation>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|i| i.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Invitation>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|i| i.id == id).cloned())
    }

    async fn list_by_host(&self, host_id: &str) -> Result<Vec<Invitation>, AppError> {
        Ok(self.rows.lock().unwrap().iter().filter(|i| i.host_id == host_id).cloned().collect())
    }

    async fn set_status(&self, host_id: &str, id: &str, status: InvitationStatus) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|i| i.id == id && i.host_id == host_id) {
            Some(inv) => {
                inv.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_visibility(&self, host_id: &str, id: &str, visibility: Visibility) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|i| i.id == id && i.host_id == host_id) {
            Some(inv) => {
                inv.visibility = visibility;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, host_id: &str, id: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|i| !(i.id == id && i.host_id == host_id));
        Ok(rows.len() != before)
    }
}

/// Guest store that can be told to reject the next N inserts as token collisions.
#[derive(Default)]
pub struct MemoryGuestRepo {
    pub rows: Mutex<Vec<Guest>>,
    pub token_collisions: AtomicUsize,
    pub slug_collisions: AtomicUsize,
    pub insert_attempts: AtomicUsize,
}

impl MemoryGuestRepo {
    pub fn colliding(times: usize) -> Self {
        Self {
            token_collisions: AtomicUsize::new(times),
            ..Default::default()
        }
    }

    pub fn colliding_slugs(times: usize) -> Self {
        Self {
            slug_collisions: AtomicUsize::new(times),
            ..Default::default()
        }
    }
}

#[async_trait]
impl GuestRepository for MemoryGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        let pending = self.token_collisions.load(Ordering::SeqCst);
        if pending > 0 {
            self.token_collisions.store(pending - 1, Ordering::SeqCst);
            return Err(AppError::UniqueViolation { field: "token".into() });
        }
        let pending = self.slug_collisions.load(Ordering::SeqCst);
        if pending > 0 {
            self.slug_collisions.store(pending - 1, Ordering::SeqCst);
            return Err(AppError::UniqueViolation { field: "slug".into() });
        }

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|g| g.token == guest.token) {
            return Err(AppError::UniqueViolation { field: "token".into() });
        }
        if rows.iter().any(|g| g.slug == guest.slug) {
            return Err(AppError::UniqueViolation { field: "slug".into() });
        }
        rows.push(guest.clone());
        Ok(guest.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Guest>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|g| g.slug == slug).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Guest>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|g| g.token == token).cloned())
    }

    async fn find_by_id(&self, invitation_id: &str, id: &str) -> Result<Option<Guest>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id && g.invitation_id == invitation_id)
            .cloned())
    }

    async fn list_by_invitation(&self, invitation_id: &str) -> Result<Vec<Guest>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.invitation_id == invitation_id)
            .cloned()
            .collect())
    }

    async fn count_by_invitation(&self, invitation_id: &str) -> Result<GuestCounts, AppError> {
        let rows = self.rows.lock().unwrap();
        let mine = rows.iter().filter(|g| g.invitation_id == invitation_id);
        let mut counts = GuestCounts::default();
        for g in mine {
            match g.status {
                GuestStatus::Accepted => counts.accepted += 1,
                GuestStatus::Declined => counts.declined += 1,
                GuestStatus::Pending => {}
            }
        }
        Ok(counts)
    }

    async fn update_response(&self, guest: &Guest) -> Result<Guest, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|g| g.id == guest.id)
            .ok_or_else(|| AppError::NotFound("Guest not found".into()))?;
        row.status = guest.status;
        row.responded_at = guest.responded_at;
        Ok(row.clone())
    }

    async fn delete(&self, invitation_id: &str, id: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|g| !(g.id == id && g.invitation_id == invitation_id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<(String, DateTime<Utc>)>, AppError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        self.entries.lock().unwrap().insert(key.to_string(), (value.to_string(), at));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
