use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Type};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum GuestStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RsvpDecision {
    Accepted,
    Declined,
}

impl GuestStatus {
    /// Pending is only ever a starting point. A guest who already answered may change
    /// their mind; answering the same thing twice is a no-op.
    pub fn apply(self, decision: RsvpDecision) -> GuestStatus {
        match decision {
            RsvpDecision::Accepted => GuestStatus::Accepted,
            RsvpDecision::Declined => GuestStatus::Declined,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub slug: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub invitation_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: GuestStatus,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(invitation_id: String, name: String, phone: Option<String>, slug: String, token: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            slug,
            token,
            invitation_id,
            name,
            phone,
            email: None,
            status: GuestStatus::Pending,
            responded_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn respond(&mut self, decision: RsvpDecision, at: DateTime<Utc>) {
        self.status = self.status.apply(decision);
        self.responded_at = Some(at);
    }
}
