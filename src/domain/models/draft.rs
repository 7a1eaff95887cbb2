use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};

/// Creation-form state a host can come back to.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationDraft {
    pub host_man_name: String,
    pub host_woman_name: String,
    pub description: String,
    pub location: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub date_iso: Option<String>,
    pub start_time: String,
    pub theme: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub payload: InvitationDraft,
    pub saved_at: DateTime<Utc>,
}

impl Draft {
    pub fn new(payload: InvitationDraft, saved_at: DateTime<Utc>) -> Self {
        Self { payload, saved_at }
    }

    pub fn key_for(user_id: &str) -> String {
        format!("invitation:create:draft:{}", user_id)
    }
}

pub fn is_expired(saved_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - saved_at > ttl
}
