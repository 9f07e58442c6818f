use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const REGISTRATION_STATUSES: [&str; 4] = ["pending", "confirmed", "attended", "absent"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventRegistration {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub contact: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl EventRegistration {
    pub fn new(event_id: String, name: String, contact: String, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            contact,
            notes: notes.filter(|n| !n.trim().is_empty()),
            status: "pending".to_string(),
            created_at: Utc::now(),
        }
    }
}

pub fn is_valid_registration_status(status: &str) -> bool {
    REGISTRATION_STATUSES.contains(&status)
}
