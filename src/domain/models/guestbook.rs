use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A "bottle letter" left by a visitor. Entries are never edited.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct GuestbookEntry {
    pub id: String,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl GuestbookEntry {
    pub fn new(name: String, message: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            message,
            created_at: Utc::now(),
        }
    }
}
