use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Free-text time label, e.g. "2026-03-15 21:00" or "每周五晚".
    pub time: String,
    pub location: String,
    pub join_link: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: String,
    pub time: String,
    pub location: String,
    pub join_link: Option<String>,
    pub cover_image: Option<String>,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            time: params.time,
            location: params.location,
            join_link: params.join_link,
            cover_image: params.cover_image,
            created_at: Utc::now(),
        }
    }
}
