use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// An "island fragment": one line of text and one picture.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(content: String, image_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            image_url,
            created_at: Utc::now(),
        }
    }
}
