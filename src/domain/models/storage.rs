use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

pub const PHOTO_BUCKET: &str = "PHOTO";

/// A file in an object bucket. The bucket listing is the source of truth,
/// so this is never stored as a row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoredImage {
    pub name: String,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadedImage {
    pub path: String,
    #[serde(rename = "publicUrl")]
    pub public_url: String,
}

pub fn is_image_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn is_valid_bucket_name(bucket: &str) -> bool {
    !bucket.is_empty()
        && bucket.len() <= 63
        && bucket.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Uploads are renamed to `<unix-millis>.<ext>` so that names sort by upload time.
pub fn storage_file_name(original: &str, now: DateTime<Utc>) -> String {
    let ext = original
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    format!("{}.{}", now.timestamp_millis(), ext)
}
