use crate::domain::models::storage::{is_image_file, StoredImage, UploadedImage};
use crate::domain::ports::StorageService;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info, instrument};

const LIST_LIMIT: u32 = 100;

/// Object storage over the Supabase Storage REST API.
pub struct SupabaseStorageService {
    client: Client,
    base_url: Option<String>,
    service_key: Option<String>,
}

#[derive(Deserialize)]
struct ObjectEntry {
    name: String,
    created_at: Option<DateTime<Utc>>,
}

impl SupabaseStorageService {
    pub fn new(base_url: Option<String>, service_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
            service_key,
        }
    }

    fn credentials(&self) -> Result<(&str, &str), AppError> {
        let url = self.base_url.as_deref().ok_or(AppError::Config("SUPABASE_URL".into()))?;
        let key = self.service_key.as_deref().ok_or(AppError::Config("SUPABASE_SERVICE_KEY".into()))?;
        Ok((url, key))
    }

    fn public_url(base_url: &str, bucket: &str, name: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", base_url, bucket, name)
    }
}

async fn ensure_success(res: Response, action: &str, public: &str) -> Result<Response, AppError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    error!("Storage {} failed. Status: {}, Body: {}", action, status, text);
    Err(AppError::Upstream(public.into(), format!("Storage {} failed: {} - {}", action, status, text)))
}

fn connection_error(action: &str, public: &str, e: reqwest::Error) -> AppError {
    AppError::Upstream(public.into(), format!("Storage {} connection error: {}", action, e))
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    #[instrument(skip(self))]
    async fn list_images(&self, bucket: &str) -> Result<Vec<StoredImage>, AppError> {
        let (base_url, key) = self.credentials()?;
        let url = format!("{}/storage/v1/object/list/{}", base_url, bucket);

        let res = self.client.post(&url)
            .bearer_auth(key)
            .header("apikey", key)
            .json(&json!({
                "prefix": "",
                "limit": LIST_LIMIT,
                "offset": 0,
                "sortBy": {"column": "created_at", "order": "desc"}
            }))
            .send()
            .await
            .map_err(|e| connection_error("list", "获取图片失败", e))?;

        let entries: Vec<ObjectEntry> = ensure_success(res, "list", "获取图片失败").await?
            .json()
            .await
            .map_err(|e| connection_error("list", "获取图片失败", e))?;

        let mut images: Vec<StoredImage> = entries
            .into_iter()
            .filter(|entry| is_image_file(&entry.name))
            .map(|entry| StoredImage {
                url: Self::public_url(base_url, bucket, &entry.name),
                name: entry.name,
                created_at: entry.created_at,
            })
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload(&self, bucket: &str, file_name: &str, content_type: &str, data: Vec<u8>) -> Result<UploadedImage, AppError> {
        let (base_url, key) = self.credentials()?;
        let url = format!("{}/storage/v1/object/{}/{}", base_url, bucket, file_name);

        let res = self.client.post(&url)
            .bearer_auth(key)
            .header("apikey", key)
            .header("Content-Type", content_type)
            .header("cache-control", "3600")
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| connection_error("upload", "上传失败", e))?;
        ensure_success(res, "upload", "上传失败").await?;

        info!("Uploaded {} to bucket {}", file_name, bucket);
        Ok(UploadedImage {
            path: file_name.to_string(),
            public_url: Self::public_url(base_url, bucket, file_name),
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, bucket: &str, file_name: &str) -> Result<(), AppError> {
        let (base_url, key) = self.credentials()?;
        let url = format!("{}/storage/v1/object/{}", base_url, bucket);

        let res = self.client.delete(&url)
            .bearer_auth(key)
            .header("apikey", key)
            .json(&json!({ "prefixes": [file_name] }))
            .send()
            .await
            .map_err(|e| connection_error("delete", "删除失败", e))?;
        ensure_success(res, "delete", "删除失败").await?;

        info!("Deleted {} from bucket {}", file_name, bucket);
        Ok(())
    }
}
