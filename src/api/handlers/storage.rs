use axum::{extract::{State, Path, Multipart}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::admin::AdminSession;
use crate::api::dtos::{requests::{present, DeleteFileRequest}, responses::{DataResponse, SuccessResponse}};
use crate::domain::models::storage::{is_valid_bucket_name, storage_file_name, PHOTO_BUCKET};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

fn checked_bucket(bucket: &str) -> Result<&str, AppError> {
    if is_valid_bucket_name(bucket) {
        Ok(bucket)
    } else {
        Err(AppError::Validation("无效的存储桶".into()))
    }
}

/// Public listing. Any storage failure yields an empty list.
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Path(bucket): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bucket = checked_bucket(&bucket)?;
    let images = state.storage_service.list_images(bucket).await.unwrap_or_else(|e| {
        warn!("Listing bucket {} failed: {}", bucket, e);
        Vec::new()
    });
    Ok(Json(images))
}

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let bucket = checked_bucket(&bucket)?;

    while let Some(field) = multipart.next_field().await
        .map_err(|e| AppError::Validation(format!("表单解析失败: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
        let data = field.bytes().await
            .map_err(|e| AppError::Validation(format!("表单解析失败: {}", e)))?;
        if data.is_empty() {
            break;
        }

        let file_name = storage_file_name(&original, Utc::now());
        let uploaded = state.storage_service
            .upload(bucket, &file_name, &content_type, data.to_vec())
            .await?;
        info!("Stored {} ({} bytes) as {}", original, data.len(), uploaded.path);
        return Ok(Json(DataResponse::ok(uploaded)));
    }

    Err(AppError::Validation("没有文件".into()))
}

pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(bucket): Path<String>,
    JsonBody(payload): JsonBody<DeleteFileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let bucket = checked_bucket(&bucket)?;
    let file_name = present(&payload.file_name)
        .ok_or(AppError::Validation("缺少文件名".into()))?;

    state.storage_service.delete(bucket, file_name).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn list_photos(state: State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    list_images(state, Path(PHOTO_BUCKET.to_string())).await
}

pub async fn delete_photo(
    state: State<Arc<AppState>>,
    admin: AdminSession,
    payload: JsonBody<DeleteFileRequest>,
) -> Result<impl IntoResponse, AppError> {
    delete_image(state, admin, Path(PHOTO_BUCKET.to_string()), payload).await
}
