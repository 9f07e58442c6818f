use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::admin::AdminSession;
use crate::api::dtos::{requests::{present, PostRequest}, responses::{DataResponse, SuccessResponse}};
use crate::domain::models::post::Post;
use crate::error::AppError;
use std::sync::Arc;

fn image(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.post_repo.list().await?))
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    JsonBody(payload): JsonBody<PostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let content = present(&payload.content)
        .ok_or(AppError::Validation("缺少内容".into()))?
        .to_string();

    let post = state.post_repo.create(&Post::new(content, image(payload.image_url))).await?;
    Ok(Json(DataResponse::ok(post)))
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(post_id): Path<String>,
    JsonBody(payload): JsonBody<PostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut post = state.post_repo.find_by_id(&post_id).await?
        .ok_or(AppError::NotFound("碎片不存在".into()))?;

    if let Some(content) = payload.content {
        if content.trim().is_empty() {
            return Err(AppError::Validation("缺少内容".into()));
        }
        post.content = content.trim().to_string();
    }
    if payload.image_url.is_some() {
        post.image_url = image(payload.image_url);
    }

    Ok(Json(DataResponse::ok(state.post_repo.update(&post).await?)))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.post_repo.delete(&post_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
