use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::admin::AdminSession;
use crate::api::dtos::{requests::{present, CreateStoryRequest}, responses::{DataResponse, SuccessResponse}};
use crate::domain::models::guestbook::GuestbookEntry;
use crate::domain::services::notification::Notification;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.guestbook_repo.list().await?))
}

pub async fn create_story(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CreateStoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(message)) = (present(&payload.name), present(&payload.message)) else {
        return Err(AppError::Validation("缺少必填字段".into()));
    };

    let entry = state.guestbook_repo
        .create(&GuestbookEntry::new(name.to_string(), message.to_string()))
        .await?;
    info!("Guestbook entry {} left by {}", entry.id, entry.name);

    state.notifications.dispatch(Notification::Story {
        name: entry.name.clone(),
        message: entry.message.clone(),
    });

    Ok(Json(DataResponse::ok(entry)))
}

pub async fn delete_story(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(story_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.guestbook_repo.delete(&story_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
