use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::admin::AdminSession;
use crate::api::dtos::{requests::{present, EventRequest}, responses::{DataResponse, SuccessResponse}};
use crate::domain::models::event::{Event, NewEventParams};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Blank optional links are stored as absent.
fn link(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    JsonBody(payload): JsonBody<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = present(&payload.title)
        .ok_or(AppError::Validation("缺少活动标题".into()))?
        .to_string();

    let event = Event::new(NewEventParams {
        title,
        description: payload.description.unwrap_or_default(),
        time: payload.time.unwrap_or_default(),
        location: payload.location.unwrap_or_default(),
        join_link: link(payload.join_link),
        cover_image: link(payload.cover_image),
    });

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} ({})", created.title, created.id);
    Ok(Json(DataResponse::ok(created)))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(event_id): Path<String>,
    JsonBody(payload): JsonBody<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("活动不存在".into()))?;

    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("缺少活动标题".into()));
        }
        event.title = title.trim().to_string();
    }
    if let Some(description) = payload.description { event.description = description; }
    if let Some(time) = payload.time { event.time = time; }
    if let Some(location) = payload.location { event.location = location; }
    if payload.join_link.is_some() { event.join_link = link(payload.join_link); }
    if payload.cover_image.is_some() { event.cover_image = link(payload.cover_image); }

    let updated = state.event_repo.update(&event).await?;
    Ok(Json(DataResponse::ok(updated)))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&event_id).await?;
    info!("Event deleted: {}", event_id);
    Ok(Json(SuccessResponse::ok()))
}
