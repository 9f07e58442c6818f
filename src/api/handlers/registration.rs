use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::admin::AdminSession;
use crate::api::dtos::{
    requests::{present, CreateRegistrationRequest, UpdateRegistrationRequest},
    responses::{DataResponse, SuccessResponse},
};
use crate::domain::models::registration::{is_valid_registration_status, EventRegistration};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_registrations(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let registrations = state.registration_repo.list_by_event(&event_id).await?;
    Ok(Json(registrations))
}

pub async fn create_registration(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    JsonBody(payload): JsonBody<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(contact)) = (present(&payload.name), present(&payload.contact)) else {
        return Err(AppError::Validation("缺少必填字段".into()));
    };

    state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("活动不存在".into()))?;

    let registration = EventRegistration::new(
        event_id,
        name.to_string(),
        contact.to_string(),
        payload.notes,
    );
    let created = state.registration_repo.create(&registration).await?;
    info!("Registration {} for event {}", created.id, created.event_id);
    Ok(Json(DataResponse::ok(created)))
}

pub async fn update_registration(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path((event_id, registration_id)): Path<(String, String)>,
    JsonBody(payload): JsonBody<UpdateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut registration = state.registration_repo.find_by_id(&event_id, &registration_id).await?
        .ok_or(AppError::NotFound("报名不存在".into()))?;

    if let Some(status) = payload.status {
        if !is_valid_registration_status(status.trim()) {
            return Err(AppError::Validation("无效的状态".into()));
        }
        registration.status = status.trim().to_string();
    }
    if let Some(name) = present(&payload.name) { registration.name = name.to_string(); }
    if let Some(contact) = present(&payload.contact) { registration.contact = contact.to_string(); }
    if let Some(notes) = payload.notes {
        registration.notes = Some(notes).filter(|n| !n.trim().is_empty());
    }

    let updated = state.registration_repo.update(&registration).await?;
    Ok(Json(DataResponse::ok(updated)))
}

pub async fn delete_registration(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path((event_id, registration_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.registration_repo.delete(&event_id, &registration_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
