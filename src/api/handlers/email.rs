use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::dtos::{requests::{present, SendEmailRequest}, responses::SuccessResponse};
use crate::domain::models::booking::BookingCategory;
use crate::domain::services::notification::Notification;
use crate::error::AppError;
use std::sync::Arc;

fn missing_fields() -> AppError {
    AppError::Validation("缺少必填字段".into())
}

fn notification_from(payload: &SendEmailRequest) -> Result<Notification, AppError> {
    let name = present(&payload.name).ok_or_else(missing_fields)?.to_string();

    match present(&payload.kind) {
        Some("contact") => Ok(Notification::Contact {
            name,
            contact: present(&payload.contact).map(String::from),
            message: present(&payload.message).ok_or_else(missing_fields)?.to_string(),
        }),
        Some("story") => Ok(Notification::Story {
            name,
            message: present(&payload.message).ok_or_else(missing_fields)?.to_string(),
        }),
        Some("booking") => {
            let date = present(&payload.date).ok_or_else(missing_fields)?.to_string();
            let time = present(&payload.time).ok_or_else(missing_fields)?.to_string();
            let category = present(&payload.booking_type)
                .map(|raw| {
                    raw.parse::<BookingCategory>()
                        .map(|c| c.label().to_string())
                        .unwrap_or_else(|_| raw.to_string())
                })
                .unwrap_or_default();
            Ok(Notification::Booking {
                name,
                contact: present(&payload.contact).unwrap_or_default().to_string(),
                date,
                time,
                category,
                details: present(&payload.details).map(String::from),
            })
        }
        _ => Err(AppError::Validation("无效的类型".into())),
    }
}

/// Synchronous variant of the owner notification: the caller sees the
/// provider's verdict.
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<SendEmailRequest>,
) -> Result<impl IntoResponse, AppError> {
    let notification = notification_from(&payload)?;
    state.notifications.send(&notification).await?;
    Ok(Json(SuccessResponse::ok()))
}
