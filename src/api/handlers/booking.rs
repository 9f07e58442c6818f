use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::admin::AdminSession;
use crate::api::dtos::{
    requests::{present, AvailabilityQuery, CalendarQuery, CreateBookingRequest, UpdateBookingStatusRequest},
    responses::{BookedTimesResponse, CalendarResponse, DataResponse},
};
use crate::domain::models::booking::BookingCategory;
use crate::domain::services::{booking_service::ReservationRequest, notification::Notification, slots};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn get_booked_times(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let raw = present(&query.date).ok_or(AppError::Validation("缺少日期参数".into()))?;
    let date = slots::parse_date(raw).ok_or(AppError::Validation("日期格式错误".into()))?;

    let booked_times = state.booking_service.booked_times(date).await?;
    Ok(Json(BookedTimesResponse { booked_times }))
}

pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let raw = present(&query.month).ok_or(AppError::Validation("缺少月份参数".into()))?;
    let first_day = slots::parse_month(raw).ok_or(AppError::Validation("月份格式错误".into()))?;
    let last_day = slots::last_day_of_month(first_day);

    let today = Utc::now().with_timezone(&state.config.site_timezone).date_naive();
    let bookings = state.booking_repo.list_active_between(first_day, last_day).await?;

    Ok(Json(CalendarResponse {
        month: first_day.format("%Y-%m").to_string(),
        slot_count: slots::TIME_SLOTS.len(),
        days: slots::month_calendar(first_day, today, &bookings),
    }))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.reserve(ReservationRequest {
        name: payload.name.unwrap_or_default(),
        contact: payload.contact.unwrap_or_default(),
        date: payload.date.unwrap_or_default(),
        time: payload.time.unwrap_or_default(),
        category: payload.booking_type.unwrap_or_default(),
        details: payload.details,
    }).await?;

    let category = booking.booking_type.parse::<BookingCategory>()
        .map(|c| c.label().to_string())
        .unwrap_or_else(|_| booking.booking_type.clone());

    state.notifications.dispatch(Notification::Booking {
        name: booking.name.clone(),
        contact: booking.contact.clone(),
        date: booking.booking_date.to_string(),
        time: booking.booking_time.clone(),
        category,
        details: booking.details.clone(),
    });

    Ok(Json(DataResponse::ok(booking)))
}

pub async fn list_all_bookings(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_all().await?;
    Ok(Json(bookings))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    Path(booking_id): Path<String>,
    JsonBody(payload): JsonBody<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let requested = payload.status.unwrap_or_default();
    let booking = state.booking_service.change_status(&booking_id, requested.trim()).await?;
    info!("Admin updated booking {} to {}", booking.id, booking.status);
    Ok(Json(DataResponse::ok(booking)))
}
