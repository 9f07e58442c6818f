use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::models::booking::{Booking, BookingCategory, BookingStatus, NewBookingParams};
use crate::domain::ports::BookingRepository;
use crate::domain::services::slots;
use crate::error::AppError;

pub const SLOT_TAKEN: &str = "该时间段已被预约";

/// A reservation request whose fields are present but not yet checked.
pub struct ReservationRequest {
    pub name: String,
    pub contact: String,
    pub date: String,
    pub time: String,
    pub category: String,
    pub details: Option<String>,
}

pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    /// Labels of the slots already held by a live booking on `date`.
    pub async fn booked_times(&self, date: NaiveDate) -> Result<Vec<String>, AppError> {
        let mut times = self.repo.booked_times_on(date).await?;
        times.sort();
        times.dedup();
        Ok(times)
    }

    /// Admits or rejects a reservation. The pre-check gives the common case
    /// a clean conflict; the repository's unique slot index settles races.
    pub async fn reserve(&self, request: ReservationRequest) -> Result<Booking, AppError> {
        let params = validate(request)?;

        if self.repo.find_active_by_slot(params.date, &params.time).await?.is_some() {
            warn!("Slot {} {} already taken", params.date, params.time);
            return Err(AppError::Conflict(SLOT_TAKEN.into()));
        }

        let booking = Booking::new(params);
        let created = self.repo.create(&booking).await?;
        info!("Booking {} created for {} {}", created.id, created.booking_date, created.booking_time);
        Ok(created)
    }

    pub async fn change_status(&self, id: &str, requested: &str) -> Result<Booking, AppError> {
        let next: BookingStatus = requested
            .parse()
            .map_err(|_| AppError::Validation("无效的状态".into()))?;

        let booking = self.repo.find_by_id(id).await?
            .ok_or(AppError::NotFound("预约不存在".into()))?;

        let current: BookingStatus = booking.status.parse()
            .map_err(|_| AppError::Internal(format!("Booking {} has unknown status {}", id, booking.status)))?;

        if !current.can_transition_to(next) {
            return Err(AppError::Conflict("不允许的状态变更".into()));
        }

        let updated = self.repo.update_status(id, next.as_str()).await?;
        info!("Booking {} moved {} -> {}", id, current, next);
        Ok(updated)
    }
}

fn validate(request: ReservationRequest) -> Result<NewBookingParams, AppError> {
    let missing = [&request.name, &request.contact, &request.date, &request.time, &request.category]
        .iter()
        .any(|field| field.trim().is_empty());
    if missing {
        return Err(AppError::Validation("缺少必填字段".into()));
    }

    let date = slots::parse_date(&request.date)
        .ok_or(AppError::Validation("日期格式错误".into()))?;

    let time = request.time.trim().to_string();
    if !slots::is_valid_slot(&time) {
        return Err(AppError::Validation("无效的时间段".into()));
    }

    let category: BookingCategory = request.category.trim().parse()
        .map_err(|_| AppError::Validation("无效的预约类型".into()))?;

    Ok(NewBookingParams {
        name: request.name.trim().to_string(),
        contact: request.contact.trim().to_string(),
        date,
        time,
        category,
        details: request.details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(time: &str, category: &str) -> ReservationRequest {
        ReservationRequest {
            name: "阿青".into(),
            contact: "aqing@example.com".into(),
            date: "2026-03-15".into(),
            time: time.into(),
            category: category.into(),
            details: None,
        }
    }

    #[test]
    fn test_validate_accepts_catalogue_slot() {
        let params = validate(request("14:00", "offline")).unwrap();
        assert_eq!(params.time, "14:00");
        assert_eq!(params.category, BookingCategory::Offline);
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut req = request("14:00", "offline");
        req.contact = "  ".into();
        assert!(matches!(validate(req), Err(AppError::Validation(msg)) if msg == "缺少必填字段"));
    }

    #[test]
    fn test_validate_rejects_off_catalogue_time() {
        assert!(matches!(validate(request("14:30", "offline")), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        assert!(matches!(validate(request("14:00", "party")), Err(AppError::Validation(_))));
    }
}
