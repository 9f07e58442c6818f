use crate::domain::{models::booking::{Booking, BookingStatus}, ports::BookingRepository, services::booking_service::SLOT_TAKEN};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::NaiveDate;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// A booking in this state no longer holds its slot.
const RELEASED: &str = BookingStatus::Cancelled.as_str();

fn slot_conflict(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::Conflict(SLOT_TAKEN.into())
    } else {
        AppError::Database(e)
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, name, contact, booking_date, booking_time, booking_type, details, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.name).bind(&booking.contact)
            .bind(booking.booking_date).bind(&booking.booking_time).bind(&booking.booking_type)
            .bind(&booking.details).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(slot_conflict)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_active_by_slot(&self, date: NaiveDate, time: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_date = ? AND booking_time = ? AND status != ? LIMIT 1")
            .bind(date).bind(time).bind(RELEASED).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn booked_times_on(&self, date: NaiveDate) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT booking_time FROM bookings WHERE booking_date = ? AND status != ?")
            .bind(date).bind(RELEASED).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_active_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_date >= ? AND booking_date <= ? AND status != ? ORDER BY booking_date ASC, booking_time ASC")
            .bind(start).bind(end).bind(RELEASED).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = ? WHERE id = ? RETURNING *")
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(slot_conflict)?
            .ok_or(AppError::NotFound("预约不存在".into()))
    }
}
