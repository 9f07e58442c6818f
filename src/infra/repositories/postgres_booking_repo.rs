use crate::domain::{models::booking::{Booking, BookingStatus}, ports::BookingRepository, services::booking_service::SLOT_TAKEN};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
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
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, name, contact, booking_date, booking_time, booking_type, details, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.name).bind(&booking.contact)
            .bind(booking.booking_date).bind(&booking.booking_time).bind(&booking.booking_type)
            .bind(&booking.details).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(slot_conflict)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_active_by_slot(&self, date: NaiveDate, time: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_date = $1 AND booking_time = $2 AND status != $3 LIMIT 1")
            .bind(date).bind(time).bind(RELEASED).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn booked_times_on(&self, date: NaiveDate) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT booking_time FROM bookings WHERE booking_date = $1 AND status != $2")
            .bind(date).bind(RELEASED).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_active_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_date >= $1 AND booking_date <= $2 AND status != $3 ORDER BY booking_date ASC, booking_time ASC")
            .bind(start).bind(end).bind(RELEASED).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(slot_conflict)?
            .ok_or(AppError::NotFound("预约不存在".into()))
    }
}
