use crate::domain::{models::registration::EventRegistration, ports::RegistrationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteRegistrationRepo {
    pool: SqlitePool,
}

impl SqliteRegistrationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepo {
    async fn create(&self, registration: &EventRegistration) -> Result<EventRegistration, AppError> {
        sqlx::query_as::<_, EventRegistration>(
            "INSERT INTO event_registrations (id, event_id, name, contact, notes, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&registration.id).bind(&registration.event_id).bind(&registration.name)
            .bind(&registration.contact).bind(&registration.notes).bind(&registration.status)
            .bind(registration.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<EventRegistration>, AppError> {
        sqlx::query_as::<_, EventRegistration>("SELECT * FROM event_registrations WHERE event_id = ? AND id = ?")
            .bind(event_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventRegistration>, AppError> {
        sqlx::query_as::<_, EventRegistration>("SELECT * FROM event_registrations WHERE event_id = ? ORDER BY created_at DESC")
            .bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, registration: &EventRegistration) -> Result<EventRegistration, AppError> {
        sqlx::query_as::<_, EventRegistration>(
            "UPDATE event_registrations SET name = ?, contact = ?, notes = ?, status = ?
             WHERE id = ? AND event_id = ?
             RETURNING *"
        )
            .bind(&registration.name).bind(&registration.contact).bind(&registration.notes)
            .bind(&registration.status).bind(&registration.id).bind(&registration.event_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("报名不存在".into()))
    }
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM event_registrations WHERE id = ? AND event_id = ?").bind(id).bind(event_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("报名不存在".into())); }
        Ok(())
    }
}
