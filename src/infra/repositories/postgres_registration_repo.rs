use crate::domain::{models::registration::EventRegistration, ports::RegistrationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRegistrationRepo {
    pool: PgPool,
}

impl PostgresRegistrationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepo {
    async fn create(&self, registration: &EventRegistration) -> Result<EventRegistration, AppError> {
        sqlx::query_as::<_, EventRegistration>(
            "INSERT INTO event_registrations (id, event_id, name, contact, notes, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(&registration.id).bind(&registration.event_id).bind(&registration.name)
            .bind(&registration.contact).bind(&registration.notes).bind(&registration.status)
            .bind(registration.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<EventRegistration>, AppError> {
        sqlx::query_as::<_, EventRegistration>("SELECT * FROM event_registrations WHERE event_id = $1 AND id = $2")
            .bind(event_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventRegistration>, AppError> {
        sqlx::query_as::<_, EventRegistration>("SELECT * FROM event_registrations WHERE event_id = $1 ORDER BY created_at DESC")
            .bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, registration: &EventRegistration) -> Result<EventRegistration, AppError> {
        sqlx::query_as::<_, EventRegistration>(
            "UPDATE event_registrations SET name = $1, contact = $2, notes = $3, status = $4
             WHERE id = $5 AND event_id = $6
             RETURNING *"
        )
            .bind(&registration.name).bind(&registration.contact).bind(&registration.notes)
            .bind(&registration.status).bind(&registration.id).bind(&registration.event_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("报名不存在".into()))
    }
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM event_registrations WHERE id = $1 AND event_id = $2").bind(id).bind(event_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("报名不存在".into())); }
        Ok(())
    }
}
