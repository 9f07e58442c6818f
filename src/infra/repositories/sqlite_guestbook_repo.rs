use crate::domain::{models::guestbook::GuestbookEntry, ports::GuestbookRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteGuestbookRepo {
    pool: SqlitePool,
}

impl SqliteGuestbookRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestbookRepository for SqliteGuestbookRepo {
    async fn create(&self, entry: &GuestbookEntry) -> Result<GuestbookEntry, AppError> {
        sqlx::query_as::<_, GuestbookEntry>("INSERT INTO guestbook (id, name, message, created_at) VALUES (?, ?, ?, ?) RETURNING *")
            .bind(&entry.id).bind(&entry.name).bind(&entry.message).bind(entry.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<GuestbookEntry>, AppError> {
        sqlx::query_as::<_, GuestbookEntry>("SELECT * FROM guestbook ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM guestbook WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("留言不存在".into())); }
        Ok(())
    }
}
