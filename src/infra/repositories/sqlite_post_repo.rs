use crate::domain::{models::post::Post, ports::PostRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePostRepo {
    pool: SqlitePool,
}

impl SqlitePostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepo {
    async fn create(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>("INSERT INTO posts (id, content, image_url, created_at) VALUES (?, ?, ?, ?) RETURNING *")
            .bind(&post.id).bind(&post.content).bind(&post.image_url).bind(post.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, post: &Post) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>("UPDATE posts SET content = ?, image_url = ? WHERE id = ? RETURNING *")
            .bind(&post.content).bind(&post.image_url).bind(&post.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("碎片不存在".into()))
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("碎片不存在".into())); }
        Ok(())
    }
}
