use crate::domain::{models::content::{HeroContent, Profile, SINGLETON_ID}, ports::ContentRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresContentRepo {
    pool: PgPool,
}

impl PostgresContentRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl ContentRepository for PostgresContentRepo {
    async fn get_hero(&self) -> Result<Option<HeroContent>, AppError> {
        sqlx::query_as::<_, HeroContent>("SELECT * FROM hero_content WHERE id = $1").bind(SINGLETON_ID).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn upsert_hero(&self, hero: &HeroContent) -> Result<HeroContent, AppError> {
        sqlx::query_as::<_, HeroContent>(
            r#"INSERT INTO hero_content (id, main_title, main_subtitle, left_card_title, left_card_description, right_card_title, right_card_description, bottom_text, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               ON CONFLICT(id) DO UPDATE SET
               main_title=excluded.main_title,
               main_subtitle=excluded.main_subtitle,
               left_card_title=excluded.left_card_title,
               left_card_description=excluded.left_card_description,
               right_card_title=excluded.right_card_title,
               right_card_description=excluded.right_card_description,
               bottom_text=excluded.bottom_text,
               updated_at=excluded.updated_at
               RETURNING *"#
        )
            .bind(SINGLETON_ID)
            .bind(&hero.main_title)
            .bind(&hero.main_subtitle)
            .bind(&hero.left_card_title)
            .bind(&hero.left_card_description)
            .bind(&hero.right_card_title)
            .bind(&hero.right_card_description)
            .bind(&hero.bottom_text)
            .bind(hero.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
    async fn get_profile(&self) -> Result<Option<Profile>, AppError> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profile WHERE id = $1").bind(SINGLETON_ID).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn upsert_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            r#"INSERT INTO profile (id, name, avatar_url, tags, bio_paragraph_1, bio_paragraph_2, bio_quote, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               ON CONFLICT(id) DO UPDATE SET
               name=excluded.name,
               avatar_url=excluded.avatar_url,
               tags=excluded.tags,
               bio_paragraph_1=excluded.bio_paragraph_1,
               bio_paragraph_2=excluded.bio_paragraph_2,
               bio_quote=excluded.bio_quote,
               updated_at=excluded.updated_at
               RETURNING *"#
        )
            .bind(SINGLETON_ID)
            .bind(&profile.name)
            .bind(&profile.avatar_url)
            .bind(&profile.tags)
            .bind(&profile.bio_paragraph_1)
            .bind(&profile.bio_paragraph_2)
            .bind(&profile.bio_quote)
            .bind(profile.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
