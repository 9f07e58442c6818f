use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::admin::AdminSession;
use crate::api::dtos::{requests::{UpdateHeroRequest, UpdateProfileRequest}, responses::DataResponse};
use crate::domain::models::content::{HeroContent, Profile};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use sqlx::types::Json as JsonColumn;
use tracing::{info, warn};

/// Public read. A missing row or a failing store serves the built-in copy.
pub async fn get_hero(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let hero = match state.content_repo.get_hero().await {
        Ok(Some(hero)) => hero,
        Ok(None) => HeroContent::default(),
        Err(e) => {
            warn!("Serving default hero content: {}", e);
            HeroContent::default()
        }
    };
    Json(hero)
}

pub async fn update_hero(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    JsonBody(payload): JsonBody<UpdateHeroRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut hero = state.content_repo.get_hero().await?.unwrap_or_default();

    if let Some(v) = payload.main_title { hero.main_title = v; }
    if let Some(v) = payload.main_subtitle { hero.main_subtitle = v; }
    if let Some(v) = payload.left_card_title { hero.left_card_title = v; }
    if let Some(v) = payload.left_card_description { hero.left_card_description = v; }
    if let Some(v) = payload.right_card_title { hero.right_card_title = v; }
    if let Some(v) = payload.right_card_description { hero.right_card_description = v; }
    if let Some(v) = payload.bottom_text { hero.bottom_text = v; }
    hero.updated_at = Utc::now();

    let saved = state.content_repo.upsert_hero(&hero).await?;
    info!("Hero content updated");
    Ok(Json(DataResponse::ok(saved)))
}

pub async fn get_profile(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let profile = match state.content_repo.get_profile().await {
        Ok(Some(profile)) => profile,
        Ok(None) => Profile::default(),
        Err(e) => {
            warn!("Serving default profile: {}", e);
            Profile::default()
        }
    };
    Json(profile)
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AdminSession(_admin): AdminSession,
    JsonBody(payload): JsonBody<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut profile = state.content_repo.get_profile().await?.unwrap_or_default();

    if let Some(v) = payload.name { profile.name = v; }
    if let Some(v) = payload.avatar_url {
        profile.avatar_url = Some(v).filter(|url| !url.trim().is_empty());
    }
    if let Some(tags) = payload.tags {
        let tags = tags.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        profile.tags = JsonColumn(tags);
    }
    if let Some(v) = payload.bio_paragraph_1 { profile.bio_paragraph_1 = v; }
    if let Some(v) = payload.bio_paragraph_2 { profile.bio_paragraph_2 = v; }
    if let Some(v) = payload.bio_quote { profile.bio_quote = v; }
    profile.updated_at = Utc::now();

    let saved = state.content_repo.upsert_profile(&profile).await?;
    info!("Profile updated");
    Ok(Json(DataResponse::ok(saved)))
}
