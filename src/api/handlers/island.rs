use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::client_ip::ClientAddress;
use crate::api::dtos::{requests::{present, IslandIdentityRequest}, responses::IdentityResponse};
use crate::domain::services::island_identity::generate_identity;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn generate_island_identity(
    State(state): State<Arc<AppState>>,
    ClientAddress(client): ClientAddress,
    JsonBody(payload): JsonBody<IslandIdentityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let personality = present(&payload.personality)
        .ok_or(AppError::Validation("请输入你的性格和喜好".into()))?;

    if !state.identity_limiter.check(&client) {
        return Err(AppError::RateLimited("请求过于频繁，请稍后再试（每分钟最多2次）".into()));
    }

    let api_key = state.config.ai_api_key.as_deref()
        .ok_or(AppError::Config("TUZIAI_API_KEY".into()))?;

    let identity = generate_identity(state.llm_service.as_ref(), api_key, personality).await?;
    info!("Island identity generated: {}", identity.role);

    Ok(Json(IdentityResponse { success: true, identity }))
}
