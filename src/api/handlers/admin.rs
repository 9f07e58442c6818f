use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::json::JsonBody;
use crate::api::extractors::admin::AdminSession;
use crate::api::dtos::{requests::LoginRequest, responses::{SessionStatusResponse, SuccessResponse}};
use crate::domain::models::auth::SESSION_COOKIE;
use crate::domain::services::auth_service::SESSION_TTL_HOURS;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    if let Err(e) = state.auth_service.verify_credentials(&username, &password) {
        if matches!(e, AppError::Unauthorized(_)) {
            warn!("Failed admin login attempt for {}", username);
        }
        return Err(e);
    }

    let token = state.auth_service.issue_session(&username)?;
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(Duration::hours(SESSION_TTL_HOURS));
    cookies.add(cookie);

    info!("Admin logged in: {}", username);
    Ok(Json(SuccessResponse::ok()))
}

pub async fn check(AdminSession(_admin): AdminSession) -> impl IntoResponse {
    Json(SessionStatusResponse { authenticated: true })
}

pub async fn logout(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());
    info!("Admin logged out");
    Json(SuccessResponse::ok())
}
