use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::auth::{Claims, SESSION_COOKIE};
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;

/// A request carrying a valid admin session cookie.
pub struct AdminSession(pub Claims);

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(AppError::Internal("CookieManagerLayer is not installed".into()))?;

        let token = cookies.get(SESSION_COOKIE)
            .ok_or(AppError::Unauthorized("未登录".into()))?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state.auth_service.verify_session(&token)?;

        Ok(AdminSession(claims))
    }
}
