use crate::config::Config;
use crate::domain::models::auth::{Claims, SESSION_AUDIENCE};
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

pub const SESSION_TTL_HOURS: i64 = 24;

/// Admin sign-in against the two configured secrets, with the session kept
/// in a signed HS256 token.
pub struct AuthService {
    config: Config,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<(), AppError> {
        let (Some(expected_user), Some(expected_pass)) =
            (self.config.admin_username.as_deref(), self.config.admin_password.as_deref())
        else {
            return Err(AppError::Config("ADMIN_USERNAME / ADMIN_PASSWORD".into()));
        };

        let user_ok = constant_time_eq(username.as_bytes(), expected_user.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), expected_pass.as_bytes());
        if user_ok && pass_ok {
            Ok(())
        } else {
            Err(AppError::Unauthorized("用户名或密码错误".into()))
        }
    }

    pub fn issue_session(&self, username: &str) -> Result<String, AppError> {
        let secret = self.secret()?;
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            aud: SESSION_AUDIENCE.to_string(),
            exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| AppError::Internal(format!("JWT encoding failed: {}", e)))
    }

    pub fn verify_session(&self, token: &str) -> Result<Claims, AppError> {
        let secret = self.secret()?;
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[SESSION_AUDIENCE]);

        let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map_err(|_| AppError::Unauthorized("未登录".into()))?;

        if self.config.admin_username.as_deref() != Some(data.claims.sub.as_str()) {
            return Err(AppError::Unauthorized("未登录".into()));
        }
        Ok(data.claims)
    }

    fn secret(&self) -> Result<&str, AppError> {
        self.config.session_key().ok_or(AppError::Config("SESSION_SECRET".into()))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
