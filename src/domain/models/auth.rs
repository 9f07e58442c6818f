use serde::{Deserialize, Serialize};

pub const SESSION_AUDIENCE: &str = "island-admin";
pub const SESSION_COOKIE: &str = "admin_token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}
