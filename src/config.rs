use std::env;

use chrono_tz::Tz;

use crate::error::AppError;

const DEFAULT_MAIL_FROM: &str = "Xiaohei Island <onboarding@resend.dev>";
const DEFAULT_AI_BASE_URL: &str = "https://api.tu-zi.com/v1";
const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub session_secret: Option<String>,
    pub resend_api_key: Option<String>,
    pub notify_email: Option<String>,
    pub mail_from: String,
    pub ai_api_key: Option<String>,
    pub ai_base_url: String,
    pub ai_model: String,
    pub site_timezone: Tz,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let port = match optional("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("PORT must be a number, got {}", raw)))?,
            None => 3000,
        };

        let site_timezone = match optional("SITE_TIMEZONE") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("SITE_TIMEZONE is not an IANA zone: {}", raw)))?,
            None => chrono_tz::Asia::Shanghai,
        };

        Ok(Self {
            database_url: optional("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://island.db?mode=rwc".to_string()),
            port,
            supabase_url: optional("SUPABASE_URL").map(|u| u.trim_end_matches('/').to_string()),
            supabase_service_key: optional("SUPABASE_SERVICE_KEY"),
            admin_username: optional("ADMIN_USERNAME"),
            admin_password: optional("ADMIN_PASSWORD"),
            session_secret: optional("SESSION_SECRET"),
            resend_api_key: optional("RESEND_API_KEY"),
            notify_email: optional("NOTIFY_EMAIL"),
            mail_from: optional("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            ai_api_key: optional("TUZIAI_API_KEY"),
            ai_base_url: optional("AI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string()),
            ai_model: optional("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            site_timezone,
        })
    }

    /// Secret used to sign admin session tokens.
    pub fn session_key(&self) -> Option<&str> {
        self.session_secret
            .as_deref()
            .or(self.admin_password.as_deref())
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
