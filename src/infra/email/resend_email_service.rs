use crate::domain::ports::EmailService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::error;

const RESEND_API_URL: &str = "https://api.resend.com/emails";
pub const SEND_FAILED: &str = "发送失败";

pub struct ResendEmailService {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl ResendEmailService {
    pub fn new(api_key: Option<String>, from: String) -> Self {
        Self::with_url(RESEND_API_URL.to_string(), api_key, from)
    }

    pub fn with_url(api_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url,
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[async_trait]
impl EmailService for ResendEmailService {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        let api_key = self.api_key.as_deref()
            .ok_or(AppError::Config("RESEND_API_KEY".into()))?;

        let payload = EmailPayload {
            from: &self.from,
            to: [recipient],
            subject,
            html: html_body,
        };

        let res = self.client.post(&self.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Email service connection error: {}", e);
                error!("{}", msg);
                AppError::Upstream(SEND_FAILED.into(), msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Email service failed. Status: {}, Body: {}", status, text);
            return Err(AppError::Upstream(SEND_FAILED.into(), msg));
        }

        Ok(())
    }
}
