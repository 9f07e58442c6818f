use crate::domain::ports::LlmService;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{error, info, warn, instrument};
use std::time::Duration;
use tokio::time::sleep;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;
const TEMPERATURE: f64 = 0.9;
const MAX_TOKENS: u32 = 500;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionService {
    client: Client,
    base_url: String,
    model: String,
}

impl ChatCompletionService {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    async fn send_request_with_retry(&self, url: &str, api_key: &str, payload: &Value) -> Result<String, AppError> {
        let mut retries = 0;
        let mut backoff = INITIAL_BACKOFF_MS;

        loop {
            let res = self.client.post(url)
                .bearer_auth(api_key)
                .json(payload)
                .send()
                .await;

            match res {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body: Value = response.json().await.map_err(|e| {
                            AppError::Internal(format!("Chat completion body is not JSON: {:?}", e))
                        })?;
                        return extract_content(body);
                    } else if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if retries >= MAX_RETRIES {
                            error!("AI provider failed after {} retries. Status: {}", retries, status);
                            let text = response.text().await.unwrap_or_default();
                            return Err(AppError::Internal(format!("AI Provider Error: {} - {}", status, text)));
                        }
                        warn!("AI provider transient error {}. Retrying in {}ms...", status, backoff);
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        error!("AI provider terminal error {}: {}", status, text);
                        return Err(AppError::Internal(format!("AI Request Rejected: {} - {}", status, text)));
                    }
                }
                Err(e) => {
                    if retries >= MAX_RETRIES {
                        error!("AI network error after {} retries: {:?}", retries, e);
                        return Err(AppError::Internal(format!("AI Network Error: {}", e)));
                    }
                    warn!("AI network error. Retrying in {}ms... {:?}", backoff, e);
                }
            }

            sleep(Duration::from_millis(backoff)).await;
            retries += 1;
            backoff *= 2;
        }
    }
}

fn extract_content(body: Value) -> Result<String, AppError> {
    if let Some(choice) = body.get("choices").and_then(|c| c.as_array()).and_then(|c| c.first()) {
        if let Some(reason) = choice.get("finish_reason").and_then(|r| r.as_str())
            && reason != "stop" {
            warn!("AI generation stopped abnormally. Reason: {}", reason);
        }

        if let Some(text) = choice.pointer("/message/content").and_then(|t| t.as_str()) {
            return Ok(text.trim().to_string());
        }
    }

    Err(AppError::Internal(format!("AI response missing content: {}", body)))
}

#[async_trait]
impl LlmService for ChatCompletionService {
    #[instrument(skip(self, api_key, system_instruction), fields(prompt_len = prompt.len(), model = %self.model))]
    async fn generate(
        &self,
        api_key: &str,
        prompt: &str,
        system_instruction: &str
    ) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_instruction},
                {"role": "user", "content": prompt}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS
        });

        info!("Sending chat completion request...");
        let result = self.send_request_with_retry(&url, api_key, &payload).await?;
        info!("Received chat completion.");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_choice() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "  {\"role\":\"灯塔\"}\n"}, "finish_reason": "stop"}]
        });
        assert_eq!(extract_content(body).unwrap(), "{\"role\":\"灯塔\"}");
    }

    #[test]
    fn test_missing_choices_is_an_error() {
        assert!(extract_content(json!({"error": {"message": "quota"}})).is_err());
        assert!(extract_content(json!({"choices": []})).is_err());
    }
}
