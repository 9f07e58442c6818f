use island_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::models::storage::{StoredImage, UploadedImage},
    domain::ports::{EmailService, LlmService, StorageService},
    infra::factory::{assemble_state, connect_repositories, Adapters},
    error::AppError,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header, StatusCode},
    response::Response,
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_USER: &str = "xiaohei";
pub const ADMIN_PASS: &str = "island-pass";

#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub html: String,
}

#[derive(Default)]
pub struct MockEmailService {
    pub sent: Mutex<Vec<SentMail>>,
    pub fail: bool,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Upstream("发送失败".into(), "mock provider down".into()));
        }
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            html: html_body.to_string(),
        });
        Ok(())
    }
}

pub struct MockLlmService {
    pub reply: String,
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn generate(
        &self,
        _api_key: &str,
        _prompt: &str,
        _system_instruction: &str
    ) -> Result<String, AppError> {
        Ok(self.reply.clone())
    }
}

pub const IDENTITY_REPLY: &str = "```json\n{\"role\":\"潮汐信使\",\"type\":\"海洋生物\",\"description\":\"你像潮水一样准时又自由。\",\"traits\":[\"好奇\",\"温柔\",\"勇敢\"],\"emoji\":\"🐬\"}\n```";

#[derive(Default)]
pub struct MockStorageService {
    pub files: Mutex<Vec<(String, StoredImage)>>,
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn list_images(&self, bucket: &str) -> Result<Vec<StoredImage>, AppError> {
        let mut images: Vec<StoredImage> = self.files.lock().unwrap().iter()
            .filter(|(b, _)| b == bucket)
            .map(|(_, image)| image.clone())
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }

    async fn upload(&self, bucket: &str, file_name: &str, _content_type: &str, _data: Vec<u8>) -> Result<UploadedImage, AppError> {
        let url = format!("https://storage.test/{}/{}", bucket, file_name);
        self.files.lock().unwrap().push((bucket.to_string(), StoredImage {
            name: file_name.to_string(),
            url: url.clone(),
            created_at: Some(chrono::Utc::now()),
        }));
        Ok(UploadedImage { path: file_name.to_string(), public_url: url })
    }

    async fn delete(&self, bucket: &str, file_name: &str) -> Result<(), AppError> {
        self.files.lock().unwrap().retain(|(b, image)| !(b == bucket && image.name == file_name));
        Ok(())
    }
}

pub fn test_config(db_url: &str) -> Config {
    Config {
        database_url: db_url.to_string(),
        port: 0,
        supabase_url: None,
        supabase_service_key: None,
        admin_username: Some(ADMIN_USER.to_string()),
        admin_password: Some(ADMIN_PASS.to_string()),
        session_secret: Some("test-session-secret".to_string()),
        resend_api_key: None,
        notify_email: Some("owner@island.test".to_string()),
        mail_from: "Island <test@island.test>".to_string(),
        ai_api_key: Some("test-ai-key".to_string()),
        ai_base_url: "http://localhost".to_string(),
        ai_model: "test-model".to_string(),
        site_timezone: chrono_tz::Asia::Shanghai,
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub db_filename: String,
    pub db_url: String,
    pub state: Arc<AppState>,
    pub emails: Arc<MockEmailService>,
    pub storage: Arc<MockStorageService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::build(|_| {}, MockEmailService::default()).await
    }

    /// Builds the app with a tweaked config and email double.
    pub async fn build(tweak: impl FnOnce(&mut Config), email: MockEmailService) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let mut config = test_config(&db_url);
        tweak(&mut config);

        let repos = connect_repositories(&db_url)
            .await
            .expect("Failed to open test db");

        let emails = Arc::new(email);
        let storage = Arc::new(MockStorageService::default());
        let adapters = Adapters {
            email: emails.clone(),
            storage: storage.clone(),
            llm: Arc::new(MockLlmService { reply: IDENTITY_REPLY.to_string() }),
        };

        let state = Arc::new(assemble_state(&config, repos, adapters).expect("Failed to assemble state"));
        let router = create_router(state.clone());

        Self { router, db_filename, db_url, state, emails, storage }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn json(&self, method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Logs in as the configured admin and returns the `Cookie` header value.
    pub async fn admin_cookie(&self) -> String {
        let response = self.json(
            "POST",
            "/api/admin/login",
            serde_json::json!({ "username": ADMIN_USER, "password": ADMIN_PASS }),
            None,
        ).await;

        if response.status() != StatusCode::OK {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookie = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .find(|c| c.starts_with("admin_token="))
            .expect("No admin_token cookie returned");

        cookie.split(';').next().unwrap().to_string()
    }

    /// Waits for detached notification tasks to deliver `count` mails.
    pub async fn wait_for_mails(&self, count: usize) -> Vec<SentMail> {
        for _ in 0..50 {
            let sent = self.emails.sent.lock().unwrap().clone();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.emails.sent.lock().unwrap().clone()
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
