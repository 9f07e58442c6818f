use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, ContentRepository, EventRepository, GuestbookRepository,
    LlmService, PostRepository, RateLimiter, RegistrationRepository, StorageService,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::booking_service::BookingService;
use crate::domain::services::notification::NotificationService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub booking_service: Arc<BookingService>,
    pub event_repo: Arc<dyn EventRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub post_repo: Arc<dyn PostRepository>,
    pub guestbook_repo: Arc<dyn GuestbookRepository>,
    pub content_repo: Arc<dyn ContentRepository>,
    pub storage_service: Arc<dyn StorageService>,
    pub notifications: Arc<NotificationService>,
    pub llm_service: Arc<dyn LlmService>,
    pub identity_limiter: Arc<dyn RateLimiter>,
    pub auth_service: Arc<AuthService>,
}
