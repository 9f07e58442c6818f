use crate::domain::models::{
    booking::Booking, content::{HeroContent, Profile}, event::Event,
    guestbook::GuestbookEntry, post::Post, registration::EventRegistration,
    storage::{StoredImage, UploadedImage},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a booking. A live booking already holding the same
    /// (date, time) makes this fail with `AppError::Conflict`.
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_active_by_slot(&self, date: NaiveDate, time: &str) -> Result<Option<Booking>, AppError>;
    async fn booked_times_on(&self, date: NaiveDate) -> Result<Vec<String>, AppError>;
    async fn list_active_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Booking>, AppError>;
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Removes the event together with its registrations.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn create(&self, registration: &EventRegistration) -> Result<EventRegistration, AppError>;
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<EventRegistration>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventRegistration>, AppError>;
    async fn update(&self, registration: &EventRegistration) -> Result<EventRegistration, AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> Result<Post, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError>;
    async fn list(&self) -> Result<Vec<Post>, AppError>;
    async fn update(&self, post: &Post) -> Result<Post, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait GuestbookRepository: Send + Sync {
    async fn create(&self, entry: &GuestbookEntry) -> Result<GuestbookEntry, AppError>;
    async fn list(&self) -> Result<Vec<GuestbookEntry>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Singleton copy blocks. `upsert_*` creates the row on first write and
/// updates it in place afterwards.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn get_hero(&self) -> Result<Option<HeroContent>, AppError>;
    async fn upsert_hero(&self, hero: &HeroContent) -> Result<HeroContent, AppError>;
    async fn get_profile(&self) -> Result<Option<Profile>, AppError>;
    async fn upsert_profile(&self, profile: &Profile) -> Result<Profile, AppError>;
}

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Image files in the bucket, most recently uploaded first.
    async fn list_images(&self, bucket: &str) -> Result<Vec<StoredImage>, AppError>;
    async fn upload(&self, bucket: &str, file_name: &str, content_type: &str, data: Vec<u8>) -> Result<UploadedImage, AppError>;
    async fn delete(&self, bucket: &str, file_name: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait LlmService: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        prompt: &str,
        system_instruction: &str
    ) -> Result<String, AppError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Admission control for throttled endpoints, keyed by client address.
pub trait RateLimiter: Send + Sync {
    /// Records the attempt and returns whether it is admitted.
    fn check(&self, key: &str) -> bool;
}
