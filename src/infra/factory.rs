use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::domain::ports::{
    BookingRepository, ContentRepository, EmailService, EventRepository, GuestbookRepository,
    LlmService, PostRepository, RegistrationRepository, StorageService, SystemClock,
};
use crate::domain::services::{
    auth_service::AuthService,
    booking_service::BookingService,
    notification::{load_templates, NotificationService},
    rate_limiter::SlidingWindowLimiter,
};
use crate::infra::email::resend_email_service::ResendEmailService;
use crate::infra::ai::chat_completion_service::ChatCompletionService;
use crate::infra::storage::supabase_storage_service::SupabaseStorageService;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_event_repo::PostgresEventRepo,
    postgres_registration_repo::PostgresRegistrationRepo, postgres_post_repo::PostgresPostRepo,
    postgres_guestbook_repo::PostgresGuestbookRepo, postgres_content_repo::PostgresContentRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_event_repo::SqliteEventRepo,
    sqlite_registration_repo::SqliteRegistrationRepo, sqlite_post_repo::SqlitePostRepo,
    sqlite_guestbook_repo::SqliteGuestbookRepo, sqlite_content_repo::SqliteContentRepo,
};

/// The row stores behind one database connection.
pub struct Repositories {
    pub booking: Arc<dyn BookingRepository>,
    pub event: Arc<dyn EventRepository>,
    pub registration: Arc<dyn RegistrationRepository>,
    pub post: Arc<dyn PostRepository>,
    pub guestbook: Arc<dyn GuestbookRepository>,
    pub content: Arc<dyn ContentRepository>,
}

/// The outbound HTTP adapters. Tests swap these for in-memory fakes.
pub struct Adapters {
    pub email: Arc<dyn EmailService>,
    pub storage: Arc<dyn StorageService>,
    pub llm: Arc<dyn LlmService>,
}

impl Adapters {
    pub fn from_config(config: &Config) -> Self {
        Self {
            email: Arc::new(ResendEmailService::new(
                config.resend_api_key.clone(),
                config.mail_from.clone(),
            )),
            storage: Arc::new(SupabaseStorageService::new(
                config.supabase_url.clone(),
                config.supabase_service_key.clone(),
            )),
            llm: Arc::new(ChatCompletionService::new(
                config.ai_base_url.clone(),
                config.ai_model.clone(),
            )),
        }
    }
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let repos = connect_repositories(&config.database_url).await?;
    assemble_state(config, repos, Adapters::from_config(config))
}

pub fn assemble_state(config: &Config, repos: Repositories, adapters: Adapters) -> Result<AppState, AppError> {
    let templates = Arc::new(load_templates()?);
    let notifications = Arc::new(NotificationService::new(
        templates,
        adapters.email,
        config.notify_email.clone(),
    ));

    Ok(AppState {
        config: config.clone(),
        booking_service: Arc::new(BookingService::new(repos.booking.clone())),
        booking_repo: repos.booking,
        event_repo: repos.event,
        registration_repo: repos.registration,
        post_repo: repos.post,
        guestbook_repo: repos.guestbook,
        content_repo: repos.content,
        storage_service: adapters.storage,
        notifications,
        llm_service: adapters.llm,
        identity_limiter: Arc::new(SlidingWindowLimiter::island_identity(Arc::new(SystemClock))),
        auth_service: Arc::new(AuthService::new(config.clone())),
    })
}

pub async fn connect_repositories(database_url: &str) -> Result<Repositories, AppError> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse()?;
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        Ok(Repositories {
            booking: Arc::new(PostgresBookingRepo::new(pool.clone())),
            event: Arc::new(PostgresEventRepo::new(pool.clone())),
            registration: Arc::new(PostgresRegistrationRepo::new(pool.clone())),
            post: Arc::new(PostgresPostRepo::new(pool.clone())),
            guestbook: Arc::new(PostgresGuestbookRepo::new(pool.clone())),
            content: Arc::new(PostgresContentRepo::new(pool)),
        })
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        Ok(Repositories {
            booking: Arc::new(SqliteBookingRepo::new(pool.clone())),
            event: Arc::new(SqliteEventRepo::new(pool.clone())),
            registration: Arc::new(SqliteRegistrationRepo::new(pool.clone())),
            post: Arc::new(SqlitePostRepo::new(pool.clone())),
            guestbook: Arc::new(SqliteGuestbookRepo::new(pool.clone())),
            content: Arc::new(SqliteContentRepo::new(pool)),
        })
    }
}

async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Postgres migrations failed: {}", e)))
}

async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("SQLite migrations failed: {}", e)))
}
