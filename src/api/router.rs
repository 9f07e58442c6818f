use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, booking, content, email, event, health, island, post, registration, storage, story};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Admin session
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/check", get(admin::check))
        .route("/api/admin/logout", post(admin::logout))

        // Bookings
        .route("/api/bookings", get(booking::get_booked_times).post(booking::create_booking))
        .route("/api/bookings/calendar", get(booking::get_calendar))
        .route("/api/bookings/all", get(booking::list_all_bookings))
        .route("/api/bookings/{booking_id}", put(booking::update_booking_status))

        // Island identity
        .route("/api/island-identity", post(island::generate_island_identity))

        // Events & registrations
        .route("/api/events", get(event::list_events).post(event::create_event))
        .route("/api/events/{event_id}", put(event::update_event).delete(event::delete_event))
        .route("/api/events/{event_id}/registrations", get(registration::list_registrations).post(registration::create_registration))
        .route("/api/events/{event_id}/registrations/{registration_id}", put(registration::update_registration).delete(registration::delete_registration))

        // Fragments & guestbook
        .route("/api/posts", get(post::list_posts).post(post::create_post))
        .route("/api/posts/{post_id}", put(post::update_post).delete(post::delete_post))
        .route("/api/stories", get(story::list_stories).post(story::create_story))
        .route("/api/stories/{story_id}", delete(story::delete_story))

        // Singleton copy
        .route("/api/hero", get(content::get_hero).put(content::update_hero))
        .route("/api/profile", get(content::get_profile).put(content::update_profile))

        // Object storage
        .route("/api/storage/{bucket}", get(storage::list_images))
        .route("/api/storage/{bucket}/upload", post(storage::upload_image).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)))
        .route("/api/storage/{bucket}/delete", delete(storage::delete_image))
        .route("/api/photos", get(storage::list_photos))
        .route("/api/photos/delete", delete(storage::delete_photo))

        // Owner notifications
        .route("/api/send-email", post(email::send_email))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
