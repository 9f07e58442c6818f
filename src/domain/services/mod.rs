pub mod auth_service;
pub mod booking_service;
pub mod island_identity;
pub mod notification;
pub mod rate_limiter;
pub mod slots;
