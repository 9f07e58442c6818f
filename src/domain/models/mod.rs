pub mod auth;
pub mod booking;
pub mod content;
pub mod event;
pub mod guestbook;
pub mod identity;
pub mod post;
pub mod registration;
pub mod storage;
