pub mod admin;
pub mod booking;
pub mod content;
pub mod email;
pub mod event;
pub mod health;
pub mod island;
pub mod post;
pub mod registration;
pub mod storage;
pub mod story;
