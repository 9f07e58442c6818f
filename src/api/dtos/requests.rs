//! Request bodies. Required fields are still `Option` so that a missing
//! field is answered with the endpoint's own 400 message.
use serde::Deserialize;

/// Trimmed, non-empty value of an optional text field.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(rename = "bookingType")]
    pub booking_type: Option<String>,
    pub details: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct IslandIdentityRequest {
    pub personality: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct EventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub join_link: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRegistrationRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateRegistrationRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct PostRequest {
    pub content: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateStoryRequest {
    pub name: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateHeroRequest {
    pub main_title: Option<String>,
    pub main_subtitle: Option<String>,
    pub left_card_title: Option<String>,
    pub left_card_description: Option<String>,
    pub right_card_title: Option<String>,
    pub right_card_description: Option<String>,
    pub bottom_text: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub bio_paragraph_1: Option<String>,
    pub bio_paragraph_2: Option<String>,
    pub bio_quote: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteFileRequest {
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

#[derive(Deserialize)]
pub struct SendEmailRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub message: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(rename = "bookingType")]
    pub booking_type: Option<String>,
    pub details: Option<String>,
}
