use serde::Serialize;
use crate::domain::models::identity::IslandIdentity;
use crate::domain::services::slots::CalendarDay;

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{ "success": true, "data": ... }` envelope returned by mutations.
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

#[derive(Serialize)]
pub struct BookedTimesResponse {
    #[serde(rename = "bookedTimes")]
    pub booked_times: Vec<String>,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub month: String,
    pub slot_count: usize,
    pub days: Vec<CalendarDay>,
}

#[derive(Serialize)]
pub struct IdentityResponse {
    pub success: bool,
    pub identity: IslandIdentity,
}

#[derive(Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
