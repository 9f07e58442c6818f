use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub booking_type: String,
    pub details: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub name: String,
    pub contact: String,
    pub date: NaiveDate,
    pub time: String,
    pub category: BookingCategory,
    pub details: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            contact: params.contact,
            booking_date: params.date,
            booking_time: params.time,
            booking_type: params.category.as_str().to_string(),
            details: params.details.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            status: BookingStatus::Pending.as_str().to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Transitions the admin back office offers for a booking in this state.
    pub fn next_states(self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[BookingStatus::Completed],
            BookingStatus::Completed | BookingStatus::Cancelled => &[BookingStatus::Pending],
        }
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        self.next_states().contains(&next)
    }
}

impl FromStr for BookingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingCategory {
    Offline,
    Online,
    Talk,
    Other,
}

impl BookingCategory {
    pub const ALL: [BookingCategory; 4] = [
        BookingCategory::Offline,
        BookingCategory::Online,
        BookingCategory::Talk,
        BookingCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingCategory::Offline => "offline",
            BookingCategory::Online => "online",
            BookingCategory::Talk => "talk",
            BookingCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingCategory::Offline => "线下玩耍",
            BookingCategory::Online => "远程见面",
            BookingCategory::Talk => "心事时间",
            BookingCategory::Other => "其他",
        }
    }
}

impl FromStr for BookingCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_moves_to_confirmed_or_cancelled_only() {
        let from = BookingStatus::Pending;
        assert!(from.can_transition_to(BookingStatus::Confirmed));
        assert!(from.can_transition_to(BookingStatus::Cancelled));
        assert!(!from.can_transition_to(BookingStatus::Completed));
        assert!(!from.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn test_confirmed_only_completes() {
        let from = BookingStatus::Confirmed;
        assert!(from.can_transition_to(BookingStatus::Completed));
        assert!(!from.can_transition_to(BookingStatus::Cancelled));
        assert!(!from.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn test_terminal_states_reset_to_pending() {
        for from in [BookingStatus::Completed, BookingStatus::Cancelled] {
            assert_eq!(from.next_states(), &[BookingStatus::Pending]);
        }
    }

    #[test]
    fn test_status_parsing_rejects_unknown_values() {
        assert_eq!("confirmed".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
        assert!("CONFIRMED".parse::<BookingStatus>().is_err());
        assert!("done".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_new_booking_is_pending_and_drops_blank_details() {
        let booking = Booking::new(NewBookingParams {
            name: "阿青".into(),
            contact: "wx:aqing".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            time: "14:00".into(),
            category: BookingCategory::Offline,
            details: Some("   ".into()),
        });
        assert_eq!(booking.status, "pending");
        assert_eq!(booking.booking_type, "offline");
        assert!(booking.details.is_none());
    }

    #[test]
    fn test_new_booking_trims_details() {
        let booking = Booking::new(NewBookingParams {
            name: "阿青".into(),
            contact: "wx:aqing".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            time: "14:00".into(),
            category: BookingCategory::Talk,
            details: Some("  想聊聊最近的事  ".into()),
        });
        assert_eq!(booking.details.as_deref(), Some("想聊聊最近的事"));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!("talk".parse::<BookingCategory>().map(|c| c.label()), Ok("心事时间"));
        assert!("party".parse::<BookingCategory>().is_err());
    }
}
