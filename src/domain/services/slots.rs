use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::models::booking::Booking;

/// Bookable hour-aligned slots, shared by the admission check, the
/// availability query and the calendar.
pub const TIME_SLOTS: [&str; 13] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00",
    "15:00", "16:00", "17:00", "18:00", "19:00", "20:00", "21:00",
];

/// How far ahead of today the calendar lets visitors pick a date.
pub const BOOKING_WINDOW_MONTHS: u32 = 2;

pub fn is_valid_slot(time: &str) -> bool {
    TIME_SLOTS.contains(&time)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d").ok()
}

pub fn is_fully_booked(booked: &[String]) -> bool {
    let taken: HashSet<&str> = booked.iter().map(String::as_str).collect();
    TIME_SLOTS.iter().all(|slot| taken.contains(slot))
}

pub fn is_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    let horizon = today
        .checked_add_months(Months::new(BOOKING_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MAX);
    date >= today && date < horizon
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub booked: Vec<String>,
    pub fully_booked: bool,
    pub selectable: bool,
}

/// Day-by-day availability for the month starting at `first_day`.
/// `bookings` must only contain live (non-cancelled) bookings.
pub fn month_calendar(first_day: NaiveDate, today: NaiveDate, bookings: &[Booking]) -> Vec<CalendarDay> {
    let mut by_date: HashMap<NaiveDate, Vec<String>> = HashMap::new();
    for booking in bookings {
        by_date
            .entry(booking.booking_date)
            .or_default()
            .push(booking.booking_time.clone());
    }

    first_day
        .iter_days()
        .take_while(|d| d.month() == first_day.month())
        .map(|date| {
            let mut booked = by_date.remove(&date).unwrap_or_default();
            booked.sort();
            booked.dedup();
            let fully_booked = is_fully_booked(&booked);
            CalendarDay {
                date,
                selectable: is_selectable(date, today) && !fully_booked,
                fully_booked,
                booked,
            }
        })
        .collect()
}

pub fn last_day_of_month(first_day: NaiveDate) -> NaiveDate {
    first_day
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::{BookingCategory, NewBookingParams};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking_at(d: NaiveDate, time: &str) -> Booking {
        Booking::new(NewBookingParams {
            name: "n".into(),
            contact: "c".into(),
            date: d,
            time: time.into(),
            category: BookingCategory::Other,
            details: None,
        })
    }

    #[test]
    fn test_slot_catalogue_is_hourly_nine_to_nine() {
        assert_eq!(TIME_SLOTS.len(), 13);
        assert_eq!(TIME_SLOTS.first(), Some(&"09:00"));
        assert_eq!(TIME_SLOTS.last(), Some(&"21:00"));
        assert!(is_valid_slot("14:00"));
        assert!(!is_valid_slot("14:30"));
        assert!(!is_valid_slot("08:00"));
    }

    #[test]
    fn test_parse_date_and_month() {
        assert_eq!(parse_date("2026-03-15"), Some(date(2026, 3, 15)));
        assert_eq!(parse_date("2026-02-30"), None);
        assert_eq!(parse_date("15/03/2026"), None);
        assert_eq!(parse_month("2026-03"), Some(date(2026, 3, 1)));
        assert_eq!(parse_month("2026-13"), None);
    }

    #[test]
    fn test_fully_booked_needs_every_slot() {
        let mut booked: Vec<String> = TIME_SLOTS.iter().map(|s| s.to_string()).collect();
        assert!(is_fully_booked(&booked));
        booked.pop();
        assert!(!is_fully_booked(&booked));
    }

    #[test]
    fn test_selectable_window_is_two_months() {
        let today = date(2026, 10, 19);
        assert!(is_selectable(today, today));
        assert!(!is_selectable(date(2026, 10, 18), today));
        assert!(is_selectable(date(2026, 12, 18), today));
        assert!(!is_selectable(date(2026, 12, 19), today));
    }

    #[test]
    fn test_month_calendar_marks_full_days_unselectable() {
        let today = date(2026, 10, 19);
        let full_day = date(2026, 10, 20);
        let mut bookings: Vec<Booking> = TIME_SLOTS.iter().map(|t| booking_at(full_day, t)).collect();
        bookings.push(booking_at(date(2026, 10, 21), "10:00"));

        let days = month_calendar(date(2026, 10, 1), today, &bookings);
        assert_eq!(days.len(), 31);

        let day20 = &days[19];
        assert!(day20.fully_booked);
        assert!(!day20.selectable);

        let day21 = &days[20];
        assert_eq!(day21.booked, vec!["10:00".to_string()]);
        assert!(day21.selectable);

        assert!(!days[0].selectable, "past days are never selectable");
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2026, 2, 1)), date(2026, 2, 28));
        assert_eq!(last_day_of_month(date(2026, 12, 1)), date(2026, 12, 31));
    }
}
