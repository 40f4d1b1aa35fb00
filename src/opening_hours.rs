use crate::types::{weekday_name, OpeningHours};
use chrono::{Datelike, NaiveDateTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TIME_24H: Regex = Regex::new(r"^([01]?\d|2[0-3]):([0-5]\d)$").unwrap();
}

/// Minute of day for a 24-hour `"HH:MM"` string, `None` when malformed.
pub fn parse_minutes(time: &str) -> Option<u32> {
    let caps = TIME_24H.captures(time.trim())?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Whether the business is open at the given date-time.
///
/// Unset hours never block booking: a missing mapping or a missing day
/// record evaluates as open. A day marked closed is closed regardless of
/// the times present. The open boundary is inclusive, the close boundary
/// exclusive. Malformed times evaluate as closed for that day.
pub fn is_open_at(date_time: NaiveDateTime, hours: Option<&OpeningHours>) -> bool {
    let Some(hours) = hours else {
        return true;
    };
    let Some(day) = hours.day(date_time.weekday()) else {
        return true;
    };
    if day.closed {
        return false;
    }
    let slot_minutes = date_time.hour() * 60 + date_time.minute();
    match (parse_minutes(&day.open), parse_minutes(&day.close)) {
        (Some(open), Some(close)) => open <= slot_minutes && slot_minutes < close,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenStatus {
    pub is_open: bool,
    pub message: String,
}

/// Same evaluation as [`is_open_at`] with a human-readable message for the
/// business-detail badge.
pub fn describe_status(date_time: NaiveDateTime, hours: Option<&OpeningHours>) -> OpenStatus {
    let is_open = is_open_at(date_time, hours);
    let Some(day) = hours.and_then(|hours| hours.day(date_time.weekday())) else {
        return OpenStatus {
            is_open,
            message: "Open".into(),
        };
    };

    if day.closed {
        return OpenStatus {
            is_open: false,
            message: format!("Closed on {}s", weekday_name(date_time.weekday())),
        };
    }

    if is_open {
        let message = match to_12_hour(&day.close) {
            Some(close) => format!("Open now • Closes at {close}"),
            None => "Open".into(),
        };
        return OpenStatus {
            is_open: true,
            message,
        };
    }

    let slot_minutes = date_time.hour() * 60 + date_time.minute();
    if let (Some(open_minutes), Some(open)) = (parse_minutes(&day.open), to_12_hour(&day.open)) {
        if slot_minutes < open_minutes {
            return OpenStatus {
                is_open: false,
                message: format!("Closed now • Opens at {open}"),
            };
        }
    }

    let message = match (to_12_hour(&day.open), to_12_hour(&day.close)) {
        (Some(open), Some(close)) => format!("Closed. Open: {open} - {close}"),
        _ => "Closed".into(),
    };
    OpenStatus {
        is_open: false,
        message,
    }
}

/// 24-hour `"HH:MM"` to 12-hour `"H:MM AM/PM"`. Hour 0 maps to 12 AM,
/// hours 13-23 to 1-11 PM.
pub fn to_12_hour(time: &str) -> Option<String> {
    let minutes = parse_minutes(time)?;
    let (hour, minute) = (minutes / 60, minutes % 60);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        hour => hour,
    };
    Some(format!("{display_hour}:{minute:02} {suffix}"))
}

/// Inverse of [`to_12_hour`].
pub fn to_24_hour(time: &str) -> Option<String> {
    let (clock, suffix) = time.trim().rsplit_once(' ')?;
    let (hour, minute) = clock.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let hour_24 = match suffix {
        "AM" => hour % 12,
        "PM" => hour % 12 + 12,
        _ => return None,
    };
    Some(format!("{hour_24:02}:{minute:02}"))
}
