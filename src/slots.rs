use crate::opening_hours::{is_open_at, parse_minutes};
use crate::types::OpeningHours;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const FIRST_SLOT_HOUR: u32 = 9;
const SLOT_STEP_MINUTES: u32 = 30;
const SLOTS_PER_DAY: u32 = 18;

/// The fixed candidate slot list offered for any day: `"09:00"` through
/// `"17:30"` in 30-minute steps. Independent of the business's hours;
/// closed slots are filtered out by [`classify_slots`].
pub fn generate_day_slots() -> Vec<String> {
    (0..SLOTS_PER_DAY)
        .map(|slot| {
            let minutes = FIRST_SLOT_HOUR * 60 + slot * SLOT_STEP_MINUTES;
            format!("{:02}:{:02}", minutes / 60, minutes % 60)
        })
        .collect()
}

/// Combines a calendar date with a `"HH:MM"` slot string.
pub fn slot_date_time(date: NaiveDate, slot: &str) -> Option<NaiveDateTime> {
    let minutes = parse_minutes(slot)?;
    let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)?;
    Some(date.and_time(time))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Selectable,
    /// The business is closed at this time.
    Closed,
    /// Already reserved according to the backend's booked-slot list.
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAvailability {
    pub time: String,
    pub status: SlotStatus,
}

impl SlotAvailability {
    pub fn selectable(&self) -> bool {
        self.status == SlotStatus::Selectable
    }
}

/// Classifies every candidate slot of the given date. Closed wins over
/// booked when both apply, matching how the screens rendered the grid.
pub fn classify_slots(
    hours: Option<&OpeningHours>,
    date: NaiveDate,
    booked: &[String],
) -> Vec<SlotAvailability> {
    generate_day_slots()
        .into_iter()
        .map(|time| {
            let status = match slot_date_time(date, &time) {
                None => SlotStatus::Closed,
                Some(date_time) if !is_open_at(date_time, hours) => SlotStatus::Closed,
                Some(_) if booked.iter().any(|slot| *slot == time) => SlotStatus::Booked,
                Some(_) => SlotStatus::Selectable,
            };
            SlotAvailability { time, status }
        })
        .collect()
}
