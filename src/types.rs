use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Normalized per-day opening record. The backend has historically served
/// two shapes for this field (`enabled`/`open`/`close` and
/// `isClosed`/`openTime`/`closeTime`); both are accepted on
/// deserialization and collapsed into this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHours {
    pub closed: bool,
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn open_range(open: &str, close: &str) -> Self {
        Self {
            closed: false,
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn closed_all_day() -> Self {
        Self {
            closed: true,
            open: String::new(),
            close: String::new(),
        }
    }
}

#[derive(Deserialize)]
struct DayHoursWire {
    closed: Option<bool>,
    enabled: Option<bool>,
    #[serde(rename = "isClosed")]
    is_closed: Option<bool>,
    open: Option<String>,
    close: Option<String>,
    #[serde(rename = "openTime")]
    open_time: Option<String>,
    #[serde(rename = "closeTime")]
    close_time: Option<String>,
}

impl<'de> Deserialize<'de> for DayHours {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = DayHoursWire::deserialize(deserializer)?;
        let closed = wire
            .closed
            .or(wire.is_closed)
            .or_else(|| wire.enabled.map(|enabled| !enabled))
            .unwrap_or(false);
        Ok(DayHours {
            closed,
            open: wire.open.or(wire.open_time).unwrap_or_default(),
            close: wire.close.or(wire.close_time).unwrap_or_default(),
        })
    }
}

/// Weekly opening hours keyed by lowercase English weekday name.
/// A missing day means the business never declared hours for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningHours(pub HashMap<String, DayHours>);

impl OpeningHours {
    pub fn day(&self, weekday: Weekday) -> Option<&DayHours> {
        self.0.get(weekday_key(weekday))
    }

    pub fn set_day(&mut self, weekday: Weekday, hours: DayHours) {
        self.0.insert(weekday_key(weekday).into(), hours);
    }
}

pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "sunday",
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_id: Uuid,
    pub service_id: Uuid,
    pub date_time: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalizes_enabled_open_close_variant() {
        let json = r#"{
            "monday": { "enabled": true, "open": "09:00", "close": "17:00" },
            "sunday": { "enabled": false, "open": "09:00", "close": "17:00" }
        }"#;
        let hours: OpeningHours = serde_json::from_str(json).unwrap();

        let monday = hours.day(Weekday::Mon).unwrap();
        assert!(!monday.closed);
        assert_eq!(monday.open, "09:00");
        assert_eq!(monday.close, "17:00");

        let sunday = hours.day(Weekday::Sun).unwrap();
        assert!(sunday.closed);
    }

    #[test]
    fn normalizes_is_closed_open_time_variant() {
        let json = r#"{
            "tuesday": { "isClosed": false, "openTime": "08:30", "closeTime": "16:00" },
            "saturday": { "isClosed": true, "openTime": "10:00", "closeTime": "14:00" }
        }"#;
        let hours: OpeningHours = serde_json::from_str(json).unwrap();

        let tuesday = hours.day(Weekday::Tue).unwrap();
        assert!(!tuesday.closed);
        assert_eq!(tuesday.open, "08:30");
        assert_eq!(tuesday.close, "16:00");

        assert!(hours.day(Weekday::Sat).unwrap().closed);
        assert!(hours.day(Weekday::Wed).is_none());
    }

    #[test]
    fn day_record_without_flags_defaults_to_open() {
        let json = r#"{ "friday": { "open": "09:00", "close": "12:00" } }"#;
        let hours: OpeningHours = serde_json::from_str(json).unwrap();
        assert!(!hours.day(Weekday::Fri).unwrap().closed);
    }

    #[test]
    fn business_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "7f3d3a1e-5f2b-4b6a-9d0e-111111111111",
            "name": "Corner Barbershop",
            "openingHours": {
                "monday": { "enabled": true, "open": "09:00", "close": "17:00" }
            }
        }"#;
        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.name, "Corner Barbershop");
        let hours = business.opening_hours.unwrap();
        assert!(hours.day(Weekday::Mon).is_some());
        assert!(business.category.is_none());
    }
}
