use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{TrackError, TrackResult};

/// A therapist-published block of time, optionally booked by a student or
/// staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    pub therapist_email: String,
    pub therapist_name: String,
    pub booked_by: Option<String>,
    pub booked_by_name: Option<String>,
}

impl TimeSlot {
    pub fn is_booked(&self) -> bool {
        self.booked_by.is_some()
    }

    /// Sort key of the slot list.
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.start_time)
    }
}

/// Input of `add_slot`: everything except the generated id and booking state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    pub therapist_email: String,
    pub therapist_name: String,
}

impl CreateTimeSlotRequest {
    pub fn validate(&self) -> TrackResult<()> {
        if self.therapist_email.trim().is_empty() || self.therapist_name.trim().is_empty() {
            return Err(TrackError::Validation(
                "Therapist email and name are required".to_string(),
            ));
        }
        if self.end_time <= self.start_time {
            return Err(TrackError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds an unbooked slot. The id is `<date>_<HH:MM>_<millis>`.
    pub fn into_slot(self, created_millis: i64) -> TimeSlot {
        TimeSlot {
            id: slot_id(self.date, self.start_time, created_millis),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            therapist_email: self.therapist_email,
            therapist_name: self.therapist_name,
            booked_by: None,
            booked_by_name: None,
        }
    }
}

pub fn slot_id(date: NaiveDate, start_time: NaiveTime, created_millis: i64) -> String {
    format!(
        "{}_{}_{}",
        date.format("%Y-%m-%d"),
        start_time.format(hh_mm::FORMAT),
        created_millis
    )
}

/// Calendar dot colour for a date with slots. Serialized as its hex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DotColor {
    /// At least one slot on the date is still open.
    #[serde(rename = "#10B981")]
    Open,
    /// Every slot on the date is booked.
    #[serde(rename = "#F59E0B")]
    Booked,
}

impl DotColor {
    pub fn hex(self) -> &'static str {
        match self {
            DotColor::Open => "#10B981",
            DotColor::Booked => "#F59E0B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateMark {
    pub marked: bool,
    pub dot_color: DotColor,
}

/// Start/end times offered by the slot picker: 07:00 to 20:00 every 30 minutes.
pub fn time_options() -> Vec<NaiveTime> {
    (7 * 60..=20 * 60)
        .step_by(30)
        .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
        .collect()
}

/// Serde adapter for `HH:MM` times.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(value, FORMAT)
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
