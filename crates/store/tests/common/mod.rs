#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use mindtrack_core::models::time_slot::CreateTimeSlotRequest;
use mindtrack_store::{MemoryKeyValueStore, SharedKv};

pub fn memory_kv() -> SharedKv {
    Arc::new(MemoryKeyValueStore::new())
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap()
}

pub fn slot_request(day: &str, start: &str, end: &str, therapist: &str) -> CreateTimeSlotRequest {
    CreateTimeSlotRequest {
        date: date(day),
        start_time: time(start),
        end_time: time(end),
        therapist_email: therapist.to_string(),
        therapist_name: format!("Dr. {}", therapist),
    }
}
