//! Therapist-published time slots and their booking state.
//!
//! The whole list lives in memory, sorted by `(date, start_time)`, and is
//! rewritten to storage after every mutation. A mutation holds the write lock
//! across the storage write, so two calls in one process never interleave.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use mindtrack_core::{
    errors::{TrackError, TrackResult},
    models::time_slot::{CreateTimeSlotRequest, DateMark, DotColor, TimeSlot},
};

use super::load_record;
use crate::kv::write_json;
use crate::schema::AVAILABILITY_KEY;
use crate::SharedKv;

pub struct AvailabilityStore {
    kv: SharedKv,
    slots: RwLock<Vec<TimeSlot>>,
}

impl AvailabilityStore {
    pub async fn load(kv: SharedKv) -> Self {
        let mut slots: Vec<TimeSlot> = load_record(kv.as_ref(), AVAILABILITY_KEY)
            .await
            .unwrap_or_default();
        slots.sort_by_key(TimeSlot::sort_key);

        Self {
            kv,
            slots: RwLock::new(slots),
        }
    }

    async fn persist(&self, slots: &[TimeSlot]) -> TrackResult<()> {
        write_json(self.kv.as_ref(), AVAILABILITY_KEY, slots).await?;
        Ok(())
    }

    /// Snapshot of every slot in list order.
    pub async fn slots(&self) -> Vec<TimeSlot> {
        self.slots.read().await.clone()
    }

    pub async fn add_slot(&self, request: CreateTimeSlotRequest) -> TrackResult<TimeSlot> {
        request.validate()?;

        let mut slots = self.slots.write().await;

        // Ids embed the creation millisecond; bump it until unused.
        let mut created = Utc::now().timestamp_millis();
        let mut slot = request.clone().into_slot(created);
        while slots.iter().any(|existing| existing.id == slot.id) {
            created += 1;
            slot = request.clone().into_slot(created);
        }

        let mut next = slots.clone();
        next.push(slot.clone());
        next.sort_by_key(TimeSlot::sort_key);
        self.persist(&next).await?;
        *slots = next;

        debug!(id = %slot.id, therapist = %slot.therapist_email, "added slot");
        Ok(slot)
    }

    /// Deletes a slot whether or not it is booked. Unknown ids are ignored.
    pub async fn remove_slot(&self, id: &str) -> TrackResult<()> {
        let mut slots = self.slots.write().await;

        let next: Vec<TimeSlot> = slots.iter().filter(|s| s.id != id).cloned().collect();
        self.persist(&next).await?;
        *slots = next;

        debug!(id, "removed slot");
        Ok(())
    }

    /// Books a slot for a student or staff member.
    ///
    /// Booking a slot already held by a different email fails with
    /// `Conflict`; the current holder may book again to update the name.
    pub async fn book_slot(
        &self,
        id: &str,
        student_email: &str,
        student_name: &str,
    ) -> TrackResult<TimeSlot> {
        let mut slots = self.slots.write().await;

        let index = find_index(&slots, id)?;
        if let Some(holder) = &slots[index].booked_by {
            if holder != student_email {
                return Err(TrackError::Conflict(
                    "This slot is already booked by someone else".to_string(),
                ));
            }
        }

        let mut next = slots.clone();
        next[index].booked_by = Some(student_email.to_string());
        next[index].booked_by_name = Some(student_name.to_string());
        self.persist(&next).await?;
        *slots = next;

        debug!(id, student = student_email, "booked slot");
        Ok(slots[index].clone())
    }

    pub async fn cancel_booking(&self, id: &str) -> TrackResult<TimeSlot> {
        let mut slots = self.slots.write().await;

        let index = find_index(&slots, id)?;
        let mut next = slots.clone();
        next[index].booked_by = None;
        next[index].booked_by_name = None;
        self.persist(&next).await?;
        *slots = next;

        debug!(id, "cancelled booking");
        Ok(slots[index].clone())
    }

    /// Slots on `date`, optionally only those owned by one therapist.
    pub async fn get_slots_for_date(
        &self,
        date: NaiveDate,
        therapist_email: Option<&str>,
    ) -> Vec<TimeSlot> {
        self.slots
            .read()
            .await
            .iter()
            .filter(|s| s.date == date)
            .filter(|s| therapist_email.is_none_or(|email| s.therapist_email == email))
            .cloned()
            .collect()
    }

    /// Calendar annotation per date: open when any slot that day is unbooked.
    pub async fn get_marked_dates(
        &self,
        therapist_email: Option<&str>,
    ) -> BTreeMap<NaiveDate, DateMark> {
        let slots = self.slots.read().await;

        let mut marks: BTreeMap<NaiveDate, DateMark> = BTreeMap::new();
        for slot in slots
            .iter()
            .filter(|s| therapist_email.is_none_or(|email| s.therapist_email == email))
        {
            let mark = marks.entry(slot.date).or_insert(DateMark {
                marked: true,
                dot_color: DotColor::Booked,
            });
            if !slot.is_booked() {
                mark.dot_color = DotColor::Open;
            }
        }
        marks
    }

    /// Slots booked by `email`.
    pub async fn get_booked_slots(&self, email: &str) -> Vec<TimeSlot> {
        self.slots
            .read()
            .await
            .iter()
            .filter(|s| s.booked_by.as_deref() == Some(email))
            .cloned()
            .collect()
    }

    /// Booked slots owned by a therapist, in list order.
    pub async fn get_therapist_bookings(&self, therapist_email: &str) -> Vec<TimeSlot> {
        self.slots
            .read()
            .await
            .iter()
            .filter(|s| s.therapist_email == therapist_email && s.is_booked())
            .cloned()
            .collect()
    }
}

fn find_index(slots: &[TimeSlot], id: &str) -> TrackResult<usize> {
    slots
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| TrackError::NotFound(format!("Slot {} not found", id)))
}
