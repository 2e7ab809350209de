//! Bookings against the bundled appointment catalog.
//!
//! The catalog ships with the binary and is read-only. Bookings are a flat
//! `slot id -> booker email` map persisted separately from the availability
//! list.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::debug;

use mindtrack_core::{
    errors::{TrackError, TrackResult},
    models::{appointment::AppointmentSlot, user::User},
};

use super::load_record;
use crate::kv::write_json;
use crate::schema::BOOKINGS_KEY;
use crate::SharedKv;

const BUNDLED_APPOINTMENTS: &str = include_str!("../../data/available-appointments.json");

/// Pre-generated appointments, sorted by `(date, start_time)`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    slots: Vec<AppointmentSlot>,
}

impl Catalog {
    pub fn new(mut slots: Vec<AppointmentSlot>) -> Self {
        slots.sort_by_key(AppointmentSlot::sort_key);
        Self { slots }
    }

    /// The catalog compiled into the crate.
    pub fn bundled() -> TrackResult<Self> {
        Self::from_json(BUNDLED_APPOINTMENTS)
    }

    pub fn from_json(raw: &str) -> TrackResult<Self> {
        let slots: Vec<AppointmentSlot> =
            serde_json::from_str(raw).map_err(|e| TrackError::Internal(Box::new(e)))?;
        Ok(Self::new(slots))
    }

    pub fn slots(&self) -> &[AppointmentSlot] {
        &self.slots
    }

    pub fn get(&self, slot_id: &str) -> Option<&AppointmentSlot> {
        self.slots.iter().find(|slot| slot.id == slot_id)
    }
}

pub struct RosterBookingStore {
    kv: SharedKv,
    catalog: Catalog,
    bookings: RwLock<BTreeMap<String, String>>,
}

impl RosterBookingStore {
    pub async fn load(kv: SharedKv, catalog: Catalog) -> Self {
        let bookings = load_record(kv.as_ref(), BOOKINGS_KEY).await.unwrap_or_default();

        Self {
            kv,
            catalog,
            bookings: RwLock::new(bookings),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn slots_for_therapist(&self, therapist_id: &str) -> Vec<AppointmentSlot> {
        self.catalog
            .slots()
            .iter()
            .filter(|slot| slot.therapist_id == therapist_id)
            .cloned()
            .collect()
    }

    pub async fn booked_by(&self, slot_id: &str) -> Option<String> {
        self.bookings.read().await.get(slot_id).cloned()
    }

    /// Books a catalog appointment for `user`.
    ///
    /// Therapists cannot book. Booking an appointment you already hold is a
    /// no-op; one held by someone else fails with `Conflict`.
    pub async fn book(&self, slot_id: &str, user: &User) -> TrackResult<AppointmentSlot> {
        if !user.role.can_book_appointments() {
            return Err(TrackError::Authorization(
                "Only students and university staff can book appointments.".to_string(),
            ));
        }

        let slot = self
            .catalog
            .get(slot_id)
            .cloned()
            .ok_or_else(|| TrackError::NotFound(format!("Appointment {} not found", slot_id)))?;

        let mut bookings = self.bookings.write().await;
        match bookings.get(slot_id) {
            Some(holder) if *holder == user.email => return Ok(slot),
            Some(_) => {
                return Err(TrackError::Conflict(
                    "This appointment is no longer available.".to_string(),
                ));
            }
            None => {}
        }

        let mut next = bookings.clone();
        next.insert(slot_id.to_string(), user.email.clone());
        write_json(self.kv.as_ref(), BOOKINGS_KEY, &next).await?;
        *bookings = next;

        debug!(slot_id, email = %user.email, "booked catalog appointment");
        Ok(slot)
    }

    /// Catalog appointments booked by `email`, in catalog order.
    pub async fn appointments_for(&self, email: &str) -> Vec<AppointmentSlot> {
        let bookings = self.bookings.read().await;
        self.catalog
            .slots()
            .iter()
            .filter(|slot| bookings.get(&slot.id).map(String::as_str) == Some(email))
            .cloned()
            .collect()
    }
}
