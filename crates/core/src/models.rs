pub mod appointment;
pub mod therapist;
pub mod time_slot;
pub mod user;
