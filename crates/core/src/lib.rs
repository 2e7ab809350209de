//! # Mind Track Core
//!
//! Shared vocabulary for the Mind Track wellbeing app: the account and
//! availability data model, the bundled therapist roster, application
//! configuration and the error type every store returns.

pub mod config;
pub mod errors;
pub mod models;
