use std::path::Path;

use eyre::{Result, WrapErr};
use tracing::info;

/// Credential table: normalized email -> `{name, password, role}`.
pub const USERS_KEY: &str = "mindtrack_users";
/// Current session: a `User` or absent.
pub const CURRENT_USER_KEY: &str = "mindtrack_current_user";
/// Ordered list of therapist-published time slots.
pub const AVAILABILITY_KEY: &str = "mindtrack_availability";
/// Bookings against the bundled catalog: slot id -> booker email.
pub const BOOKINGS_KEY: &str = "mindtrack_booked_appointments";

pub async fn initialize_storage(data_dir: &Path) -> Result<()> {
    info!("Initializing storage in {}", data_dir.display());

    tokio::fs::create_dir_all(data_dir)
        .await
        .wrap_err_with(|| format!("failed to create data directory {}", data_dir.display()))?;

    Ok(())
}
