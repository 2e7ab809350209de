use color_eyre::eyre::Result;
use dotenv::dotenv;
use mindtrack_core::config::AppConfig;
use mindtrack_store::{
    open_store,
    repositories::{
        account::AccountStore,
        availability::AvailabilityStore,
        roster::{Catalog, RosterBookingStore},
    },
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Mind Track");

    // Open persistent storage and build the stores on top of it
    let kv = open_store(&config.data_dir).await?;
    let accounts = AccountStore::load(kv.clone(), &config.email_domain).await;
    let availability = AvailabilityStore::load(kv.clone()).await;
    let roster = RosterBookingStore::load(kv, Catalog::bundled()?).await;

    match accounts.current_user().await {
        Some(user) => info!("Signed in as {} ({})", user.email, user.role.label()),
        None => info!("No active session"),
    }

    let slots = availability.slots().await;
    let open = slots.iter().filter(|slot| !slot.is_booked()).count();
    info!(
        "{} availability slots ({} open), {} catalog appointments",
        slots.len(),
        open,
        roster.catalog().slots().len()
    );

    Ok(())
}
