pub mod account;
pub mod availability;
pub mod roster;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::kv::{read_json, KeyValueStore};

/// Reads a record for a store's initial cache. Missing records and storage
/// failures both yield `None`; failures are logged and otherwise dropped.
async fn load_record<T>(kv: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    match read_json(kv, key).await {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "failed to load record, starting empty");
            None
        }
    }
}
