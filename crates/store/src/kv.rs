pub mod fs;
pub mod memory;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use serde::{de::DeserializeOwned, Serialize};

/// String-valued persistent storage, one value per key.
///
/// Values are opaque to the implementation; callers store JSON documents
/// through [`read_json`] and [`write_json`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

pub async fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(raw) => {
            let value = serde_json::from_str(&raw)
                .wrap_err_with(|| format!("malformed JSON under key {}", key))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

pub async fn write_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)
        .wrap_err_with(|| format!("failed to serialize value for key {}", key))?;
    store.set(key, &raw).await
}
