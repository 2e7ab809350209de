//! # Mind Track Store
//!
//! Local persistence for Mind Track. Every record is a JSON value under a
//! fixed key of a [`KeyValueStore`]; the stores in [`repositories`] keep an
//! in-memory copy and rewrite the whole record on each mutation.

pub mod kv;
pub mod repositories;
pub mod schema;

pub mod mock;

use std::path::Path;
use std::sync::Arc;

use eyre::Result;

pub use kv::{fs::FsKeyValueStore, memory::MemoryKeyValueStore, KeyValueStore};

pub type SharedKv = Arc<dyn KeyValueStore>;

/// Opens the file-backed store rooted at `data_dir`, creating the directory
/// when needed.
pub async fn open_store(data_dir: &Path) -> Result<SharedKv> {
    schema::initialize_storage(data_dir).await?;
    let store = FsKeyValueStore::new(data_dir);
    Ok(Arc::new(store))
}
