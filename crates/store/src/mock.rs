use async_trait::async_trait;
use mockall::mock;

use crate::kv::KeyValueStore;

// Mock storage backend for exercising failure paths in tests
mock! {
    pub KeyValue {}

    #[async_trait]
    impl KeyValueStore for KeyValue {
        async fn get(&self, key: &str) -> eyre::Result<Option<String>>;

        async fn set(&self, key: &str, value: &str) -> eyre::Result<()>;

        async fn remove(&self, key: &str) -> eyre::Result<()>;
    }
}
