use std::sync::Arc;

use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, ready};

use crate::dao::{kv_store::KeyValueStore, storage::StorageResult};

/// Process-local store; contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let value = self.entries.get(key).map(|entry| entry.value().clone());
        ready(Ok(value)).boxed()
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        self.entries.insert(key.to_string(), value);
        ready(Ok(())).boxed()
    }

    fn remove_many(&self, keys: &[&str]) -> BoxFuture<'static, StorageResult<()>> {
        for key in keys {
            self.entries.remove(*key);
        }
        ready(Ok(())).boxed()
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        ready(Ok(())).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v".into()).await.unwrap();
        store.set("other", "w".into()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.remove_many(&["k", "missing"]).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("w"));
    }
}
