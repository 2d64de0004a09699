pub mod file;
pub mod memory;

use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

pub use self::{file::FileStore, memory::MemoryStore};

/// Abstraction over the string key-value persistence backing the statistics.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Delete every key in `keys`; missing keys are not an error.
    fn remove_many(&self, keys: &[&str]) -> BoxFuture<'static, StorageResult<()>>;
    /// Check that the backend can currently be read.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
