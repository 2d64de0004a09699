use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::future::{BoxFuture, FutureExt};
use indexmap::IndexMap;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::dao::{
    kv_store::KeyValueStore,
    storage::{StorageError, StorageResult},
};

type Entries = IndexMap<String, String>;

/// Key-value store persisted as a single JSON object on disk.
///
/// Writes go through a temporary sibling file followed by a rename, so a
/// crash mid-write never leaves a truncated document behind.
#[derive(Clone)]
pub struct FileStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|source| {
                StorageError::unavailable(
                    format!("failed to create directory `{}`", parent.display()),
                    source,
                )
            })?;
        }

        let store = Self {
            inner: Arc::new(Inner {
                path,
                write_lock: Mutex::new(()),
            }),
        };

        // Surface a corrupted file at startup rather than on first read.
        read_entries(&store.inner.path).await?;
        debug!(path = %store.inner.path.display(), "file store opened");
        Ok(store)
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let inner = self.inner.clone();
        let key = key.to_string();
        async move {
            let mut entries = read_entries(&inner.path).await?;
            Ok(entries.swap_remove(&key))
        }
        .boxed()
    }

    fn set(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        let key = key.to_string();
        async move {
            let _guard = inner.write_lock.lock().await;
            let mut entries = read_entries(&inner.path).await?;
            entries.insert(key, value);
            write_entries(&inner.path, &entries).await
        }
        .boxed()
    }

    fn remove_many(&self, keys: &[&str]) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        let keys: Vec<String> = keys.iter().map(|key| (*key).to_string()).collect();
        async move {
            let _guard = inner.write_lock.lock().await;
            let mut entries = read_entries(&inner.path).await?;
            let before = entries.len();
            for key in &keys {
                entries.shift_remove(key);
            }
            if entries.len() == before {
                return Ok(());
            }
            write_entries(&inner.path, &entries).await
        }
        .boxed()
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        async move { read_entries(&inner.path).await.map(|_| ()) }.boxed()
    }
}

async fn read_entries(path: &Path) -> StorageResult<Entries> {
    match fs::read_to_string(path).await {
        Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
        Ok(contents) => serde_json::from_str(&contents)
            .map_err(|source| StorageError::corrupted(path.display().to_string(), source)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Entries::new()),
        Err(err) => Err(StorageError::unavailable(
            format!("failed to read `{}`", path.display()),
            err,
        )),
    }
}

async fn write_entries(path: &Path, entries: &Entries) -> StorageResult<()> {
    let payload = serde_json::to_vec_pretty(entries)
        .map_err(|source| StorageError::corrupted(path.display().to_string(), source))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, payload).await.map_err(|source| {
        StorageError::unavailable(format!("failed to write `{}`", tmp.display()), source)
    })?;
    fs::rename(&tmp, path).await.map_err(|source| {
        StorageError::unavailable(format!("failed to replace `{}`", path.display()), source)
    })
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("password-party-{}", Uuid::new_v4().simple()))
            .join("store.json")
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let path = scratch_path();
        let store = FileStore::open(&path).await.unwrap();
        store.set("game_stats", "{}".into()).await.unwrap();
        store.set("user_donated", "true".into()).await.unwrap();

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("user_donated").await.unwrap().as_deref(),
            Some("true")
        );

        reopened.remove_many(&["user_donated"]).await.unwrap();
        assert_eq!(store.get("user_donated").await.unwrap(), None);
        assert_eq!(store.get("game_stats").await.unwrap().as_deref(), Some("{}"));
        assert!(store.health_check().await.is_ok());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn corrupted_document_is_reported() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStore::open(&path).await,
            Err(StorageError::Corrupted { .. })
        ));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
