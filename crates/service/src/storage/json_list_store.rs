use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Ordered record list guarded by a single `RwLock`.
///
/// With a file path, every successful write is persisted as a JSON array
/// before the in-memory list is replaced; a failed write leaves both the
/// file and the list untouched.
pub struct JsonListStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: Option<PathBuf>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Volatile store; contents are lost on drop.
    pub fn in_memory() -> Self {
        Self { inner: RwLock::new(Vec::new()), file_path: None }
    }

    /// Load the store from a path. Creates the file with an empty list if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        }

        let items: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Unavailable(format!("{}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                write_json(&file_path, &Vec::<T>::new()).await?;
                Vec::new()
            }
            Err(e) => return Err(ServiceError::Unavailable(e.to_string())),
        };
        info!(path = %file_path.display(), records = items.len(), "record file loaded");

        Ok(Self { inner: RwLock::new(items), file_path: Some(file_path) })
    }

    /// Snapshot of all records in insertion order.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// First record matching `pred`.
    pub async fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner.read().await.iter().find(|t| pred(t)).cloned()
    }

    /// Apply a mutation under the write lock and persist it.
    ///
    /// The closure runs on a copy; nothing changes unless it returns `Ok`
    /// and the snapshot reaches disk.
    pub async fn update_list<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let mut guard = self.inner.write().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        if let Some(path) = &self.file_path {
            write_json(path, &next).await?;
            debug!(path = %path.display(), records = next.len(), "record file saved");
        }
        *guard = next;
        Ok(out)
    }
}

async fn write_json<T: Serialize>(path: &PathBuf, items: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(items).map_err(|e| ServiceError::Unavailable(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    let unavailable = |e: std::io::Error| ServiceError::Unavailable(format!("{}: {e}", path.display()));

    // flushed to disk before the rename makes it visible
    let mut file = fs::File::create(&tmp).await.map_err(unavailable)?;
    file.write_all(&data).await.map_err(unavailable)?;
    file.sync_all().await.map_err(unavailable)?;
    drop(file);
    fs::rename(&tmp, path).await.map_err(unavailable)?;
    Ok(())
}
