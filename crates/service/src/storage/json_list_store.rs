use std::{io::ErrorKind, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::error;

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// Persists a `Vec<T>` as a pretty-printed JSON array (2-space indent) and
/// rewrites the whole file on every mutation, preserving insertion order.
/// Intended for lightweight state where a database is overkill.
#[derive(Clone)]
pub struct JsonListStore<T> {
    inner: Arc<RwLock<Vec<T>>>,
    file_path: PathBuf,
}

impl<T> JsonListStore<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path.
    ///
    /// A missing file starts the store empty and seeds the file with `[]`.
    /// An unreadable or corrupt file also starts empty, but is logged loudly
    /// so that the two cases stay distinguishable; opening the store never
    /// fails on bad content.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let list: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(list) => list,
                Err(e) => {
                    error!(
                        path = %file_path.display(),
                        error = %e,
                        "backing store is corrupt; starting from an empty collection"
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let empty: Vec<T> = Vec::new();
                let seed = serde_json::to_vec_pretty(&empty)
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                fs::write(&file_path, seed)
                    .await
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                empty
            }
            Err(e) => {
                error!(
                    path = %file_path.display(),
                    error = %e,
                    "backing store is unreadable; starting from an empty collection"
                );
                Vec::new()
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(list)), file_path }))
    }

    async fn save(&self, list: &[T]) -> Result<(), ServiceError> {
        let data =
            serde_json::to_vec_pretty(list).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    /// List all entries in insertion order.
    pub async fn list(&self) -> Vec<T> {
        let list = self.inner.read().await;
        list.clone()
    }

    /// Apply a mutation and persist it while holding the write lock, so two
    /// concurrent read-modify-write cycles cannot lose each other's updates.
    ///
    /// The mutation runs on a scratch copy: if it fails, or the write to disk
    /// fails, the in-memory list is left untouched.
    pub async fn update_list<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let mut list = self.inner.write().await;
        let mut scratch = list.clone();
        let out = f(&mut scratch)?;
        self.save(&scratch).await?;
        *list = scratch;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_list_store_{}_{}.json", tag, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn crud_persists_in_insertion_order() -> Result<(), anyhow::Error> {
        let tmp = temp_path("crud");
        let store = JsonListStore::<String>::new(&tmp).await?;

        // initially empty
        assert_eq!(store.list().await.len(), 0);

        store.update_list(|l| { l.push("a".to_string()); Ok(()) }).await?;
        store.update_list(|l| { l.push("b".to_string()); Ok(()) }).await?;
        assert_eq!(store.list().await, vec!["a".to_string(), "b".to_string()]);

        // reload from disk keeps insertion order
        let reloaded = JsonListStore::<String>::new(&tmp).await?;
        assert_eq!(reloaded.list().await, vec!["a".to_string(), "b".to_string()]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_leaves_state_untouched() -> Result<(), anyhow::Error> {
        let tmp = temp_path("rollback");
        let store = JsonListStore::<String>::new(&tmp).await?;
        store.update_list(|l| { l.push("keep".to_string()); Ok(()) }).await?;

        let res: Result<(), ServiceError> = store
            .update_list(|l| {
                l.push("discard".to_string());
                Err(ServiceError::Conflict("nope".into()))
            })
            .await;
        assert!(res.is_err());
        assert_eq!(store.list().await, vec!["keep".to_string()]);

        // the file was not rewritten either
        let reloaded = JsonListStore::<String>::new(&tmp).await?;
        assert_eq!(reloaded.list().await, vec!["keep".to_string()]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_path_reads_as_empty() -> Result<(), anyhow::Error> {
        // a directory at the store path makes the read fail with an error
        // other than NotFound
        let dir = std::env::temp_dir()
            .join(format!("json_list_store_dir_{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;

        let store = JsonListStore::<String>::new(&dir).await?;
        assert_eq!(store.list().await.len(), 0);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_updates_are_both_persisted() -> Result<(), anyhow::Error> {
        let tmp = temp_path("concurrent");
        let store = JsonListStore::<String>::new(&tmp).await?;

        // two independent read-modify-write cycles racing on the same store
        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.update_list(|l| { l.push("first".to_string()); Ok(()) }).await
            })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.update_list(|l| { l.push("second".to_string()); Ok(()) }).await
            })
        };
        a.await??;
        b.await??;

        let mut entries = store.list().await;
        entries.sort();
        assert_eq!(entries, vec!["first".to_string(), "second".to_string()]);

        // disk agrees with memory: neither update overwrote the other
        let reloaded = JsonListStore::<String>::new(&tmp).await?;
        assert_eq!(reloaded.list().await.len(), 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() -> Result<(), anyhow::Error> {
        let tmp = temp_path("corrupt");
        tokio::fs::write(&tmp, b"{ this is not json").await?;

        let store = JsonListStore::<String>::new(&tmp).await?;
        assert_eq!(store.list().await.len(), 0);

        // the store stays usable after the bad read
        store.update_list(|l| { l.push("fresh".to_string()); Ok(()) }).await?;
        let reloaded = JsonListStore::<String>::new(&tmp).await?;
        assert_eq!(reloaded.list().await, vec!["fresh".to_string()]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn file_layout_is_pretty_printed() -> Result<(), anyhow::Error> {
        let tmp = temp_path("layout");
        let store = JsonListStore::<String>::new(&tmp).await?;
        store.update_list(|l| { l.push("x".to_string()); Ok(()) }).await?;

        let raw = tokio::fs::read_to_string(&tmp).await?;
        assert_eq!(raw, "[\n  \"x\"\n]");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
