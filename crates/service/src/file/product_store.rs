use std::sync::Arc;

use chrono::Utc;

use crate::errors::ServiceError;
use crate::product::store::ProductStore;
use crate::storage::json_list_store::JsonListStore;
use models::product::{Product, ProductInput};

/// File-backed product collection.
///
/// Keeps the full collection in one JSON array file and rewrites the whole
/// document on every mutation. Duplicate detection is a linear scan over the
/// trimmed, lower-cased names.
#[derive(Clone)]
pub struct FileProductStore {
    store: Arc<JsonListStore<Product>>,
}

impl FileProductStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Product>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// List the collection in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.store.list().await
    }

    /// Append a new record unless one with the same name already exists.
    ///
    /// The id is the wall clock in milliseconds, so two creations inside the
    /// same millisecond can collide; callers accept that resolution.
    pub async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        input.validate().map_err(|e| ServiceError::Validation(e.to_string()))?;
        let record = Product {
            id: Utc::now().timestamp_millis(),
            name: input.name.unwrap_or_default(),
            message: input.message,
            time: input.time,
            kind: input.kind,
            phone: input.phone.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
        };
        let key = record.dedup_key();
        self.store
            .update_list(move |list| {
                if list.iter().any(|p| p.dedup_key() == key) {
                    return Err(ServiceError::Conflict(
                        "a product with this name already exists".into(),
                    ));
                }
                list.push(record.clone());
                Ok(record)
            })
            .await
    }

    /// Remove every record carrying the given id. Ids are expected unique,
    /// but any stray duplicates go with them.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.store
            .update_list(move |list| {
                let before = list.len();
                list.retain(|p| p.id != id);
                if list.len() == before {
                    return Err(ServiceError::not_found("product"));
                }
                Ok(())
            })
            .await
    }
}

#[async_trait::async_trait]
impl ProductStore for FileProductStore {
    async fn list(&self) -> Vec<Product> { self.list().await }
    async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> { self.create(input).await }
    async fn delete(&self, id: i64) -> Result<(), ServiceError> { self.delete(id).await }
}
