use async_trait::async_trait;

use crate::errors::ServiceError;
use models::product::{Product, ProductInput};

/// Trait abstraction for product collection storage.
/// Implementations can be file-backed, database-backed, or remote; handlers
/// only see this capability.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Full collection in insertion order. Never fails: an absent or corrupt
    /// backing store reads as empty.
    async fn list(&self) -> Vec<Product>;
    /// Validate, reject duplicate names, append and persist.
    async fn create(&self, input: ProductInput) -> Result<Product, ServiceError>;
    /// Remove every record with the given id; `NotFound` if none matched.
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}
