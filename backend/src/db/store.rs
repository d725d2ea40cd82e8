use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Collection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("duplicate key error collection: {collection} key: {key}")]
    Duplicate { collection: String, key: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for JSON documents grouped into collections.
///
/// Documents are top-level JSON objects. `merge` overwrites only the keys
/// present in the patch and must be atomic per document. Implementations
/// enforce the collection's unique fields on both `insert` and `merge`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;

    async fn insert(&self, collection: &Collection, id: Uuid, document: Value) -> StoreResult<()>;

    async fn find_all(&self, collection: &Collection) -> StoreResult<Vec<Value>>;

    async fn find_by_id(&self, collection: &Collection, id: Uuid) -> StoreResult<Option<Value>>;

    /// Returns the merged document, or `None` when no document has `id`
    async fn merge(&self, collection: &Collection, id: Uuid, patch: Value) -> StoreResult<Option<Value>>;

    /// Returns whether a document was removed
    async fn delete(&self, collection: &Collection, id: Uuid) -> StoreResult<bool>;
}
