use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{DocumentStore, StoreError, StoreResult};
use crate::models::Collection;

/// In-process document store. Collections keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<&'static str, Vec<(Uuid, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self, collection: &Collection) -> usize {
        self.collections
            .read()
            .await
            .get(collection.name)
            .map_or(0, Vec::len)
    }
}

/// Top-level key overwrite, the same shape as JSONB `||`
fn merge_object(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        (target, patch) => *target = patch,
    }
}

/// Fails if `candidate` repeats a unique field held by any other document
fn check_unique(
    collection: &Collection,
    documents: &[(Uuid, Value)],
    candidate_id: Uuid,
    candidate: &Value,
) -> StoreResult<()> {
    for field in collection.unique {
        let Some(value) = candidate.get(*field).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = documents
            .iter()
            .any(|(id, doc)| *id != candidate_id && doc.get(*field) == Some(value));
        if taken {
            return Err(StoreError::Duplicate {
                collection: collection.name.to_string(),
                key: format!("{}: {}", field, value),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert(&self, collection: &Collection, id: Uuid, document: Value) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.name).or_default();
        check_unique(collection, documents, id, &document)?;
        documents.push((id, document));
        Ok(())
    }

    async fn find_all(&self, collection: &Collection) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection.name)
            .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &Collection, id: Uuid) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection.name)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| *doc_id == id))
            .map(|(_, doc)| doc.clone()))
    }

    async fn merge(&self, collection: &Collection, id: Uuid, patch: Value) -> StoreResult<Option<Value>> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection.name) else {
            return Ok(None);
        };
        let Some(index) = documents.iter().position(|(doc_id, _)| *doc_id == id) else {
            return Ok(None);
        };

        let mut merged = documents[index].1.clone();
        merge_object(&mut merged, patch);
        check_unique(collection, documents, id, &merged)?;
        documents[index].1 = merged.clone();
        Ok(Some(merged))
    }

    async fn delete(&self, collection: &Collection, id: Uuid) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection.name) else {
            return Ok(false);
        };
        let before = documents.len();
        documents.retain(|(doc_id, _)| *doc_id != id);
        Ok(documents.len() < before)
    }
}
