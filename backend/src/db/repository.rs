use chrono::Utc;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use super::store::{DocumentStore, StoreError};
use crate::error::{AppError, AppResult};
use crate::models::Resource;

/// Typed CRUD over one entity's collection
pub struct Repository<R> {
    store: Arc<dyn DocumentStore>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Repository<R> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    /// Validate and persist a new document with a fresh id
    pub async fn create(&self, draft: R::Draft) -> AppResult<R> {
        let resource = R::from_draft(Uuid::new_v4(), draft, Utc::now())?;
        let document = serde_json::to_value(&resource).map_err(StoreError::from)?;

        self.store
            .insert(&R::COLLECTION, resource.id(), document)
            .await?;

        Ok(resource)
    }

    pub async fn list_all(&self) -> AppResult<Vec<R>> {
        let documents = self.store.find_all(&R::COLLECTION).await?;
        documents.into_iter().map(decode).collect()
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<R> {
        let id = parse_id::<R>(id)?;
        match self.store.find_by_id(&R::COLLECTION, id).await? {
            Some(document) => decode(document),
            None => Err(AppError::NotFound(R::NAME)),
        }
    }

    /// Merge the supplied fields into the stored document
    pub async fn update_by_id(&self, id: &str, patch: R::Patch) -> AppResult<R> {
        let id = parse_id::<R>(id)?;
        if let Err(err) = R::check_patch(&patch) {
            // an unknown id wins over a bad patch
            if self.store.find_by_id(&R::COLLECTION, id).await?.is_none() {
                return Err(AppError::NotFound(R::NAME));
            }
            return Err(err.into());
        }
        let patch = serde_json::to_value(&patch).map_err(StoreError::from)?;

        match self.store.merge(&R::COLLECTION, id, patch).await? {
            Some(document) => decode(document),
            None => Err(AppError::NotFound(R::NAME)),
        }
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let id = parse_id::<R>(id)?;
        if self.store.delete(&R::COLLECTION, id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(R::NAME))
        }
    }
}

fn parse_id<R: Resource>(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId {
        entity: R::NAME,
        value: id.to_string(),
    })
}

fn decode<R: Resource>(document: Value) -> AppResult<R> {
    Ok(serde_json::from_value(document).map_err(StoreError::from)?)
}
