use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{DocumentStore, StoreError, StoreResult};
use crate::models::Collection;

/// Postgres error code for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Documents stored as JSONB rows in the `documents` table
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self, collection: &Collection) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE collection = $1",
        )
        .bind(collection.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Delete every document in `collection`, returning how many were removed
    pub async fn clear(&self, collection: &Collection) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection.name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn map_write_error(collection: &Collection, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Duplicate {
                collection: collection.name.to_string(),
                key: db_err.constraint().unwrap_or("unique").to_string(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert(&self, collection: &Collection, id: Uuid, document: Value) -> StoreResult<()> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.name)
            .bind(id)
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;

        Ok(())
    }

    async fn find_all(&self, collection: &Collection) -> StoreResult<Vec<Value>> {
        let documents = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 ORDER BY inserted_at",
        )
        .bind(collection.name)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    async fn find_by_id(&self, collection: &Collection, id: Uuid) -> StoreResult<Option<Value>> {
        let document = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    async fn merge(&self, collection: &Collection, id: Uuid, patch: Value) -> StoreResult<Option<Value>> {
        let document = sqlx::query_scalar::<_, Value>(
            r#"
            UPDATE documents
            SET body = body || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING body
            "#,
        )
        .bind(collection.name)
        .bind(id)
        .bind(patch)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(collection, e))?;

        Ok(document)
    }

    async fn delete(&self, collection: &Collection, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
