use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{Value, json};

use super::{AppState, extract::{JsonBody, PatchBody}};
use crate::db::Repository;
use crate::error::AppResult;
use crate::models::Resource;

/// CRUD routes for one entity, to be nested under its path prefix
pub fn resource_routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all::<R>).post(create::<R>))
        .route(
            "/{id}",
            get(get_by_id::<R>).put(update_by_id::<R>).delete(delete_by_id::<R>),
        )
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<R::Draft>,
) -> AppResult<(StatusCode, Json<R>)> {
    let resource = Repository::<R>::new(state.store).create(draft).await?;
    tracing::info!("Created {} {}", R::NAME, resource.id());
    Ok((StatusCode::CREATED, Json(resource)))
}

pub async fn list_all<R: Resource>(State(state): State<AppState>) -> AppResult<Json<Vec<R>>> {
    let resources = Repository::<R>::new(state.store).list_all().await?;
    Ok(Json(resources))
}

pub async fn get_by_id<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<R>> {
    let resource = Repository::<R>::new(state.store).get_by_id(&id).await?;
    Ok(Json(resource))
}

pub async fn update_by_id<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    PatchBody(patch): PatchBody<R::Patch>,
) -> AppResult<Json<R>> {
    let resource = Repository::<R>::new(state.store)
        .update_by_id(&id, patch)
        .await?;
    tracing::debug!("Updated {} {}", R::NAME, id);
    Ok(Json(resource))
}

pub async fn delete_by_id<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    Repository::<R>::new(state.store).delete_by_id(&id).await?;
    tracing::info!("Deleted {} {}", R::NAME, id);
    Ok(Json(json!({ "message": format!("{} deleted", R::NAME) })))
}
