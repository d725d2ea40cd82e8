use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState, resource_routes};
use crate::models::{Blog, Chat, Comment, Event, EventAttendance, Like, Nft, User};
use crate::Config;

pub fn create_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/users", resource_routes::<User>())
        .nest("/nfts", resource_routes::<Nft>())
        .nest("/blogs", resource_routes::<Blog>())
        .nest("/events", resource_routes::<Event>())
        .nest("/eventAttendances", resource_routes::<EventAttendance>())
        .nest("/likes", resource_routes::<Like>())
        .nest("/comments", resource_routes::<Comment>())
        .nest("/chats", resource_routes::<Chat>())
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(config))
        .with_state(state)
}

fn create_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        // Default to permissive when no allow-list is configured
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}
