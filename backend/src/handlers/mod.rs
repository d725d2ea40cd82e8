pub mod extract;
pub mod health;
pub mod resource;

use std::sync::Arc;

use crate::db::DocumentStore;

pub use health::health_check;
pub use resource::resource_routes;

/// Shared by every handler; cloning is cheap
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}
