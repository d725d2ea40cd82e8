pub mod models;
pub mod db;
pub mod handlers;
pub mod server;
pub mod error;
pub mod utils;
pub mod constants;

pub use utils::config::Config;
pub use db::connection::get_db_pool;
pub use error::{AppError, AppResult};

// Re-export common types
pub use sqlx::PgPool;
pub use anyhow::Result;
pub use uuid::Uuid;
pub use chrono::{DateTime, Utc};
