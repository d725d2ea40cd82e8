use socialmint::{db, server, utils, Config, handlers::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();
    
    let config = Config::from_env()?;
    let store = db::connect_store(&config).await?;
    tracing::info!("Using {} document store", store.backend_tag());
    
    let port = config.port;
    let app = server::create_router(AppState::new(store), &config);
    
    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Server running on port {}", port);
    
    axum::serve(listener, app).await?;
    
    Ok(())
}
