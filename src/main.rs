//! Codesearch web server entry point

use anyhow::Result;
use codesearch_web::{
    backends::BackendLoader,
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting codesearch-web v{}", codesearch_web::VERSION);

    // Load configuration
    let settings = config::load()?;

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;

    // Load backends
    let registry = BackendLoader::load(&settings, &client)?;
    info!("Loaded {} backends", registry.len());

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state and router
    let state = AppState::new(settings, registry);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
