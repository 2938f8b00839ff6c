use library_loans::{
    adapters::memory::{Catalogue, EventStore, MemberDirectory, StatisticsStore},
    api::{handlers::AppState, router::create_router},
    application::loan::{EntityLocks, ServiceDependencies},
    config::AppConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize adapters (state lives for the process lifetime)
    let service_deps = ServiceDependencies {
        catalogue: Arc::new(Catalogue::new()),
        members: Arc::new(MemberDirectory::new()),
        event_store: Arc::new(EventStore::new()),
        statistics: Arc::new(StatisticsStore::new()),
        locks: Arc::new(EntityLocks::new()),
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
