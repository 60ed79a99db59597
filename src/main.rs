use std::{net::SocketAddr, sync::Arc};

use notes_app::{
    build_router, config,
    repository::{MemoryStore, NoteStore, Repository},
    service::NoteService,
};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });
    tracing::info!("Successfully loaded notes-app config");

    // Store selection, repository creation and migration
    let store: Arc<dyn NoteStore> = if let Some(dsn) = cfg.pg_dsn.as_deref() {
        let mut repo = Repository::new(dsn).await.unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

        repo.migrate().await.unwrap_or_else(|e| {
            tracing::error!("Failed to migrate database: {e}");
            panic!("failed to migrate database: {e}");
        });

        Arc::new(repo)
    } else {
        tracing::warn!("No PG_DSN configured, notes are kept in memory and lost on restart");
        Arc::new(MemoryStore::new())
    };

    // Service and router
    let service = Arc::new(NoteService::new(store));
    let router = build_router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {addr}: {e}");
            panic!("failed to bind to {addr}: {e}");
        });

    tracing::info!("Notes server starting, listening on {}", addr);

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
