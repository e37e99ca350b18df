use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::VectorStore;

pub mod routes;

/// Server state
///
/// The store is synchronous; handlers lock it on the blocking pool, so
/// requests reach SQLite one at a time.
pub struct AppState {
    pub store: Mutex<VectorStore>,
}

impl AppState {
    pub fn new(store: VectorStore) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
        })
    }
}

/// Build the HTTP router around a shared store
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/vectors", post(routes::create_vector))
        .route("/vectors/", post(routes::create_vector))
        .route("/vectors/{id}", get(routes::get_vector))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until Ctrl-C, then close the store's connection
pub async fn start_server(port: u16, store: VectorStore) -> anyhow::Result<()> {
    let state = AppState::new(store);
    let app = router(Arc::clone(&state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database connection");
    let mut store = state
        .store
        .lock()
        .map_err(|_| anyhow::anyhow!("vector store lock poisoned"))?;
    store.close()?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
