//! HTTP routes and server bootstrap.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::{SharedTaskStore, TaskFiles, TaskStore};

use super::tasks;
use super::views::{ViewError, Views};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Saved tasks, re-read on every listing
    pub saved: TaskFiles,
    /// Tasks added during this run
    pub added: SharedTaskStore,
    pub views: Views,
}

impl AppState {
    /// State with a fresh, empty in-memory store.
    pub fn new(config: Config) -> Result<Self, ViewError> {
        Self::with_store(config, Arc::new(TaskStore::new()))
    }

    /// State around an existing in-memory store.
    pub fn with_store(config: Config, added: SharedTaskStore) -> Result<Self, ViewError> {
        Ok(Self {
            saved: TaskFiles::new(config.tasks_dir.clone()),
            added,
            views: Views::new()?,
            config,
        })
    }
}

/// Build the application router.
///
/// Anything not matched by a route is looked up in the public directory.
pub fn router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/", get(tasks::list_tasks))
        .route("/add", get(tasks::new_task_form).post(tasks::create_task))
        .route("/health", get(health))
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Serving tasks from {} and assets from {}",
        config.tasks_dir.display(),
        config.public_dir.display()
    );

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, tasks added this run will be dropped");
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub added_tasks: usize,
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        added_tasks: state.added.len().await,
    })
}
