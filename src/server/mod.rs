//! HTTP surface: JSON and HTML views of the cached schedule.

pub mod handlers;
pub mod render;

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;
use crate::schedule::{HtmlFetcher, ScheduleCache};

/// Builds the application router around a shared cache.
pub fn router<F: HtmlFetcher + 'static>(cache: Arc<ScheduleCache<F>>) -> Router {
    Router::new()
        .route("/", get(handlers::schedule_page::<F>))
        .route("/schedule.json", get(handlers::schedule_json::<F>))
        .route("/refresh", post(handlers::refresh::<F>))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(cache)
}

/// Serves the router on `bind_address` until Ctrl-C is received.
pub async fn serve<F: HtmlFetcher + 'static>(
    cache: Arc<ScheduleCache<F>>,
    bind_address: &str,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(cache))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
