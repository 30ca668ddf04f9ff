//! HTTP control API
//!
//! Axum router and the context object shared by all handlers. Runs on its
//! own thread inside a tokio runtime; handlers relay commands to the main
//! thread through the [`PlayerHandle`](crate::player::PlayerHandle).

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::library::VideoLibrary;
use crate::player::PlayerHandle;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub player: PlayerHandle,
    pub library: Arc<VideoLibrary>,
}

/// Create the API router
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/test", get(handlers::test_probe))
        .route("/status", get(handlers::status))
        .route("/resume", post(handlers::resume))
        .route("/changeVideo", post(handlers::change_video))
        .route("/play", post(handlers::play))
        .route("/pause", post(handlers::pause))
        .route("/stop", post(handlers::stop))
        .route("/close", post(handlers::close))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Run the HTTP API server until the process exits.
pub async fn serve(port: u16, ctx: AppContext) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = create_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP control API listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
