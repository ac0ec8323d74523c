use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/article", get(handlers::get_article))
        .route("/api/article/", get(handlers::get_article))
        .route("/api/article/*path", get(handlers::get_article))
        .route("/api/search", get(handlers::search))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> gk_core::Result<()> {
    let base_url = state.config.base_url().to_string();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🌐 Starting Grokipedia API server on {}", listener.local_addr()?);
    info!("Base URL: {}", base_url);
    info!("Endpoints:");
    info!("  GET /health - Health check");
    info!("  GET /api/article/{{path}} - Get article by path");
    info!("  GET /api/search?q={{query}} - Search articles");

    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use gk_core::{Article, Error, Result, SearchResult};
}
