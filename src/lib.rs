pub mod api_client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Запас на заголовки и границы multipart поверх лимита самого файла
const MULTIPART_OVERHEAD: usize = 64 * 1024;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self { config }
    }
}

/// Собирает роутер со всеми маршрутами и слоями.
pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.upload.max_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/", get(|| async { "Bus Boarding Sequence Generator API v1.0" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
