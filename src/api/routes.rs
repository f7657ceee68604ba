use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::handlers;
use crate::generation::{BatchOrchestrator, Generator};

pub struct AppState {
    pub batches: BatchOrchestrator,
    pub series_prompts: Vec<String>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn generator(&self) -> &Generator {
        self.batches.generator()
    }
}

/// Build the API router. When `static_dir` is given, unmatched paths are
/// served from it.
pub fn router(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let api = Router::new()
        .route("/api/status", get(handlers::status))
        .route("/api/prompts", get(handlers::prompts))
        .route("/api/generate-single", post(handlers::generate_single))
        .route("/api/generate-series", post(handlers::generate_series))
        .route("/api/generate-multiple", post(handlers::generate_multiple))
        .route("/api/generate-product-scenes", post(handlers::generate_product_scenes));

    let api = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);
    api.layer(body_limit)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
