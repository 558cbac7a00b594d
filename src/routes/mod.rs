pub mod admin;
pub mod polls;

use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// 组装完整的应用路由
pub fn app_router(state: Arc<AppState>) -> Router {
    let origins = state
        .config
        .cors_allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(origins);

    Router::new()
        .route("/health", get(health_check))
        .merge(polls::router())
        .nest("/admin", admin::router(state.clone()))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "Premios is running!"
}
