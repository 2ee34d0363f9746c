// Route table for the holders API

use axum::routing::{get, post, Router};
use http::{header, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    get_holders, get_stats, get_sync_status, health_check, test_endpoints, trigger_sync, AppState,
};

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::AUTHORIZATION,
        ])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(3600))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/holders", get(get_holders))
        .route("/stats", get(get_stats))
        .route("/sync", post(trigger_sync))
        .route("/sync/status", get(get_sync_status))
        .route("/test", get(test_endpoints))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
