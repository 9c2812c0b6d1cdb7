use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, webhook};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // The webhook and the config view require credentials; health and
    // metrics stay open for probes and scrapers.
    let protected = Router::new()
        .route("/webhook", post(webhook::receive_webhook))
        .route("/api/v1/config", get(handlers::get_config))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            super::middleware::auth_middleware,
        ));

    Router::new()
        .merge(protected)
        .route("/api/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(super::middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
