//! HTTP layer for user registration statistics

pub mod config;
pub mod user_aggregate;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use useragg_core::QueryExecutor;

/// Shared handler state. Holds no mutable data; the executor owns its own
/// connection pooling.
pub struct AppState {
    pub db: Arc<dyn QueryExecutor>,
}

impl AppState {
    pub fn new(db: impl QueryExecutor + 'static) -> Self {
        Self { db: Arc::new(db) }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/userAggregate", get(user_aggregate::get_user_aggregate))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
