//! Web application router and middleware setup.

use crate::metrics::ExporterMetrics;
use crate::web::config::WebConfig;
use crate::web::handlers;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the axum application serving the exporter endpoints.
pub fn create_app(config: &WebConfig, metrics: Arc<ExporterMetrics>) -> Router {
    let landing = Router::new()
        .route("/", get(handlers::index))
        .with_state(config.metrics_path.clone());

    Router::new()
        .route(&config.metrics_path, get(handlers::metrics))
        .route("/health", get(handlers::health_check))
        .with_state(metrics)
        .merge(landing)
        .layer(TraceLayer::new_for_http())
}
