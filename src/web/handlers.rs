//! HTTP handlers for the exporter endpoints.

use crate::metrics::ExporterMetrics;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Serve all registered gauges in the Prometheus text format.
pub async fn metrics(State(metrics): State<Arc<ExporterMetrics>>) -> Response {
    match metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, metrics.content_type())], body).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "vnx-exporter",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Landing page pointing at the metrics path.
pub async fn index(State(metrics_path): State<String>) -> Html<String> {
    Html(format!(
        "<html>\n<head><title>VNX Exporter</title></head>\n<body>\n\
         <h1>VNX Exporter</h1>\n<p><a href=\"{metrics_path}\">Metrics</a></p>\n\
         </body>\n</html>\n"
    ))
}
