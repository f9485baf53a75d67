//! HTTP surface of the exporter.
//!
//! Serves the gauges held by [`ExporterMetrics`] for Prometheus to scrape.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{ExporterError, Result};
use crate::metrics::ExporterMetrics;
use std::sync::Arc;
use tracing::info;

/// Start the web server and serve until it fails.
pub async fn start_web_server(config: WebConfig, metrics: Arc<ExporterMetrics>) -> Result<()> {
    let app = create_app(&config, metrics);
    let addr = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Starting VNX exporter on http://{}", addr);
    info!("Metrics endpoint: http://{}{}", addr, config.metrics_path);

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
