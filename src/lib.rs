//! # VNX Exporter
//!
//! Prometheus exporter for EMC VNX storage arrays. Two background pollers
//! drive the vendor `naviseccli` tool, parse its text output and publish the
//! figures as gauges on an HTTP `/metrics` endpoint.
//!
//! ## Exported gauges
//!
//! - `vnx_available_capacity_in_gb`, `vnx_consumed_capacity_in_gb`,
//!   `vnx_user_capacity_in_gb`, `vnx_total_subscribed_capacity_in_gb`
//! - `vnx_percent_full`, `vnx_percent_subscribed`
//! - `vnx_consumed_num_of_lun`, `vnx_maximum_num_of_lun`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vnx_exporter::{
//!     start_web_server, ExporterMetrics, NaviCliConfig, ShellRunner, StoragePoolPoller,
//!     WebConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let metrics = Arc::new(ExporterMetrics::new()?);
//!     let navi = NaviCliConfig::new("10.10.10.10", "admin", "secret", "Pool 0");
//!
//!     let poller = StoragePoolPoller::new(
//!         Arc::new(ShellRunner::new()),
//!         navi.storage_pool_command(),
//!         Arc::clone(&metrics),
//!     );
//!     tokio::spawn(poller.run());
//!
//!     start_web_server(WebConfig::default(), metrics).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod metrics;
pub mod navi;
pub mod web;

// Re-export public API
pub use error::{ExporterError, Result};
pub use metrics::{
    collector::{LunCountPoller, StoragePoolPoller},
    data::{parse_storage_pool, StoragePoolRecord},
    lun::parse_lun_count,
    registry::ExporterMetrics,
};
pub use navi::{CommandRunner, NaviCliConfig, ShellRunner, VendorCommand};
pub use web::{start_web_server, WebConfig};

/// The default poll interval in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 9184;
