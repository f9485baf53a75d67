//! Storage array metrics: parsing, gauges and polling.
//!
//! Vendor CLI output is parsed into a [`StoragePoolRecord`] or a LUN count,
//! then copied into the gauges held by [`ExporterMetrics`]. The pollers in
//! [`collector`] repeat this on a fixed interval.

pub mod collector;
pub mod data;
pub mod lun;
pub mod registry;

// Re-export commonly used items
pub use collector::{LunCountPoller, StoragePoolPoller, DEFAULT_POLL_INTERVAL};
pub use data::{parse_storage_pool, StoragePoolRecord};
pub use lun::parse_lun_count;
pub use registry::{ExporterMetrics, DEFAULT_MAX_LUNS};
