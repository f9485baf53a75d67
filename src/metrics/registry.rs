//! Prometheus gauges published by the exporter.

use crate::error::Result;
use crate::metrics::data::StoragePoolRecord;
use prometheus::{Encoder, Gauge, Registry, TextEncoder};
use std::sync::RwLock;

/// Default value of the maximum-LUN gauge.
pub const DEFAULT_MAX_LUNS: f64 = 1100.0;

/// The exporter's gauges and the registry they are exposed through.
///
/// Created once at startup and shared behind an `Arc` between the pollers
/// (writers) and the HTTP handler (reader).
pub struct ExporterMetrics {
    registry: Registry,
    // Held for writing while a pool record is applied and for reading while
    // the registry is gathered, so a scrape never sees a half-applied record.
    snapshot_lock: RwLock<()>,

    pub available_capacity: Gauge,
    pub consumed_capacity: Gauge,
    pub user_capacity: Gauge,
    pub percent_full: Gauge,
    pub total_subscribed: Gauge,
    pub percent_subscribed: Gauge,
    pub consumed_num_of_lun: Gauge,
    pub maximum_num_of_lun: Gauge,
}

impl ExporterMetrics {
    /// Create all gauges and register them with a fresh registry.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let available_capacity =
            Gauge::new("vnx_available_capacity_in_gb", "Available Capacity (GBs)")?;
        let consumed_capacity =
            Gauge::new("vnx_consumed_capacity_in_gb", "Consumed Capacity (GBs)")?;
        let user_capacity = Gauge::new("vnx_user_capacity_in_gb", "User Capacity (GBs)")?;
        let percent_full = Gauge::new("vnx_percent_full", "Percent Full")?;
        let total_subscribed = Gauge::new(
            "vnx_total_subscribed_capacity_in_gb",
            "Total Subscribed Capacity (GBs)",
        )?;
        let percent_subscribed = Gauge::new("vnx_percent_subscribed", "Percent Subscribed")?;
        let consumed_num_of_lun = Gauge::new("vnx_consumed_num_of_lun", "Consumed Number of LUN")?;
        let maximum_num_of_lun = Gauge::new("vnx_maximum_num_of_lun", "Maximum Number of LUN")?;

        for gauge in [
            &available_capacity,
            &consumed_capacity,
            &user_capacity,
            &percent_full,
            &total_subscribed,
            &percent_subscribed,
            &consumed_num_of_lun,
            &maximum_num_of_lun,
        ] {
            registry.register(Box::new(gauge.clone()))?;
        }

        Ok(Self {
            registry,
            snapshot_lock: RwLock::new(()),
            available_capacity,
            consumed_capacity,
            user_capacity,
            percent_full,
            total_subscribed,
            percent_subscribed,
            consumed_num_of_lun,
            maximum_num_of_lun,
        })
    }

    /// Copy a parsed pool record into the six capacity gauges.
    pub fn apply_storage_pool(&self, record: &StoragePoolRecord) {
        let _guard = self
            .snapshot_lock
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        self.available_capacity.set(record.available_capacity_gb);
        self.consumed_capacity.set(record.consumed_capacity_gb);
        self.user_capacity.set(record.user_capacity_gb);
        self.percent_full.set(record.percent_full);
        self.total_subscribed.set(record.total_subscribed_capacity_gb);
        self.percent_subscribed.set(record.percent_subscribed);
    }

    /// Current values of the six capacity gauges, read consistently.
    pub fn storage_pool(&self) -> StoragePoolRecord {
        let _guard = self
            .snapshot_lock
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        StoragePoolRecord {
            available_capacity_gb: self.available_capacity.get(),
            consumed_capacity_gb: self.consumed_capacity.get(),
            user_capacity_gb: self.user_capacity.get(),
            percent_full: self.percent_full.get(),
            total_subscribed_capacity_gb: self.total_subscribed.get(),
            percent_subscribed: self.percent_subscribed.get(),
        }
    }

    pub fn set_lun_count(&self, count: f64) {
        self.consumed_num_of_lun.set(count);
    }

    pub fn set_max_luns(&self, max: f64) {
        self.maximum_num_of_lun.set(max);
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn encode(&self) -> Result<String> {
        let families = {
            let _guard = self
                .snapshot_lock
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            self.registry.gather()
        };

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Content type of [`encode`](Self::encode) output.
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}
