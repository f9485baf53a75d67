//! Polling loops that feed vendor CLI output into the gauges.

use crate::error::Result;
use crate::metrics::{
    data::{parse_storage_pool, StoragePoolRecord},
    lun::parse_lun_count,
    registry::ExporterMetrics,
};
use crate::navi::{CommandRunner, VendorCommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Default delay between two vendor CLI invocations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(crate::DEFAULT_INTERVAL_SECS);

/// Polls `storagepool -list` and updates the capacity gauges.
pub struct StoragePoolPoller<R> {
    runner: Arc<R>,
    command: VendorCommand,
    metrics: Arc<ExporterMetrics>,
    interval: Duration,
}

impl<R: CommandRunner> StoragePoolPoller<R> {
    pub fn new(runner: Arc<R>, command: VendorCommand, metrics: Arc<ExporterMetrics>) -> Self {
        Self {
            runner,
            command,
            metrics,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the command once and publish the parsed record.
    ///
    /// The record is fully parsed before any gauge is touched.
    pub async fn poll_once(&self) -> Result<StoragePoolRecord> {
        let output = self.runner.run(&self.command).await?;
        let record = parse_storage_pool(&output)?;
        self.metrics.apply_storage_pool(&record);
        debug!(?record, "Updated storage pool gauges");
        Ok(record)
    }

    /// Poll until the first failure, which is returned to the caller.
    pub async fn run(self) -> Result<()> {
        info!("Polling storage pool every {:?}", self.interval);
        poll_forever(self.interval, || self.poll_once()).await
    }
}

/// Polls `getlun` and updates the consumed-LUN gauge.
pub struct LunCountPoller<R> {
    runner: Arc<R>,
    command: VendorCommand,
    metrics: Arc<ExporterMetrics>,
    interval: Duration,
}

impl<R: CommandRunner> LunCountPoller<R> {
    pub fn new(runner: Arc<R>, command: VendorCommand, metrics: Arc<ExporterMetrics>) -> Self {
        Self {
            runner,
            command,
            metrics,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub async fn poll_once(&self) -> Result<f64> {
        let output = self.runner.run(&self.command).await?;
        let count = parse_lun_count(&output)?;
        self.metrics.set_lun_count(count);
        debug!(count, "Updated LUN count gauge");
        Ok(count)
    }

    /// Poll until the first failure, which is returned to the caller.
    pub async fn run(self) -> Result<()> {
        info!("Polling LUN count every {:?}", self.interval);
        poll_forever(self.interval, || self.poll_once()).await
    }
}

async fn poll_forever<T, F, Fut>(period: Duration, mut poll: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut ticker = time::interval(period);
    // A slow CLI call pushes the next poll back instead of bunching them up
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        poll().await?;
    }
}
