//! Storage pool capacity record and its parser.

use crate::error::{ExporterError, Result};
use serde::{Deserialize, Serialize};

pub const AVAILABLE_CAPACITY_KEY: &str = "Available Capacity (GBs)";
pub const CONSUMED_CAPACITY_KEY: &str = "Consumed Capacity (GBs)";
pub const USER_CAPACITY_KEY: &str = "User Capacity (GBs)";
pub const PERCENT_FULL_KEY: &str = "Percent Full";
pub const TOTAL_SUBSCRIBED_KEY: &str = "Total Subscribed Capacity (GBs)";
pub const PERCENT_SUBSCRIBED_KEY: &str = "Percent Subscribed";

/// Capacity figures of one storage pool, as reported by a single
/// `storagepool -list` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StoragePoolRecord {
    /// Free space left in the pool (GB)
    pub available_capacity_gb: f64,
    /// Space consumed by LUNs (GB)
    pub consumed_capacity_gb: f64,
    /// Usable space after RAID overhead (GB)
    pub user_capacity_gb: f64,
    /// Consumed share of user capacity (0.0 to 100.0)
    pub percent_full: f64,
    /// Capacity promised to thin LUNs (GB)
    pub total_subscribed_capacity_gb: f64,
    /// Subscribed share of user capacity, may exceed 100.0
    pub percent_subscribed: f64,
}

/// Parse the `Key:  Value` listing printed by `naviseccli storagepool -list`.
///
/// Unknown keys and lines without a colon are skipped. If a key repeats,
/// the first value is kept. Every one of the six capacity keys must be
/// present with a numeric value.
pub fn parse_storage_pool(text: &str) -> Result<StoragePoolRecord> {
    let mut available = None;
    let mut consumed = None;
    let mut user = None;
    let mut percent_full = None;
    let mut subscribed = None;
    let mut percent_subscribed = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let slot = match key.trim() {
            AVAILABLE_CAPACITY_KEY => &mut available,
            CONSUMED_CAPACITY_KEY => &mut consumed,
            USER_CAPACITY_KEY => &mut user,
            PERCENT_FULL_KEY => &mut percent_full,
            TOTAL_SUBSCRIBED_KEY => &mut subscribed,
            PERCENT_SUBSCRIBED_KEY => &mut percent_subscribed,
            _ => continue,
        };

        if slot.is_none() {
            *slot = Some(parse_field(key.trim(), value)?);
        }
    }

    Ok(StoragePoolRecord {
        available_capacity_gb: require(available, AVAILABLE_CAPACITY_KEY)?,
        consumed_capacity_gb: require(consumed, CONSUMED_CAPACITY_KEY)?,
        user_capacity_gb: require(user, USER_CAPACITY_KEY)?,
        percent_full: require(percent_full, PERCENT_FULL_KEY)?,
        total_subscribed_capacity_gb: require(subscribed, TOTAL_SUBSCRIBED_KEY)?,
        percent_subscribed: require(percent_subscribed, PERCENT_SUBSCRIBED_KEY)?,
    })
}

fn parse_field(key: &str, value: &str) -> Result<f64> {
    let value = value.trim();
    value
        .parse::<f64>()
        .map_err(|e| ExporterError::parse_error(format!("{key}: invalid number {value:?}: {e}")))
}

fn require(value: Option<f64>, key: &str) -> Result<f64> {
    value.ok_or_else(|| ExporterError::parse_error(format!("missing field {key:?}")))
}
