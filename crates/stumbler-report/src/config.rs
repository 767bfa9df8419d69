//! Pipeline configuration.

use std::time::Duration;

/// Configuration for the report-construction pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum horizontal accuracy radius for a usable fix (meters).
    /// Fixes without accuracy or above this ceiling are rejected.
    pub location_max_accuracy_m: f64,
    /// Maximum age of a fix at arrival, measured against the monotonic
    /// clock. Older fixes are rejected.
    pub location_max_age: Duration,
    /// Maximum timestamp distance between a fix and the pressure
    /// sample attached to it. Beyond this, no pressure is attached.
    pub air_pressure_max_age: Duration,
    /// Maximum age of a buffered device observation at drain time.
    /// Older observations are dropped before partitioning.
    pub observed_device_max_age: Duration,
    /// Minimum number of Wi-Fi access points a report may carry. A
    /// partitioned Wi-Fi list below this threshold is emptied.
    pub wifi_min_per_report: usize,
    /// Capacity of the report channel. The builder suspends when the
    /// consumer lags this far behind.
    pub report_buffer: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            location_max_accuracy_m: 200.0,
            location_max_age: Duration::from_secs(20),
            air_pressure_max_age: Duration::from_secs(2),
            observed_device_max_age: Duration::from_secs(30),
            wifi_min_per_report: 2,
            report_buffer: 16,
        }
    }
}

impl PipelineConfig {
    pub(crate) fn location_max_age_ms(&self) -> u64 {
        self.location_max_age.as_millis() as u64
    }

    pub(crate) fn air_pressure_max_age_ms(&self) -> u64 {
        self.air_pressure_max_age.as_millis() as u64
    }

    pub(crate) fn observed_device_max_age_ms(&self) -> u64 {
        self.observed_device_max_age.as_millis() as u64
    }
}
