//! Report builder: drain, partition, assemble, filter.
//!
//! Runs once per accepted location pair. The three device maps are
//! drained in a single critical section, stale observations are
//! dropped, the survivors are assigned to whichever buffered fix is
//! nearest in time, and up to two reports come out, `prev` first,
//! each only if it carries at least one observation.

use std::sync::Arc;

use tracing::{debug, info};

use stumbler_model::{BluetoothBeacon, CellTower, Observed, Position, Report, WifiAccessPoint};

use crate::config::PipelineConfig;
use crate::device_map::{DrainedDevices, SharedDeviceMaps};
use crate::joiner::LocationPair;

/// Assembles reports from the shared maps for each location pair.
pub(crate) struct ReportBuilder {
    maps: Arc<SharedDeviceMaps>,
    config: PipelineConfig,
}

impl ReportBuilder {
    pub(crate) fn new(maps: Arc<SharedDeviceMaps>, config: PipelineConfig) -> Self {
        Self { maps, config }
    }

    /// Drain the maps and build the reports for one pair.
    ///
    /// The returned vector holds zero, one, or two reports, `prev`'s
    /// report (if any) before `current`'s.
    pub(crate) fn on_pair(&self, pair: &LocationPair, now_ms: u64) -> Vec<Report> {
        let drained = self.maps.drain_all();
        debug!(drained = drained.len(), "drained device maps for pair");
        assemble_reports(pair, drained, now_ms, &self.config)
    }
}

/// Pure assembly step, separated from the drain for testability.
pub(crate) fn assemble_reports(
    pair: &LocationPair,
    mut drained: DrainedDevices,
    now_ms: u64,
    config: &PipelineConfig,
) -> Vec<Report> {
    let max_age_ms = config.observed_device_max_age_ms();
    drop_stale(&mut drained.cells, now_ms, max_age_ms);
    drop_stale(&mut drained.wifis, now_ms, max_age_ms);
    drop_stale(&mut drained.bluetooths, now_ms, max_age_ms);

    let prev_ts = pair.prev.as_ref().map(|p| p.timestamp_ms);
    let current_ts = pair.current.timestamp_ms;

    let (prev_cells, current_cells) = split_by_nearest(drained.cells, prev_ts, current_ts);
    let (prev_wifis, current_wifis) = split_by_nearest(drained.wifis, prev_ts, current_ts);
    let (prev_bts, current_bts) = split_by_nearest(drained.bluetooths, prev_ts, current_ts);

    let mut reports = Vec::with_capacity(2);
    if let Some(prev) = &pair.prev {
        reports.extend(build_one(
            prev,
            prev_cells,
            apply_wifi_minimum(prev_wifis, config),
            prev_bts,
        ));
    }
    reports.extend(build_one(
        &pair.current,
        current_cells,
        apply_wifi_minimum(current_wifis, config),
        current_bts,
    ));
    reports
}

fn drop_stale<T: Observed>(devices: &mut Vec<T>, now_ms: u64, max_age_ms: u64) {
    devices.retain(|d| now_ms.saturating_sub(d.timestamp_ms()) <= max_age_ms);
}

/// Assign each device to the buffered fix nearest its timestamp.
///
/// A device goes to `prev` only when one exists and its timestamp is
/// strictly closer to `prev`'s; ties and the first-fix case go to
/// `current`.
fn split_by_nearest<T: Observed>(
    devices: Vec<T>,
    prev_ts: Option<u64>,
    current_ts: u64,
) -> (Vec<T>, Vec<T>) {
    match prev_ts {
        None => (Vec::new(), devices),
        Some(prev_ts) => devices.into_iter().partition(|d| {
            let ts = d.timestamp_ms();
            ts.abs_diff(prev_ts) < ts.abs_diff(current_ts)
        }),
    }
}

/// A Wi-Fi list below the configured minimum is useless for
/// positioning and risks exposing a single household; it is emptied
/// rather than emitted.
fn apply_wifi_minimum(
    wifis: Vec<WifiAccessPoint>,
    config: &PipelineConfig,
) -> Vec<WifiAccessPoint> {
    if wifis.len() < config.wifi_min_per_report {
        Vec::new()
    } else {
        wifis
    }
}

fn build_one(
    position: &Position,
    cells: Vec<CellTower>,
    wifis: Vec<WifiAccessPoint>,
    bluetooths: Vec<BluetoothBeacon>,
) -> Option<Report> {
    let report = Report::new(position.clone(), cells, wifis, bluetooths);
    if report.is_empty() {
        debug!("suppressing report with no observations");
        return None;
    }
    info!(
        cells = report.cell_towers.len(),
        wifis = report.wifi_access_points.len(),
        bluetooths = report.bluetooth_beacons.len(),
        "built report"
    );
    Some(report)
}
