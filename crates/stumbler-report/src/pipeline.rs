//! Pipeline composition root and the report stream.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::stream::{Stream, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, trace};

use stumbler_model::{
    AirPressureSample, BluetoothBeacon, CellTower, LocationSample, Report, WifiAccessPoint,
};

use crate::builder::ReportBuilder;
use crate::clock::Clock;
use crate::collector::collect_devices;
use crate::config::PipelineConfig;
use crate::device_map::SharedDeviceMaps;
use crate::joiner::LocationJoiner;
use crate::source::SampleSource;

/// The raw feeds the pipeline consumes.
///
/// Each is an abstract port (see [`SampleSource`]); the platform
/// acquisition layer decides what actually backs them.
#[derive(Clone)]
pub struct Sources {
    /// Location fixes.
    pub locations: Arc<dyn SampleSource<LocationSample>>,
    /// Barometric pressure samples.
    pub pressures: Arc<dyn SampleSource<AirPressureSample>>,
    /// Cell tower scan batches.
    pub cell_towers: Arc<dyn SampleSource<Vec<CellTower>>>,
    /// Wi-Fi scan batches.
    pub wifi_access_points: Arc<dyn SampleSource<Vec<WifiAccessPoint>>>,
    /// Bluetooth scan batches.
    pub bluetooth_beacons: Arc<dyn SampleSource<Vec<BluetoothBeacon>>>,
}

/// The report-construction pipeline.
///
/// Holds the source ports, the movement signal, the clock, and the
/// configuration. Each call to [`create_reports`](Self::create_reports)
/// starts an independent run.
pub struct ReportPipeline {
    config: PipelineConfig,
    sources: Sources,
    movement: watch::Receiver<bool>,
    clock: Arc<dyn Clock>,
}

impl ReportPipeline {
    /// Wire a pipeline from its collaborators.
    pub fn new(
        config: PipelineConfig,
        sources: Sources,
        movement: watch::Receiver<bool>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            sources,
            movement,
            clock,
        }
    }

    /// Start a run and return its report stream.
    ///
    /// The run owns three background collector tasks plus the
    /// foreground join/build loop; dropping the returned stream tears
    /// all of them down. The stream respects backpressure (report
    /// construction suspends while the consumer lags) and ends when
    /// the location source ends.
    pub fn create_reports(&self) -> ReportStream {
        let (tx, rx) = mpsc::channel(self.config.report_buffer);
        let worker = tokio::spawn(run(
            self.config.clone(),
            self.sources.clone(),
            self.movement.clone(),
            self.clock.clone(),
            tx,
        ));
        ReportStream { rx, worker }
    }
}

/// One pipeline run: three collectors plus the foreground loop.
async fn run(
    config: PipelineConfig,
    sources: Sources,
    movement: watch::Receiver<bool>,
    clock: Arc<dyn Clock>,
    tx: mpsc::Sender<Report>,
) {
    let maps = Arc::new(SharedDeviceMaps::new());

    // The collectors live in a JoinSet owned by this task, so ending
    // or aborting the run tears them down with it.
    let mut collectors = JoinSet::new();
    collectors.spawn(collect_devices(
        "cell",
        movement.clone(),
        sources.cell_towers.clone(),
        maps.clone(),
        |_| true,
    ));
    collectors.spawn(collect_devices(
        "wifi",
        movement.clone(),
        sources.wifi_access_points.clone(),
        maps.clone(),
        WifiAccessPoint::is_publishable,
    ));
    collectors.spawn(collect_devices(
        "bluetooth",
        movement.clone(),
        sources.bluetooth_beacons.clone(),
        maps.clone(),
        |_| true,
    ));

    let builder = ReportBuilder::new(maps, config.clone());
    let mut joiner = LocationJoiner::new();

    let mut locations = sources.locations.subscribe().fuse();
    let mut pressures = sources.pressures.subscribe().fuse();

    loop {
        tokio::select! {
            pressure = pressures.next(), if !pressures.is_done() => {
                if let Some(sample) = pressure {
                    joiner.offer_pressure(sample);
                }
            }
            location = locations.next() => {
                let Some(sample) = location else {
                    debug!("location source ended; finishing run");
                    break;
                };
                if !*movement.borrow() {
                    trace!("ignoring fix while stationary");
                    continue;
                }
                let now_ms = clock.now_ms();
                let Some(pair) = joiner.offer_location(sample, now_ms, &config) else {
                    continue;
                };
                for report in builder.on_pair(&pair, now_ms) {
                    if tx.send(report).await.is_err() {
                        debug!("report consumer gone; finishing run");
                        return;
                    }
                }
            }
        }
    }
}

/// The output of one pipeline run.
///
/// Yields reports in construction order and ends when the run ends.
/// Dropping it cancels the run and every task it owns.
pub struct ReportStream {
    rx: mpsc::Receiver<Report>,
    worker: JoinHandle<()>,
}

impl ReportStream {
    /// Receive the next report, or `None` once the run has ended.
    pub async fn recv(&mut self) -> Option<Report> {
        self.rx.recv().await
    }
}

impl Stream for ReportStream {
    type Item = Report;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Report>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for ReportStream {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
