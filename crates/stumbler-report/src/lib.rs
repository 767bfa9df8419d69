//! Report-construction pipeline for a crowd-sourced wireless-
//! positioning collector.
//!
//! The pipeline fuses asynchronous streams of location fixes,
//! barometric pressure, and nearby wireless observations into
//! privacy-filtered, deduplicated [`Report`]s. Scanning is gated by an
//! external movement signal; observed devices are buffered in
//! per-kind maps, drained atomically whenever a qualifying location
//! pair is available, and assigned to whichever of the two fixes is
//! nearest in time.
//!
//! Acquisition backends, movement detection, persistence, and upload
//! are collaborators behind the [`SampleSource`], [`MovementGate`],
//! and [`Clock`] seams; this crate only decides what becomes a
//! report.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stumbler_report::{
//!     BroadcastSource, MonotonicClock, MovementGate, PipelineConfig,
//!     ReportPipeline, Sources,
//! };
//!
//! let gate = MovementGate::new(false);
//! let locations = Arc::new(BroadcastSource::new(16));
//! // ... pressure and per-kind device sources alike ...
//! # let pressures = Arc::new(BroadcastSource::new(16));
//! # let cell_towers = Arc::new(BroadcastSource::new(16));
//! # let wifi_access_points = Arc::new(BroadcastSource::new(16));
//! # let bluetooth_beacons = Arc::new(BroadcastSource::new(16));
//!
//! let pipeline = ReportPipeline::new(
//!     PipelineConfig::default(),
//!     Sources {
//!         locations,
//!         pressures,
//!         cell_towers,
//!         wifi_access_points,
//!         bluetooth_beacons,
//!     },
//!     gate.subscribe(),
//!     Arc::new(MonotonicClock::new()),
//! );
//!
//! let mut reports = pipeline.create_reports();
//! while let Some(report) = reports.recv().await {
//!     println!("{} observations near {:.5}, {:.5}",
//!         report.observation_count(),
//!         report.position.latitude,
//!         report.position.longitude);
//! }
//! ```

mod builder;
pub mod clock;
mod collector;
pub mod config;
pub mod device_map;
mod joiner;
pub mod movement;
pub mod pipeline;
pub mod source;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::PipelineConfig;
pub use device_map::{DeviceSlot, DrainedDevices, SharedDeviceMaps};
pub use joiner::LocationPair;
pub use movement::MovementGate;
pub use pipeline::{ReportPipeline, ReportStream, Sources};
pub use source::{BroadcastSource, SampleSource};

// Re-export the shared model so consumers need only this crate.
pub use stumbler_model::{
    AirPressureSample, BluetoothBeacon, CellKey, CellRadio, CellTower, LocationProvider,
    LocationSample, MacAddr, Observed, Position, Report, WifiAccessPoint,
};
