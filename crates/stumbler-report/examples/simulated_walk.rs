//! Drives the pipeline with a short simulated walk and prints the
//! resulting reports.
//!
//! Run with `cargo run --example simulated_walk`.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use stumbler_report::{
    AirPressureSample, BluetoothBeacon, BroadcastSource, CellKey, CellRadio, CellTower, Clock,
    LocationProvider, LocationSample, MacAddr, MonotonicClock, MovementGate, PipelineConfig,
    ReportPipeline, Sources, WifiAccessPoint,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let gate = MovementGate::new(false);
    let clock = Arc::new(MonotonicClock::new());

    let locations = Arc::new(BroadcastSource::<LocationSample>::new(16));
    let pressures = Arc::new(BroadcastSource::<AirPressureSample>::new(16));
    let cells = Arc::new(BroadcastSource::<Vec<CellTower>>::new(16));
    let wifis = Arc::new(BroadcastSource::<Vec<WifiAccessPoint>>::new(16));
    let bluetooths = Arc::new(BroadcastSource::<Vec<BluetoothBeacon>>::new(16));

    let pipeline = ReportPipeline::new(
        PipelineConfig::default(),
        Sources {
            locations: locations.clone(),
            pressures: pressures.clone(),
            cell_towers: cells.clone(),
            wifi_access_points: wifis.clone(),
            bluetooth_beacons: bluetooths.clone(),
        },
        gate.subscribe(),
        clock.clone(),
    );

    let mut reports = pipeline.create_reports();

    // Feed a short walk past two street corners.
    let feeder = tokio::spawn({
        let clock = clock.clone();
        async move {
            gate.set_moving(true);
            tokio::time::sleep(Duration::from_millis(50)).await;

            for step in 0u64..4 {
                let now = clock.now_ms();

                pressures.publish(AirPressureSample {
                    pressure_hpa: 1013.25 - step as f64 * 0.02,
                    timestamp_ms: now,
                });
                cells.publish(vec![CellTower {
                    radio: CellRadio::Lte,
                    key: CellKey {
                        mcc: 262,
                        mnc: 2,
                        lac: 4711,
                        cell_id: 800 + step,
                        psc: None,
                    },
                    signal_dbm: Some(-90 - step as i16),
                    timestamp_ms: now,
                }]);
                wifis.publish(vec![
                    WifiAccessPoint {
                        mac: MacAddr([0x10, 0x20, 0x30, 0x40, 0x50, step as u8]),
                        ssid: Some(format!("CornerCafe{step}")),
                        signal_dbm: Some(-55),
                        channel: Some(6),
                        frequency_mhz: Some(2437),
                        timestamp_ms: now,
                    },
                    WifiAccessPoint {
                        mac: MacAddr([0x10, 0x20, 0x30, 0x40, 0x60, step as u8]),
                        ssid: Some("Bakery_Guest".to_owned()),
                        signal_dbm: Some(-61),
                        channel: Some(11),
                        frequency_mhz: Some(2462),
                        timestamp_ms: now,
                    },
                    // Opted out; never shows up in a report.
                    WifiAccessPoint {
                        mac: MacAddr([0x10, 0x20, 0x30, 0x40, 0x70, step as u8]),
                        ssid: Some("HomeNet_nomap".to_owned()),
                        signal_dbm: Some(-48),
                        channel: Some(1),
                        frequency_mhz: Some(2412),
                        timestamp_ms: now,
                    },
                ]);
                bluetooths.publish(vec![BluetoothBeacon {
                    mac: MacAddr([0xb0, 0, 0, 0, 0, step as u8]),
                    beacon_type: Some(0x0215),
                    id1: Some("f7826da6-4fa2-4e98-8024-bc5b71e0893e".to_owned()),
                    id2: None,
                    id3: None,
                    signal_dbm: Some(-74),
                    timestamp_ms: now,
                }]);

                tokio::time::sleep(Duration::from_millis(100)).await;
                locations.publish(LocationSample {
                    latitude: 52.5200 + step as f64 * 0.0002,
                    longitude: 13.4050 + step as f64 * 0.0003,
                    accuracy_m: Some(12.0),
                    altitude_m: Some(36.0),
                    speed_mps: Some(1.4),
                    provider: LocationProvider::Fused,
                    timestamp_ms: clock.now_ms(),
                });
                tokio::time::sleep(Duration::from_millis(100)).await;
            }

            gate.set_moving(false);
        }
    });

    while let Ok(Some(report)) =
        tokio::time::timeout(Duration::from_secs(1), reports.recv()).await
    {
        info!(
            id = %report.id,
            lat = report.position.latitude,
            lon = report.position.longitude,
            pressure = ?report.position.pressure_hpa,
            cells = report.cell_towers.len(),
            wifis = report.wifi_access_points.len(),
            bluetooths = report.bluetooth_beacons.len(),
            "report"
        );
    }

    let _ = feeder.await;
}
