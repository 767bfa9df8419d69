//! The report aggregate: one position plus the devices observed near it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::device::{BluetoothBeacon, CellTower, WifiAccessPoint};
use crate::location::Position;

/// One unit of collector output.
///
/// Pairs a single accepted [`Position`] with the cell towers, Wi-Fi
/// access points, and Bluetooth beacons assigned to it. The pipeline
/// never emits a report whose three device lists are all empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier of this report within the current run.
    pub id: Uuid,
    /// Wall-clock time the report was assembled, for persistence.
    pub reported_at: DateTime<Utc>,
    /// The position the devices below were observed near.
    pub position: Position,
    /// Cell towers assigned to this position.
    pub cell_towers: Vec<CellTower>,
    /// Wi-Fi access points assigned to this position. Always empty or
    /// at least two entries.
    pub wifi_access_points: Vec<WifiAccessPoint>,
    /// Bluetooth beacons assigned to this position.
    pub bluetooth_beacons: Vec<BluetoothBeacon>,
}

impl Report {
    /// Assemble a report for a position.
    pub fn new(
        position: Position,
        cell_towers: Vec<CellTower>,
        wifi_access_points: Vec<WifiAccessPoint>,
        bluetooth_beacons: Vec<BluetoothBeacon>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            reported_at: Utc::now(),
            position,
            cell_towers,
            wifi_access_points,
            bluetooth_beacons,
        }
    }

    /// Whether the report carries no wireless observations at all.
    ///
    /// Empty reports are worthless to a positioning service and are
    /// suppressed by the emission filter.
    pub fn is_empty(&self) -> bool {
        self.cell_towers.is_empty()
            && self.wifi_access_points.is_empty()
            && self.bluetooth_beacons.is_empty()
    }

    /// Total number of observations across all three device lists.
    pub fn observation_count(&self) -> usize {
        self.cell_towers.len() + self.wifi_access_points.len() + self.bluetooth_beacons.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationProvider;
    use crate::mac::MacAddr;

    fn position() -> Position {
        Position {
            latitude: 48.137,
            longitude: 11.576,
            accuracy_m: 10.0,
            altitude_m: None,
            speed_mps: None,
            provider: LocationProvider::Gps,
            pressure_hpa: None,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn empty_report_is_detected() {
        let report = Report::new(position(), vec![], vec![], vec![]);
        assert!(report.is_empty());
        assert_eq!(report.observation_count(), 0);
    }

    #[test]
    fn report_serializes_for_persistence() {
        let report = Report::new(position(), vec![], vec![], vec![]);
        let json: serde_json::Value =
            serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["position"]["latitude"], 48.137);
        assert!(json["id"].is_string());
    }

    #[test]
    fn report_with_any_device_is_not_empty() {
        let beacon = BluetoothBeacon {
            mac: MacAddr([1; 6]),
            beacon_type: None,
            id1: None,
            id2: None,
            id3: None,
            signal_dbm: Some(-75),
            timestamp_ms: 0,
        };
        let report = Report::new(position(), vec![], vec![], vec![beacon]);
        assert!(!report.is_empty());
        assert_eq!(report.observation_count(), 1);
    }
}
