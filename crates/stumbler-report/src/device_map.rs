//! The shared device-map arena.
//!
//! Three key-to-device maps (cells, Wi-Fi, Bluetooth) live behind one
//! mutex. Collectors upsert into their slot; the report builder
//! snapshots and clears all three in a single critical section, so a
//! drain never observes a half-applied batch. The lock is held only
//! for the map mutation itself.

use std::collections::HashMap;

use parking_lot::Mutex;

use stumbler_model::{BluetoothBeacon, CellKey, CellTower, MacAddr, Observed, WifiAccessPoint};

/// Everything removed from the maps by one atomic drain.
#[derive(Debug, Default)]
pub struct DrainedDevices {
    /// Cell towers, most recent observation per cell identity.
    pub cells: Vec<CellTower>,
    /// Wi-Fi access points, most recent observation per BSSID.
    pub wifis: Vec<WifiAccessPoint>,
    /// Bluetooth beacons, most recent observation per MAC.
    pub bluetooths: Vec<BluetoothBeacon>,
}

impl DrainedDevices {
    /// Total number of drained devices across all kinds.
    pub fn len(&self) -> usize {
        self.cells.len() + self.wifis.len() + self.bluetooths.len()
    }

    /// Whether the drain produced nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
struct MapsInner {
    cells: HashMap<CellKey, CellTower>,
    wifis: HashMap<MacAddr, WifiAccessPoint>,
    bluetooths: HashMap<MacAddr, BluetoothBeacon>,
}

/// The mutex-guarded arena of the three per-kind device maps.
#[derive(Default)]
pub struct SharedDeviceMaps {
    inner: Mutex<MapsInner>,
}

impl SharedDeviceMaps {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically snapshot and clear all three maps.
    pub fn drain_all(&self) -> DrainedDevices {
        let mut inner = self.inner.lock();
        DrainedDevices {
            cells: inner.cells.drain().map(|(_, d)| d).collect(),
            wifis: inner.wifis.drain().map(|(_, d)| d).collect(),
            bluetooths: inner.bluetooths.drain().map(|(_, d)| d).collect(),
        }
    }

    /// Current entry counts per kind, for logging.
    pub fn counts(&self) -> (usize, usize, usize) {
        let inner = self.inner.lock();
        (inner.cells.len(), inner.wifis.len(), inner.bluetooths.len())
    }
}

/// Upsert access to one kind's slot in the arena.
///
/// Implemented per device kind so the collector task is generic while
/// each instantiation writes to its own map.
pub trait DeviceSlot<T: Observed> {
    /// Insert or overwrite each device under its identity key.
    fn upsert_batch(&self, batch: Vec<T>);
}

impl DeviceSlot<CellTower> for SharedDeviceMaps {
    fn upsert_batch(&self, batch: Vec<CellTower>) {
        let mut inner = self.inner.lock();
        for device in batch {
            inner.cells.insert(device.key(), device);
        }
    }
}

impl DeviceSlot<WifiAccessPoint> for SharedDeviceMaps {
    fn upsert_batch(&self, batch: Vec<WifiAccessPoint>) {
        let mut inner = self.inner.lock();
        for device in batch {
            inner.wifis.insert(device.key(), device);
        }
    }
}

impl DeviceSlot<BluetoothBeacon> for SharedDeviceMaps {
    fn upsert_batch(&self, batch: Vec<BluetoothBeacon>) {
        let mut inner = self.inner.lock();
        for device in batch {
            inner.bluetooths.insert(device.key(), device);
        }
    }
}
