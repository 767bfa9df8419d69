//! Observed wireless device value objects.
//!
//! Three kinds of device are collected: cell towers, Wi-Fi access
//! points, and Bluetooth beacons. Each carries a stable identity key,
//! an optional signal strength, and a monotonic timestamp. The
//! [`Observed`] trait exposes the key/timestamp pair generically so
//! the collectors, device maps, and the report builder's partitioner
//! are written once and instantiated per kind.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::mac::MacAddr;

/// Capability shared by every observed wireless device.
///
/// `Key` is the device identity: a later observation with the same key
/// replaces an earlier one in the device maps. `timestamp_ms` is
/// monotonic milliseconds, comparable only within one clock domain.
pub trait Observed {
    /// The stable identity of the device.
    type Key: Clone + Eq + Hash + Send + 'static;

    /// Return the identity key of this observation.
    fn key(&self) -> Self::Key;

    /// The monotonic capture timestamp in milliseconds.
    fn timestamp_ms(&self) -> u64;
}

// ---------------------------------------------------------------------------
// CellTower
// ---------------------------------------------------------------------------

/// The radio access technology a cell tower was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRadio {
    /// GSM (2G)
    Gsm,
    /// WCDMA / UMTS (3G)
    Wcdma,
    /// LTE (4G)
    Lte,
    /// NR (5G)
    Nr,
}

impl fmt::Display for CellRadio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gsm => write!(f, "gsm"),
            Self::Wcdma => write!(f, "wcdma"),
            Self::Lte => write!(f, "lte"),
            Self::Nr => write!(f, "nr"),
        }
    }
}

/// Composite cell identity.
///
/// Uniquely names one cell within one radio network; the primary
/// scrambling code disambiguates co-channel WCDMA cells and is absent
/// on other radios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellKey {
    /// Mobile country code.
    pub mcc: u16,
    /// Mobile network code.
    pub mnc: u16,
    /// Location / tracking area code.
    pub lac: u32,
    /// Cell identifier within the area.
    pub cell_id: u64,
    /// Primary scrambling code, when the radio reports one.
    pub psc: Option<u16>,
}

/// A single observation of a cell tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellTower {
    /// The radio access technology.
    pub radio: CellRadio,
    /// The composite cell identity.
    pub key: CellKey,
    /// Signal strength in dBm, when the radio reports one.
    pub signal_dbm: Option<i16>,
    /// Monotonic capture timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl Observed for CellTower {
    type Key = CellKey;

    fn key(&self) -> CellKey {
        self.key
    }

    fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}

// ---------------------------------------------------------------------------
// WifiAccessPoint
// ---------------------------------------------------------------------------

/// SSID suffix by which a network opts out of collection.
pub const NOMAP_SUFFIX: &str = "_nomap";

/// A single observation of a Wi-Fi access point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WifiAccessPoint {
    /// The BSSID of the access point.
    pub mac: MacAddr,
    /// The SSID. `None` or blank means a hidden network.
    pub ssid: Option<String>,
    /// Signal strength in dBm, when the driver reports one.
    pub signal_dbm: Option<i16>,
    /// The 802.11 channel number, when known.
    pub channel: Option<u16>,
    /// Centre frequency in MHz, when known.
    pub frequency_mhz: Option<u16>,
    /// Monotonic capture timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl WifiAccessPoint {
    /// Whether this access point may be collected at all.
    ///
    /// Hidden networks (absent or blank SSID) and networks whose SSID
    /// ends with the case-sensitive suffix `_nomap` have opted out and
    /// must be discarded before they reach the device maps.
    pub fn is_publishable(&self) -> bool {
        match self.ssid.as_deref() {
            None => false,
            Some(ssid) => !ssid.trim().is_empty() && !ssid.ends_with(NOMAP_SUFFIX),
        }
    }
}

impl Observed for WifiAccessPoint {
    type Key = MacAddr;

    fn key(&self) -> MacAddr {
        self.mac
    }

    fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}

// ---------------------------------------------------------------------------
// BluetoothBeacon
// ---------------------------------------------------------------------------

/// A single observation of a Bluetooth beacon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BluetoothBeacon {
    /// The advertised MAC address.
    pub mac: MacAddr,
    /// The beacon layout/type code, when the advertisement carries one.
    pub beacon_type: Option<i32>,
    /// First advertised identifier (e.g. a proximity UUID).
    pub id1: Option<String>,
    /// Second advertised identifier (e.g. a major value).
    pub id2: Option<String>,
    /// Third advertised identifier (e.g. a minor value).
    pub id3: Option<String>,
    /// Signal strength in dBm, when the scanner reports one.
    pub signal_dbm: Option<i16>,
    /// Monotonic capture timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl Observed for BluetoothBeacon {
    type Key = MacAddr;

    fn key(&self) -> MacAddr {
        self.mac
    }

    fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}
