//! Shared value types for the stumbler report-construction core.
//!
//! This crate is the shared kernel of the collector: the wireless
//! observation types ([`CellTower`], [`WifiAccessPoint`],
//! [`BluetoothBeacon`]) with their stable identity keys, the raw
//! sensor samples ([`LocationSample`], [`AirPressureSample`]), the
//! derived [`Position`], and the [`Report`] aggregate that pairs one
//! position with the devices observed near it.
//!
//! All timestamps on observations and samples are **monotonic
//! milliseconds** and are only comparable against timestamps from the
//! same clock domain. Wall-clock time appears exactly once, as the
//! [`Report`]'s `reported_at` stamp for downstream persistence.

pub mod device;
pub mod error;
pub mod location;
pub mod mac;
pub mod report;

pub use device::{
    BluetoothBeacon, CellKey, CellRadio, CellTower, Observed, WifiAccessPoint,
};
pub use error::ModelError;
pub use location::{AirPressureSample, LocationProvider, LocationSample, Position};
pub use mac::MacAddr;
pub use report::Report;
