//! Location and air-pressure sample types and the derived position.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provenance of a location fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationProvider {
    /// Raw satellite fix.
    Gps,
    /// Platform fused-location provider.
    Fused,
    /// Network (cell/Wi-Fi) derived fix.
    Network,
}

impl fmt::Display for LocationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gps => write!(f, "gps"),
            Self::Fused => write!(f, "fused"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A raw geographic fix as delivered by the platform.
///
/// Only usable for report construction when `accuracy_m` is present
/// and within the configured ceiling; the pipeline rejects the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSample {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Horizontal accuracy radius in meters, when the provider reports one.
    pub accuracy_m: Option<f64>,
    /// Altitude above the WGS84 ellipsoid in meters, when known.
    pub altitude_m: Option<f64>,
    /// Ground speed in meters per second, when known.
    pub speed_mps: Option<f64>,
    /// Provenance of the fix.
    pub provider: LocationProvider,
    /// Monotonic capture timestamp in milliseconds.
    pub timestamp_ms: u64,
}

/// A barometric pressure sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AirPressureSample {
    /// Pressure in hectopascal.
    pub pressure_hpa: f64,
    /// Monotonic capture timestamp in milliseconds.
    pub timestamp_ms: u64,
}

/// An accepted location, built once per qualifying fix.
///
/// Unlike [`LocationSample`], accuracy is guaranteed present here: a
/// fix without one never becomes a position. The pressure is attached
/// only when a barometer sample close enough in time was available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Horizontal accuracy radius in meters.
    pub accuracy_m: f64,
    /// Altitude above the WGS84 ellipsoid in meters, when known.
    pub altitude_m: Option<f64>,
    /// Ground speed in meters per second, when known.
    pub speed_mps: Option<f64>,
    /// Provenance of the underlying fix.
    pub provider: LocationProvider,
    /// Barometric pressure in hectopascal, when one was attached.
    pub pressure_hpa: Option<f64>,
    /// Monotonic timestamp of the underlying fix in milliseconds.
    pub timestamp_ms: u64,
}

impl Position {
    /// Build a position from an accepted sample and an optional
    /// pressure reading.
    ///
    /// `accuracy_m` is the accuracy the acceptance filter already
    /// validated; passing it explicitly keeps the "no position without
    /// accuracy" invariant out of the optional field.
    pub fn from_sample(
        sample: &LocationSample,
        accuracy_m: f64,
        pressure_hpa: Option<f64>,
    ) -> Self {
        Self {
            latitude: sample.latitude,
            longitude: sample.longitude,
            accuracy_m,
            altitude_m: sample.altitude_m,
            speed_mps: sample.speed_mps,
            provider: sample.provider,
            pressure_hpa,
            timestamp_ms: sample.timestamp_ms,
        }
    }
}
