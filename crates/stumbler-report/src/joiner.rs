//! Location/pressure joiner and the pair buffer.
//!
//! Combine-with-latest semantics: pressure samples only update a cell,
//! location arrivals read it and may produce output. A fix survives
//! only with usable accuracy and acceptable age; each accepted fix
//! shifts the two-slot pair buffer and yields `(prev, current)` for
//! the report builder.

use tracing::debug;

use stumbler_model::{AirPressureSample, LocationSample, Position};

use crate::config::PipelineConfig;

/// The two buffered fixes a drain partitions devices between.
#[derive(Debug, Clone)]
pub struct LocationPair {
    /// The previously accepted position, absent for the first
    /// acceptance of a run.
    pub prev: Option<Position>,
    /// The most recently accepted position.
    pub current: Position,
}

/// Single-consumer state of the location/pressure join.
#[derive(Debug, Default)]
pub(crate) struct LocationJoiner {
    latest_pressure: Option<AirPressureSample>,
    prev: Option<Position>,
    current: Option<Position>,
}

impl LocationJoiner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the most recent pressure sample. Never produces output.
    pub(crate) fn offer_pressure(&mut self, sample: AirPressureSample) {
        self.latest_pressure = Some(sample);
    }

    /// Offer a location fix.
    ///
    /// Returns the shifted `(prev, current)` pair when the fix is
    /// accepted, `None` when it is rejected for missing/excess
    /// accuracy or staleness.
    pub(crate) fn offer_location(
        &mut self,
        sample: LocationSample,
        now_ms: u64,
        config: &PipelineConfig,
    ) -> Option<LocationPair> {
        let accuracy_m = match sample.accuracy_m {
            Some(a) if a <= config.location_max_accuracy_m => a,
            _ => {
                debug!(
                    accuracy = ?sample.accuracy_m,
                    max = config.location_max_accuracy_m,
                    "rejecting fix: accuracy missing or above ceiling"
                );
                return None;
            }
        };

        let age_ms = now_ms.saturating_sub(sample.timestamp_ms);
        if age_ms > config.location_max_age_ms() {
            debug!(age_ms, "rejecting fix: too old");
            return None;
        }

        let pressure_hpa = self
            .latest_pressure
            .filter(|p| sample.timestamp_ms.abs_diff(p.timestamp_ms) <= config.air_pressure_max_age_ms())
            .map(|p| p.pressure_hpa);

        let position = Position::from_sample(&sample, accuracy_m, pressure_hpa);
        self.prev = self.current.replace(position.clone());

        Some(LocationPair {
            prev: self.prev.clone(),
            current: position,
        })
    }
}
