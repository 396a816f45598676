//! Synthetic weather values.
//!
//! The generator owns its random source. The server creates one at start-up
//! and reuses it for every request; tests inject a seeded one.

use std::ops::RangeInclusive;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::protocol::MeasurementType;

/// Produces uniformly distributed values for each [`MeasurementType`].
#[derive(Debug, Clone)]
pub struct WeatherGenerator<R = StdRng> {
    rng: R,
}

impl WeatherGenerator<StdRng> {
    /// Seed from the current UNIX time in seconds.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::seeded(seed)
    }

    /// A generator whose sequence is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WeatherGenerator<R> {
    /// Wrap an existing random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Value for the given measurement type.
    pub fn generate(&mut self, kind: MeasurementType) -> f32 {
        match kind {
            MeasurementType::Temperature => self.temperature(),
            MeasurementType::Humidity => self.humidity(),
            MeasurementType::Wind => self.wind(),
            MeasurementType::Pressure => self.pressure(),
        }
    }

    /// Degrees Celsius.
    pub fn temperature(&mut self) -> f32 {
        self.rng.gen_range(range(MeasurementType::Temperature))
    }

    /// Relative humidity, percent.
    pub fn humidity(&mut self) -> f32 {
        self.rng.gen_range(range(MeasurementType::Humidity))
    }

    /// Wind speed, km/h.
    pub fn wind(&mut self) -> f32 {
        self.rng.gen_range(range(MeasurementType::Wind))
    }

    /// Atmospheric pressure, hPa.
    pub fn pressure(&mut self) -> f32 {
        self.rng.gen_range(range(MeasurementType::Pressure))
    }
}

/// Closed interval the generated values of `kind` fall into.
pub fn range(kind: MeasurementType) -> RangeInclusive<f32> {
    match kind {
        MeasurementType::Temperature => -10.0..=40.0,
        MeasurementType::Humidity => 20.0..=100.0,
        MeasurementType::Wind => 0.0..=100.0,
        MeasurementType::Pressure => 950.0..=1050.0,
    }
}
