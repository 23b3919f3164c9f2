//! Sensor subsystem — the DHT22 pair and the aggregating [`SensorHub`].
//!
//! The hub owns both sensor drivers and produces a [`ClimateSnapshot`] on
//! each sensor tick. Calibration offsets from the configuration are applied
//! additively *before* the validity check, so a calibrated-but-faulty
//! channel still invalidates the snapshot.

pub mod dht22;

use crate::app::ports::{RawClimate, SensorPort};
use crate::config::ClimateConfig;
use dht22::Dht22Sensor;

/// A point-in-time snapshot of the inside/outside climate.
///
/// Overwritten wholesale on each acquisition tick; there are no partial
/// updates. `valid` is false whenever any component reading is not a
/// number, and the fan decision engine treats an invalid snapshot as an
/// unconditional "fan off".
#[derive(Debug, Clone, Copy)]
pub struct ClimateSnapshot {
    /// Inside temperature (°C), calibration applied.
    pub inside_temp: f32,
    /// Outside temperature (°C), calibration applied.
    pub outside_temp: f32,
    /// Inside relative humidity (%), calibration applied.
    pub inside_humidity: f32,
    /// Outside relative humidity (%), calibration applied.
    pub outside_humidity: f32,
    /// True only if all four readings are finite numbers.
    pub valid: bool,
}

impl Default for ClimateSnapshot {
    fn default() -> Self {
        // Until the first acquisition completes the snapshot is invalid,
        // which keeps the fan off during warm-up.
        Self {
            inside_temp: f32::NAN,
            outside_temp: f32::NAN,
            inside_humidity: f32::NAN,
            outside_humidity: f32::NAN,
            valid: false,
        }
    }
}

/// Aggregates the two DHT22 drivers and produces a unified snapshot.
pub struct SensorHub {
    inside: Dht22Sensor,
    outside: Dht22Sensor,
}

impl SensorHub {
    /// Construct a new hub. Pass in pre-built drivers (built in main where
    /// peripheral ownership is established).
    pub fn new(inside: Dht22Sensor, outside: Dht22Sensor) -> Self {
        Self { inside, outside }
    }

    /// Read both sensors, apply the configured calibration offsets and
    /// run the validity check.
    pub fn read_climate(&mut self, config: &ClimateConfig) -> ClimateSnapshot {
        calibrate(self.read_raw(), config)
    }
}

impl SensorPort for SensorHub {
    fn read_raw(&mut self) -> RawClimate {
        let inside = self.inside.read();
        let outside = self.outside.read();
        RawClimate {
            inside_temp: inside.temperature,
            inside_humidity: inside.humidity,
            outside_temp: outside.temperature,
            outside_humidity: outside.humidity,
        }
    }
}

/// Apply calibration offsets to a raw reading and run the validity check.
///
/// A failed read surfaces as NaN from the driver, which invalidates the
/// whole snapshot — the fan engine then fails safe. Recovery is automatic
/// on the next good acquisition; no retry logic here.
pub fn calibrate(raw: RawClimate, config: &ClimateConfig) -> ClimateSnapshot {
    let inside_temp = raw.inside_temp + config.temp_offset_inside;
    let outside_temp = raw.outside_temp + config.temp_offset_outside;
    let inside_humidity = raw.inside_humidity + config.hum_offset_inside;
    let outside_humidity = raw.outside_humidity + config.hum_offset_outside;

    let valid = inside_temp.is_finite()
        && outside_temp.is_finite()
        && inside_humidity.is_finite()
        && outside_humidity.is_finite();

    ClimateSnapshot {
        inside_temp,
        outside_temp,
        inside_humidity,
        outside_humidity,
        valid,
    }
}
