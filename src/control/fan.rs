//! Fan decision engine.
//!
//! Split in two layers:
//!
//! - [`decide`] — a pure function of (mode, snapshot, config) that answers
//!   "should the fan be running right now?". Mode rules accumulate with
//!   logical OR: a later clause may upgrade the answer false→true within a
//!   tick, never downgrade it.
//! - [`FanController`] — the stateful hysteresis guard that turns the pure
//!   answer into relay commands. Switching on is immediate; switching off
//!   is deferred until the fan has run for at least [`FAN_MIN_ON_MS`], so
//!   noisy readings near a threshold cannot chatter the relay.
//!
//! Two conditions bypass the minimum-run-time hold and force the relay off
//! at once: an invalid sensor snapshot and `MeasureOnly` mode.

use log::info;

use crate::config::ClimateConfig;
use crate::mode::OperatingMode;
use crate::sensors::ClimateSnapshot;

/// Summer rule: with humidity above target, only ventilate while the
/// outside temperature is within this margin below inside (°C).
pub const SUMMER_TEMP_OFFSET: f32 = 2.0;
/// Winter rule: never pull in outside air at or above this temperature (°C).
pub const MAX_WINTER_TEMP: f32 = 15.0;
/// Minimum relay on-time once activated (ms).
pub const FAN_MIN_ON_MS: u64 = 60_000;

/// Pure decision: should the fan be running for this snapshot?
pub fn decide(mode: OperatingMode, snap: &ClimateSnapshot, config: &ClimateConfig) -> bool {
    // Sensor fault: fail safe, no retries. Recovery is the next good read.
    if !snap.valid {
        return false;
    }

    // Safety floor: never cool an already-cold enclosure further.
    if snap.inside_temp <= config.min_temp && snap.outside_temp < snap.inside_temp {
        return false;
    }

    match mode {
        OperatingMode::Summer => {
            let mut run = false;
            // Primary goal: lower the temperature, with humidity in mind.
            if snap.outside_temp < snap.inside_temp {
                if snap.inside_humidity <= config.target_humidity {
                    run = true;
                } else if snap.outside_temp >= snap.inside_temp - SUMMER_TEMP_OFFSET {
                    // Humidity too high: only ventilate when outside is not
                    // much colder and actually drier.
                    run = snap.outside_humidity < snap.inside_humidity;
                }
            }
            // Independent upgrade: outside air clearly drier.
            if snap.inside_humidity > config.target_humidity
                && snap.outside_humidity < snap.inside_humidity - 10.0
            {
                run = true;
            }
            run
        }

        OperatingMode::Winter => {
            let mut run = false;
            // Ventilate when outside is warmer, but below the winter ceiling.
            if snap.outside_temp > snap.inside_temp && snap.outside_temp < MAX_WINTER_TEMP {
                run = true;
            }
            // Independent upgrade: dry out the enclosure when safe.
            if snap.inside_humidity > config.target_humidity
                && snap.outside_humidity < snap.inside_humidity
                && snap.outside_temp > config.min_temp
            {
                run = true;
            }
            run
        }

        OperatingMode::MeasureOnly => false,
    }
}

/// Relay state owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanState {
    /// Whether the relay is currently commanded on.
    pub active: bool,
    /// Monotonic timestamp of the last off→on transition (ms).
    /// Meaningful only while `active` is true.
    pub activated_at_ms: u64,
}

/// Hysteresis guard wrapping the pure decision.
pub struct FanController {
    state: FanState,
}

impl Default for FanController {
    fn default() -> Self {
        Self::new()
    }
}

impl FanController {
    pub fn new() -> Self {
        Self {
            state: FanState {
                active: false,
                activated_at_ms: 0,
            },
        }
    }

    /// Current actuated state.
    pub fn state(&self) -> FanState {
        self.state
    }

    /// Whether the relay is currently commanded on.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Run one control step.
    ///
    /// Computes the pure decision for the snapshot and applies the
    /// hysteresis policy. Returns the relay command for this tick.
    pub fn update(
        &mut self,
        mode: OperatingMode,
        snap: &ClimateSnapshot,
        config: &ClimateConfig,
        now_ms: u64,
    ) -> bool {
        // Mode override: MeasureOnly forces off without consulting the
        // hysteresis timer.
        if mode == OperatingMode::MeasureOnly {
            if self.state.active {
                info!("fan: off (measure-only mode)");
            }
            self.state.active = false;
            return false;
        }

        // Sensor fault: force off immediately, no minimum-run hold.
        if !snap.valid {
            if self.state.active {
                info!("fan: off (sensor fault)");
            }
            self.state.active = false;
            return false;
        }

        let desired = decide(mode, snap, config);

        if desired && !self.state.active {
            self.state.active = true;
            self.state.activated_at_ms = now_ms;
            info!(
                "fan: on (inside {:.1}°C/{:.0}%, outside {:.1}°C/{:.0}%)",
                snap.inside_temp, snap.inside_humidity, snap.outside_temp, snap.outside_humidity
            );
        } else if !desired && self.state.active {
            // Deferred off: hold until the minimum run time has elapsed.
            if now_ms.saturating_sub(self.state.activated_at_ms) >= FAN_MIN_ON_MS {
                self.state.active = false;
                info!("fan: off (demand cleared)");
            }
        }

        self.state.active
    }
}
