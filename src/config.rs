//! Climate configuration parameters
//!
//! All user-tunable setpoints and calibration offsets for the controller.
//! Values are edited through the rotary-encoder menu and persisted to
//! EEPROM-style storage by the [`ConfigStore`](crate::store::ConfigStore).

use serde::{Deserialize, Serialize};

/// User-facing setpoints plus per-sensor calibration offsets.
///
/// Range enforcement happens at the point of mutation (the menu edit
/// handlers clamp every adjustment), so a constructed `ClimateConfig` is
/// always within the documented bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateConfig {
    // --- Setpoints ---
    /// Target inside temperature (°C).
    pub target_temp: f32,
    /// Target inside relative humidity (%).
    pub target_humidity: f32,
    /// Temperature floor below which ventilation with colder outside air
    /// is never allowed (°C).
    pub min_temp: f32,

    // --- Calibration offsets (added to raw readings) ---
    /// Inside temperature offset (°C).
    pub temp_offset_inside: f32,
    /// Inside humidity offset (%).
    pub hum_offset_inside: f32,
    /// Outside temperature offset (°C).
    pub temp_offset_outside: f32,
    /// Outside humidity offset (%).
    pub hum_offset_outside: f32,
}

impl ClimateConfig {
    /// Valid range for `target_temp`.
    pub const TARGET_TEMP_RANGE: (f32, f32) = (5.0, 40.0);
    /// Valid range for `target_humidity`.
    pub const TARGET_HUM_RANGE: (f32, f32) = (30.0, 90.0);
    /// Valid range for `min_temp`.
    pub const MIN_TEMP_RANGE: (f32, f32) = (0.0, 15.0);

    /// Encoder step size for temperature edits (°C per detent).
    pub const TEMP_STEP: f32 = 0.5;
    /// Encoder step size for humidity edits (% per detent).
    pub const HUM_STEP: f32 = 5.0;

    /// The three user-facing setpoints as a tuple, in persisted order.
    /// Used by the store's dirty check (offsets are deliberately excluded).
    pub fn setpoints(&self) -> (f32, f32, f32) {
        (self.target_temp, self.target_humidity, self.min_temp)
    }

    /// True if every setpoint is within its documented range.
    pub fn in_bounds(&self) -> bool {
        let (t_lo, t_hi) = Self::TARGET_TEMP_RANGE;
        let (h_lo, h_hi) = Self::TARGET_HUM_RANGE;
        let (m_lo, m_hi) = Self::MIN_TEMP_RANGE;
        (t_lo..=t_hi).contains(&self.target_temp)
            && (h_lo..=h_hi).contains(&self.target_humidity)
            && (m_lo..=m_hi).contains(&self.min_temp)
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            // Setpoints
            target_temp: 25.0,     // °C
            target_humidity: 60.0, // %
            min_temp: 5.0,         // °C

            // Calibration (neutral until a calibration procedure exists)
            temp_offset_inside: 0.0,
            hum_offset_inside: 0.0,
            temp_offset_outside: 0.0,
            hum_offset_outside: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = ClimateConfig::default();
        assert!(c.in_bounds());
        assert_eq!(c.target_temp, 25.0);
        assert_eq!(c.target_humidity, 60.0);
        assert_eq!(c.min_temp, 5.0);
        assert_eq!(c.temp_offset_inside, 0.0);
        assert_eq!(c.hum_offset_outside, 0.0);
    }

    #[test]
    fn min_temp_below_target_temp_by_default() {
        let c = ClimateConfig::default();
        assert!(
            c.min_temp < c.target_temp,
            "safety floor must sit below the comfort target"
        );
    }

    #[test]
    fn setpoints_exclude_offsets() {
        let mut c = ClimateConfig::default();
        let before = c.setpoints();
        c.temp_offset_inside = 1.5;
        c.hum_offset_outside = -2.0;
        assert_eq!(c.setpoints(), before);
    }

    #[test]
    fn serde_roundtrip() {
        let c = ClimateConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: ClimateConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn out_of_bounds_detected() {
        let c = ClimateConfig {
            target_temp: 45.0,
            ..Default::default()
        };
        assert!(!c.in_bounds());
        let c = ClimateConfig {
            min_temp: -1.0,
            ..Default::default()
        };
        assert!(!c.in_bounds());
    }
}
