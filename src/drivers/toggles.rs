//! Front-panel mode toggle switches.
//!
//! Two independent switches (winter / summer), active low with internal
//! pull-ups. The driver normalises levels to "active" booleans; the mode
//! selector owns the tie-break when both or neither are set.

use crate::app::ports::ModeTogglePort;

#[cfg(not(target_os = "espidf"))]
use core::cell::Cell;

pub struct ModeToggles {
    #[cfg(target_os = "espidf")]
    winter: esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyIOPin, esp_idf_hal::gpio::Input>,
    #[cfg(target_os = "espidf")]
    summer: esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyIOPin, esp_idf_hal::gpio::Input>,
    #[cfg(not(target_os = "espidf"))]
    sim: Cell<(bool, bool)>,
}

impl ModeToggles {
    #[cfg(target_os = "espidf")]
    pub fn new(
        winter: esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyIOPin, esp_idf_hal::gpio::Input>,
        summer: esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyIOPin, esp_idf_hal::gpio::Input>,
    ) -> Self {
        Self { winter, summer }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            sim: Cell::new((false, false)),
        }
    }

    /// Set the simulated switch states (host targets only).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set(&self, winter_active: bool, summer_active: bool) {
        self.sim.set((winter_active, summer_active));
    }

    #[cfg(target_os = "espidf")]
    fn sample(&self) -> (bool, bool) {
        // Active low: a closed switch pulls the line to ground.
        (self.winter.is_low(), self.summer.is_low())
    }

    #[cfg(not(target_os = "espidf"))]
    fn sample(&self) -> (bool, bool) {
        self.sim.get()
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for ModeToggles {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeTogglePort for ModeToggles {
    fn read_toggles(&mut self) -> (bool, bool) {
        self.sample()
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_neither_active() {
        let mut t = ModeToggles::new();
        assert_eq!(t.read_toggles(), (false, false));
    }

    #[test]
    fn sim_states_read_back() {
        let mut t = ModeToggles::new();
        t.sim_set(true, false);
        assert_eq!(t.read_toggles(), (true, false));
        t.sim_set(false, true);
        assert_eq!(t.read_toggles(), (false, true));
    }
}
