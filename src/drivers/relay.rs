//! Fan relay driver.
//!
//! The relay board is active low: driving the pin to 0 energises the coil.
//! The domain only ever speaks "on"/"off"; the inversion lives here and
//! nowhere else.
//!
//! On host targets the driver keeps the commanded state in memory so the
//! polarity and self-test logic stay testable.

use log::info;

use crate::app::ports::RelayPort;

/// Pin level for a given fan command (active-low board).
fn drive_level(on: bool) -> bool {
    !on
}

pub struct FanRelay {
    #[cfg(target_os = "espidf")]
    pin: esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyOutputPin, esp_idf_hal::gpio::Output>,
    commanded: bool,
}

impl FanRelay {
    #[cfg(target_os = "espidf")]
    pub fn new(
        pin: esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyOutputPin, esp_idf_hal::gpio::Output>,
    ) -> Self {
        let mut relay = Self {
            pin,
            commanded: true, // force the first set() through
        };
        relay.set(false);
        relay
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self { commanded: false }
    }

    /// Commanded (logical) state.
    pub fn is_on(&self) -> bool {
        self.commanded
    }

    /// Drive the relay. Idempotent; repeated identical commands are no-ops.
    pub fn set(&mut self, on: bool) {
        if on == self.commanded {
            return;
        }
        self.commanded = on;
        self.write_level(drive_level(on));
    }

    /// Boot-time click test: energise briefly so an assembler can hear the
    /// relay and the fan spins up once.
    pub fn self_test(&mut self) {
        info!("relay: self test");
        self.set(true);
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::Ets::delay_ms(300);
        self.set(false);
    }

    #[cfg(target_os = "espidf")]
    fn write_level(&mut self, level_high: bool) {
        use esp_idf_hal::gpio::Level;
        let level = if level_high { Level::High } else { Level::Low };
        if let Err(e) = self.pin.set_level(level) {
            // GPIO writes on an initialised output pin do not fail in
            // practice; log and carry on rather than poisoning the loop.
            log::warn!("relay: gpio write failed: {e}");
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_level(&mut self, _level_high: bool) {}
}

#[cfg(not(target_os = "espidf"))]
impl Default for FanRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayPort for FanRelay {
    fn set_fan(&mut self, on: bool) {
        self.set(on);
    }
}
