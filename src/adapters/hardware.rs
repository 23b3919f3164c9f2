//! Target hardware bring-up: owns the peripherals and hands the service a
//! full set of port implementations.
//!
//! Pin assignments live in [`crate::pins`]; this module binds them to the
//! typed peripheral singletons.

#[cfg(target_os = "espidf")]
mod imp {
    use anyhow::Context;
    use esp_idf_hal::gpio::{AnyIOPin, Input, IOPin, OutputPin, Pin, PinDriver, Pull};
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::FromValueType;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    use crate::adapters::eeprom::NvsStorage;
    use crate::app::ports::InputPort;
    use crate::display::lcd::Lcd1602;
    use crate::drivers::button::Button;
    use crate::drivers::hw_init;
    use crate::drivers::relay::FanRelay;
    use crate::drivers::toggles::ModeToggles;
    use crate::pins;
    use crate::sensors::dht22::{Channel, Dht22Sensor};
    use crate::sensors::SensorHub;

    /// Rotary encoder (ISR-fed) plus the polled push button.
    pub struct PanelInput {
        button_pin: PinDriver<'static, AnyIOPin, Input>,
        button: Button,
    }

    impl InputPort for PanelInput {
        fn take_encoder_delta(&mut self) -> i32 {
            hw_init::ENCODER_DETENTS.take()
        }

        fn button_pressed(&mut self, now_ms: u64) -> bool {
            self.button.poll(self.button_pin.is_low(), now_ms)
        }
    }

    /// Everything the control loop talks to, fully initialised.
    pub struct Board {
        pub sensors: SensorHub,
        pub relay: FanRelay,
        pub toggles: ModeToggles,
        pub input: PanelInput,
        pub display: Lcd1602<'static>,
        pub storage: NvsStorage,
    }

    /// Take the peripherals and wire up every adapter.
    pub fn init() -> anyhow::Result<Board> {
        let peripherals = Peripherals::take().context("peripherals already taken")?;
        let p = peripherals.pins;

        debug_assert_eq!(p.gpio16.pin(), pins::FAN_RELAY_GPIO);

        // Relay first so the fan is driven to a defined (off) state before
        // anything else can fail.
        let relay_pin =
            PinDriver::output(p.gpio16.downgrade_output()).context("relay pin")?;
        let relay = FanRelay::new(relay_pin);

        let mut winter = PinDriver::input(p.gpio32.downgrade()).context("winter toggle")?;
        winter.set_pull(Pull::Up).context("winter pull-up")?;
        let mut summer = PinDriver::input(p.gpio33.downgrade()).context("summer toggle")?;
        summer.set_pull(Pull::Up).context("summer pull-up")?;
        let toggles = ModeToggles::new(winter, summer);

        let mut button_pin =
            PinDriver::input(p.gpio27.downgrade()).context("button pin")?;
        button_pin.set_pull(Pull::Up).context("button pull-up")?;
        hw_init::init_encoder_isr().map_err(|e| anyhow::anyhow!("encoder isr: {e}"))?;
        let input = PanelInput {
            button_pin,
            button: Button::new(),
        };

        let i2c_config = I2cConfig::new().baudrate(100.kHz().into());
        let i2c = I2cDriver::new(peripherals.i2c0, p.gpio21, p.gpio22, &i2c_config)
            .context("i2c bus")?;
        let display =
            Lcd1602::new(i2c, pins::LCD_I2C_ADDR).map_err(|e| anyhow::anyhow!("lcd: {e}"))?;

        let storage = NvsStorage::new(
            EspDefaultNvsPartition::take().context("nvs partition")?,
        )
        .map_err(|e| anyhow::anyhow!("nvs: {e}"))?;

        let sensors = SensorHub::new(
            Dht22Sensor::new(Channel::Inside),
            Dht22Sensor::new(Channel::Outside),
        );

        Ok(Board {
            sensors,
            relay,
            toggles,
            input,
            display,
            storage,
        })
    }
}

#[cfg(target_os = "espidf")]
pub use imp::{Board, PanelInput, init};
