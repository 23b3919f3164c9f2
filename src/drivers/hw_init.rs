//! Target-side GPIO bring-up: encoder interrupt wiring and the DHT22
//! single-wire transaction.
//!
//! Works on raw `esp-idf-sys` GPIO calls because both jobs are addressed
//! by runtime pin number (ISR context, shared handler) rather than by an
//! owned peripheral.
//!
//! Everything here is target-gated; on host builds the module is empty and
//! the drivers fall back to their simulated backends.

#[cfg(target_os = "espidf")]
mod imp {
    use core::ffi::c_void;

    use esp_idf_sys as sys;

    use crate::drivers::encoder::{DetentCell, QuadratureDecoder};
    use crate::error::{Error, Result, SensorError};
    use crate::pins;

    /// Detents accumulated by the encoder ISR, drained by the control loop.
    pub static ENCODER_DETENTS: DetentCell = DetentCell::new();

    static ENCODER_DECODER: QuadratureDecoder = QuadratureDecoder::new();

    fn esp(err: sys::esp_err_t, what: &'static str) -> Result<()> {
        if err == sys::ESP_OK {
            Ok(())
        } else {
            Err(Error::Init(what))
        }
    }

    fn read_level(gpio: i32) -> bool {
        unsafe { sys::gpio_get_level(gpio) != 0 }
    }

    // Serialised by the GPIO interrupt dispatcher; both encoder pins route
    // here with the same (null) context.
    unsafe extern "C" fn encoder_isr(_: *mut c_void) {
        let a = read_level(pins::ENCODER_A_GPIO);
        let b = read_level(pins::ENCODER_B_GPIO);
        let detent = ENCODER_DECODER.update(a, b);
        if detent != 0 {
            ENCODER_DETENTS.add(detent);
        }
    }

    /// Configure both encoder channels as pulled-up inputs interrupting on
    /// any edge, and attach the shared decode ISR.
    pub fn init_encoder_isr() -> Result<()> {
        let config = sys::gpio_config_t {
            pin_bit_mask: (1u64 << pins::ENCODER_A_GPIO) | (1u64 << pins::ENCODER_B_GPIO),
            mode: sys::gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: sys::gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: sys::gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: sys::gpio_int_type_t_GPIO_INTR_ANYEDGE,
        };
        unsafe {
            esp(sys::gpio_config(&config), "encoder gpio config")?;
            // Already-installed is fine when another driver got there first.
            let rc = sys::gpio_install_isr_service(0);
            if rc != sys::ESP_OK && rc != sys::ESP_ERR_INVALID_STATE {
                return Err(Error::Init("gpio isr service"));
            }
            for gpio in [pins::ENCODER_A_GPIO, pins::ENCODER_B_GPIO] {
                esp(
                    sys::gpio_isr_handler_add(gpio, Some(encoder_isr), core::ptr::null_mut()),
                    "encoder isr handler",
                )?;
            }
        }
        Ok(())
    }

    fn now_us() -> i64 {
        unsafe { sys::esp_timer_get_time() }
    }

    /// Busy-wait until `gpio` reads `level`; returns the wait in µs.
    fn wait_for(gpio: i32, level: bool, timeout_us: i64) -> core::result::Result<i64, SensorError> {
        let start = now_us();
        while read_level(gpio) != level {
            if now_us() - start > timeout_us {
                return Err(SensorError::BusTimeout);
            }
        }
        Ok(now_us() - start)
    }

    /// Run one DHT22 single-wire transaction on `gpio` and return the raw
    /// 5-byte frame (checksum unverified — the decoder owns that).
    ///
    /// Timing-critical: interrupts are masked for the whole frame (~5 ms).
    pub fn dht_read_frame(gpio: i32) -> core::result::Result<[u8; 5], SensorError> {
        unsafe {
            sys::gpio_set_direction(gpio, sys::gpio_mode_t_GPIO_MODE_OUTPUT_OD);
            sys::gpio_set_level(gpio, 0);
        }
        // Start signal: hold low ≥1 ms, then release and listen.
        esp_idf_hal::delay::Ets::delay_ms(2);

        esp_idf_hal::interrupt::free(|| {
            unsafe {
                sys::gpio_set_level(gpio, 1);
                sys::gpio_set_direction(gpio, sys::gpio_mode_t_GPIO_MODE_INPUT);
            }

            // Sensor response: ~80 µs low, ~80 µs high.
            wait_for(gpio, false, 100)?;
            wait_for(gpio, true, 100)?;
            wait_for(gpio, false, 100)?;

            // 40 data bits: 50 µs low preamble, then a high pulse whose
            // width encodes the bit (~26 µs = 0, ~70 µs = 1).
            let mut frame = [0u8; 5];
            for bit in 0..40 {
                wait_for(gpio, true, 80)?;
                let high_us = wait_for(gpio, false, 100)?;
                if high_us > 45 {
                    frame[bit / 8] |= 0x80 >> (bit % 8);
                }
            }
            Ok(frame)
        })
    }
}

#[cfg(target_os = "espidf")]
pub use imp::{ENCODER_DETENTS, dht_read_frame, init_encoder_isr};
