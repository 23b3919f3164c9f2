//! HD44780 16×2 character LCD behind a PCF8574 I2C backpack.
//!
//! Classic 4-bit initialisation sequence; each byte goes out as two
//! nibbles with an E-clock strobe. The backlight bit is kept high on
//! every transfer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the I2C bus via `esp-idf-hal`.
//! On host/test: [`LogDisplay`] logs rendered frames instead.

use crate::app::ports::DisplayPort;
use crate::display::DisplayFrame;

#[cfg(target_os = "espidf")]
mod hw {
    use super::DisplayFrame;
    use crate::error::{Error, Result};
    use esp_idf_hal::delay::{BLOCK, Ets};
    use esp_idf_hal::i2c::I2cDriver;

    const RS_DATA: u8 = 0b0000_0001;
    const ENABLE: u8 = 0b0000_0100;
    const BACKLIGHT: u8 = 0b0000_1000;

    const CMD_CLEAR: u8 = 0x01;
    const CMD_ENTRY_MODE: u8 = 0x06; // increment, no shift
    const CMD_DISPLAY_ON: u8 = 0x0C; // display on, cursor off
    const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
    const ROW_ADDR: [u8; 2] = [0x00, 0x40];

    /// 16×2 LCD on a PCF8574 I2C expander (default address 0x27).
    pub struct Lcd1602<'d> {
        i2c: I2cDriver<'d>,
        addr: u8,
    }

    impl<'d> Lcd1602<'d> {
        pub fn new(i2c: I2cDriver<'d>, addr: u8) -> Result<Self> {
            let mut lcd = Self { i2c, addr };
            lcd.init()?;
            Ok(lcd)
        }

        fn init(&mut self) -> Result<()> {
            // Power-on: force 8-bit mode three times, then drop to 4-bit.
            Ets::delay_ms(50);
            for _ in 0..3 {
                self.write_nibble(0x30, false)?;
                Ets::delay_ms(5);
            }
            self.write_nibble(0x20, false)?;
            Ets::delay_ms(1);

            self.command(CMD_FUNCTION_4BIT_2LINE)?;
            self.command(CMD_DISPLAY_ON)?;
            self.command(CMD_ENTRY_MODE)?;
            self.clear()?;
            Ok(())
        }

        pub fn clear(&mut self) -> Result<()> {
            self.command(CMD_CLEAR)?;
            Ets::delay_ms(2); // clear needs >1.5 ms
            Ok(())
        }

        pub fn show(&mut self, frame: &DisplayFrame) -> Result<()> {
            self.clear()?;
            for (row, text) in [&frame.line0, &frame.line1].into_iter().enumerate() {
                self.command(0x80 | ROW_ADDR[row])?;
                for byte in text.as_bytes() {
                    self.data(*byte)?;
                }
            }
            Ok(())
        }

        fn command(&mut self, byte: u8) -> Result<()> {
            self.write_byte(byte, false)
        }

        fn data(&mut self, byte: u8) -> Result<()> {
            self.write_byte(byte, true)
        }

        fn write_byte(&mut self, byte: u8, is_data: bool) -> Result<()> {
            self.write_nibble(byte & 0xF0, is_data)?;
            self.write_nibble(byte << 4, is_data)?;
            Ok(())
        }

        fn write_nibble(&mut self, nibble: u8, is_data: bool) -> Result<()> {
            let base = nibble | BACKLIGHT | if is_data { RS_DATA } else { 0 };
            for out in [base | ENABLE, base] {
                self.i2c
                    .write(self.addr, &[out], BLOCK)
                    .map_err(|_| Error::Init("lcd i2c write"))?;
                Ets::delay_us(50);
            }
            Ok(())
        }
    }

    impl crate::app::ports::DisplayPort for Lcd1602<'_> {
        fn render(&mut self, frame: &DisplayFrame) {
            if let Err(e) = self.show(frame) {
                // A dropped frame is cosmetic; the next refresh retries.
                log::warn!("lcd: render failed: {e}");
            }
        }
    }
}

#[cfg(target_os = "espidf")]
pub use hw::Lcd1602;

/// Host-side display adapter: logs each distinct frame.
pub struct LogDisplay {
    last: Option<DisplayFrame>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for LogDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        if self.last.as_ref() != Some(frame) {
            log::info!("display | {:<16} | {:<16}", frame.line0, frame.line1);
            self.last = Some(frame.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_display_accepts_frames() {
        let mut d = LogDisplay::new();
        let mut frame = DisplayFrame::default();
        let _ = frame.line0.push_str("hello");
        d.render(&frame);
        d.render(&frame); // identical frame, no panic, no state change
        assert_eq!(d.last.as_ref().unwrap().line0.as_str(), "hello");
    }
}
