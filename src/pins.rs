//! Board pin map.
//!
//! One place for every GPIO assignment so a board respin is a one-file
//! change. Numbers are ESP32 GPIO indices.

/// Inside DHT22 data line.
pub const DHT_INSIDE_GPIO: i32 = 4;
/// Outside DHT22 data line.
pub const DHT_OUTSIDE_GPIO: i32 = 5;

/// Fan relay drive (active low — the relay board energises on 0).
pub const FAN_RELAY_GPIO: i32 = 16;

/// Rotary encoder channel A (CLK).
pub const ENCODER_A_GPIO: i32 = 25;
/// Rotary encoder channel B (DT).
pub const ENCODER_B_GPIO: i32 = 26;
/// Encoder push button (active low, internal pull-up).
pub const BUTTON_GPIO: i32 = 27;

/// Winter mode toggle (active low, internal pull-up).
pub const TOGGLE_WINTER_GPIO: i32 = 32;
/// Summer mode toggle (active low, internal pull-up).
pub const TOGGLE_SUMMER_GPIO: i32 = 33;

/// I2C bus for the character display.
pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// PCF8574 backpack address.
pub const LCD_I2C_ADDR: u8 = 0x27;
