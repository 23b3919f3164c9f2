//! Adapters — concrete implementations behind the port traits.
//!
//! Target builds wire the real peripherals; host builds get in-memory
//! stand-ins so the domain core runs unmodified in tests.

pub mod eeprom;
pub mod hardware;
pub mod log_sink;
pub mod time;
