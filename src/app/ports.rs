//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, relay, display, inputs, storage) implement these
//! traits. The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::error::StorageError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One raw (uncalibrated) channel pair from a physical transducer.
/// NaN fields signal a failed read.
#[derive(Debug, Clone, Copy)]
pub struct RawClimate {
    pub inside_temp: f32,
    pub inside_humidity: f32,
    pub outside_temp: f32,
    pub outside_humidity: f32,
}

/// Read-side port: the domain calls this to obtain sensor data.
///
/// Implementations return raw readings; the service applies calibration
/// offsets and performs the validity check.
pub trait SensorPort {
    fn read_raw(&mut self) -> RawClimate;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → fan relay)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the fan relay. Idempotent; inverted relay polarity
/// is the adapter's concern, the domain only speaks "on"/"off".
pub trait RelayPort {
    fn set_fan(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Input port (encoder + push button)
// ───────────────────────────────────────────────────────────────

/// Rotary encoder and button input.
pub trait InputPort {
    /// Accumulated signed detents since the last call, consumed atomically
    /// (read-then-clear in one indivisible step relative to the ISR).
    fn take_encoder_delta(&mut self) -> i32;

    /// Debounced press edge: true at most once per accepted press, with a
    /// minimum spacing of 200 ms between accepted presses.
    fn button_pressed(&mut self, now_ms: u64) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Mode toggle port
// ───────────────────────────────────────────────────────────────

/// The two front-panel mode toggles, already normalised to "active" levels.
pub trait ModeTogglePort {
    /// Returns `(winter_active, summer_active)`.
    fn read_toggles(&mut self) -> (bool, bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character display)
// ───────────────────────────────────────────────────────────────

/// Semantic display output. The domain renders a
/// [`DisplayFrame`](crate::display::DisplayFrame) (two fixed-width lines);
/// the adapter owns the physical layout and bus.
pub trait DisplayPort {
    fn render(&mut self, frame: &crate::display::DisplayFrame);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ EEPROM/NVS)
// ───────────────────────────────────────────────────────────────

/// Blockwise persistent storage, addressed by the config store's own
/// internal layout. Offsets are a contract of the store, not a wire format.
pub trait StoragePort {
    /// Fill `buf` from storage starting at `offset`.
    fn read_block(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` to storage starting at `offset`.
    /// Must be atomic with respect to power loss where the backend allows.
    fn write_block(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
