//! Cooperative interval timers.
//!
//! The control loop never blocks: "waiting" is expressed as elapsed-time
//! gating against the monotonic millisecond clock. Each recurring concern
//! gets a named [`IntervalTimer`] instead of inline subtraction at every
//! call site.

/// A non-blocking periodic timer.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    period_ms: u64,
    last_fire_ms: u64,
}

impl IntervalTimer {
    /// A timer that first fires `period_ms` after `now_ms`.
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        Self {
            period_ms,
            last_fire_ms: now_ms,
        }
    }

    /// True when a full period has elapsed; fires and re-arms.
    pub fn due(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_fire_ms) >= self.period_ms {
            self.last_fire_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Restart the period from `now_ms` without firing.
    pub fn reset(&mut self, now_ms: u64) {
        self.last_fire_ms = now_ms;
    }

    /// Configured period.
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }
}

/// Sensor acquisition interval (ms).
pub const SENSOR_INTERVAL_MS: u64 = 2_000;
/// Display refresh interval (ms).
pub const DISPLAY_INTERVAL_MS: u64 = 500;
/// Scheduled persistence interval (ms).
pub const PERSIST_INTERVAL_MS: u64 = 10_000;

/// The loop's named timers, bundled so the service owns exactly one clock
/// domain. (Button debounce lives inside the input driver.)
pub struct Cadence {
    pub sensor: IntervalTimer,
    pub display: IntervalTimer,
    pub persist: IntervalTimer,
}

impl Cadence {
    pub fn new(now_ms: u64) -> Self {
        Self {
            sensor: IntervalTimer::new(SENSOR_INTERVAL_MS, now_ms),
            display: IntervalTimer::new(DISPLAY_INTERVAL_MS, now_ms),
            persist: IntervalTimer::new(PERSIST_INTERVAL_MS, now_ms),
        }
    }
}
