//! Monotonic millisecond clock.
//!
//! The whole firmware runs in a single clock domain: every timestamp the
//! domain sees comes from here. Milliseconds in a `u64` outlive any
//! realistic uptime, so wrap-around is not handled.

/// Monotonic clock, anchored at boot (target) or first use (host).
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    pub fn new() -> Self {
        Self
    }

    /// Milliseconds since the anchor point.
    #[cfg(target_os = "espidf")]
    pub fn now_ms(&self) -> u64 {
        // esp_timer is monotonic from boot and survives light sleep.
        (unsafe { esp_idf_sys::esp_timer_get_time() } / 1_000) as u64
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn now_ms(&self) -> u64 {
        use std::sync::OnceLock;
        use std::time::Instant;

        static ANCHOR: OnceLock<Instant> = OnceLock::new();
        let anchor = ANCHOR.get_or_init(Instant::now);
        u64::try_from(anchor.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
