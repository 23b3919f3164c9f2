//! Encoder push button: edge detection plus press-rate debounce.
//!
//! The button is polled (active low, internal pull-up). A press is the
//! high→low edge; accepted presses are spaced at least [`DEBOUNCE_MS`]
//! apart, which also swallows the release bounce.

/// Minimum spacing between accepted presses (ms).
pub const DEBOUNCE_MS: u64 = 200;

/// Detects the falling (press) edge of an active-low button.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    was_low: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one level sample; true exactly on the high→low transition.
    pub fn falling_edge(&mut self, level_low: bool) -> bool {
        let edge = level_low && !self.was_low;
        self.was_low = level_low;
        edge
    }
}

/// Rate limiter over accepted presses.
#[derive(Debug, Default)]
pub struct PressDebouncer {
    last_accepted_ms: Option<u64>,
}

impl PressDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a press at `now_ms` is far enough from the last accepted one.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        match self.last_accepted_ms {
            Some(last) if now_ms.saturating_sub(last) < DEBOUNCE_MS => false,
            _ => {
                self.last_accepted_ms = Some(now_ms);
                true
            }
        }
    }
}

/// The complete button pipeline: sample → edge → debounce.
#[derive(Debug, Default)]
pub struct Button {
    edge: EdgeDetector,
    debounce: PressDebouncer,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one polled sample. True at most once per accepted press.
    pub fn poll(&mut self, level_low: bool, now_ms: u64) -> bool {
        self.edge.falling_edge(level_low) && self.debounce.accept(now_ms)
    }
}
