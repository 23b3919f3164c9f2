//! Rotary encoder: quadrature decode plus the ISR→loop hand-off cell.
//!
//! The ISR decodes Gray-code transitions into signed detents and adds them
//! to a [`DetentCell`]. The control loop drains the cell with a single
//! atomic swap, so detents can never be double-counted or lost between the
//! read and the clear.

use core::sync::atomic::{AtomicI8, AtomicI32, AtomicU8, Ordering};

/// Single-producer (ISR) / single-consumer (loop) accumulator.
pub struct DetentCell(AtomicI32);

impl DetentCell {
    pub const fn new() -> Self {
        Self(AtomicI32::new(0))
    }

    /// ISR side: accumulate one or more detents.
    pub fn add(&self, detents: i32) {
        self.0.fetch_add(detents, Ordering::Release);
    }

    /// Loop side: consume everything accumulated so far, atomically.
    pub fn take(&self) -> i32 {
        self.0.swap(0, Ordering::AcqRel)
    }
}

impl Default for DetentCell {
    fn default() -> Self {
        Self::new()
    }
}

// Gray-code transition table, indexed by (previous_state << 2) | new_state
// where a state is (A << 1) | B. Valid clockwise quarter steps score +1,
// counter-clockwise -1, everything else (no move, contact bounce skips) 0.
#[rustfmt::skip]
const TRANSITIONS: [i8; 16] = [
     0, -1,  1,  0,
     1,  0,  0, -1,
    -1,  0,  0,  1,
     0,  1, -1,  0,
];

/// Quarter steps per mechanical detent on the fitted encoder.
const QUARTERS_PER_DETENT: i8 = 4;

/// Stateful quadrature decoder. One instance per encoder, fed from the
/// edge ISR with the sampled channel levels.
///
/// State lives in relaxed atomics so a `static` instance can be shared
/// with the ISR. Single producer only: the GPIO interrupt dispatcher
/// serialises edge callbacks, so `update` is never re-entered.
pub struct QuadratureDecoder {
    state: AtomicU8,
    quarters: AtomicI8,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(0),
            quarters: AtomicI8::new(0),
        }
    }

    /// Feed one sample of both channels. Returns -1, 0 or +1 detents.
    pub fn update(&self, a: bool, b: bool) -> i32 {
        let new_state = (u8::from(a) << 1) | u8::from(b);
        let old_state = self.state.swap(new_state, Ordering::Relaxed);
        let step = TRANSITIONS[usize::from((old_state << 2) | new_state)];

        let quarters = self.quarters.load(Ordering::Relaxed) + step;
        if quarters.abs() >= QUARTERS_PER_DETENT {
            self.quarters.store(0, Ordering::Relaxed);
            i32::from(quarters.signum())
        } else {
            self.quarters.store(quarters, Ordering::Relaxed);
            0
        }
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One full clockwise cycle: (A,B) 00 → 10 → 11 → 01 → 00.
    const CW: [(bool, bool); 4] = [(true, false), (true, true), (false, true), (false, false)];
    const CCW: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];

    #[test]
    fn full_cw_cycle_is_one_detent() {
        let d = QuadratureDecoder::new();
        let total: i32 = CW.iter().map(|&(a, b)| d.update(a, b)).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn full_ccw_cycle_is_one_negative_detent() {
        let d = QuadratureDecoder::new();
        let total: i32 = CCW.iter().map(|&(a, b)| d.update(a, b)).sum();
        assert_eq!(total, -1);
    }

    #[test]
    fn bounce_within_a_detent_cancels_out() {
        let d = QuadratureDecoder::new();
        // Forward a quarter step, bounce back: no detent.
        assert_eq!(d.update(true, false), 0);
        assert_eq!(d.update(false, false), 0);
        assert_eq!(d.update(true, false), 0);
        assert_eq!(d.update(false, false), 0);
    }

    #[test]
    fn repeated_cycles_accumulate() {
        let d = QuadratureDecoder::new();
        let cell = DetentCell::new();
        for _ in 0..3 {
            for &(a, b) in &CW {
                cell.add(d.update(a, b));
            }
        }
        assert_eq!(cell.take(), 3);
        // A take drains: nothing left for the next consumer call.
        assert_eq!(cell.take(), 0);
    }

    #[test]
    fn take_is_read_and_clear() {
        let cell = DetentCell::new();
        cell.add(2);
        cell.add(-1);
        assert_eq!(cell.take(), 1);
        assert_eq!(cell.take(), 0);
    }
}
