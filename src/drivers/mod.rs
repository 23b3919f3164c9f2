//! Hardware drivers.
//!
//! Each driver keeps its decision logic (debounce, quadrature decode,
//! polarity) in plain host-testable code; only the GPIO touchpoints are
//! target-gated.

pub mod button;
pub mod encoder;
pub mod hw_init;
pub mod relay;
pub mod toggles;
