//! Control subsystem — the fan decision engine and its hysteresis guard.

pub mod fan;
