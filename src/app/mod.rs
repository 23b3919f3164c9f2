//! Application layer: port traits, outbound events, and the service that
//! orchestrates one control-loop tick.

pub mod events;
pub mod ports;
pub mod service;
