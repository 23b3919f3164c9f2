//! ContainerFan — climate controller firmware for a ventilated enclosure.
//!
//! A fan relay pulls outside air through the enclosure when doing so moves
//! the inside climate toward the configured targets. Two DHT22 sensors
//! (inside/outside), a rotary encoder with push button for the on-device
//! menu, a 16×2 character display and two mode toggle switches make up the
//! rest of the hardware.
//!
//! ## Architecture
//!
//! Hexagonal: the domain core (`control`, `menu`, `store`, `mode`,
//! `scheduler`) is plain Rust with no hardware types, consumed by
//! [`app::service::AppService`] through the port traits in [`app::ports`].
//! Drivers and adapters implement the ports; everything hardware-specific
//! is gated on `target_os = "espidf"` with simulated backends for host
//! builds, so the whole control loop is testable off-target.

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod display;
pub mod drivers;
pub mod error;
pub mod menu;
pub mod mode;
pub mod pins;
pub mod scheduler;
pub mod sensors;
pub mod store;
