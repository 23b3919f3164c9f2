//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — today that means the serial log.

use crate::menu::MenuNode;
use crate::mode::OperatingMode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// The control loop has started (carries the loaded/derived mode).
    Started(OperatingMode),

    /// The operating mode changed (toggle switches moved).
    ModeChanged {
        from: OperatingMode,
        to: OperatingMode,
    },

    /// The fan relay was commanded to a new state.
    FanChanged { on: bool },

    /// A sensor acquisition produced an invalid snapshot.
    SensorFault,

    /// A previously faulty sensor recovered.
    SensorRecovered,

    /// The menu moved to a different node.
    MenuEntered(MenuNode),

    /// Setpoints were written to persistent storage.
    ConfigPersisted,

    /// Configuration was reset to defaults (and force-persisted).
    ConfigReset,
}
