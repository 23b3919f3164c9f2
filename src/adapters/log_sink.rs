//! Event sink that forwards application events to the serial log.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Logs every emitted event. The only sink the firmware ships with.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => info!("event: started in {mode:?} mode"),
            AppEvent::ModeChanged { from, to } => info!("event: mode {from:?} -> {to:?}"),
            AppEvent::FanChanged { on } => info!("event: fan {}", if *on { "on" } else { "off" }),
            AppEvent::SensorFault => warn!("event: sensor fault, fan forced off"),
            AppEvent::SensorRecovered => info!("event: sensors recovered"),
            AppEvent::MenuEntered(node) => info!("event: menu -> {node:?}"),
            AppEvent::ConfigPersisted => info!("event: config persisted"),
            AppEvent::ConfigReset => warn!("event: config reset to defaults"),
        }
    }
}
