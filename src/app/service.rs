//! The application service: one object owning all domain state, driven by
//! `tick` from the main loop.
//!
//! Per tick, in order: mode toggles, sensor acquisition (on cadence), fan
//! control, operator input, display refresh (on cadence), scheduled
//! persistence (on cadence). Input is handled every tick so the panel
//! feels immediate; the cadenced work self-gates through
//! [`Cadence`](crate::scheduler::Cadence).
//!
//! The service talks to the world exclusively through the port traits, so
//! the identical loop runs against real peripherals and test mocks.

use crate::app::events::AppEvent;
use crate::app::ports::{
    DisplayPort, EventSink, InputPort, ModeTogglePort, RelayPort, SensorPort, StoragePort,
};
use crate::config::ClimateConfig;
use crate::control::fan::FanController;
use crate::display;
use crate::menu::{MenuMachine, MenuNode, MenuOutcome};
use crate::mode::{OperatingMode, determine_mode};
use crate::scheduler::Cadence;
use crate::sensors::{self, ClimateSnapshot};
use crate::store::ConfigStore;

pub struct AppService<S, R, I, T, D, St, E> {
    sensors: S,
    relay: R,
    input: I,
    toggles: T,
    display: D,
    storage: St,
    events: E,

    config: ClimateConfig,
    store: ConfigStore,
    menu: MenuMachine,
    fan: FanController,
    mode: OperatingMode,
    snapshot: ClimateSnapshot,
    cadence: Cadence,
    relay_on: bool,
    fault_active: bool,
}

impl<S, R, I, T, D, St, E> AppService<S, R, I, T, D, St, E>
where
    S: SensorPort,
    R: RelayPort,
    I: InputPort,
    T: ModeTogglePort,
    D: DisplayPort,
    St: StoragePort,
    E: EventSink,
{
    /// Build the service: load (or initialise) the configuration, read the
    /// initial mode and drive the relay to a defined off state.
    ///
    /// The first snapshot stays invalid until the sensor cadence fires, so
    /// the fan is guaranteed off through sensor warm-up.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sensors: S,
        mut relay: R,
        input: I,
        mut toggles: T,
        display: D,
        mut storage: St,
        mut events: E,
        now_ms: u64,
    ) -> Self {
        let mut store = ConfigStore::new();
        let config = store.load_or_default(&mut storage);

        let (winter, summer) = toggles.read_toggles();
        let mode = determine_mode(winter, summer);
        events.emit(&AppEvent::Started(mode));

        relay.set_fan(false);

        Self {
            sensors,
            relay,
            input,
            toggles,
            display,
            storage,
            events,
            config,
            store,
            menu: MenuMachine::new(),
            fan: FanController::new(),
            mode,
            snapshot: ClimateSnapshot::default(),
            cadence: Cadence::new(now_ms),
            relay_on: false,
            fault_active: false,
        }
    }

    /// Run one pass of the control loop.
    pub fn tick(&mut self, now_ms: u64) {
        self.refresh_mode();

        if self.cadence.sensor.due(now_ms) {
            self.acquire();
        }

        self.drive_fan(now_ms);
        self.handle_input(now_ms);

        if self.cadence.display.due(now_ms) {
            self.render();
        }

        if self.cadence.persist.due(now_ms)
            && self.store.persist_if_dirty(&self.config, &mut self.storage)
        {
            self.events.emit(&AppEvent::ConfigPersisted);
        }
    }

    fn refresh_mode(&mut self) {
        let (winter, summer) = self.toggles.read_toggles();
        let mode = determine_mode(winter, summer);
        if mode != self.mode {
            self.events.emit(&AppEvent::ModeChanged {
                from: self.mode,
                to: mode,
            });
            self.mode = mode;
        }
    }

    fn acquire(&mut self) {
        self.snapshot = sensors::calibrate(self.sensors.read_raw(), &self.config);
        if self.snapshot.valid {
            if self.fault_active {
                self.fault_active = false;
                self.events.emit(&AppEvent::SensorRecovered);
            }
        } else if !self.fault_active {
            self.fault_active = true;
            self.events.emit(&AppEvent::SensorFault);
        }
    }

    fn drive_fan(&mut self, now_ms: u64) {
        let on = self
            .fan
            .update(self.mode, &self.snapshot, &self.config, now_ms);
        if on != self.relay_on {
            self.relay_on = on;
            self.relay.set_fan(on);
            self.events.emit(&AppEvent::FanChanged { on });
        }
    }

    fn handle_input(&mut self, now_ms: u64) {
        let node_before = self.menu.cursor().node;
        let mut consumed = false;

        let delta = self.input.take_encoder_delta();
        if delta != 0 {
            self.menu.handle_delta(delta, &mut self.config);
            consumed = true;
        }

        if self.input.button_pressed(now_ms) {
            consumed = true;
            match self.menu.handle_button(&mut self.config) {
                MenuOutcome::None => {}
                MenuOutcome::PersistRequested => {
                    if self.store.persist_if_dirty(&self.config, &mut self.storage) {
                        self.events.emit(&AppEvent::ConfigPersisted);
                    }
                }
                MenuOutcome::ResetRequested => {
                    self.config = self.store.reset_to_defaults(&mut self.storage);
                    self.events.emit(&AppEvent::ConfigReset);
                }
            }
        }

        let node_after = self.menu.cursor().node;
        if node_after != node_before {
            self.events.emit(&AppEvent::MenuEntered(node_after));
        }

        // Reflect operator input right away instead of waiting out the
        // display cadence.
        if consumed {
            self.render();
            self.cadence.display.reset(now_ms);
        }
    }

    fn render(&mut self) {
        let cursor = self.menu.cursor();
        let frame = if cursor.node == MenuNode::MainDisplay {
            display::main_view(self.mode, &self.snapshot, self.relay_on)
        } else {
            display::menu_view(cursor, &self.config)
        };
        self.display.render(&frame);
    }

    // ── Introspection (logging, tests) ────────────────────────

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn config(&self) -> &ClimateConfig {
        &self.config
    }

    pub fn fan_active(&self) -> bool {
        self.relay_on
    }

    pub fn menu_node(&self) -> MenuNode {
        self.menu.cursor().node
    }

    pub fn snapshot(&self) -> &ClimateSnapshot {
        &self.snapshot
    }
}
