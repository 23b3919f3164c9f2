//! Firmware entry point (ESP-IDF target only).

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use containerfan::adapters::hardware;
use containerfan::adapters::log_sink::LogEventSink;
use containerfan::adapters::time::MonotonicClock;
use containerfan::app::ports::DisplayPort;
use containerfan::app::service::AppService;
use containerfan::display;

/// Loop pacing: short enough that button polling never misses a press.
const TICK_SLEEP_MS: u32 = 10;

fn main() -> Result<()> {
    // Required for correct linking against the ESP-IDF runtime.
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!(
        "containerfan v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
    );

    let mut board = hardware::init()?;

    board.display.render(&display::boot_view());

    // Audible relay click at boot: confirms wiring before the control
    // logic ever commands the fan.
    board.relay.self_test();

    let clock = MonotonicClock::new();
    let mut service = AppService::new(
        board.sensors,
        board.relay,
        board.input,
        board.toggles,
        board.display,
        board.storage,
        LogEventSink::new(),
        clock.now_ms(),
    );

    info!("entering control loop");
    loop {
        service.tick(clock.now_ms());
        FreeRtos::delay_ms(TICK_SLEEP_MS);
    }
}
